//! Position indices kept in sync with the tour during lazy search.

const NULL: u32 = u32::MAX;

/// Dense edge-location matrix: `get(a, b)` is the tour position of `a` iff
/// the tour contains the directed edge `a → b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeIndex {
    data: Vec<u32>,
    size: usize,
}

impl EdgeIndex {
    /// Empty index for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![NULL; size * size],
            size,
        }
    }

    /// Index of every directed edge of the closed `tour`.
    pub fn from_tour(tour: &[usize], size: usize) -> Self {
        let mut index = Self::new(size);
        let n = tour.len();
        for (i, &from) in tour.iter().enumerate() {
            index.set(from, tour[(i + 1) % n], i);
        }
        index
    }

    /// Position of `from` if `from → to` is a tour edge.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Option<usize> {
        match self.data[from * self.size + to] {
            NULL => None,
            p => Some(p as usize),
        }
    }

    #[inline]
    pub fn set(&mut self, from: usize, to: usize, position: usize) {
        self.data[from * self.size + to] = position as u32;
    }

    #[inline]
    pub fn clear(&mut self, from: usize, to: usize) {
        self.data[from * self.size + to] = NULL;
    }
}

/// Dense map from node id to its slot in the unselected buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnselectedIndex {
    data: Vec<u32>,
}

impl UnselectedIndex {
    /// Index of `unselected` for `size` nodes.
    pub fn from_unselected(unselected: &[usize], size: usize) -> Self {
        let mut data = vec![NULL; size];
        for (slot, &node) in unselected.iter().enumerate() {
            data[node] = slot as u32;
        }
        Self { data }
    }

    /// Slot of `node`, or `None` if it is in the tour.
    #[inline]
    pub fn get(&self, node: usize) -> Option<usize> {
        match self.data[node] {
            NULL => None,
            k => Some(k as usize),
        }
    }

    #[inline]
    pub fn set(&mut self, node: usize, slot: usize) {
        self.data[node] = slot as u32;
    }

    #[inline]
    pub fn clear(&mut self, node: usize) {
        self.data[node] = NULL;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_index_from_tour() {
        let index = EdgeIndex::from_tour(&[0, 1, 2], 4);
        assert_eq!(index.get(0, 1), Some(0));
        assert_eq!(index.get(1, 2), Some(1));
        assert_eq!(index.get(2, 0), Some(2));
        assert_eq!(index.get(1, 0), None);
        assert_eq!(index.get(3, 0), None);
    }

    #[test]
    fn test_edge_index_set_clear() {
        let mut index = EdgeIndex::new(3);
        index.set(2, 1, 7);
        assert_eq!(index.get(2, 1), Some(7));
        index.clear(2, 1);
        assert_eq!(index.get(2, 1), None);
    }

    #[test]
    fn test_unselected_index() {
        let mut index = UnselectedIndex::from_unselected(&[2, 5, 1], 6);
        assert_eq!(index.get(2), Some(0));
        assert_eq!(index.get(5), Some(1));
        assert_eq!(index.get(1), Some(2));
        assert_eq!(index.get(0), None);
        index.clear(5);
        index.set(0, 1);
        assert_eq!(index.get(5), None);
        assert_eq!(index.get(0), Some(1));
    }
}
