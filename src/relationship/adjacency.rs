use crate::error::{RelationError, Result};

/// Neighbour lookup over the ordered segment list of a composite curve.
///
/// Closed curves wrap around; on open curves the first segment has no
/// predecessor and the last has no successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    len: usize,
    closed: bool,
}

impl Adjacency {
    #[must_use]
    pub fn new(len: usize, closed: bool) -> Self {
        Self { len, closed }
    }

    /// Index of the segment before `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::ForeignIndex`] if `index` is out of range.
    pub fn prev(&self, index: usize) -> Result<Option<usize>> {
        self.check(index)?;
        Ok(match index {
            0 if self.closed => Some(self.len - 1),
            0 => None,
            i => Some(i - 1),
        })
    }

    /// Index of the segment after `index`.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::ForeignIndex`] if `index` is out of range.
    pub fn next(&self, index: usize) -> Result<Option<usize>> {
        self.check(index)?;
        Ok(if index + 1 < self.len {
            Some(index + 1)
        } else if self.closed {
            Some(0)
        } else {
            None
        })
    }

    fn check(&self, index: usize) -> Result<()> {
        if index >= self.len {
            return Err(RelationError::ForeignIndex { index, len: self.len }.into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn closed_curve_wraps() {
        let adj = Adjacency::new(4, true);
        assert_eq!(adj.prev(0).unwrap(), Some(3));
        assert_eq!(adj.next(3).unwrap(), Some(0));
        assert_eq!(adj.next(1).unwrap(), Some(2));
    }

    #[test]
    fn open_curve_has_free_ends() {
        let adj = Adjacency::new(3, false);
        assert_eq!(adj.prev(0).unwrap(), None);
        assert_eq!(adj.next(2).unwrap(), None);
        assert_eq!(adj.prev(2).unwrap(), Some(1));
    }

    #[test]
    fn single_closed_segment_is_its_own_neighbour() {
        let adj = Adjacency::new(1, true);
        assert_eq!(adj.prev(0).unwrap(), Some(0));
        assert_eq!(adj.next(0).unwrap(), Some(0));
    }

    #[test]
    fn foreign_index_is_an_error() {
        let adj = Adjacency::new(2, false);
        assert!(adj.next(2).is_err());
        assert!(adj.prev(7).is_err());
    }
}
