use crate::ForkId;

/// The fork ids of the rollup, ordered by activation batch number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForkIdIntervals {
    forks: Vec<ForkId>,
}

impl ForkIdIntervals {
    /// Returns an empty [`ForkIdIntervals`].
    pub const fn new() -> Self {
        Self { forks: Vec::new() }
    }

    /// Inserts a fork id. A fork activating at the same batch number is replaced and returned.
    pub fn insert(&mut self, fork: ForkId) -> Option<ForkId> {
        match self.forks.binary_search_by_key(&fork.batch_number, |f| f.batch_number) {
            Ok(index) => Some(std::mem::replace(&mut self.forks[index], fork)),
            Err(index) => {
                self.forks.insert(index, fork);
                None
            }
        }
    }

    /// Returns the fork active at `batch_number`: the latest fork whose activation batch number
    /// is lower or equal to the provided batch number.
    pub fn fork_id_for_batch(&self, batch_number: u64) -> Option<&ForkId> {
        let index = self.forks.partition_point(|f| f.batch_number <= batch_number);
        index.checked_sub(1).and_then(|i| self.forks.get(i))
    }

    /// Returns the fork with the highest activation batch number.
    pub fn latest(&self) -> Option<&ForkId> {
        self.forks.last()
    }

    /// Returns the number of forks.
    pub fn len(&self) -> usize {
        self.forks.len()
    }

    /// Returns true if there are no forks.
    pub fn is_empty(&self) -> bool {
        self.forks.is_empty()
    }

    /// Returns an iterator over the forks, ordered by activation batch number.
    pub fn iter(&self) -> std::slice::Iter<'_, ForkId> {
        self.forks.iter()
    }
}

impl<'a> IntoIterator for &'a ForkIdIntervals {
    type Item = &'a ForkId;
    type IntoIter = std::slice::Iter<'a, ForkId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<ForkId> for ForkIdIntervals {
    fn extend<I: IntoIterator<Item = ForkId>>(&mut self, iter: I) {
        for fork in iter {
            self.insert(fork);
        }
    }
}

impl FromIterator<ForkId> for ForkIdIntervals {
    fn from_iter<I: IntoIterator<Item = ForkId>>(iter: I) -> Self {
        let mut intervals = Self::new();
        intervals.extend(iter);
        intervals
    }
}
