//! Static round-robin assignment of stations to workers.
//!
//! Worker `rank` of `workers` handles station indices
//! `rank, rank + workers, rank + 2 * workers, ...`. Stations are
//! independent, so workers never need to talk to each other.

/// One worker's share of the stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    rank: usize,
    workers: usize,
}

impl Partition {
    /// Create the partition for `rank` among `workers`.
    ///
    /// Returns `None` if `workers` is zero or `rank` is out of range.
    pub fn new(rank: usize, workers: usize) -> Option<Self> {
        (rank < workers).then_some(Partition { rank, workers })
    }

    /// All partitions for `workers` workers.
    pub fn all(workers: usize) -> impl Iterator<Item = Partition> {
        (0..workers).map(move |rank| Partition { rank, workers })
    }

    /// This worker's rank.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Total number of workers.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of stations this worker handles out of `total`.
    pub fn local_count(&self, total: usize) -> usize {
        total / self.workers + usize::from(self.rank < total % self.workers)
    }

    /// Station indices this worker handles out of `total`, in order.
    pub fn indices(&self, total: usize) -> impl Iterator<Item = usize> {
        (self.rank..total).step_by(self.workers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_robin() {
        let p = Partition::new(1, 3).unwrap();
        assert_eq!(p.indices(8).collect::<Vec<_>>(), vec![1, 4, 7]);
        assert_eq!(p.local_count(8), 3);

        let p = Partition::new(2, 3).unwrap();
        assert_eq!(p.indices(8).collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(p.local_count(8), 2);
    }

    #[test]
    fn test_more_workers_than_stations() {
        let p = Partition::new(5, 8).unwrap();
        assert_eq!(p.indices(3).count(), 0);
        assert_eq!(p.local_count(3), 0);
    }

    #[test]
    fn test_invalid_partition() {
        assert!(Partition::new(0, 0).is_none());
        assert!(Partition::new(3, 3).is_none());
    }

    proptest! {
        /// Every station lands in exactly one partition.
        #[test]
        fn prop_partitions_cover_each_station_once(total in 0usize..500, workers in 1usize..33) {
            let mut seen = vec![0u32; total];
            for p in Partition::all(workers) {
                let indices: Vec<usize> = p.indices(total).collect();
                prop_assert_eq!(indices.len(), p.local_count(total));
                for i in indices {
                    prop_assert_eq!(i % workers, p.rank());
                    seen[i] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&n| n == 1));
        }
    }
}
