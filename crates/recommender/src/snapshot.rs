//! Hot-swappable recommender snapshot.
//!
//! Queries run against an immutable [`Recommender`]. When the ratings table
//! changes, a new recommender is built off to the side and swapped in with
//! [`SharedRecommender::replace`]. In-flight queries keep the `Arc` they
//! already hold and finish on the old snapshot.

use crate::config::RecommenderConfig;
use crate::error::Result;
use crate::facade::Recommender;
use data_loader::RatingRecord;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct SharedRecommender {
    current: RwLock<Arc<Recommender>>,
}

impl SharedRecommender {
    pub fn new(recommender: Recommender) -> Self {
        Self {
            current: RwLock::new(Arc::new(recommender)),
        }
    }

    /// The snapshot queries should run against right now
    pub fn current(&self) -> Arc<Recommender> {
        self.current.read().clone()
    }

    /// Install a new snapshot, returning the previous one
    pub fn replace(&self, recommender: Recommender) -> Arc<Recommender> {
        let next = Arc::new(recommender);
        let previous = std::mem::replace(&mut *self.current.write(), next);
        info!("Swapped in new recommender snapshot");
        previous
    }

    /// Rebuild from a fresh ratings table and swap it in.
    ///
    /// Training happens before the write lock is taken, so readers are only
    /// blocked for the pointer swap. On error the current snapshot stays.
    pub fn rebuild(
        &self,
        records: impl IntoIterator<Item = RatingRecord>,
        config: RecommenderConfig,
    ) -> Result<()> {
        let recommender = Recommender::from_records(records, config)?;
        self.replace(recommender);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn records(extra_user: bool) -> Vec<RatingRecord> {
        let mut records = vec![
            RatingRecord::new(1, "Heat (1995)", 5.0),
            RatingRecord::new(2, "Heat (1995)", 4.0),
            RatingRecord::new(2, "Casino (1995)", 3.0),
        ];
        if extra_user {
            records.push(RatingRecord::new(3, "Fargo (1996)", 4.0));
        }
        records
    }

    fn shared() -> SharedRecommender {
        let recommender =
            Recommender::from_records(records(false), RecommenderConfig::default()).unwrap();
        SharedRecommender::new(recommender)
    }

    #[test]
    fn test_old_snapshot_survives_replace() {
        let shared = shared();
        let before = shared.current();

        shared.rebuild(records(true), RecommenderConfig::default()).unwrap();

        assert!(!before.contains_user(3));
        assert!(shared.current().contains_user(3));
    }

    #[test]
    fn test_failed_rebuild_keeps_current() {
        let shared = shared();
        let result = shared.rebuild(Vec::new(), RecommenderConfig::default());

        assert!(result.is_err());
        assert!(shared.current().contains_user(2));
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(shared());
        let expected = shared.current().recommend(1, 1, 1).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || shared.current().recommend(1, 1, 1).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
