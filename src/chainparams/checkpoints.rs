//! Checkpoint tables
//!
//! A checkpoint pins the hash expected at a height; blocks below the last
//! checkpoint cannot be reorganised away. The summary statistics feed the
//! sync-progress estimate.

use std::collections::BTreeMap;

use crate::crypto::Hash;

use super::error::{ChainParamsError, Result};

/// Signature checks make post-checkpoint blocks this much more expensive
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Per-network checkpoint data
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u32, Hash>,
    /// UNIX timestamp of last checkpoint block
    last_checkpoint_time: i64,
    /// Total number of transactions between genesis and last checkpoint
    tx_count_at_last_checkpoint: u64,
    /// Estimated number of transactions per day after checkpoint
    estimated_tx_per_day_after: f64,
}

impl CheckpointData {
    /// Build a table from `(height, hash)` pairs in strictly increasing height order
    pub fn new(
        entries: Vec<(u32, Hash)>,
        last_checkpoint_time: i64,
        tx_count_at_last_checkpoint: u64,
        estimated_tx_per_day_after: f64,
    ) -> Result<Self> {
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(ChainParamsError::CheckpointOrder {
                    previous: pair[0].0,
                    next: pair[1].0,
                });
            }
        }

        Ok(Self {
            checkpoints: entries.into_iter().collect(),
            last_checkpoint_time,
            tx_count_at_last_checkpoint,
            estimated_tx_per_day_after,
        })
    }

    /// Expected hash at `height`, if that height is checkpointed
    pub fn lookup(&self, height: u32) -> Option<&Hash> {
        self.checkpoints.get(&height)
    }

    /// A block passes unless a checkpoint at its height names a different hash
    pub fn check_block(&self, height: u32, hash: &Hash) -> bool {
        self.lookup(height).map_or(true, |expected| expected == hash)
    }

    /// Height of the last checkpoint, a lower bound on the chain height
    pub fn total_blocks_estimate(&self) -> u32 {
        self.checkpoints.keys().next_back().copied().unwrap_or(0)
    }

    /// Highest checkpoint whose block the caller already has
    pub fn last_known_checkpoint<F>(&self, mut is_known: F) -> Option<(u32, &Hash)>
    where
        F: FnMut(&Hash) -> bool,
    {
        self.checkpoints
            .iter()
            .rev()
            .find(|(_, hash)| is_known(hash))
            .map(|(height, hash)| (*height, hash))
    }

    /// Iterate checkpoints in height order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Hash)> {
        self.checkpoints.iter().map(|(height, hash)| (*height, hash))
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn last_checkpoint_time(&self) -> i64 {
        self.last_checkpoint_time
    }

    pub fn tx_count_at_last_checkpoint(&self) -> u64 {
        self.tx_count_at_last_checkpoint
    }

    pub fn estimated_tx_per_day_after(&self) -> f64 {
        self.estimated_tx_per_day_after
    }

    /// Estimate the fraction of total verification work already done.
    ///
    /// `chain_tx` is the number of transactions up to the tip, `tip_time` the
    /// tip's block time and `now` the current time. Transactions before the
    /// last checkpoint are cheap; later ones cost
    /// [`SIGCHECK_VERIFICATION_FACTOR`] times more when `sigchecks` is set.
    pub fn guess_verification_progress(
        &self,
        chain_tx: u64,
        tip_time: i64,
        now: i64,
        sigchecks: bool,
    ) -> f64 {
        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let per_day = self.estimated_tx_per_day_after;
        let last_tx = self.tx_count_at_last_checkpoint;

        let (work_before, work_after) = if chain_tx <= last_tx {
            let cheap_before = chain_tx as f64;
            let cheap_after = (last_tx - chain_tx) as f64;
            let elapsed = now.saturating_sub(self.last_checkpoint_time).max(0);
            let expensive_after = elapsed as f64 / SECONDS_PER_DAY * per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = last_tx as f64;
            let expensive_before = (chain_tx - last_tx) as f64;
            let elapsed = now.saturating_sub(tip_time).max(0);
            let expensive_after = elapsed as f64 / SECONDS_PER_DAY * per_day;
            (cheap_before + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 1.0;
        }
        work_before / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(n: u8) -> Hash {
        let mut bytes = [0u8; 32];
        bytes[0] = n;
        Hash::from_bytes(bytes)
    }

    fn sample() -> CheckpointData {
        let entries = vec![(0, hash(1)), (100, hash(2)), (250, hash(3))];
        CheckpointData::new(entries, 1_000_000, 500, 1_000.0).unwrap()
    }

    #[test]
    fn test_lookup() {
        let data = sample();
        assert_eq!(data.lookup(100), Some(&hash(2)));
        assert_eq!(data.lookup(101), None);
    }

    #[test]
    fn test_check_block() {
        let data = sample();
        assert!(data.check_block(100, &hash(2)));
        assert!(!data.check_block(100, &hash(9)));
        assert!(data.check_block(101, &hash(9)));
    }

    #[test]
    fn test_rejects_unordered_heights() {
        let err = CheckpointData::new(vec![(10, hash(1)), (10, hash(2))], 0, 0, 0.0).unwrap_err();
        assert_eq!(err, ChainParamsError::CheckpointOrder { previous: 10, next: 10 });

        assert!(CheckpointData::new(vec![(10, hash(1)), (5, hash(2))], 0, 0, 0.0).is_err());
    }

    #[test]
    fn test_total_blocks_estimate() {
        assert_eq!(sample().total_blocks_estimate(), 250);
        let empty = CheckpointData::new(vec![], 0, 0, 0.0).unwrap();
        assert_eq!(empty.total_blocks_estimate(), 0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_last_known_checkpoint() {
        let data = sample();
        let known = [hash(1), hash(2)];
        let found = data.last_known_checkpoint(|h| known.contains(h));
        assert_eq!(found, Some((100, &hash(2))));
        assert_eq!(data.last_known_checkpoint(|_| false), None);
    }

    #[test]
    fn test_progress_before_last_checkpoint() {
        let data = sample();
        // At the checkpoint time with half of the checkpointed transactions
        let progress = data.guess_verification_progress(250, 0, 1_000_000, true);
        assert!((progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_progress_after_last_checkpoint() {
        let data = sample();
        // Tip is current: nothing left to verify
        let progress = data.guess_verification_progress(600, 2_000_000, 2_000_000, true);
        assert!((progress - 1.0).abs() < 1e-9);

        // One day behind at 1000 tx/day: 500 + 100*5 done, 1000*5 left
        let progress = data.guess_verification_progress(600, 0, 86_400, true);
        assert!((progress - 1_000.0 / 6_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_with_extreme_times() {
        let data = sample();

        // A tip from the far past is almost all work left
        let progress = data.guess_verification_progress(600, i64::MIN, i64::MAX, true);
        assert!((0.0..1e-6).contains(&progress));

        let progress = data.guess_verification_progress(250, 0, i64::MAX, false);
        assert!((0.0..1e-6).contains(&progress));

        // A clock behind the tip or the checkpoint counts as caught up
        assert_eq!(data.guess_verification_progress(600, i64::MAX, i64::MIN, true), 1.0);
        let progress = data.guess_verification_progress(250, 0, i64::MIN, true);
        assert!((progress - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_progress_with_empty_statistics() {
        let data = CheckpointData::new(vec![(0, hash(1))], 0, 0, 0.0).unwrap();
        assert_eq!(data.guess_verification_progress(0, 0, 0, false), 1.0);
    }
}
