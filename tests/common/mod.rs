//! A brute-force ranking used as a reference model.
//!
//! Every operation is a linear scan over an unsorted `Vec`, which makes the
//! expected answer obvious at the cost of speed.

#![allow(dead_code)]

use std::cmp::Ordering;

/// `(score, player)`; compared by score first, then player.
pub type Entry = (i64, u32);

#[derive(Default)]
pub struct SimpleRank {
    entries: Vec<Entry>,
}

impl SimpleRank {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.1 == key)
    }

    fn sorted(&self) -> Vec<Entry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(compare);
        sorted
    }

    pub fn get(&self, key: u32) -> Option<Entry> {
        self.position(key).map(|i| self.entries[i])
    }

    pub fn get_rank(&self, key: u32) -> Option<usize> {
        let entry = self.get(key)?;
        Some(1 + self.entries.iter().filter(|e| compare(e, &entry) == Ordering::Less).count())
    }

    pub fn rank_size(&self) -> usize {
        self.entries.len()
    }

    pub fn rank_in(&self, rank: usize) -> Option<u32> {
        assert!(rank >= 1);
        self.sorted().get(rank - 1).map(|e| e.1)
    }

    pub fn rank_range(&self, from: usize, to: usize) -> Vec<Entry> {
        assert!(from < to);
        let sorted = self.sorted();
        let len = sorted.len();
        let to = to.min(len + 1);
        let from = from.min(len).max(1);
        if from >= to {
            return Vec::new();
        }
        sorted[from - 1..to - 1].to_vec()
    }

    pub fn put(&mut self, entry: Entry) -> Option<Entry> {
        match self.position(entry.1) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn remove(&mut self, key: u32) -> Option<Entry> {
        self.position(key).map(|i| self.entries.swap_remove(i))
    }

    pub fn keys(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.1).collect()
    }
}

pub fn compare(a: &Entry, b: &Entry) -> Ordering {
    a.0.cmp(&b.0).then(a.1.cmp(&b.1))
}

/// Installs a `tracing` subscriber once per test binary.
///
/// Output is filtered by `RUST_LOG` (e.g. `rank_tree=debug`) and captured
/// by the test harness. Events are only emitted when the crate is built
/// with the `tracing` feature.
pub fn init_tracing() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;

    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
