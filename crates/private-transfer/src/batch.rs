//! batcher: ordered calls -> fixed-size atomic submission groups

use crate::classify::LedgerCall;

/// calls per utility batch
pub const MAX_BATCH: usize = 2;

/// up to [`MAX_BATCH`] calls submitted as one unit, in input order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Batch<C = LedgerCall> {
    calls: Vec<C>,
}

impl<C> Batch<C> {
    pub fn calls(&self) -> &[C] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<C> {
        self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// split `calls` into consecutive batches of at most [`MAX_BATCH`]
pub fn into_batches<C>(calls: Vec<C>) -> Vec<Batch<C>> {
    group(calls, MAX_BATCH)
}

/// every call in a single batch, for all-or-nothing submission
pub fn single_batch<C>(calls: Vec<C>) -> Vec<Batch<C>> {
    if calls.is_empty() {
        return Vec::new();
    }
    vec![Batch { calls }]
}

fn group<C>(calls: Vec<C>, size: usize) -> Vec<Batch<C>> {
    let mut batches = Vec::with_capacity(calls.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);
    for call in calls {
        current.push(call);
        if current.len() == size {
            batches.push(Batch {
                calls: std::mem::replace(&mut current, Vec::with_capacity(size)),
            });
        }
    }
    if !current.is_empty() {
        batches.push(Batch { calls: current });
    }
    batches
}
