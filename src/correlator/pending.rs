//! Working set of samples that have not been attributed yet.
//!
//! Samples are grouped by address token, each with a FIFO queue of the
//! tasks that produced them. A line that contains an address takes exactly
//! one sample off that address's queue, so no sample is ever attributed twice
//! and a single line never absorbs duplicate samples.

use super::MatchMode;
use crate::parser::{Sample, TaskId};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Pending samples keyed by address, in first-seen address order
#[derive(Debug, Clone, Default)]
pub struct PendingSamples {
    by_address: IndexMap<String, VecDeque<TaskId>>,
    len: usize,
}

impl PendingSamples {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut pending = Self::default();
        for sample in samples {
            pending
                .by_address
                .entry(sample.address.clone())
                .or_default()
                .push_back(sample.task_id.clone());
            pending.len += 1;
        }
        pending
    }

    /// Number of samples still waiting for a match
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove one pending sample for every address found in `text`
    ///
    /// Returned samples are in first-seen address order.
    pub fn take_matches(&mut self, text: &str, mode: MatchMode) -> Vec<Sample> {
        let mut taken = Vec::new();

        for (address, tasks) in self.by_address.iter_mut() {
            if !mode.matches(text, address) {
                continue;
            }
            if let Some(task_id) = tasks.pop_front() {
                taken.push(Sample {
                    address: address.clone(),
                    task_id,
                });
            }
        }

        if !taken.is_empty() {
            self.len -= taken.len();
            self.by_address.retain(|_, tasks| !tasks.is_empty());
        }

        taken
    }

    /// Drain everything that was never matched
    pub fn into_unmatched(self) -> Vec<Sample> {
        self.by_address
            .into_iter()
            .flat_map(|(address, tasks)| {
                tasks.into_iter().map(move |task_id| Sample {
                    address: address.clone(),
                    task_id,
                })
            })
            .collect()
    }
}
