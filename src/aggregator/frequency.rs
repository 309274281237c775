//! Per-task frequency tables over functions and instructions.
//!
//! Tables keep labels in first-seen order so that ranking with a stable
//! sort breaks ties deterministically.

use crate::correlator::{Attribution, Correlation};
use crate::parser::schema::RankedEntry;
use crate::parser::{Sample, TaskId};
use crate::utils::error::AggregateError;
use indexmap::IndexMap;
use log::debug;

/// Label -> sample count, in first-seen label order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, count)| (label.as_str(), *count))
    }

    /// Rows sorted by descending count, ties in first-seen order
    ///
    /// Frequencies are normalized by `total_samples`, the number of samples
    /// loaded from the trace, not by this table's own total.
    pub fn ranked(&self, total_samples: u64) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .iter()
            .map(|(label, count)| RankedEntry {
                label: label.to_string(),
                count,
                frequency: normalize(count, total_samples),
            })
            .collect();

        // stable: equal counts keep insertion order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
    }
}

/// Function and instruction tables of one task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskHistogram {
    pub functions: FrequencyTable,
    pub instructions: FrequencyTable,
}

impl TaskHistogram {
    /// Samples attributed to this task
    pub fn matched(&self) -> u64 {
        self.instructions.total()
    }
}

/// Everything the reporter needs about one run
#[derive(Debug, Clone, Default)]
pub struct SampleProfile {
    /// Tables per task, in first-seen task order
    pub tasks: IndexMap<TaskId, TaskHistogram>,

    /// Samples loaded from the trace
    pub total_samples: u64,

    pub matched_samples: u64,

    /// Samples no disassembly line matched
    pub unmatched: Vec<Sample>,

    /// Malformed trace records that were skipped
    pub skipped_records: u64,
}

impl SampleProfile {
    pub fn unmatched_samples(&self) -> u64 {
        self.unmatched.len() as u64
    }

    pub fn task(&self, task_id: &str) -> Option<&TaskHistogram> {
        self.tasks.get(&TaskId::new(task_id))
    }
}

/// Incremental builder for a [`SampleProfile`]
#[derive(Debug)]
pub struct Aggregator {
    tasks: IndexMap<TaskId, TaskHistogram>,
    total_samples: u64,
    matched_samples: u64,
}

impl Aggregator {
    /// Register every task that appears in the trace
    pub fn new(samples: &[Sample]) -> Self {
        let mut tasks = IndexMap::new();
        for sample in samples {
            tasks
                .entry(sample.task_id.clone())
                .or_insert_with(TaskHistogram::default);
        }

        Self {
            tasks,
            total_samples: samples.len() as u64,
            matched_samples: 0,
        }
    }

    /// Count one attribution
    ///
    /// # Errors
    /// * `AggregateError::UnknownTask` - The task was never registered
    pub fn record(&mut self, attribution: &Attribution) -> Result<(), AggregateError> {
        let histogram = self
            .tasks
            .get_mut(&attribution.task_id)
            .ok_or_else(|| AggregateError::UnknownTask(attribution.task_id.clone()))?;

        histogram.functions.increment(attribution.function_label());
        histogram.instructions.increment(&attribution.instruction);
        self.matched_samples += 1;

        Ok(())
    }

    pub fn finish(self, unmatched: Vec<Sample>, skipped_records: usize) -> SampleProfile {
        SampleProfile {
            tasks: self.tasks,
            total_samples: self.total_samples,
            matched_samples: self.matched_samples,
            unmatched,
            skipped_records: skipped_records as u64,
        }
    }
}

/// Build the profile for one run
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `samples` - Every sample loaded from the trace
/// * `correlation` - Correlator output for those samples
/// * `skipped_records` - Malformed records dropped by the reader
pub fn aggregate(
    samples: &[Sample],
    correlation: Correlation,
    skipped_records: usize,
) -> Result<SampleProfile, AggregateError> {
    let mut aggregator = Aggregator::new(samples);

    for attribution in &correlation.attributions {
        aggregator.record(attribution)?;
    }

    let profile = aggregator.finish(correlation.unmatched, skipped_records);

    debug!(
        "Aggregated {} of {} samples across {} tasks",
        profile.matched_samples,
        profile.total_samples,
        profile.tasks.len()
    );

    Ok(profile)
}

/// Count as a fraction of all loaded samples
pub fn normalize(count: u64, total_samples: u64) -> f64 {
    if total_samples > 0 {
        count as f64 / total_samples as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribution(task: &str, function: Option<&str>, instruction: &str) -> Attribution {
        Attribution {
            task_id: TaskId::new(task),
            address: "1000".to_string(),
            function: function.map(str::to_string),
            instruction: instruction.to_string(),
            line_number: 1,
        }
    }

    #[test]
    fn test_ranked_breaks_ties_by_first_seen() {
        let mut table = FrequencyTable::new();
        for label in ["mov", "add", "add", "mov", "nop", "ret", "ret"] {
            table.increment(label);
        }

        let ranked = table.ranked(10);
        let labels: Vec<&str> = ranked.iter().map(|e| e.label.as_str()).collect();

        assert_eq!(labels, vec!["mov", "add", "ret", "nop"]);
        assert_eq!(ranked[0].count, 2);
        assert_eq!(ranked[0].frequency, 0.2);
        assert_eq!(ranked[3].frequency, 0.1);
    }

    #[test]
    fn test_record_updates_both_tables() {
        let samples = vec![Sample::new("1000", "1"), Sample::new("2000", "1")];
        let mut aggregator = Aggregator::new(&samples);

        aggregator.record(&attribution("1", Some("<foo>:"), "mov")).unwrap();
        aggregator.record(&attribution("1", None, "mov")).unwrap();

        let profile = aggregator.finish(Vec::new(), 0);
        let task = profile.task("1").unwrap();

        assert_eq!(task.functions.get("<foo>:"), 1);
        assert_eq!(task.functions.get(crate::utils::config::UNRESOLVED_FUNCTION_LABEL), 1);
        assert_eq!(task.instructions.get("mov"), 2);
        assert_eq!(task.matched(), 2);
        assert_eq!(profile.matched_samples, 2);
    }

    #[test]
    fn test_unknown_task_is_an_invariant_violation() {
        let samples = vec![Sample::new("1000", "1")];
        let mut aggregator = Aggregator::new(&samples);

        let result = aggregator.record(&attribution("9", Some("<foo>:"), "mov"));
        assert!(matches!(result, Err(AggregateError::UnknownTask(id)) if id.as_str() == "9"));
    }

    #[test]
    fn test_tasks_without_matches_are_kept() {
        let samples = vec![Sample::new("1000", "1"), Sample::new("2000", "2")];
        let profile = Aggregator::new(&samples).finish(vec![samples[1].clone()], 0);

        let order: Vec<&str> = profile.tasks.keys().map(TaskId::as_str).collect();
        assert_eq!(order, vec!["1", "2"]);
        assert_eq!(profile.task("2").unwrap().matched(), 0);
        assert_eq!(profile.unmatched_samples(), 1);
    }

    #[test]
    fn test_normalize_empty_trace() {
        assert_eq!(normalize(0, 0), 0.0);
    }
}
