//! Human-readable report.
//!
//! For every task: the function table, then the instruction table, each
//! most-sampled first with frequencies relative to all loaded samples.
//! Followed by the grand totals.

use crate::aggregator::{FrequencyTable, SampleProfile};
use std::fmt;

/// Text report of a profile, written through [`fmt::Display`]
pub struct TextReport<'a>(pub &'a SampleProfile);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = self.0;

        for (task_id, histogram) in &profile.tasks {
            writeln!(
                f,
                "Task {} ({} of {} samples)",
                task_id,
                histogram.matched(),
                profile.total_samples
            )?;

            if histogram.matched() == 0 {
                writeln!(f, "  (no matched samples)")?;
                writeln!(f)?;
                continue;
            }

            writeln!(f, "Functions:")?;
            write_table(f, &histogram.functions, profile.total_samples)?;
            writeln!(f, "Instructions:")?;
            write_table(f, &histogram.instructions, profile.total_samples)?;
            writeln!(f)?;
        }

        writeln!(f, "Total samples: {}", profile.total_samples)?;
        writeln!(f, "Unmatched samples: {}", profile.unmatched_samples())?;
        if profile.skipped_records > 0 {
            writeln!(f, "Skipped malformed records: {}", profile.skipped_records)?;
        }

        Ok(())
    }
}

/// Render the report for a profile
///
/// **Public** - pure formatting, same profile gives the same text
pub fn render_report(profile: &SampleProfile) -> String {
    TextReport(profile).to_string()
}

fn write_table(
    out: &mut impl fmt::Write,
    table: &FrequencyTable,
    total_samples: u64,
) -> fmt::Result {
    for entry in table.ranked(total_samples) {
        writeln!(out, "  {}  {}", entry.label, format_frequency(entry.frequency))?;
    }
    Ok(())
}

/// Shortest round-trip decimal, integral values keep one fractional digit
pub fn format_frequency(frequency: f64) -> String {
    if frequency.fract() == 0.0 {
        format!("{:.1}", frequency)
    } else {
        frequency.to_string()
    }
}

/// Print the report to stdout
pub fn print_report(profile: &SampleProfile) {
    print!("{}", TextReport(profile));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::Aggregator;
    use crate::correlator::Attribution;
    use crate::parser::{Sample, TaskId};
    use pretty_assertions::assert_eq;

    fn profile() -> SampleProfile {
        let samples = vec![
            Sample::new("10", "1"),
            Sample::new("20", "1"),
            Sample::new("30", "2"),
            Sample::new("40", "2"),
        ];
        let mut aggregator = Aggregator::new(&samples);
        for (task, function, instruction) in [
            ("1", "<foo>:", "mov"),
            ("1", "<bar>:", "add"),
            ("2", "<foo>:", "mov"),
        ] {
            aggregator
                .record(&Attribution {
                    task_id: TaskId::new(task),
                    address: "0".to_string(),
                    function: Some(function.to_string()),
                    instruction: instruction.to_string(),
                    line_number: 1,
                })
                .unwrap();
        }
        aggregator.finish(vec![samples[3].clone()], 0)
    }

    #[test]
    fn test_render_report() {
        let expected = "\
Task 1 (2 of 4 samples)
Functions:
  <foo>:  0.25
  <bar>:  0.25
Instructions:
  mov  0.25
  add  0.25

Task 2 (1 of 4 samples)
Functions:
  <foo>:  0.25
Instructions:
  mov  0.25

Total samples: 4
Unmatched samples: 1
";
        assert_eq!(render_report(&profile()), expected);
    }

    #[test]
    fn test_text_report_writes_into_any_sink() {
        use std::fmt::Write as _;

        let profile = profile();
        let mut out = String::from("header\n");
        write!(out, "{}", TextReport(&profile)).unwrap();

        assert_eq!(out, format!("header\n{}", render_report(&profile)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let profile = profile();
        assert_eq!(render_report(&profile), render_report(&profile));
    }

    #[test]
    fn test_task_without_matches() {
        let samples = vec![Sample::new("10", "7")];
        let profile = Aggregator::new(&samples).finish(samples.clone(), 2);
        let report = render_report(&profile);

        assert!(report.contains("Task 7 (0 of 1 samples)\n  (no matched samples)"));
        assert!(report.contains("Skipped malformed records: 2"));
    }

    #[test]
    fn test_format_frequency() {
        assert_eq!(format_frequency(1.0), "1.0");
        assert_eq!(format_frequency(0.0), "0.0");
        assert_eq!(format_frequency(0.5), "0.5");
        assert_eq!(format_frequency(1.0 / 3.0), "0.3333333333333333");
    }
}
