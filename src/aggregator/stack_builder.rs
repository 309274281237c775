//! Build collapsed stack format from attributions.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "parent;child;grandchild weight"
//!
//! Example: "task 1;<foo>:;mov 42"
//! This means: 42 samples of task 1 landed on a `mov` inside `<foo>:`.

use crate::correlator::Attribution;
use indexmap::IndexMap;
use log::debug;

/// A single collapsed stack entry
///
/// **Public** - used by flamegraph generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string
    pub stack: String,

    /// Weight (number of samples on this stack)
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Line in the folded format consumed by flamegraph renderers
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }
}

/// Build collapsed stacks from attributions
///
/// **Public** - main entry point for stack building
///
/// Frames are task, function, instruction. Stacks come back sorted by
/// weight (descending), ties in first-seen order.
pub fn build_collapsed_stacks(attributions: &[Attribution]) -> Vec<CollapsedStack> {
    debug!("Building collapsed stacks from {} attributions", attributions.len());

    let mut stack_map: IndexMap<String, u64> = IndexMap::new();

    for attribution in attributions {
        let stack = format!(
            "task {};{};{}",
            sanitize_frame(attribution.task_id.as_str()),
            sanitize_frame(attribution.function_label()),
            sanitize_frame(&attribution.instruction)
        );
        *stack_map.entry(stack).or_insert(0) += 1;
    }

    let mut stacks: Vec<CollapsedStack> = stack_map
        .into_iter()
        .map(|(stack, weight)| CollapsedStack::new(stack, weight))
        .collect();

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight));

    debug!("Built {} unique collapsed stacks", stacks.len());

    stacks
}

/// Keep frame separators out of labels
fn sanitize_frame(label: &str) -> String {
    label.replace(';', ",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TaskId;

    fn attribution(task: &str, function: &str, instruction: &str) -> Attribution {
        Attribution {
            task_id: TaskId::new(task),
            address: "1000".to_string(),
            function: Some(function.to_string()),
            instruction: instruction.to_string(),
            line_number: 1,
        }
    }

    #[test]
    fn test_collapsed_stack_to_line() {
        let stack = CollapsedStack::new("task 1;<foo>:;mov".to_string(), 3);
        assert_eq!(stack.to_line(), "task 1;<foo>:;mov 3");
    }

    #[test]
    fn test_build_collapsed_stacks() {
        let attributions = vec![
            attribution("1", "<foo>:", "mov"),
            attribution("2", "<bar>:", "add"),
            attribution("2", "<bar>:", "add"),
            attribution("1", "<foo>:", "mov"),
            attribution("1", "<foo>:", "ret"),
        ];

        let stacks = build_collapsed_stacks(&attributions);

        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks[0], CollapsedStack::new("task 1;<foo>:;mov".to_string(), 2));
        assert_eq!(stacks[1], CollapsedStack::new("task 2;<bar>:;add".to_string(), 2));
        assert_eq!(stacks[2].weight, 1);
    }

    #[test]
    fn test_separator_in_label_is_replaced() {
        let stacks = build_collapsed_stacks(&[attribution("1", "<a;b>:", "nop")]);
        assert_eq!(stacks[0].stack, "task 1;<a,b>:;nop");
    }
}
