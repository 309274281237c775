//! SVG flamegraph generation backed by inferno.
//!
//! Collapsed stacks are rendered with three frames per sample:
//! task, enclosing function, instruction.

use crate::aggregator::stack_builder::CollapsedStack;
use crate::utils::config::{DEFAULT_FLAMEGRAPH_TITLE, DEFAULT_FLAMEGRAPH_WIDTH};
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_FLAMEGRAPH_TITLE.to_string(),
            width: DEFAULT_FLAMEGRAPH_WIDTH,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Generate SVG flamegraph from collapsed stacks
///
/// **Public** - main entry point for flamegraph rendering
///
/// # Errors
/// * `FlamegraphError::EmptyStacks` - Nothing was attributed
/// * `FlamegraphError::Render` - inferno failed to render
pub fn generate_flamegraph(
    stacks: &[CollapsedStack],
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyStacks);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let mut options = Options::default();
    options.title = config.title;
    options.count_name = "samples".to_string();
    options.image_width = Some(config.width);

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();
    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::Render(e.to_string()))?;

    let svg = String::from_utf8(svg)?;
    info!("Flamegraph generated successfully ({} bytes)", svg.len());

    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stacks_rejected() {
        let result = generate_flamegraph(&[], None);
        assert!(matches!(result, Err(FlamegraphError::EmptyStacks)));
    }

    #[test]
    fn test_generate_flamegraph() {
        let stacks = vec![
            CollapsedStack::new("task 1;<foo>:;mov".to_string(), 3),
            CollapsedStack::new("task 2;<bar>:;add".to_string(), 1),
        ];
        let config = FlamegraphConfig::new().with_title("Kernel samples");

        let svg = generate_flamegraph(&stacks, Some(&config)).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("Kernel samples"));
        assert!(svg.contains("mov"));
        assert!(svg.contains("task 2"));
    }

    #[test]
    fn test_config_builder() {
        let config = FlamegraphConfig::new().with_width(800);
        assert_eq!(config.width, 800);
        assert_eq!(config.title, DEFAULT_FLAMEGRAPH_TITLE);
    }
}
