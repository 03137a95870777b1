//! Output configuration.

use serde::{Deserialize, Serialize};
use spanmark_core::SpanmarkError;
use std::str::FromStr;

/// How a parsed document is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented node tree
    #[default]
    Tree,
    /// Markdown re-serialized from the tree
    Markdown,
    /// Plain text with markup removed
    Text,
}

impl FromStr for OutputFormat {
    type Err = SpanmarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tree" => Ok(OutputFormat::Tree),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "text" | "plain" => Ok(OutputFormat::Text),
            other => Err(SpanmarkError::Config(format!(
                "Unknown output format: {}",
                other
            ))),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputConfig {
    /// Rendering of the parsed tree.
    /// Default: tree
    #[serde(default)]
    pub format: OutputFormat,

    /// Print diagnostics to stderr.
    /// Default: true
    #[serde(default = "default_true")]
    pub diagnostics: bool,

    /// Include source ranges in the tree rendering.
    /// Default: false
    #[serde(default)]
    pub spans: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tree,
            diagnostics: true,
            spans: false,
        }
    }
}

impl OutputConfig {
    /// Merge another OutputConfig into this one; every field of `other` wins.
    pub fn merge(&mut self, other: &OutputConfig) {
        *self = other.clone();
    }
}

fn default_true() -> bool {
    true
}
