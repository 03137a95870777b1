//! Feature flags configuration.
//!
//! This module contains the `FeaturesConfig` struct which holds one boolean
//! flag per optional inline construct.

use serde::{Deserialize, Serialize};
use spanmark_markdown::InlineOptions;

/// Feature flags configuration.
///
/// Controls which inline constructs the parser recognizes. A disabled
/// construct is parsed as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FeaturesConfig {
    /// `~~strike~~`
    #[serde(default = "default_true")]
    pub strikethrough: bool,

    /// `[^id]`
    #[serde(default = "default_true")]
    pub footnotes: bool,

    /// `[@id]`
    #[serde(default = "default_true")]
    pub citations: bool,

    /// `$x$` and `$$x$$`
    #[serde(default = "default_true")]
    pub formulas: bool,

    /// `<scheme:…>` and bare URLs
    #[serde(default = "default_true")]
    pub autolinks: bool,

    /// Raw HTML tags, comments and character references
    #[serde(default = "default_true")]
    pub html: bool,

    /// `![alt](url)`
    #[serde(default = "default_true")]
    pub images: bool,

    /// `[text](url)` and reference links
    #[serde(default = "default_true")]
    pub links: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self::all_enabled()
    }
}

impl FeaturesConfig {
    /// Merge another FeaturesConfig into this one.
    ///
    /// All fields are copied from `other`; TOML gives no way to tell an
    /// unset flag from one set to its default.
    pub fn merge(&mut self, other: &FeaturesConfig) {
        *self = other.clone();
    }

    /// Create a new FeaturesConfig with all features enabled.
    pub fn all_enabled() -> Self {
        Self::uniform(true)
    }

    /// Create a new FeaturesConfig with all features disabled.
    pub fn all_disabled() -> Self {
        Self::uniform(false)
    }

    fn uniform(enabled: bool) -> Self {
        Self {
            strikethrough: enabled,
            footnotes: enabled,
            citations: enabled,
            formulas: enabled,
            autolinks: enabled,
            html: enabled,
            images: enabled,
            links: enabled,
        }
    }

    /// The parser options these flags select.
    pub fn inline_options(&self) -> InlineOptions {
        InlineOptions {
            strikethrough: self.strikethrough,
            footnotes: self.footnotes,
            citations: self.citations,
            formulas: self.formulas,
            autolinks: self.autolinks,
            html: self.html,
            images: self.images,
            links: self.links,
        }
    }
}

fn default_true() -> bool {
    true
}
