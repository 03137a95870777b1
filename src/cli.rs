//! Command-line interface for spanmark.

use clap::Parser;
use spanmark_config::{Config, OutputFormat};
use std::path::PathBuf;

/// Spanmark - parse Markdown inline syntax and print the resulting tree.
///
/// Each input is parsed on its own; diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "spanmark",
    author = "Spanmark Contributors",
    version,
    about = "Parse Markdown inline syntax into a span tree",
    after_help = "Examples:\n  \
                  echo '*hi* [there](x)' | spanmark\n  \
                  spanmark -f text notes.md\n  \
                  spanmark -c '[features]\\nHtml = false' --spans doc.md"
)]
pub struct Cli {
    /// Input files to process (reads from stdin if not provided)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    pub log_level: String,

    /// Use a custom config file or inline TOML
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_parser = ["tree", "markdown", "text"])]
    pub format: Option<String>,

    /// Include source ranges in the tree output
    #[arg(long = "spans")]
    pub spans: bool,

    /// Do not print diagnostics
    #[arg(long = "no-diagnostics")]
    pub no_diagnostics: bool,

    /// Show configuration paths and exit
    #[arg(long = "paths")]
    pub show_paths: bool,
}

impl Cli {
    /// Check if we should read from stdin.
    pub fn should_read_stdin(&self) -> bool {
        self.files.is_empty()
    }

    /// Apply command-line flags on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) -> spanmark_core::Result<()> {
        if let Some(format) = &self.format {
            config.output.format = format.parse::<OutputFormat>()?;
        }
        if self.spans {
            config.output.spans = true;
        }
        if self.no_diagnostics {
            config.output.diagnostics = false;
        }
        Ok(())
    }
}

/// Show paths information.
pub fn show_paths() {
    let config_path = Config::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not found)".to_string());

    println!("paths:");
    println!("  config                {}", config_path);
}
