//! Spanmark - parse Markdown inline syntax into a span tree.
//!
//! This binary provides the CLI interface to the spanmark libraries,
//! reading from files or stdin and printing the parsed tree.

mod cli;

use clap::Parser as ClapParser;
use cli::Cli;
use log::{debug, error, info, LevelFilter};
use std::io::{self, Read, Write};

use spanmark_config::{Config, OutputConfig, OutputFormat};
use spanmark_markdown::{MarkdownLanguage, Node};

fn main() {
    let cli = <Cli as ClapParser>::parse();

    // Handle --paths flag
    if cli.show_paths {
        cli::show_paths();
        return;
    }

    setup_logging(&cli.log_level);
    info!("Spanmark v{}", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Set up logging based on the log level argument.
fn setup_logging(level: &str) {
    let filter = match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Main application logic.
///
/// Returns `Ok(false)` when an input could not be read or its parse was
/// abandoned.
fn run(cli: &Cli) -> spanmark_core::Result<bool> {
    let mut config = Config::load().unwrap_or_default();
    if let Some(ref config_arg) = cli.config {
        config.apply_override(config_arg)?;
        debug!("Merged config override");
    }
    cli.apply_to(&mut config)?;
    debug!("Effective config: {:?}", config);

    let language = MarkdownLanguage::new(config.features.inline_options());

    if cli.should_read_stdin() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        return process("<stdin>", &text, &language, &config.output);
    }

    let mut ok = true;
    for path in &cli.files {
        info!("Processing file: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(text) => {
                ok &= process(&path.display().to_string(), &text, &language, &config.output)?;
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                ok = false;
            }
        }
    }
    Ok(ok)
}

/// Parse one input and print the result. Returns `false` on a fatal diagnostic.
fn process(
    name: &str,
    text: &str,
    language: &MarkdownLanguage,
    output: &OutputConfig,
) -> spanmark_core::Result<bool> {
    let parsed = spanmark_engine::parse(text, Node::document(), language);

    let mut rendered = render(&parsed.root, output);
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    if output.diagnostics {
        for diagnostic in &parsed.diagnostics {
            eprintln!("{}:{}", name, diagnostic);
        }
    }
    Ok(!parsed.is_fatal())
}

fn render(root: &Node, output: &OutputConfig) -> String {
    match output.format {
        OutputFormat::Tree if output.spans => root.dump_with_spans(),
        OutputFormat::Tree => root.dump(),
        OutputFormat::Markdown => root.to_markdown(),
        OutputFormat::Text => root.plain_text(),
    }
}
