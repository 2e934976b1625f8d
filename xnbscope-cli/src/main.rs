use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use xnbscope::{TypeReaderRegistry, XnbFile};

/// xnbscope - structured dump of XNB binary asset containers
#[derive(Debug, Parser)]
#[command(name = "xnbscope", version, about, long_about = None)]
struct Cli {
    /// Path to the XNB file to dump.
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show xnbscope warnings on stderr; --verbose enables debug; RUST_LOG overrides
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_module("xnbscope", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    let file = XnbFile::from_path(&cli.path)
        .with_context(|| format!("failed to open XNB file: {}", cli.path.display()))?;

    let registry = TypeReaderRegistry::with_standard_types();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    file.dump(&registry, &mut out)
        .with_context(|| format!("failed to parse XNB file: {}", cli.path.display()))
}
