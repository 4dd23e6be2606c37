use anyhow::Result;
use clap::Parser;
use site_links::{AscentMode, ScanConfig, logging};
use std::path::PathBuf;

/// Report links in a static HTML site that point at files which don't exist.
#[derive(Debug, Parser)]
#[command(name = "site-links", version)]
#[command(about = "Find broken relative links in a static HTML site", long_about = None)]
struct Cli {
    /// Directory levels to descend below the root.
    #[arg(default_value_t = 1)]
    depth: usize,

    /// Site root. Links are resolved against this directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Extra names (or glob patterns) to skip, on top of .git, .gitignore and node_modules.
    #[arg(long, value_name = "NAME")]
    exclude: Vec<String>,

    /// Count only leading `..` segments as ascents instead of every `..` in the link.
    #[arg(long)]
    strict_ascent: bool,

    /// Resolve every link literally, including external and fragment-only ones.
    #[arg(long)]
    check_all: bool,

    /// Exit 0 even when broken links are found.
    #[arg(long)]
    no_fail: bool,

    /// Debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> ScanConfig {
        let mut config = if self.check_all {
            ScanConfig::legacy()
        } else {
            ScanConfig::default()
        };
        if self.strict_ascent {
            config.ascent = AscentMode::Segments;
        }
        config
            .with_root(&self.root)
            .with_depth(self.depth)
            .with_exclude(self.exclude.iter().cloned())
    }
}

fn execute(cli: &Cli) -> Result<bool> {
    let config = cli.config();
    tracing::debug!(?config, "resolved configuration");
    let report = site_links::run(&config)?;
    Ok(report.is_ok() || cli.no_fail)
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::init_logging(cli.verbose) {
        eprintln!("site-links error: {:#}", err);
        std::process::exit(1);
    }

    match execute(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("site-links error: {:#}", err);
            std::process::exit(1);
        }
    }
}
