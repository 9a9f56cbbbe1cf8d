//! `waymark build` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_config::{BrokenLinks, CliSettings, Config};
use waymark_index::FsDocIndex;
use waymark_nav::{build_site_nav, load_path};

use crate::error::CliError;
use crate::output::Output;
use crate::site_spec;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output file for the navigation artifact (default: site-nav.json).
    #[arg(short, long)]
    output_file: Option<PathBuf>,

    /// Sidebars file (overrides config).
    #[arg(short, long)]
    sidebars: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Broken link policy for navbar and footer links (overrides config).
    #[arg(long, value_enum)]
    on_broken_links: Option<BrokenLinksArg>,

    /// Path to configuration file (default: auto-discover site.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

/// Broken link policy values accepted on the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum BrokenLinksArg {
    /// Keep broken links without comment.
    Ignore,
    /// Keep broken links, log a warning.
    Warn,
    /// Fail the build on broken links.
    Throw,
}

impl From<BrokenLinksArg> for BrokenLinks {
    fn from(value: BrokenLinksArg) -> Self {
        match value {
            BrokenLinksArg::Ignore => Self::Ignore,
            BrokenLinksArg::Warn => Self::Warn,
            BrokenLinksArg::Throw => Self::Throw,
        }
    }
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebars: self.sidebars.clone(),
            broken_links: self.on_broken_links.map(Into::into),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let output_file = self
            .output_file
            .unwrap_or_else(|| PathBuf::from("site-nav.json"));

        output.info(&format!(
            "Sidebars: {}",
            config.docs_resolved.sidebars.display()
        ));
        output.info(&format!(
            "Documents: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", output_file.display()));

        let set = load_path(&config.docs_resolved.sidebars)?;
        let index = FsDocIndex::scan(config.docs_resolved.source_dir.clone())?;
        tracing::info!(documents = index.len(), "Document index ready");

        let spec = site_spec::from_config(&config)?;
        let nav = build_site_nav(&spec, &set, &index)?;

        let artifact = serde_json::to_string_pretty(&nav)?;
        std::fs::write(&output_file, artifact)?;

        output.success(&format!(
            "Site navigation written to {}",
            output_file.display()
        ));
        Ok(())
    }
}
