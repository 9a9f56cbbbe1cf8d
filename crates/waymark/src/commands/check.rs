//! `waymark check` command implementation.

use std::path::PathBuf;

use clap::Args;
use waymark_config::{CliSettings, Config};
use waymark_index::FsDocIndex;
use waymark_nav::{Sidebar, build_site_nav, load_path};

use crate::error::CliError;
use crate::output::Output;
use crate::site_spec;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Sidebars file to check (overrides config).
    #[arg(short, long)]
    sidebars: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover site.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Run every validation a build would run, without writing anything.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebars: self.sidebars.clone(),
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Sidebars: {}",
            config.docs_resolved.sidebars.display()
        ));
        output.info(&format!(
            "Documents: {}",
            config.docs_resolved.source_dir.display()
        ));

        let set = load_path(&config.docs_resolved.sidebars)?;
        let index = FsDocIndex::scan(config.docs_resolved.source_dir.clone())?;
        tracing::info!(documents = index.len(), "Document index ready");

        let spec = site_spec::from_config(&config)?;
        build_site_nav(&spec, &set, &index)?;

        if set.is_empty() {
            output.warning("Sidebars file defines no sidebars");
        }
        let entries: usize = set.iter().map(Sidebar::doc_count).sum();
        output.success(&format!(
            "Sidebars OK: {} sidebar(s), {} document entries",
            set.len(),
            entries
        ));
        Ok(())
    }
}
