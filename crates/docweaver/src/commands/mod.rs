//! CLI command implementations.

pub mod publish;
pub mod update;

pub use publish::PublishArgs;
pub use update::{UpdateAllArgs, UpdateArgs};

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use dw_config::{CliSettings, Config};
use dw_product::{ProductMaker, ProductSettings};
use dw_publish::{DocumentationPublisher, ProductPublisher, PublishResult, Reporter};
use dw_storage::{DiskFilesystem, Filesystem};
use dw_vcs::{GitRunner, Vcs};

use crate::error::CliError;
use crate::output::{ConsoleReporter, Output};

/// Configuration options shared by every command.
#[derive(Args)]
pub struct ConfigArgs {
    /// Path to configuration file (default: auto-discover docweaver.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Workspace directory (overrides config).
    #[arg(long)]
    workspace_dir: Option<PathBuf>,

    /// Public assets directory (overrides config).
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Trunk branch name (overrides config).
    #[arg(long)]
    trunk: Option<String>,
}

impl ConfigArgs {
    /// Load configuration, applying any command-line overrides.
    fn load(&self) -> Result<Config, CliError> {
        let settings = CliSettings {
            workspace_dir: self.workspace_dir.clone(),
            assets_dir: self.assets_dir.clone(),
            trunk: self.trunk.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::debug!(config_path = ?config.config_path, "Configuration loaded");
        Ok(config)
    }
}

/// Assemble the publishing stack described by the configuration.
fn build_publisher(config: &Config) -> Result<DocumentationPublisher, CliError> {
    let filesystem: Arc<dyn Filesystem> = Arc::new(DiskFilesystem::new());
    let vcs: Arc<dyn Vcs> = Arc::new(
        GitRunner::new()
            .with_binary(config.vcs.binary.clone())
            .with_timeout(config.vcs.timeout()),
    );

    let maker = ProductMaker::new(
        Arc::clone(&filesystem),
        ProductSettings {
            worded_default_allowed: config.versions.allow_worded_default,
            route_prefix: config.site.route_prefix.clone(),
        },
    );

    let mut publisher = ProductPublisher::new(vcs, Arc::clone(&filesystem))
        .with_trunk(config.versions.trunk.clone());
    if let Some(assets_dir) = &config.workspace_resolved.assets_dir {
        publisher = publisher.with_assets_dir(assets_dir);
    }

    let documentation = DocumentationPublisher::new(
        config.workspace_resolved.dir.clone(),
        filesystem,
        maker,
        publisher,
    )?
    .with_reporter(Arc::new(ConsoleReporter::new()) as Arc<dyn Reporter>);

    Ok(documentation)
}

/// Print the outcome summary and map a failed result to a process failure.
fn render_outcome(output: &Output, result: &PublishResult) -> Result<(), CliError> {
    let elapsed = result
        .extra("execution_time")
        .and_then(serde_json::Value::as_f64);

    if result.is_success() {
        match elapsed {
            Some(secs) => output.success(&format!("Done in {secs:.2}s.")),
            None => output.success("Done."),
        }
        Ok(())
    } else {
        let reason = result.error().unwrap_or("publishing failed");
        Err(CliError::Failed(reason.to_owned()))
    }
}
