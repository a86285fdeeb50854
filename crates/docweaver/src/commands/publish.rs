//! `docweaver publish` command implementation.

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

use super::{ConfigArgs, build_publisher, render_outcome};

/// Arguments for the publish command.
#[derive(Args)]
pub struct PublishArgs {
    /// Product name. The product directory is its lowercased form.
    product: String,

    /// Git URL or local path to clone versions from.
    source: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the workspace cannot be
    /// prepared, or the trunk branch cannot be published.
    pub fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.info(&format!(
            "Publishing {} from {} into {}",
            self.product,
            self.source,
            config.workspace_resolved.dir.display()
        ));

        let publisher = build_publisher(&config)?;
        let result = publisher.publish(&self.product, &self.source)?;

        render_outcome(&output, &result)
    }
}
