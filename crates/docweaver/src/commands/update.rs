//! `docweaver update` and `docweaver update-all` command implementations.

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

use super::{ConfigArgs, build_publisher, render_outcome};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product name to update. Its git source is read from the existing
    /// trunk working copy.
    product: String,

    #[command(flatten)]
    config: ConfigArgs,
}

impl UpdateArgs {
    /// Execute the update command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the product was never
    /// published, or the remote cannot be queried.
    pub fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.info(&format!("Updating {}", self.product));

        let publisher = build_publisher(&config)?;
        let result = publisher.update(&self.product)?;

        render_outcome(&output, &result)
    }
}

/// Arguments for the update-all command.
#[derive(Args)]
pub struct UpdateAllArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

impl UpdateAllArgs {
    /// Execute the update-all command.
    ///
    /// Individual product failures are reported but never abort the sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the workspace cannot be
    /// prepared.
    pub fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.config.load()?;

        output.info(&format!(
            "Updating all products in {}",
            config.workspace_resolved.dir.display()
        ));

        let publisher = build_publisher(&config)?;
        let result = publisher.update_all();

        // Sweep-level lines are only carried on the result, not streamed.
        for message in result.messages() {
            if message.starts_with("Failed") {
                output.warning(message);
            } else {
                output.info(message);
            }
        }

        render_outcome(&output, &result)
    }
}
