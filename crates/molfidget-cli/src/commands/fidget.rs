use crate::cli::Cli;
use crate::config::PartialShapeConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crate::viewer::ExternalViewer;
use molfidget::engine::progress::ProgressReporter;
use molfidget::engine::viewer::SceneViewer;
use molfidget::workflows;
use tracing::info;

pub fn run(cli: &Cli) -> Result<()> {
    run_with_viewer(cli, &ExternalViewer::new(cli.viewer.as_str()))
}

fn run_with_viewer(cli: &Cli, viewer: &dyn SceneViewer) -> Result<()> {
    let partial_config = PartialShapeConfig::load(cli.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let options = partial_config.merge_with_cli(cli)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    info!("Invoking the fidget workflow on '{}'...", cli.file_name);
    let output = workflows::fidget::run(&cli.file_name, &options, viewer, &reporter)?;

    info!(
        "Workflow finished: {} atoms in {} groups, {} files written.",
        output.molecule.atoms().len(),
        output.molecule.groups().len(),
        output.written_files.len()
    );
    Ok(())
}
