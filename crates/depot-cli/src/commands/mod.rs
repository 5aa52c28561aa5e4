pub mod dependencies;
pub mod pods;

use depot_core::{Dependencies, ManifestError, manifest_path};
use depot_deps::{ControllerError, SystemDependenciesController};
use std::path::Path;
use std::process::ExitCode;

/// Load the manifest for `root`, reporting failures on stderr.
fn load(root: &Path) -> Option<Dependencies> {
    match Dependencies::locate(root) {
        Ok(dependencies) => Some(dependencies),
        Err(ManifestError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("error: no manifest at {}", manifest_path(root).display());
            eprintln!("hint: declare dependencies in Depot/Dependencies.toml");
            None
        }
        Err(e) => {
            eprintln!("error: {e}");
            None
        }
    }
}

/// Build a controller from the user config.
fn controller() -> SystemDependenciesController {
    let config = depot_core::UserConfig::load();
    SystemDependenciesController::from_config(&config.executables)
}

/// Load the manifest and reject it up front when it names no platform, so no
/// progress is printed for a run the controller would refuse.
fn load_runnable(root: &Path) -> Option<Dependencies> {
    let dependencies = load(root)?;
    match depot_deps::require_platforms(&dependencies) {
        Ok(()) => Some(dependencies),
        Err(e) => {
            report_error(&e);
            None
        }
    }
}

/// Turn a controller result into an exit code.
fn report(result: Result<(), ControllerError>, done: &str) -> ExitCode {
    match result {
        Ok(()) => {
            println!("{done}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_error(error: &ControllerError) {
    eprintln!("error: {error}");
    if matches!(error, ControllerError::NoPlatforms) {
        eprintln!("hint: add e.g. `platforms = [\"ios\"]` to Depot/Dependencies.toml");
    }
}
