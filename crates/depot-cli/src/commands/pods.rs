//! CocoaPods command implementations.

use depot_core::Dependencies;
use std::path::Path;
use std::process::ExitCode;

pub fn fetch(root: &Path) -> ExitCode {
    let Some(dependencies) = super::load(root) else {
        return ExitCode::FAILURE;
    };

    let result = super::controller().fetch_pods(root, &dependencies);
    super::report(result, done_message(&dependencies, "pods fetched"))
}

pub fn update(root: &Path) -> ExitCode {
    let Some(dependencies) = super::load(root) else {
        return ExitCode::FAILURE;
    };

    let result = super::controller().update_pods(root, &dependencies);
    super::report(result, done_message(&dependencies, "pods updated"))
}

/// The controller skips CocoaPods when no pods are declared; say so.
fn done_message<'a>(dependencies: &Dependencies, done: &'a str) -> &'a str {
    if dependencies.configured_cocoapods().is_some() {
        done
    } else {
        "no pods configured"
    }
}
