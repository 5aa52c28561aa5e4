//! Fetch and update command implementations.

use depot_core::{Dependencies, dependencies_directory};
use std::path::Path;
use std::process::ExitCode;

pub fn fetch(root: &Path) -> ExitCode {
    let Some(dependencies) = super::load_runnable(root) else {
        return ExitCode::FAILURE;
    };

    summarize(&dependencies);
    println!("fetching dependencies into {}", dependencies_directory(root).display());

    let result = super::controller().fetch(root, &dependencies);
    super::report(result, "dependencies fetched")
}

pub fn update(root: &Path) -> ExitCode {
    let Some(dependencies) = super::load_runnable(root) else {
        return ExitCode::FAILURE;
    };

    summarize(&dependencies);
    println!("updating dependencies in {}", dependencies_directory(root).display());

    let result = super::controller().update(root, &dependencies);
    super::report(result, "dependencies updated")
}

pub fn locate(root: &Path) -> ExitCode {
    println!("{}", dependencies_directory(root).display());
    ExitCode::SUCCESS
}

/// Print what each manager is about to do.
fn summarize(dependencies: &Dependencies) {
    for line in summary(dependencies) {
        println!("  {line}");
    }
}

fn summary(dependencies: &Dependencies) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(match dependencies.configured_carthage() {
        Some(c) => format!("carthage: {} dependency(ies)", c.dependencies.len()),
        None => "carthage: not configured, cleaning".to_string(),
    });
    lines.push(match dependencies.configured_swift_package_manager() {
        Some(s) => format!("swift package manager: {} package(s)", s.packages.len()),
        None => "swift package manager: not configured, cleaning".to_string(),
    });
    if dependencies.configured_cocoapods().is_some() {
        lines.push("cocoapods: skipped, run 'depot pods fetch'".to_string());
    }
    lines
}
