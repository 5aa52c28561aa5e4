//! Carthage interactor.
//!
//! Carthage works inside `<dependencies>/Carthage`, where the Cartfile is
//! rendered and the built frameworks land. The resolved Cartfile is kept in
//! `<dependencies>/Lockfiles` so later fetches reproduce the same versions.

use crate::LOCKFILES_DIRECTORY_NAME;
use crate::files::{self, FileError};
use crate::runner::{CommandRunner, RunError, SystemRunner};
use depot_core::{
    CarthageDependencies, CarthageOption, CarthageOrigin, CarthageRequirement, Platform,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const CARTHAGE_DIRECTORY_NAME: &str = "Carthage";
const CARTFILE: &str = "Cartfile";
const CARTFILE_RESOLVED: &str = "Cartfile.resolved";

/// Errors raised while driving Carthage.
#[derive(Debug, thiserror::Error)]
pub enum CarthageError {
    #[error(transparent)]
    File(#[from] FileError),
    #[error("carthage {command} failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: RunError,
    },
}

/// Installs and cleans Carthage dependencies.
pub trait CarthageInteractor {
    /// Build `dependencies` for `platforms` into `dependencies_directory`.
    ///
    /// With `should_update` the saved resolution is ignored and refreshed.
    fn install(
        &self,
        dependencies_directory: &Path,
        dependencies: &CarthageDependencies,
        platforms: &BTreeSet<Platform>,
        should_update: bool,
    ) -> Result<(), CarthageError>;

    /// Remove every Carthage artifact from `dependencies_directory`.
    fn clean(&self, dependencies_directory: &Path) -> Result<(), CarthageError>;
}

/// Drives the `carthage` executable.
#[derive(Debug, Clone)]
pub struct CarthageCli<R = SystemRunner> {
    executable: String,
    runner: R,
}

impl CarthageCli {
    pub fn new(executable: impl Into<String>) -> Self {
        Self::with_runner(executable, SystemRunner)
    }
}

impl<R: CommandRunner> CarthageCli<R> {
    pub fn with_runner(executable: impl Into<String>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> CarthageInteractor for CarthageCli<R> {
    fn install(
        &self,
        dependencies_directory: &Path,
        dependencies: &CarthageDependencies,
        platforms: &BTreeSet<Platform>,
        should_update: bool,
    ) -> Result<(), CarthageError> {
        let working_directory = dependencies_directory.join(CARTHAGE_DIRECTORY_NAME);
        let lockfile = lockfile_path(dependencies_directory);
        let resolved = working_directory.join(CARTFILE_RESOLVED);

        files::create_dir_all(&working_directory)?;
        files::write(&working_directory.join(CARTFILE), &render_cartfile(dependencies))?;

        if should_update {
            files::remove_if_exists(&resolved)?;
        } else {
            files::copy_if_exists(&lockfile, &resolved)?;
        }

        let command = if should_update { "update" } else { "bootstrap" };
        let args = arguments(command, &working_directory, dependencies, platforms);
        self.runner
            .run(&self.executable, &args, &working_directory)
            .map_err(|source| CarthageError::Command { command, source })?;

        files::copy_if_exists(&resolved, &lockfile)?;
        Ok(())
    }

    fn clean(&self, dependencies_directory: &Path) -> Result<(), CarthageError> {
        files::remove_if_exists(&dependencies_directory.join(CARTHAGE_DIRECTORY_NAME))?;
        files::remove_if_exists(&lockfile_path(dependencies_directory))?;
        Ok(())
    }
}

fn lockfile_path(dependencies_directory: &Path) -> PathBuf {
    dependencies_directory
        .join(LOCKFILES_DIRECTORY_NAME)
        .join(CARTFILE_RESOLVED)
}

fn arguments(
    command: &str,
    working_directory: &Path,
    dependencies: &CarthageDependencies,
    platforms: &BTreeSet<Platform>,
) -> Vec<String> {
    let platforms = platforms
        .iter()
        .map(Platform::display_name)
        .collect::<Vec<_>>()
        .join(",");

    let mut args = vec![
        command.to_string(),
        "--project-directory".to_string(),
        working_directory.display().to_string(),
        "--platform".to_string(),
        platforms,
    ];
    args.extend(
        dependencies
            .options
            .iter()
            .map(|option| option_flag(*option).to_string()),
    );
    args.push("--cache-builds".to_string());
    args.push("--new-resolver".to_string());
    args
}

fn option_flag(option: CarthageOption) -> &'static str {
    match option {
        CarthageOption::UseXcframeworks => "--use-xcframeworks",
        CarthageOption::NoUseBinaries => "--no-use-binaries",
    }
}

/// Render the Cartfile for `dependencies`, one entry per line.
pub fn render_cartfile(dependencies: &CarthageDependencies) -> String {
    let mut out = String::new();
    for dependency in &dependencies.dependencies {
        let origin = match &dependency.origin {
            CarthageOrigin::Github(path) => format!("github \"{path}\""),
            CarthageOrigin::Git(url) => format!("git \"{url}\""),
            CarthageOrigin::Binary(url) => format!("binary \"{url}\""),
        };
        let requirement = match &dependency.requirement {
            CarthageRequirement::Exact(v) => format!("== {v}"),
            CarthageRequirement::UpToNext(v) => format!("~> {v}"),
            CarthageRequirement::AtLeast(v) => format!(">= {v}"),
            CarthageRequirement::Branch(b) => format!("\"{b}\""),
            CarthageRequirement::Revision(r) => format!("\"{r}\""),
        };
        out.push_str(&origin);
        out.push(' ');
        out.push_str(&requirement);
        out.push('\n');
    }
    out
}
