//! CocoaPods interactor.
//!
//! Pods are installed from a generated Podfile inside
//! `<dependencies>/CocoaPods` without integrating into any Xcode project.

use crate::LOCKFILES_DIRECTORY_NAME;
use crate::files::{self, FileError};
use crate::runner::{CommandRunner, RunError, SystemRunner};
use depot_core::{CocoaPodsDependencies, Platform};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const COCOAPODS_DIRECTORY_NAME: &str = "CocoaPods";
const PODFILE: &str = "Podfile";
const PODFILE_LOCK: &str = "Podfile.lock";
const TARGET_PREFIX: &str = "Dependencies";

/// Errors raised while driving CocoaPods.
#[derive(Debug, thiserror::Error)]
pub enum CocoaPodsError {
    #[error(transparent)]
    File(#[from] FileError),
    #[error("pod {command} failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: RunError,
    },
}

/// Fetches and updates pods.
pub trait CocoaPodsInteractor {
    /// Install pods, honoring the saved `Podfile.lock`.
    fn fetch(
        &self,
        dependencies_directory: &Path,
        dependencies: &CocoaPodsDependencies,
        platforms: &BTreeSet<Platform>,
    ) -> Result<(), CocoaPodsError>;

    /// Update pods to the newest versions their requirements allow.
    fn update(
        &self,
        dependencies_directory: &Path,
        dependencies: &CocoaPodsDependencies,
        platforms: &BTreeSet<Platform>,
    ) -> Result<(), CocoaPodsError>;
}

/// Drives the `pod` executable.
#[derive(Debug, Clone)]
pub struct CocoaPodsCli<R = SystemRunner> {
    executable: String,
    runner: R,
}

impl CocoaPodsCli {
    pub fn new(executable: impl Into<String>) -> Self {
        Self::with_runner(executable, SystemRunner)
    }
}

impl<R: CommandRunner> CocoaPodsCli<R> {
    pub fn with_runner(executable: impl Into<String>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }

    fn run(
        &self,
        dependencies_directory: &Path,
        dependencies: &CocoaPodsDependencies,
        platforms: &BTreeSet<Platform>,
        command: &'static str,
    ) -> Result<(), CocoaPodsError> {
        let working_directory = dependencies_directory.join(COCOAPODS_DIRECTORY_NAME);
        let lockfile = lockfile_path(dependencies_directory);
        let locked = working_directory.join(PODFILE_LOCK);

        files::create_dir_all(&working_directory)?;
        files::write(
            &working_directory.join(PODFILE),
            &render_podfile(dependencies, platforms),
        )?;
        files::copy_if_exists(&lockfile, &locked)?;

        let args = vec![
            command.to_string(),
            format!("--project-directory={}", working_directory.display()),
        ];
        self.runner
            .run(&self.executable, &args, &working_directory)
            .map_err(|source| CocoaPodsError::Command { command, source })?;

        files::copy_if_exists(&locked, &lockfile)?;
        Ok(())
    }
}

impl<R: CommandRunner> CocoaPodsInteractor for CocoaPodsCli<R> {
    fn fetch(
        &self,
        dependencies_directory: &Path,
        dependencies: &CocoaPodsDependencies,
        platforms: &BTreeSet<Platform>,
    ) -> Result<(), CocoaPodsError> {
        self.run(dependencies_directory, dependencies, platforms, "install")
    }

    fn update(
        &self,
        dependencies_directory: &Path,
        dependencies: &CocoaPodsDependencies,
        platforms: &BTreeSet<Platform>,
    ) -> Result<(), CocoaPodsError> {
        self.run(dependencies_directory, dependencies, platforms, "update")
    }
}

fn lockfile_path(dependencies_directory: &Path) -> PathBuf {
    dependencies_directory
        .join(LOCKFILES_DIRECTORY_NAME)
        .join(PODFILE_LOCK)
}

/// Render a Podfile declaring every pod.
///
/// CocoaPods only installs pods used by a concrete target, so each platform
/// gets its own `Dependencies-<Platform>` target listing every pod.
pub fn render_podfile(
    dependencies: &CocoaPodsDependencies,
    platforms: &BTreeSet<Platform>,
) -> String {
    let mut out = String::from("install! 'cocoapods', integrate_targets: false\n");
    for platform in platforms {
        out.push_str(&format!(
            "\ntarget '{TARGET_PREFIX}-{}' do\n  platform :{}\n",
            platform.display_name(),
            podfile_platform(*platform)
        ));
        for pod in &dependencies.pods {
            match &pod.requirement {
                Some(requirement) => {
                    out.push_str(&format!("  pod '{}', '{}'\n", pod.name, requirement))
                }
                None => out.push_str(&format!("  pod '{}'\n", pod.name)),
            }
        }
        out.push_str("end\n");
    }
    out
}

fn podfile_platform(platform: Platform) -> &'static str {
    match platform {
        Platform::Ios => "ios",
        Platform::Macos => "osx",
        Platform::Tvos => "tvos",
        Platform::Watchos => "watchos",
    }
}
