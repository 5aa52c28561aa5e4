//! Fetch/update orchestration across dependency managers.

use crate::carthage::{CarthageCli, CarthageError, CarthageInteractor};
use crate::cocoapods::{CocoaPodsCli, CocoaPodsError, CocoaPodsInteractor};
use crate::swift_package_manager::{
    SwiftPackageManagerCli, SwiftPackageManagerError, SwiftPackageManagerInteractor,
};
use depot_core::{Dependencies, ExecutablesConfig, dependencies_directory};
use std::path::{Path, PathBuf};

/// Errors returned by [`DependenciesController`].
///
/// Interactor failures pass through untouched.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("no platforms configured")]
    NoPlatforms,
    #[error(transparent)]
    Carthage(#[from] CarthageError),
    #[error(transparent)]
    SwiftPackageManager(#[from] SwiftPackageManagerError),
    #[error(transparent)]
    CocoaPods(#[from] CocoaPodsError),
}

/// Brings every dependency manager in line with a [`Dependencies`] value.
///
/// A configured manager is installed; an unconfigured one is cleaned so no
/// artifacts from an earlier configuration survive. Carthage runs first,
/// then SwiftPM, and the first failure stops the run. CocoaPods is only
/// driven through [`fetch_pods`](Self::fetch_pods) and
/// [`update_pods`](Self::update_pods).
#[derive(Debug, Clone)]
pub struct DependenciesController<C, P, S> {
    carthage: C,
    cocoapods: P,
    swift_package_manager: S,
}

/// Controller backed by the real executables.
pub type SystemDependenciesController =
    DependenciesController<CarthageCli, CocoaPodsCli, SwiftPackageManagerCli>;

impl SystemDependenciesController {
    /// Build a controller that runs the configured executables.
    pub fn from_config(executables: &ExecutablesConfig) -> Self {
        Self::new(
            CarthageCli::new(&executables.carthage),
            CocoaPodsCli::new(&executables.pod),
            SwiftPackageManagerCli::new(&executables.swift),
        )
    }
}

impl<C, P, S> DependenciesController<C, P, S>
where
    C: CarthageInteractor,
    P: CocoaPodsInteractor,
    S: SwiftPackageManagerInteractor,
{
    pub fn new(carthage: C, cocoapods: P, swift_package_manager: S) -> Self {
        Self {
            carthage,
            cocoapods,
            swift_package_manager,
        }
    }

    /// Install declared dependencies, reusing saved resolutions.
    pub fn fetch(&self, root: &Path, dependencies: &Dependencies) -> Result<(), ControllerError> {
        self.install(root, dependencies, false)
    }

    /// Install declared dependencies at the newest allowed versions.
    pub fn update(&self, root: &Path, dependencies: &Dependencies) -> Result<(), ControllerError> {
        self.install(root, dependencies, true)
    }

    /// Install declared pods. Does nothing when no pods are declared.
    pub fn fetch_pods(
        &self,
        root: &Path,
        dependencies: &Dependencies,
    ) -> Result<(), ControllerError> {
        let directory = validated_directory(root, dependencies)?;
        if let Some(pods) = dependencies.configured_cocoapods() {
            self.cocoapods
                .fetch(&directory, pods, &dependencies.platforms)?;
        }
        Ok(())
    }

    /// Update declared pods. Does nothing when no pods are declared.
    pub fn update_pods(
        &self,
        root: &Path,
        dependencies: &Dependencies,
    ) -> Result<(), ControllerError> {
        let directory = validated_directory(root, dependencies)?;
        if let Some(pods) = dependencies.configured_cocoapods() {
            self.cocoapods
                .update(&directory, pods, &dependencies.platforms)?;
        }
        Ok(())
    }

    fn install(
        &self,
        root: &Path,
        dependencies: &Dependencies,
        should_update: bool,
    ) -> Result<(), ControllerError> {
        let directory = validated_directory(root, dependencies)?;

        match dependencies.configured_carthage() {
            Some(carthage) => self.carthage.install(
                &directory,
                carthage,
                &dependencies.platforms,
                should_update,
            )?,
            None => self.carthage.clean(&directory)?,
        }

        match dependencies.configured_swift_package_manager() {
            Some(packages) => {
                self.swift_package_manager
                    .install(&directory, packages, should_update)?
            }
            None => self.swift_package_manager.clean(&directory)?,
        }

        Ok(())
    }
}

/// Fail with [`ControllerError::NoPlatforms`] when no platform is declared.
///
/// Every controller operation runs this first; callers can use it to reject a
/// manifest before reporting anything.
pub fn require_platforms(dependencies: &Dependencies) -> Result<(), ControllerError> {
    if dependencies.platforms.is_empty() {
        return Err(ControllerError::NoPlatforms);
    }
    Ok(())
}

fn validated_directory(
    root: &Path,
    dependencies: &Dependencies,
) -> Result<PathBuf, ControllerError> {
    require_platforms(dependencies)?;
    Ok(dependencies_directory(root))
}
