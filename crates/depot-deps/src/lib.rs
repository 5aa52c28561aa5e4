//! Dependency manager interactors and the controller that drives them.
//!
//! [`DependenciesController`] decides, per manager, whether to install the
//! declared packages or clean up what a previous run left behind. The
//! interactors behind it shell out to Carthage, SwiftPM, and CocoaPods.

mod carthage;
mod cocoapods;
mod controller;
mod files;
mod runner;
mod swift_package_manager;

pub use carthage::{CarthageCli, CarthageError, CarthageInteractor, render_cartfile};
pub use cocoapods::{CocoaPodsCli, CocoaPodsError, CocoaPodsInteractor, render_podfile};
pub use controller::{
    ControllerError, DependenciesController, SystemDependenciesController, require_platforms,
};
pub use files::FileError;
pub use runner::{CommandRunner, RunError, SystemRunner};
pub use swift_package_manager::{
    SwiftPackageManagerCli, SwiftPackageManagerError, SwiftPackageManagerInteractor,
    render_package_manifest,
};

/// Sub-directory of the dependencies directory holding saved lockfiles.
pub const LOCKFILES_DIRECTORY_NAME: &str = "Lockfiles";
