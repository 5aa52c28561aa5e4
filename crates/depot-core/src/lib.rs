//! Depot core: the dependency model, manifest loading, and user config.
//!
//! A project declares its third-party dependencies in
//! `Depot/Dependencies.toml`. This crate turns that file into a typed
//! [`Dependencies`] value and knows where materialized dependencies live.

mod config;
mod dependencies;
mod manifest;
mod paths;
mod platform;

pub use config::{ExecutablesConfig, UserConfig};
pub use dependencies::{
    CarthageDependencies, CarthageDependency, CarthageOption, CarthageOrigin, CarthageRequirement,
    CocoaPodsDependencies, Dependencies, Pod, SwiftPackage, SwiftPackageManagerDependencies,
    SwiftRequirement,
};
pub use manifest::ManifestError;
pub use paths::{
    DEPENDENCIES_DIRECTORY_NAME, MANIFEST_FILE_NAME, METADATA_DIRECTORY_NAME,
    dependencies_directory, manifest_path,
};
pub use platform::Platform;
