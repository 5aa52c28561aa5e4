//! The typed dependency model consumed by the interactors.

use crate::platform::Platform;
use serde::Deserialize;
use std::collections::BTreeSet;

/// Everything a project declares about its third-party dependencies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Carthage packages, `None` when Carthage is not used.
    pub carthage: Option<CarthageDependencies>,
    /// Swift packages, `None` when SwiftPM is not used.
    pub swift_package_manager: Option<SwiftPackageManagerDependencies>,
    /// Pods, `None` when CocoaPods is not used.
    pub cocoapods: Option<CocoaPodsDependencies>,
    /// Platforms every dependency is built for.
    pub platforms: BTreeSet<Platform>,
}

impl Dependencies {
    /// Carthage packages, if any are declared.
    ///
    /// A section without entries counts as not configured.
    pub fn configured_carthage(&self) -> Option<&CarthageDependencies> {
        self.carthage.as_ref().filter(|c| !c.is_empty())
    }

    /// Swift packages, if any are declared.
    pub fn configured_swift_package_manager(&self) -> Option<&SwiftPackageManagerDependencies> {
        self.swift_package_manager.as_ref().filter(|s| !s.is_empty())
    }

    /// Pods, if any are declared.
    pub fn configured_cocoapods(&self) -> Option<&CocoaPodsDependencies> {
        self.cocoapods.as_ref().filter(|c| !c.is_empty())
    }
}

/// Carthage section of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarthageDependencies {
    pub dependencies: Vec<CarthageDependency>,
    pub options: BTreeSet<CarthageOption>,
}

impl CarthageDependencies {
    pub fn new(dependencies: Vec<CarthageDependency>, options: BTreeSet<CarthageOption>) -> Self {
        Self {
            dependencies,
            options,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }
}

/// A single Cartfile entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarthageDependency {
    pub origin: CarthageOrigin,
    pub requirement: CarthageRequirement,
}

/// Where Carthage fetches a dependency from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarthageOrigin {
    /// `owner/repo` on GitHub.
    Github(String),
    /// Any git URL.
    Git(String),
    /// URL of a binary project specification.
    Binary(String),
}

/// Version constraint for a Carthage dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarthageRequirement {
    /// `== v`
    Exact(String),
    /// `~> v`
    UpToNext(String),
    /// `>= v`
    AtLeast(String),
    Branch(String),
    Revision(String),
}

/// Flags passed through to Carthage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarthageOption {
    /// Build XCFrameworks instead of fat frameworks.
    UseXcframeworks,
    /// Build from source instead of downloading prebuilt binaries.
    NoUseBinaries,
}

/// SwiftPM section of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwiftPackageManagerDependencies {
    pub packages: Vec<SwiftPackage>,
}

impl SwiftPackageManagerDependencies {
    pub fn new(packages: Vec<SwiftPackage>) -> Self {
        Self { packages }
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A Swift package dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwiftPackage {
    Remote {
        url: String,
        requirement: SwiftRequirement,
    },
    Local {
        path: String,
    },
}

/// Version constraint for a remote Swift package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwiftRequirement {
    Exact(String),
    UpToNextMajor(String),
    UpToNextMinor(String),
    /// Half-open range `from..<to`.
    Range { from: String, to: String },
    Branch(String),
    Revision(String),
}

/// CocoaPods section of the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CocoaPodsDependencies {
    pub pods: Vec<Pod>,
}

impl CocoaPodsDependencies {
    pub fn new(pods: Vec<Pod>) -> Self {
        Self { pods }
    }

    pub fn is_empty(&self) -> bool {
        self.pods.is_empty()
    }
}

/// A pod and its optional version requirement (`"~> 8.0"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pod {
    pub name: String,
    #[serde(default)]
    pub requirement: Option<String>,
}
