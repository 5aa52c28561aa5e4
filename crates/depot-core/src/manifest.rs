//! Manifest parsing for `Depot/Dependencies.toml`.

use crate::dependencies::{
    CarthageDependencies, CarthageDependency, CarthageOption, CarthageOrigin, CarthageRequirement,
    CocoaPodsDependencies, Dependencies, Pod, SwiftPackage, SwiftPackageManagerDependencies,
    SwiftRequirement,
};
use crate::paths::manifest_path;
use crate::platform::Platform;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// Errors that can occur when loading a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("[{section}] entry {index} has no source, expected one of: {expected}")]
    MissingOrigin {
        section: &'static str,
        index: usize,
        expected: &'static str,
    },
    #[error("[{section}] entry {index} declares more than one source")]
    AmbiguousOrigin { section: &'static str, index: usize },
    #[error("[{section}] entry {index} has no version requirement")]
    MissingRequirement { section: &'static str, index: usize },
    #[error("[{section}] entry {index} declares more than one version requirement")]
    AmbiguousRequirement { section: &'static str, index: usize },
    #[error("[{section}] entry {index} needs both `from` and `to` for a range")]
    IncompleteRange { section: &'static str, index: usize },
    #[error("[{section}] entry {index} is a local package and takes no version requirement")]
    UnexpectedRequirement { section: &'static str, index: usize },
    #[error("[{section}] entry {index} is a binary dependency and takes only a version requirement")]
    UnversionedBinary { section: &'static str, index: usize },
}

const CARTHAGE: &str = "carthage";
const SWIFT_PACKAGE_MANAGER: &str = "swift-package-manager";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawManifest {
    #[serde(default)]
    platforms: BTreeSet<Platform>,
    carthage: Option<RawCarthage>,
    swift_package_manager: Option<RawSwiftPackageManager>,
    cocoapods: Option<RawCocoaPods>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCarthage {
    #[serde(default)]
    options: BTreeSet<CarthageOption>,
    #[serde(default)]
    dependencies: Vec<RawCarthageDependency>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawCarthageDependency {
    github: Option<String>,
    git: Option<String>,
    binary: Option<String>,
    exact: Option<String>,
    up_to_next: Option<String>,
    at_least: Option<String>,
    branch: Option<String>,
    revision: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSwiftPackageManager {
    #[serde(default)]
    packages: Vec<RawSwiftPackage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawSwiftPackage {
    url: Option<String>,
    path: Option<String>,
    exact: Option<String>,
    up_to_next_major: Option<String>,
    up_to_next_minor: Option<String>,
    from: Option<String>,
    to: Option<String>,
    branch: Option<String>,
    revision: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCocoaPods {
    #[serde(default)]
    pods: Vec<Pod>,
}

/// Outcome of choosing among mutually exclusive keys.
enum Choice<T> {
    None,
    One(T),
    Many,
}

fn choose<T>(candidates: impl IntoIterator<Item = Option<T>>) -> Choice<T> {
    let mut present = candidates.into_iter().flatten();
    match (present.next(), present.next()) {
        (None, _) => Choice::None,
        (Some(only), None) => Choice::One(only),
        (Some(_), Some(_)) => Choice::Many,
    }
}

impl Dependencies {
    /// Load the manifest of the project at `root`.
    pub fn locate(root: impl AsRef<Path>) -> Result<Self, ManifestError> {
        Self::from_path(manifest_path(root.as_ref()))
    }

    /// Load a manifest from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a manifest from a TOML string.
    ///
    /// Platforms may be empty here; callers that dispatch work reject that.
    pub fn parse(s: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = toml::from_str(s)?;

        let carthage = raw.carthage.map(convert_carthage).transpose()?;
        let swift_package_manager = raw
            .swift_package_manager
            .map(convert_swift_package_manager)
            .transpose()?;
        let cocoapods = raw.cocoapods.map(|c| CocoaPodsDependencies::new(c.pods));

        Ok(Self {
            carthage,
            swift_package_manager,
            cocoapods,
            platforms: raw.platforms,
        })
    }
}

fn convert_carthage(raw: RawCarthage) -> Result<CarthageDependencies, ManifestError> {
    let dependencies = raw
        .dependencies
        .into_iter()
        .enumerate()
        .map(|(index, dep)| convert_carthage_dependency(index, dep))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CarthageDependencies::new(dependencies, raw.options))
}

fn convert_carthage_dependency(
    index: usize,
    raw: RawCarthageDependency,
) -> Result<CarthageDependency, ManifestError> {
    let section = CARTHAGE;

    let origin = match choose([
        raw.github.map(CarthageOrigin::Github),
        raw.git.map(CarthageOrigin::Git),
        raw.binary.map(CarthageOrigin::Binary),
    ]) {
        Choice::One(origin) => origin,
        Choice::None => {
            return Err(ManifestError::MissingOrigin {
                section,
                index,
                expected: "github, git, binary",
            });
        }
        Choice::Many => return Err(ManifestError::AmbiguousOrigin { section, index }),
    };

    let requirement = match choose([
        raw.exact.map(CarthageRequirement::Exact),
        raw.up_to_next.map(CarthageRequirement::UpToNext),
        raw.at_least.map(CarthageRequirement::AtLeast),
        raw.branch.map(CarthageRequirement::Branch),
        raw.revision.map(CarthageRequirement::Revision),
    ]) {
        Choice::One(requirement) => requirement,
        Choice::None => return Err(ManifestError::MissingRequirement { section, index }),
        Choice::Many => return Err(ManifestError::AmbiguousRequirement { section, index }),
    };

    if matches!(origin, CarthageOrigin::Binary(_))
        && matches!(
            requirement,
            CarthageRequirement::Branch(_) | CarthageRequirement::Revision(_)
        )
    {
        return Err(ManifestError::UnversionedBinary { section, index });
    }

    Ok(CarthageDependency {
        origin,
        requirement,
    })
}

fn convert_swift_package_manager(
    raw: RawSwiftPackageManager,
) -> Result<SwiftPackageManagerDependencies, ManifestError> {
    let packages = raw
        .packages
        .into_iter()
        .enumerate()
        .map(|(index, package)| convert_swift_package(index, package))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SwiftPackageManagerDependencies::new(packages))
}

fn convert_swift_package(index: usize, raw: RawSwiftPackage) -> Result<SwiftPackage, ManifestError> {
    let section = SWIFT_PACKAGE_MANAGER;

    let range = match (raw.from, raw.to) {
        (Some(from), Some(to)) => Some(SwiftRequirement::Range { from, to }),
        (None, None) => None,
        _ => return Err(ManifestError::IncompleteRange { section, index }),
    };

    let requirement = choose([
        raw.exact.map(SwiftRequirement::Exact),
        raw.up_to_next_major.map(SwiftRequirement::UpToNextMajor),
        raw.up_to_next_minor.map(SwiftRequirement::UpToNextMinor),
        range,
        raw.branch.map(SwiftRequirement::Branch),
        raw.revision.map(SwiftRequirement::Revision),
    ]);

    match (raw.url, raw.path) {
        (Some(url), None) => match requirement {
            Choice::One(requirement) => Ok(SwiftPackage::Remote { url, requirement }),
            Choice::None => Err(ManifestError::MissingRequirement { section, index }),
            Choice::Many => Err(ManifestError::AmbiguousRequirement { section, index }),
        },
        (None, Some(path)) => match requirement {
            Choice::None => Ok(SwiftPackage::Local { path }),
            _ => Err(ManifestError::UnexpectedRequirement { section, index }),
        },
        (None, None) => Err(ManifestError::MissingOrigin {
            section,
            index,
            expected: "url, path",
        }),
        (Some(_), Some(_)) => Err(ManifestError::AmbiguousOrigin { section, index }),
    }
}
