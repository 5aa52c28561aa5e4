//! Swift Package Manager interactor.
//!
//! Packages are resolved from a generated `Package.swift` inside
//! `<dependencies>/SwiftPackageManager`.

use crate::LOCKFILES_DIRECTORY_NAME;
use crate::files::{self, FileError};
use crate::runner::{CommandRunner, RunError, SystemRunner};
use depot_core::{SwiftPackage, SwiftPackageManagerDependencies, SwiftRequirement};
use std::path::{Path, PathBuf};

const SWIFT_PACKAGE_MANAGER_DIRECTORY_NAME: &str = "SwiftPackageManager";
const PACKAGE_MANIFEST: &str = "Package.swift";
const PACKAGE_RESOLVED: &str = "Package.resolved";
const TOOLS_VERSION: &str = "5.3";

/// Errors raised while driving SwiftPM.
#[derive(Debug, thiserror::Error)]
pub enum SwiftPackageManagerError {
    #[error(transparent)]
    File(#[from] FileError),
    #[error("swift package {command} failed: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: RunError,
    },
}

/// Installs and cleans Swift packages.
pub trait SwiftPackageManagerInteractor {
    /// Resolve `dependencies` into `dependencies_directory`.
    fn install(
        &self,
        dependencies_directory: &Path,
        dependencies: &SwiftPackageManagerDependencies,
        should_update: bool,
    ) -> Result<(), SwiftPackageManagerError>;

    /// Remove every SwiftPM artifact from `dependencies_directory`.
    fn clean(&self, dependencies_directory: &Path) -> Result<(), SwiftPackageManagerError>;
}

/// Drives `swift package`.
#[derive(Debug, Clone)]
pub struct SwiftPackageManagerCli<R = SystemRunner> {
    executable: String,
    runner: R,
}

impl SwiftPackageManagerCli {
    pub fn new(executable: impl Into<String>) -> Self {
        Self::with_runner(executable, SystemRunner)
    }
}

impl<R: CommandRunner> SwiftPackageManagerCli<R> {
    pub fn with_runner(executable: impl Into<String>, runner: R) -> Self {
        Self {
            executable: executable.into(),
            runner,
        }
    }
}

impl<R: CommandRunner> SwiftPackageManagerInteractor for SwiftPackageManagerCli<R> {
    fn install(
        &self,
        dependencies_directory: &Path,
        dependencies: &SwiftPackageManagerDependencies,
        should_update: bool,
    ) -> Result<(), SwiftPackageManagerError> {
        let working_directory = dependencies_directory.join(SWIFT_PACKAGE_MANAGER_DIRECTORY_NAME);
        let lockfile = lockfile_path(dependencies_directory);
        let resolved = working_directory.join(PACKAGE_RESOLVED);

        files::create_dir_all(&working_directory)?;
        files::write(
            &working_directory.join(PACKAGE_MANIFEST),
            &render_package_manifest(dependencies),
        )?;

        if should_update {
            files::remove_if_exists(&resolved)?;
        } else {
            files::copy_if_exists(&lockfile, &resolved)?;
        }

        let command = if should_update { "update" } else { "resolve" };
        let args = vec![
            "package".to_string(),
            "--package-path".to_string(),
            working_directory.display().to_string(),
            command.to_string(),
        ];
        self.runner
            .run(&self.executable, &args, &working_directory)
            .map_err(|source| SwiftPackageManagerError::Command { command, source })?;

        files::copy_if_exists(&resolved, &lockfile)?;
        Ok(())
    }

    fn clean(&self, dependencies_directory: &Path) -> Result<(), SwiftPackageManagerError> {
        files::remove_if_exists(&dependencies_directory.join(SWIFT_PACKAGE_MANAGER_DIRECTORY_NAME))?;
        files::remove_if_exists(&lockfile_path(dependencies_directory))?;
        Ok(())
    }
}

fn lockfile_path(dependencies_directory: &Path) -> PathBuf {
    dependencies_directory
        .join(LOCKFILES_DIRECTORY_NAME)
        .join(PACKAGE_RESOLVED)
}

/// Render a `Package.swift` that depends on every declared package.
pub fn render_package_manifest(dependencies: &SwiftPackageManagerDependencies) -> String {
    let mut out = format!(
        "// swift-tools-version:{TOOLS_VERSION}\n\n\
         import PackageDescription\n\n\
         let package = Package(\n    \
         name: \"PackageName\",\n    \
         dependencies: [\n"
    );
    for package in &dependencies.packages {
        out.push_str("        ");
        out.push_str(&package_entry(package));
        out.push_str(",\n");
    }
    out.push_str("    ]\n)\n");
    out
}

fn package_entry(package: &SwiftPackage) -> String {
    match package {
        SwiftPackage::Local { path } => format!(".package(path: \"{path}\")"),
        SwiftPackage::Remote { url, requirement } => {
            let requirement = match requirement {
                SwiftRequirement::Exact(v) => format!(".exact(\"{v}\")"),
                SwiftRequirement::UpToNextMajor(v) => format!(".upToNextMajor(from: \"{v}\")"),
                SwiftRequirement::UpToNextMinor(v) => format!(".upToNextMinor(from: \"{v}\")"),
                SwiftRequirement::Range { from, to } => format!("\"{from}\"..<\"{to}\""),
                SwiftRequirement::Branch(b) => format!(".branch(\"{b}\")"),
                SwiftRequirement::Revision(r) => format!(".revision(\"{r}\")"),
            };
            format!(".package(url: \"{url}\", {requirement})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::testing::RecordingRunner;
    use std::fs;

    fn moya_and_alamofire() -> SwiftPackageManagerDependencies {
        SwiftPackageManagerDependencies::new(vec![
            SwiftPackage::Remote {
                url: "https://github.com/Moya/Moya".into(),
                requirement: SwiftRequirement::Exact("2.3.4".into()),
            },
            SwiftPackage::Remote {
                url: "https://github.com/Alamofire/Alamofire".into(),
                requirement: SwiftRequirement::UpToNextMajor("5.0.0".into()),
            },
        ])
    }

    #[test]
    fn package_manifest_lists_packages() {
        let manifest = render_package_manifest(&moya_and_alamofire());
        assert_eq!(
            manifest,
            concat!(
                "// swift-tools-version:5.3\n",
                "\n",
                "import PackageDescription\n",
                "\n",
                "let package = Package(\n",
                "    name: \"PackageName\",\n",
                "    dependencies: [\n",
                "        .package(url: \"https://github.com/Moya/Moya\", .exact(\"2.3.4\")),\n",
                "        .package(url: \"https://github.com/Alamofire/Alamofire\", .upToNextMajor(from: \"5.0.0\")),\n",
                "    ]\n",
                ")\n",
            )
        );
    }

    #[test]
    fn package_entries_for_each_requirement() {
        let url = "https://example.com/P";
        let remote = |requirement| SwiftPackage::Remote {
            url: url.into(),
            requirement,
        };

        assert_eq!(
            package_entry(&remote(SwiftRequirement::UpToNextMinor("1.2.0".into()))),
            ".package(url: \"https://example.com/P\", .upToNextMinor(from: \"1.2.0\"))"
        );
        assert_eq!(
            package_entry(&remote(SwiftRequirement::Range {
                from: "1.0.0".into(),
                to: "2.0.0".into(),
            })),
            ".package(url: \"https://example.com/P\", \"1.0.0\"..<\"2.0.0\")"
        );
        assert_eq!(
            package_entry(&remote(SwiftRequirement::Branch("develop".into()))),
            ".package(url: \"https://example.com/P\", .branch(\"develop\"))"
        );
        assert_eq!(
            package_entry(&remote(SwiftRequirement::Revision("abc".into()))),
            ".package(url: \"https://example.com/P\", .revision(\"abc\"))"
        );
        assert_eq!(
            package_entry(&SwiftPackage::Local {
                path: "../Local".into()
            }),
            ".package(path: \"../Local\")"
        );
    }

    #[test]
    fn install_resolves_and_saves_lockfile() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        let runner = RecordingRunner::writing(vec![(PACKAGE_RESOLVED, "{\"pins\": []}")]);
        let spm = SwiftPackageManagerCli::with_runner("swift", runner);

        spm.install(&dir, &moya_and_alamofire(), false).unwrap();

        let workdir = dir.join("SwiftPackageManager");
        let invocation = spm.runner.single();
        assert_eq!(invocation.program, "swift");
        assert_eq!(
            invocation.args,
            vec![
                "package".to_string(),
                "--package-path".to_string(),
                workdir.display().to_string(),
                "resolve".to_string(),
            ]
        );
        assert!(workdir.join("Package.swift").exists());
        assert_eq!(
            fs::read_to_string(dir.join("Lockfiles").join("Package.resolved")).unwrap(),
            "{\"pins\": []}"
        );
    }

    #[test]
    fn update_runs_update() {
        let temp = tempfile::tempdir().unwrap();
        let spm = SwiftPackageManagerCli::with_runner("swift", RecordingRunner::default());

        spm.install(temp.path(), &moya_and_alamofire(), true).unwrap();

        assert_eq!(spm.runner.single().args.last().map(String::as_str), Some("update"));
    }

    #[test]
    fn failure_names_the_command() {
        let temp = tempfile::tempdir().unwrap();
        let spm = SwiftPackageManagerCli::with_runner("swift", RecordingRunner::failing(1));

        let err = spm.install(temp.path(), &moya_and_alamofire(), false).unwrap_err();
        assert!(err.to_string().starts_with("swift package resolve failed: "));
    }

    #[test]
    fn clean_removes_artifacts() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().to_path_buf();
        fs::create_dir_all(dir.join("SwiftPackageManager").join(".build")).unwrap();
        fs::create_dir_all(dir.join("Lockfiles")).unwrap();
        fs::write(dir.join("Lockfiles").join("Package.resolved"), "{}").unwrap();

        let spm = SwiftPackageManagerCli::with_runner("swift", RecordingRunner::default());
        spm.clean(&dir).unwrap();
        spm.clean(&dir).unwrap();

        assert!(!dir.join("SwiftPackageManager").exists());
        assert!(!dir.join("Lockfiles").join("Package.resolved").exists());
    }
}
