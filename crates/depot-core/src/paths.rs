//! Fixed locations inside a project.

use std::path::{Path, PathBuf};

/// Directory holding Depot's files at the project root.
pub const METADATA_DIRECTORY_NAME: &str = "Depot";

/// Sub-directory of [`METADATA_DIRECTORY_NAME`] where dependencies are materialized.
pub const DEPENDENCIES_DIRECTORY_NAME: &str = "Dependencies";

/// Manifest file inside [`METADATA_DIRECTORY_NAME`].
pub const MANIFEST_FILE_NAME: &str = "Dependencies.toml";

/// Directory where dependency managers place their artifacts for `root`.
///
/// Pure path arithmetic: nothing is created or checked.
pub fn dependencies_directory(root: &Path) -> PathBuf {
    root.join(METADATA_DIRECTORY_NAME).join(DEPENDENCIES_DIRECTORY_NAME)
}

/// Location of the dependencies manifest for `root`.
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(METADATA_DIRECTORY_NAME).join(MANIFEST_FILE_NAME)
}
