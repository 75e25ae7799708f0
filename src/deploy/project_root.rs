// ABOUTME: Project root discovery by upward search for a marker file.
// ABOUTME: Anchors the workload controller invocations to the repository checkout.

use super::error::{DeployError, ProjectRootNotFoundSnafu, WorkingDirSnafu};
use snafu::ResultExt;
use std::path::{Component, Path, PathBuf};

/// Find the nearest directory at or above `start` containing `marker`.
///
/// A relative `start` is resolved against the current directory and `..`
/// components are folded away first, so every candidate is a real ancestor
/// and the walk always ends at the filesystem root.
pub fn find_project_root(start: &Path, marker: &Path) -> Result<PathBuf, DeployError> {
    let start = clean(&std::path::absolute(start).context(WorkingDirSnafu)?);

    start
        .ancestors()
        .find(|dir| dir.join(marker).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            ProjectRootNotFoundSnafu {
                start: &start,
                marker,
            }
            .build()
        })
}

/// Lexically drop `.` and resolve `..` against the preceding component.
fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // pop() is a no-op at the root, matching `/..` == `/`
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
