//! Archive idempotence decisions.

use std::path::PathBuf;

use crate::archive::{filename_from_url, is_container};
use crate::state::StateStore;
use crate::workspace::Workspace;

/// Decide whether an archive dependency must be (re)downloaded.
///
/// A dependency stays put only when the recorded URL matches the
/// manifest, the expected file is on disk at the recorded size, and (for
/// containers) the extraction directory has content. Size is compared
/// against the recorded value as a string, a cheap content-change proxy
/// rather than a checksum.
pub fn archive_needs_download(
    name: &str,
    url: &str,
    workspace: &Workspace,
    state: &StateStore,
) -> bool {
    let Some(entry) = state.get(name) else {
        return true;
    };

    if entry.url != url {
        return true;
    }

    let filename = filename_from_url(url);
    let container = is_container(&filename);

    let Some(archive_path) = existing_archive_path(name, &filename, container, workspace) else {
        return true;
    };

    let on_disk = std::fs::metadata(&archive_path)
        .map(|m| m.len())
        .unwrap_or(0);
    if on_disk.to_string() != entry.version {
        return true;
    }

    if container && !has_extracted_content(name, workspace) {
        return true;
    }

    false
}

/// Locate the archive under either path convention.
///
/// Containers may sit at `archives/<name>.zip` or `archives/<filename>`;
/// plain files live at `sources/<name>/<filename>`.
fn existing_archive_path(
    name: &str,
    filename: &str,
    container: bool,
    workspace: &Workspace,
) -> Option<PathBuf> {
    let candidates = if container {
        vec![
            workspace.archives_dir().join(format!("{name}.zip")),
            workspace.archives_dir().join(filename),
        ]
    } else {
        vec![workspace.source_dir(name).join(filename)]
    };

    candidates.into_iter().find(|path| path.exists())
}

fn has_extracted_content(name: &str, workspace: &Workspace) -> bool {
    match std::fs::read_dir(workspace.source_dir(name)) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}
