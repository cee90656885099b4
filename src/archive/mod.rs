//! Container-format heuristics and zip extraction.
//!
//! A filename is treated as a container when it carries the `.zip`
//! extension or no extension at all. This is a name heuristic, not a
//! content probe; extraction itself only runs on files that really end
//! in `.zip`.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::Url;
use zip::ZipArchive;

/// Derive the local filename for a download URL.
///
/// A `file` query parameter wins (hosts that serve downloads through a
/// dispatch endpoint name the payload there); otherwise the last path
/// segment is used.
pub fn filename_from_url(url: &str) -> String {
    if let Ok(parsed) = Url::parse(url) {
        if let Some(file) = parsed
            .query_pairs()
            .find(|(key, _)| key == "file")
            .map(|(_, value)| value.into_owned())
        {
            return file;
        }
        if let Some(name) = parsed.path_segments().and_then(|segments| segments.last()) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }

    let without_query = url.split('?').next().unwrap_or(url);
    without_query
        .rsplit('/')
        .next()
        .unwrap_or(without_query)
        .to_string()
}

/// Whether a filename looks like a supported container.
pub fn is_container(filename: &str) -> bool {
    filename.ends_with(".zip") || Path::new(filename).extension().is_none()
}

/// Extract a zip archive into `target`.
pub fn extract(archive_path: &Path, target: &Path) -> Result<()> {
    fs::create_dir_all(target)
        .with_context(|| format!("creating extraction dir {}", target.display()))?;

    let file = File::open(archive_path)
        .with_context(|| format!("opening {}", archive_path.display()))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("reading {}", archive_path.display()))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // enclosed_name rejects entries that would escape the target dir
        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(())
}
