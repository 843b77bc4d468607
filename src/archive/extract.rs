//! Gzip tarball extraction
//!
//! Entries that are links, absolute, or that climb out of the destination
//! are skipped and reported rather than unpacked.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;

use crate::error::{Result, fs::archive_extract_failed};
use crate::temp;

/// What an extraction produced
#[derive(Debug, Default)]
pub struct Extraction {
    /// Files unpacked
    pub files: usize,
    /// Entries refused, as archive paths
    pub skipped: Vec<String>,
}

/// Extract `archive` (a `.tar.gz`) into `dest`
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<Extraction> {
    unpack(archive, dest).map_err(|e| archive_extract_failed(archive, e))
}

fn unpack(archive: &Path, dest: &Path) -> io::Result<Extraction> {
    temp::while_live(dest, || fs::create_dir_all(dest))?;
    let canonical_dest = fs::canonicalize(dest)?;
    let file = File::open(archive)?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    let mut extraction = Extraction::default();

    for entry in tarball.entries()? {
        let mut entry = entry?;
        let path = entry.path()?.into_owned();
        let entry_type = entry.header().entry_type();

        if entry_type.is_symlink() || entry_type.is_hard_link() {
            extraction.skipped.push(path.display().to_string());
            continue;
        }

        let Some(relative) = sanitize_entry_path(&path) else {
            extraction.skipped.push(path.display().to_string());
            continue;
        };
        if relative.as_os_str().is_empty() {
            continue;
        }

        let target = canonical_dest.join(&relative);
        let unpacked = temp::while_live(dest, || {
            if entry_type.is_dir() {
                fs::create_dir_all(&target)?;
                return Ok(false);
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
                if !fs::canonicalize(parent)?.starts_with(&canonical_dest) {
                    return Ok(false);
                }
            }
            entry.unpack(&target)?;
            Ok(true)
        })?;

        if unpacked {
            extraction.files += 1;
        } else if !entry_type.is_dir() {
            extraction.skipped.push(path.display().to_string());
        }
    }

    tracing::debug!(
        archive = %archive.display(),
        files = extraction.files,
        skipped = extraction.skipped.len(),
        "extracted archive"
    );
    Ok(extraction)
}

/// Normal components only; `None` when the path is absolute or uses `..`
fn sanitize_entry_path(path: &Path) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

/// Directory holding the bundle contents: a lone top-level directory is
/// treated as a wrapper and descended into, unless it is itself one of the
/// bundle's `layout_dirs`.
pub fn bundle_root(dir: &Path, layout_dirs: &[&str]) -> PathBuf {
    let Ok(entries) = fs::read_dir(dir) else {
        return dir.to_path_buf();
    };
    let entries: Vec<_> = entries.filter_map(std::result::Result::ok).collect();
    match entries.as_slice() {
        [only]
            if only.path().is_dir()
                && !layout_dirs.iter().any(|d| only.file_name() == *d) =>
        {
            only.path()
        }
        _ => dir.to_path_buf(),
    }
}

/// First file named `name` anywhere below `dir`
pub fn find_file(dir: &Path, name: &str) -> Option<PathBuf> {
    walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .find(|e| e.file_type().is_file() && e.file_name() == name)
        .map(walkdir::DirEntry::into_path)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs::File;
    use std::path::Path;

    use flate2::Compression;
    use flate2::write::GzEncoder;

    /// Write a `.tar.gz` containing `(path, contents)` regular files
    pub fn write_tar_gz(archive: &Path, files: &[(&str, &str)]) {
        let file = File::create(archive).unwrap();
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (path, contents) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(contents.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder
                .append_data(&mut header, path, contents.as_bytes())
                .unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap();
    }
}
