//! Common file system operations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[derive(Default, Clone)]
pub struct CopyOptions {
    /// File or directory names skipped at any depth
    pub exclude: Vec<String>,
    /// Entry copied before everything else, relative to the source root
    pub first: Option<String>,
}

impl CopyOptions {
    pub fn exclude_git() -> Self {
        Self {
            exclude: vec![".git".to_string()],
            first: None,
        }
    }

    #[must_use]
    pub fn first(mut self, name: impl Into<String>) -> Self {
        self.first = Some(name.into());
        self
    }
}

/// Copy a directory tree, returning the number of files copied.
/// Symlinks are recreated as symlinks rather than followed.
pub fn copy_dir_recursive<P1, P2>(src: P1, dst: P2, options: &CopyOptions) -> io::Result<usize>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
{
    let src_ref = src.as_ref();
    let dst_ref = dst.as_ref();
    let mut copied = 0;

    fs::create_dir_all(dst_ref)?;

    if let Some(first) = &options.first {
        let from = src_ref.join(first);
        if from.is_file() {
            fs::copy(&from, dst_ref.join(first))?;
            copied += 1;
        }
    }

    let walker = WalkDir::new(src_ref)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !options
                .exclude
                .iter()
                .any(|excluded| entry.file_name().to_str() == Some(excluded.as_str()))
        });

    for entry in walker {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry
            .path()
            .strip_prefix(src_ref)
            .map_err(io::Error::other)?;

        if options.first.as_deref().is_some_and(|f| relative == Path::new(f)) {
            continue;
        }

        let dst_path = dst_ref.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&dst_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &dst_path)?;
            copied += 1;
        } else {
            fs::copy(entry.path(), &dst_path)?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst).map(|_| ())
}

/// Copy `src` to `dest` and mark it executable. Returns whether an existing
/// file was replaced.
pub fn install_executable(src: &Path, dest: &Path) -> io::Result<bool> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    let replaced = dest.exists();
    if replaced {
        // Replacing a running binary in place fails with ETXTBSY
        fs::remove_file(dest)?;
    }
    fs::copy(src, dest)?;
    set_executable(dest)?;
    Ok(replaced)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Remove a file, symlink or directory tree
pub fn remove_path(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// Absolute form of `path` with symlinks resolved as far as it exists. The
/// missing tail is appended unresolved.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
    let mut resolved = existing.canonicalize()?;
    resolved.extend(tail.iter().rev());
    Ok(resolved)
}
