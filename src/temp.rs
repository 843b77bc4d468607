//! Scratch directories with guaranteed cleanup
//!
//! A [`ScratchDir`] is removed when it goes out of scope on every return
//! path. While alive it is also listed in a process-wide registry so the
//! interrupt handler can remove it before the process exits, since `Drop`
//! does not run on Ctrl-C. Writers that could recreate a removed directory
//! run under [`while_live`].

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use tempfile::TempDir;

/// Prefix shared by every scratch directory this process creates
pub const SCRATCH_PREFIX: &str = "devboot-";

#[derive(Debug, Default)]
struct Registry {
    active: Vec<PathBuf>,
    /// Directories removed by the interrupt handler
    reaped: Vec<PathBuf>,
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::default()));

fn registry() -> MutexGuard<'static, Registry> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so temp dirs are never created under the current working
/// directory (avoids a stray `tmp/` in the dotfiles checkout when TMPDIR=tmp).
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        PathBuf::from("/tmp")
    }
}

/// An exclusively-owned scratch directory
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `base`
    pub fn new_in(base: &Path, label: &str) -> io::Result<Self> {
        fs::create_dir_all(base)?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("{SCRATCH_PREFIX}{label}-"))
            .tempdir_in(base)?;
        register(dir.path());
        tracing::debug!(path = %dir.path().display(), "created scratch directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        unregister(self.dir.path());
        tracing::debug!(path = %self.dir.path().display(), "removing scratch directory");
        // TempDir removes the directory when the field drops right after this
    }
}

fn register(path: &Path) {
    registry().active.push(path.to_path_buf());
}

fn unregister(path: &Path) {
    registry().active.retain(|p| p != path);
}

/// Remove every live scratch directory. Called from the interrupt handler.
///
/// The registry stays locked while removing, so a [`while_live`] writer is
/// either finished or sees the directory as reaped and stops.
pub fn interrupt() {
    let mut registry = registry();
    let paths: Vec<PathBuf> = registry.active.drain(..).collect();
    for path in paths {
        let _ = fs::remove_dir_all(&path);
        registry.reaped.push(path);
    }
}

/// Run `f` unless `path` lies in a scratch directory the interrupt handler
/// already removed. `f` must not create or drop a [`ScratchDir`].
pub fn while_live<T>(path: &Path, f: impl FnOnce() -> io::Result<T>) -> io::Result<T> {
    let registry = registry();
    if registry.reaped.iter().any(|r| path.starts_with(r)) {
        return Err(io::Error::new(
            io::ErrorKind::Interrupted,
            format!("{} was removed on interrupt", path.display()),
        ));
    }
    f()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn is_registered(path: &Path) -> bool {
        registry().active.iter().any(|p| p == path)
    }

    #[test]
    fn test_temp_dir_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }

    #[test]
    #[serial]
    fn test_scratch_dir_removed_on_drop() {
        let base = TempDir::new().unwrap();
        let path = {
            let scratch = ScratchDir::new_in(base.path(), "test").unwrap();
            fs::write(scratch.path().join("file"), "x").unwrap();
            assert!(is_registered(scratch.path()));
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
        assert!(!is_registered(&path));
        assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[test]
    #[serial]
    fn test_scratch_dir_removed_on_early_error_return() {
        fn failing_step(base: &Path) -> io::Result<PathBuf> {
            let scratch = ScratchDir::new_in(base, "early")?;
            let _kept = scratch.path().to_path_buf();
            Err(io::Error::other("extraction failed"))
        }

        let base = TempDir::new().unwrap();
        assert!(failing_step(base.path()).is_err());
        assert_eq!(fs::read_dir(base.path()).unwrap().count(), 0);
    }

    #[test]
    #[serial]
    fn test_interrupt_removes_live_dirs() {
        let base = TempDir::new().unwrap();
        let scratch = ScratchDir::new_in(base.path(), "interrupt").unwrap();
        let path = scratch.path().to_path_buf();

        interrupt();
        assert!(!path.exists());
        assert!(!is_registered(&path));

        // Dropping after an interrupt cleanup must not panic
        drop(scratch);
    }

    #[test]
    #[serial]
    fn test_while_live_refuses_reaped_dirs() {
        let base = TempDir::new().unwrap();
        let scratch = ScratchDir::new_in(base.path(), "reaped").unwrap();
        let nested = scratch.path().join("unpacked/bin");

        let created = while_live(&nested, || fs::create_dir_all(&nested).map(|_| true));
        assert!(created.unwrap());

        interrupt();
        let err = while_live(&nested, || fs::create_dir_all(&nested)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
        assert!(!scratch.path().exists());

        let elsewhere = base.path().join("other");
        assert!(while_live(&elsewhere, || fs::create_dir_all(&elsewhere)).is_ok());
    }

    #[test]
    #[serial]
    fn test_scratch_dir_name_prefix() {
        let base = TempDir::new().unwrap();
        let scratch = ScratchDir::new_in(base.path(), "archive").unwrap();
        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("devboot-archive-"));
    }
}
