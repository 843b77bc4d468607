//! Repository cloning at a fixed reference
//!
//! `reference` is tried as a branch first (like `git clone --branch`). When
//! the remote has no such branch the repository is cloned at its default
//! branch and the reference is resolved as a tag or revision and checked out
//! detached.

use std::fs;
use std::path::Path;

use git2::{FetchOptions, Repository, build::RepoBuilder};

use super::error::{interpret_git_error, is_missing_branch};
use crate::error::{Result, git::clone_failed};

/// Clone `url` into `target` and check out `reference`
pub fn clone_at(url: &str, reference: &str, target: &Path) -> Result<Repository> {
    if reference.is_empty() {
        return builder(url, None)
            .clone(url, target)
            .map_err(|e| clone_failed(url, interpret_git_error(&e)));
    }

    match builder(url, Some(reference)).clone(url, target) {
        Ok(repo) => Ok(repo),
        Err(e) if is_missing_branch(&e) => {
            tracing::debug!(%url, %reference, "no such branch, resolving as tag");
            if target.exists() {
                fs::remove_dir_all(target)?;
            }
            let repo = builder(url, None)
                .clone(url, target)
                .map_err(|e| clone_failed(url, interpret_git_error(&e)))?;
            if let Err(e) = checkout_revision(&repo, reference) {
                drop(repo);
                let _ = fs::remove_dir_all(target);
                return Err(clone_failed(url, interpret_git_error(&e)));
            }
            Ok(repo)
        }
        Err(e) => Err(clone_failed(url, interpret_git_error(&e))),
    }
}

fn builder(url: &str, branch: Option<&str>) -> RepoBuilder<'static> {
    let mut fetch_options = FetchOptions::new();
    // Shallow clones are not supported for local paths; a tag lookup also
    // needs more than the tip of the default branch
    if !is_local(url) && branch.is_some() {
        fetch_options.depth(1);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    if let Some(branch) = branch {
        builder.branch(branch);
    }
    builder
}

fn is_local(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).is_absolute()
}

/// Check out a tag or revision with a detached HEAD
fn checkout_revision(repo: &Repository, reference: &str) -> std::result::Result<(), git2::Error> {
    let object = repo
        .revparse_single(&format!("refs/tags/{reference}"))
        .or_else(|_| repo.revparse_single(reference))?;
    let commit = object.peel_to_commit()?;

    let mut checkout = git2::build::CheckoutBuilder::new();
    checkout.force();
    repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
    repo.set_head_detached(commit.id())
}


#[cfg(test)]
mod tests {
    use super::test_support::init_remote;
    use super::*;
    use crate::error::DevbootError;
    use tempfile::TempDir;

    #[test]
    fn test_clone_branch() {
        let temp = TempDir::new().unwrap();
        let remote = temp.path().join("remote");
        init_remote(&remote);
        let target = temp.path().join("clone");

        let repo = clone_at(remote.to_str().unwrap(), "stable", &target).unwrap();

        assert!(target.join("init.lua").is_file());
        assert_eq!(repo.head().unwrap().shorthand(), Some("stable"));
    }

    #[test]
    fn test_clone_tag() {
        let temp = TempDir::new().unwrap();
        let remote = temp.path().join("remote");
        init_remote(&remote);
        let target = temp.path().join("clone");

        let repo = clone_at(remote.to_str().unwrap(), "v1.0.0", &target).unwrap();

        assert!(repo.head_detached().unwrap());
        assert!(target.join("init.lua").is_file());
    }

    #[test]
    fn test_clone_missing_remote_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let target = temp.path().join("clone");
        let Err(err) = clone_at(missing.to_str().unwrap(), "stable", &target) else {
            panic!("clone of a missing remote succeeded");
        };
        assert!(matches!(err, DevbootError::GitCloneFailed { .. }));
    }

    #[test]
    fn test_clone_unknown_reference_fails() {
        let temp = TempDir::new().unwrap();
        let remote = temp.path().join("remote");
        init_remote(&remote);

        let target = temp.path().join("clone");
        let Err(err) = clone_at(remote.to_str().unwrap(), "no-such-ref", &target) else {
            panic!("clone of an unknown reference succeeded");
        };
        assert!(matches!(err, DevbootError::GitCloneFailed { .. }));
        assert!(!target.exists());
    }

    #[test]
    fn test_is_local() {
        assert!(is_local("/tmp/repo"));
        assert!(is_local("file:///tmp/repo"));
        assert!(!is_local("https://github.com/folke/lazy.nvim.git"));
    }
}
