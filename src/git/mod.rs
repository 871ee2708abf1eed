//! Publishing generated files with git
//!
//! This module handles:
//! - Configuring the committer identity
//! - Pointing `origin` at an authenticated GitHub URL when a token is given
//! - Staging every change (additions, modifications, deletions)
//! - Committing, fast-forward pulling, and pushing the current branch
//!
//! When the staged tree matches `HEAD` nothing is committed or pushed.

pub mod auth;
mod error;

use std::cell::RefCell;
use std::path::Path;

use git2::build::CheckoutBuilder;
use git2::{FetchOptions, IndexAddOption, Oid, PushOptions, Repository, Signature};

use crate::error::{FeedError, Result};

pub use error::interpret_git_error;

const REMOTE: &str = "origin";

/// Everything the publish step needs
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub committer_name: String,
    pub committer_email: String,
    pub message: String,
    /// Access token used for the remote URL and HTTPS credentials
    pub token: Option<String>,
    /// `owner/repo`, required when a token is given
    pub repository: Option<String>,
}

/// Result of a publish run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Pushed { branch: String, commit: String },
    NothingToCommit,
}

/// Open the repository containing `start`
pub fn open_repository(start: &Path) -> Result<Repository> {
    Repository::discover(start).map_err(|_| FeedError::NotInGitRepository)
}

/// Name of the branch `HEAD` points at, even before the first commit
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.find_reference("HEAD")?;
    head.symbolic_target()
        .and_then(|target| target.strip_prefix("refs/heads/"))
        .map(ToString::to_string)
        .ok_or_else(|| FeedError::GitOperationFailed {
            message: "HEAD is detached; check out a branch before publishing".to_string(),
        })
}

/// Set `user.name` and `user.email` in the repository config
pub fn configure_identity(repo: &Repository, name: &str, email: &str) -> Result<()> {
    let mut config = repo.config()?;
    config.set_str("user.name", name)?;
    config.set_str("user.email", email)?;
    Ok(())
}

/// `https://<token>@github.com/<owner/repo>.git`
pub fn authenticated_remote_url(token: &str, repository: &str) -> String {
    format!("https://{token}@github.com/{repository}.git")
}

/// Stage every change in the working tree and return the resulting tree id
pub fn stage_all(repo: &Repository) -> Result<Oid> {
    let mut index = repo.index()?;
    index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
    index.update_all(["*"], None)?;
    index.write()?;
    Ok(index.write_tree()?)
}

/// Commit `tree` on top of `HEAD`, or return `None` when it matches `HEAD`'s tree
pub fn commit_tree(
    repo: &Repository,
    tree: Oid,
    signature: &Signature<'_>,
    message: &str,
) -> Result<Option<Oid>> {
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    if parent.as_ref().is_some_and(|p| p.tree_id() == tree) {
        return Ok(None);
    }

    let tree = repo.find_tree(tree)?;
    let parents: Vec<_> = parent.iter().collect();
    let oid = repo.commit(Some("HEAD"), signature, signature, message, &tree, &parents)?;
    Ok(Some(oid))
}

/// Fetch `branch` from origin and fast-forward to it when possible
pub fn pull_fast_forward(repo: &Repository, branch: &str, token: Option<&str>) -> Result<()> {
    let mut remote = repo.find_remote(REMOTE)?;
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(auth::remote_callbacks(token));
    remote.fetch(&[branch], Some(&mut fetch_options), None)?;

    let Ok(fetch_head) = repo.find_reference("FETCH_HEAD") else {
        tracing::debug!(branch, "nothing fetched");
        return Ok(());
    };
    let fetched = repo.reference_to_annotated_commit(&fetch_head)?;
    let (analysis, _) = repo.merge_analysis(&[&fetched])?;

    if analysis.is_up_to_date() {
        return Ok(());
    }
    if !analysis.is_fast_forward() {
        return Err(FeedError::NotFastForward {
            branch: branch.to_string(),
        });
    }

    let refname = format!("refs/heads/{branch}");
    repo.find_reference(&refname)?
        .set_target(fetched.id(), "pull: fast-forward")?;
    repo.set_head(&refname)?;
    repo.checkout_head(Some(CheckoutBuilder::default().force()))?;
    tracing::info!(branch, commit = %fetched.id(), "fast-forwarded");
    Ok(())
}

/// Push `branch` to origin, failing when the remote rejects the update
pub fn push(repo: &Repository, branch: &str, token: Option<&str>) -> Result<()> {
    let mut remote = repo.find_remote(REMOTE)?;
    let refspec = format!("refs/heads/{branch}:refs/heads/{branch}");
    let rejection: RefCell<Option<(String, String)>> = RefCell::new(None);

    let mut callbacks = auth::remote_callbacks(token);
    callbacks.push_update_reference(|refname, status| {
        if let Some(reason) = status {
            *rejection.borrow_mut() = Some((refname.to_string(), reason.to_string()));
        }
        Ok(())
    });
    let mut push_options = PushOptions::new();
    push_options.remote_callbacks(callbacks);

    remote.push(&[refspec.as_str()], Some(&mut push_options))?;

    match rejection.take() {
        Some((refname, reason)) => Err(FeedError::PushRejected { refname, reason }),
        None => Ok(()),
    }
}

/// Configure, stage, commit, pull and push, in that order
pub fn publish(workdir: &Path, options: &PublishOptions) -> Result<PublishOutcome> {
    let repo = open_repository(workdir)?;

    configure_identity(&repo, &options.committer_name, &options.committer_email)?;

    let token = options.token.as_deref().filter(|t| !t.is_empty());
    if let Some(token) = token {
        let repository =
            options
                .repository
                .as_deref()
                .ok_or_else(|| FeedError::ConfigInvalid {
                    message: "GITHUB_REPOSITORY must be set when an access token is given"
                        .to_string(),
                })?;
        repo.remote_set_url(REMOTE, &authenticated_remote_url(token, repository))?;
    }

    let branch = current_branch(&repo)?;
    let tree = stage_all(&repo)?;
    let signature = Signature::now(&options.committer_name, &options.committer_email)?;

    let Some(commit) = commit_tree(&repo, tree, &signature, &options.message)? else {
        tracing::info!("no change detected, skipping commit");
        return Ok(PublishOutcome::NothingToCommit);
    };
    tracing::info!(%commit, branch = %branch, "committed");

    pull_fast_forward(&repo, &branch, token)?;
    push(&repo, &branch, token)?;
    tracing::info!(branch = %branch, "pushed");

    Ok(PublishOutcome::Pushed {
        branch,
        commit: commit.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options() -> PublishOptions {
        PublishOptions {
            committer_name: "feed-bot".to_string(),
            committer_email: "feed-bot@example.com".to_string(),
            message: "Update appstores feed".to_string(),
            token: None,
            repository: None,
        }
    }

    /// Work repository with a bare `origin` that already has one commit
    fn repo_with_origin(temp: &TempDir) -> (Repository, Repository) {
        let origin_path = temp.path().join("origin.git");
        let origin = Repository::init_bare(&origin_path).unwrap();
        let work = Repository::init(temp.path().join("work")).unwrap();
        work.remote(REMOTE, origin_path.to_str().unwrap()).unwrap();

        let workdir = work.workdir().unwrap().to_path_buf();
        fs::write(workdir.join("README.md"), "# Apps\n").unwrap();
        let tree = stage_all(&work).unwrap();
        let sig = Signature::now("seed", "seed@example.com").unwrap();
        commit_tree(&work, tree, &sig, "seed").unwrap().unwrap();
        let branch = current_branch(&work).unwrap();
        push(&work, &branch, None).unwrap();

        (work, origin)
    }

    #[test]
    fn test_open_repository_outside_repo() {
        let temp = TempDir::new().unwrap();
        let result = open_repository(temp.path());
        assert!(matches!(result, Err(FeedError::NotInGitRepository)));
    }

    #[test]
    fn test_authenticated_remote_url() {
        assert_eq!(
            authenticated_remote_url("abc", "owner/repo"),
            "https://abc@github.com/owner/repo.git"
        );
    }

    #[test]
    fn test_commit_tree_skips_unchanged_tree() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        fs::write(temp.path().join("a.svg"), "<svg/>").unwrap();
        let sig = Signature::now("t", "t@example.com").unwrap();

        let tree = stage_all(&repo).unwrap();
        assert!(commit_tree(&repo, tree, &sig, "first").unwrap().is_some());

        let tree = stage_all(&repo).unwrap();
        assert!(commit_tree(&repo, tree, &sig, "second").unwrap().is_none());
    }

    #[test]
    fn test_stage_all_picks_up_deletions() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        fs::write(temp.path().join("a.svg"), "<svg/>").unwrap();
        let sig = Signature::now("t", "t@example.com").unwrap();
        let tree = stage_all(&repo).unwrap();
        commit_tree(&repo, tree, &sig, "add").unwrap();

        fs::remove_file(temp.path().join("a.svg")).unwrap();
        let tree = stage_all(&repo).unwrap();
        assert!(commit_tree(&repo, tree, &sig, "remove").unwrap().is_some());
        assert!(repo.find_tree(tree).unwrap().is_empty());
    }

    #[test]
    fn test_configure_identity() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        configure_identity(&repo, "feed-bot", "feed-bot@example.com").unwrap();

        let config = repo.config().unwrap().snapshot().unwrap();
        assert_eq!(config.get_str("user.name").unwrap(), "feed-bot");
        assert_eq!(config.get_str("user.email").unwrap(), "feed-bot@example.com");
    }

    #[test]
    fn test_publish_pushes_new_badges() {
        let temp = TempDir::new().unwrap();
        let (work, origin) = repo_with_origin(&temp);
        let workdir = work.workdir().unwrap().to_path_buf();
        fs::create_dir_all(workdir.join("images")).unwrap();
        fs::write(workdir.join("images/1.svg"), "<svg/>").unwrap();

        let outcome = publish(&workdir, &options()).unwrap();

        let PublishOutcome::Pushed { branch, commit } = outcome else {
            panic!("expected a push");
        };
        let remote_head = origin
            .find_reference(&format!("refs/heads/{branch}"))
            .unwrap()
            .target()
            .unwrap();
        assert_eq!(remote_head.to_string(), commit);

        let pushed = origin.find_commit(remote_head).unwrap();
        assert_eq!(pushed.message(), Some("Update appstores feed"));
        assert_eq!(pushed.author().name(), Some("feed-bot"));
    }

    #[test]
    fn test_publish_without_changes_does_nothing() {
        let temp = TempDir::new().unwrap();
        let (work, _origin) = repo_with_origin(&temp);
        let workdir = work.workdir().unwrap().to_path_buf();

        let outcome = publish(&workdir, &options()).unwrap();

        assert_eq!(outcome, PublishOutcome::NothingToCommit);
    }

    #[test]
    fn test_publish_with_token_requires_repository() {
        let temp = TempDir::new().unwrap();
        let (work, _origin) = repo_with_origin(&temp);
        let workdir = work.workdir().unwrap().to_path_buf();
        let options = PublishOptions {
            token: Some("abc".to_string()),
            ..options()
        };

        let result = publish(&workdir, &options);

        assert!(matches!(result, Err(FeedError::ConfigInvalid { .. })));
    }
}
