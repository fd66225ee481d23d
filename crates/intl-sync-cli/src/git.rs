// crates/intl-sync-cli/src/git.rs
// ============================================================================
// Module: Git Plumbing
// Description: Staged-change queries, re-staging, and hook management.
// Purpose: Drive the commit-time gate from the repository index.
// Dependencies: std::process, thiserror
// ============================================================================

//! ## Overview
//! The gate reads the repository through the `git` binary rather than a
//! library binding: `rev-parse` asserts we are inside a work tree,
//! `diff --cached --name-only` lists staged files under the watched
//! scope (lockfiles excluded), and `add` re-stages regenerated
//! translations so they ride along with the commit that triggered them.
//! Hook management owns `.git/hooks/pre-commit` only when the script is
//! recognizably ours.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use thiserror::Error;
use tracing::debug;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Lockfiles excluded from the staged-change query.
pub const LOCKFILE_EXCLUDES: &[&str] =
    &["package-lock.json", "yarn.lock", "pnpm-lock.yaml", "Cargo.lock"];

/// Marker line identifying a hook script as ours.
const HOOK_MARKER: &str = "# installed by intl-sync";

/// The pre-commit hook script body.
const HOOK_SCRIPT: &str = "#!/bin/sh\n# installed by intl-sync\nexec intl-sync --from-git-hook\n";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Git interaction failure classes.
#[derive(Debug, Error)]
pub enum GitError {
    /// The working directory is not inside a git repository.
    #[error("not a git repository")]
    NotARepository,
    /// The `git` binary could not be spawned.
    #[error("failed to run git: {reason}")]
    Spawn {
        /// Underlying spawn failure description.
        reason: String,
    },
    /// A git command exited unsuccessfully.
    #[error("git {operation} failed: {stderr}")]
    Command {
        /// Git subcommand that failed.
        operation: String,
        /// Captured standard error, possibly empty.
        stderr: String,
    },
    /// The pre-commit hook slot is held by an unrelated script.
    #[error("{path} is not an intl-sync hook")]
    ForeignHook {
        /// Hook path that was inspected.
        path: PathBuf,
    },
    /// No hook script is installed.
    #[error("no hook installed at {path}")]
    HookMissing {
        /// Hook path that was probed.
        path: PathBuf,
    },
    /// The hook script could not be read or written.
    #[error("hook I/O failed at {path}: {reason}")]
    HookIo {
        /// Hook path involved in the failure.
        path: PathBuf,
        /// Underlying I/O failure description.
        reason: String,
    },
}

// ============================================================================
// SECTION: Command Helpers
// ============================================================================

/// Runs a git subcommand and captures trimmed stdout.
fn run_git(args: &[String]) -> Result<String, GitError> {
    let output = Command::new("git").args(args).output().map_err(|err| GitError::Spawn {
        reason: err.to_string(),
    })?;
    if !output.status.success() {
        return Err(GitError::Command {
            operation: args.first().cloned().unwrap_or_default(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

// ============================================================================
// SECTION: Repository Queries
// ============================================================================

/// Asserts the working directory is inside a git work tree.
///
/// # Errors
///
/// Returns [`GitError::NotARepository`] when it is not, and
/// [`GitError::Spawn`] when git cannot be run at all.
pub fn assert_repository() -> Result<(), GitError> {
    let args = vec!["rev-parse".to_string(), "--is-inside-work-tree".to_string()];
    match run_git(&args) {
        Ok(answer) if answer == "true" => Ok(()),
        Ok(_) | Err(GitError::Command { .. }) => Err(GitError::NotARepository),
        Err(err) => Err(err),
    }
}

/// Builds the argument list for the staged-change query.
#[must_use]
pub fn staged_query_args(scope: &Path) -> Vec<String> {
    let mut args = vec![
        "diff".to_string(),
        "--cached".to_string(),
        "--name-only".to_string(),
        "--".to_string(),
        scope.to_string_lossy().into_owned(),
    ];
    for lockfile in LOCKFILE_EXCLUDES {
        args.push(format!(":(exclude){lockfile}"));
    }
    args
}

/// Lists staged files under `scope`, lockfiles excluded.
///
/// Paths are repository-relative, as git reports them.
///
/// # Errors
///
/// Returns [`GitError`] when the query cannot be run.
pub fn staged_files(scope: &Path) -> Result<Vec<PathBuf>, GitError> {
    let stdout = run_git(&staged_query_args(scope))?;
    let files: Vec<PathBuf> =
        stdout.lines().filter(|line| !line.trim().is_empty()).map(PathBuf::from).collect();
    debug!(scope = %scope.display(), staged = files.len(), "staged-change query");
    Ok(files)
}

/// Re-stages `path` so a regenerated translation joins the commit.
///
/// # Errors
///
/// Returns [`GitError`] when `git add` fails.
pub fn restage(path: &Path) -> Result<(), GitError> {
    let args = vec!["add".to_string(), path.to_string_lossy().into_owned()];
    run_git(&args).map(|_| ())
}

// ============================================================================
// SECTION: Hook Management
// ============================================================================

/// Resolves the pre-commit hook path for the current repository.
///
/// # Errors
///
/// Returns [`GitError`] when the git directory cannot be resolved.
pub fn hook_path() -> Result<PathBuf, GitError> {
    let args = vec!["rev-parse".to_string(), "--git-dir".to_string()];
    let git_dir = run_git(&args)?;
    Ok(PathBuf::from(git_dir).join("hooks").join("pre-commit"))
}

/// Recognizes a hook script installed by this tool.
#[must_use]
pub fn is_our_hook(script: &str) -> bool {
    script.lines().any(|line| line.trim() == HOOK_MARKER)
}

/// Installs the pre-commit hook at `path`.
///
/// Reinstalling over our own script is allowed; an unrelated hook is
/// left untouched.
///
/// # Errors
///
/// Returns [`GitError::ForeignHook`] when the slot is taken by another
/// script, and [`GitError::HookIo`] on filesystem failure.
pub fn install_hook(path: &Path) -> Result<(), GitError> {
    if path.exists() {
        let existing = fs::read_to_string(path).map_err(|err| GitError::HookIo {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        if !is_our_hook(&existing) {
            return Err(GitError::ForeignHook {
                path: path.to_path_buf(),
            });
        }
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| GitError::HookIo {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
    }
    fs::write(path, HOOK_SCRIPT).map_err(|err| GitError::HookIo {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|err| {
            GitError::HookIo {
                path: path.to_path_buf(),
                reason: err.to_string(),
            }
        })?;
    }
    Ok(())
}

/// Removes the pre-commit hook at `path` if it is ours.
///
/// # Errors
///
/// Returns [`GitError::HookMissing`] when no hook is installed,
/// [`GitError::ForeignHook`] when the script is not ours, and
/// [`GitError::HookIo`] on filesystem failure.
pub fn uninstall_hook(path: &Path) -> Result<(), GitError> {
    if !path.exists() {
        return Err(GitError::HookMissing {
            path: path.to_path_buf(),
        });
    }
    let existing = fs::read_to_string(path).map_err(|err| GitError::HookIo {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })?;
    if !is_our_hook(&existing) {
        return Err(GitError::ForeignHook {
            path: path.to_path_buf(),
        });
    }
    fs::remove_file(path).map_err(|err| GitError::HookIo {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
