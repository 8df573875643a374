// Helper functions shared by the invoker and the tool manager

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use super::errors::DownloadError;
use super::models::InvocationResult;

/// Platform executable name (`yt-dlp` -> `yt-dlp.exe` on Windows)
pub fn executable_name(name: &str) -> String {
    if cfg!(target_os = "windows") && !name.ends_with(".exe") {
        format!("{}.exe", name)
    } else {
        name.to_string()
    }
}

/// Directories checked before falling back to a PATH lookup
pub fn common_install_dirs() -> Vec<PathBuf> {
    let mut dirs_to_check = vec![
        PathBuf::from("/opt/homebrew/bin"), // Homebrew on Apple Silicon
        PathBuf::from("/usr/local/bin"),    // Homebrew on Intel Mac
        PathBuf::from("/usr/bin"),          // System installation
    ];

    // pip install --user
    if let Some(home) = dirs::home_dir() {
        dirs_to_check.push(home.join(".local").join("bin"));
    }

    dirs_to_check
}

/// Resolve a program through `which` (`where` on Windows)
pub async fn which(program: &str) -> Option<PathBuf> {
    let finder = if cfg!(target_os = "windows") { "where" } else { "which" };

    let output = TokioCommand::new(finder)
        .arg(program)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// First `dirs` entry that holds the program as a regular file
pub fn find_in_dirs(dirs_to_check: &[PathBuf], program: &str) -> Option<PathBuf> {
    let binary = executable_name(program);
    dirs_to_check
        .iter()
        .map(|dir| dir.join(&binary))
        .find(|candidate| candidate.is_file())
}

/// Find a program: common install dirs first, then PATH
pub async fn locate(program: &str) -> Option<PathBuf> {
    locate_in(&common_install_dirs(), program).await
}

/// Like [`locate`] but with an explicit list of install dirs
pub async fn locate_in(dirs_to_check: &[PathBuf], program: &str) -> Option<PathBuf> {
    if let Some(path) = find_in_dirs(dirs_to_check, program) {
        debug!(program, path = %path.display(), "found in install dir");
        return Some(path);
    }

    let found = which(program).await;
    if let Some(path) = &found {
        debug!(program, path = %path.display(), "found on PATH");
    }
    found
}

/// Run a program and capture stdout, `None` if it fails to start or exits nonzero
pub async fn capture_stdout<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> Option<String> {
    let output = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a program to completion with inherited stdio.
///
/// Blocks the calling task until the child exits; no timeout is applied.
pub async fn run_inherited<S: AsRef<OsStr>>(
    program: &Path,
    args: &[S],
) -> Result<InvocationResult, DownloadError> {
    let program_name = program.display().to_string();
    info!(program = %program_name, "starting subprocess");

    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| DownloadError::from_spawn(&program_name, e))?;

    let status = child.wait().await.map_err(|e| {
        DownloadError::ExecutionError(format!("Failed to wait for {}: {}", program_name, e))
    })?;

    let result = InvocationResult::from_status(status);
    if result.succeeded() {
        info!(program = %program_name, "subprocess finished");
    } else {
        warn!(program = %program_name, exit_code = result.exit_code(), "subprocess failed");
    }
    Ok(result)
}
