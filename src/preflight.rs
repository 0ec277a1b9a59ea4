//! Preflight checks: resolve required executables on the search path.
//!
//! The frontend interpreter is a hard requirement; the backend program is
//! optional and only downgrades the run when missing.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::error::StackError;

/// Looks up `program` in the `PATH` of the current process.
pub fn resolve_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    resolve_in(&path, program)
}

/// Looks up `program` in an explicit PATH-style value.
pub fn resolve_in(path: &OsStr, program: &str) -> Option<PathBuf> {
    // Absolute or relative paths bypass the search.
    if program.contains(std::path::MAIN_SEPARATOR) {
        let candidate = PathBuf::from(program);
        return is_executable(&candidate).then_some(candidate);
    }

    std::env::split_paths(path)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

/// Returns an error suitable for exit code 1 when `program` cannot be found.
pub fn require(program: &str) -> Result<PathBuf, StackError> {
    resolve_on_path(program).ok_or_else(|| StackError::MissingExecutable(program.to_string()))
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &std::path::Path) -> bool {
    path.is_file()
}
