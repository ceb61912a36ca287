//! Startup capability detection
//!
//! The launcher leans on tools that may be absent: a Python interpreter
//! for the worker scripts, an interactive terminal for prompts.
//! Availability is determined once at startup; call sites branch on the
//! flags instead of probing ad hoc.

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

/// Environment variable overriding interpreter detection.
pub const PYTHON_ENV: &str = "WINTER_PYTHON";

#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    /// Resolved Python interpreter for worker scripts
    pub python: Option<PathBuf>,

    /// Console-less interpreter (Windows `pythonw`), when present
    pub windowless_python: Option<PathBuf>,

    /// Whether stdin is attached to a terminal
    pub interactive: bool,
}

impl Capabilities {
    /// Probe the environment once.
    ///
    /// An explicit `WINTER_PYTHON` override is trusted as-is; otherwise
    /// the usual interpreter names are searched on PATH in preference
    /// order.
    pub fn detect() -> Self {
        let python = env::var_os(PYTHON_ENV)
            .map(PathBuf::from)
            .or_else(|| find_in_path(&["python3", "python", "py"]));
        let windowless_python = find_in_path(&["pythonw"]);

        Self {
            python,
            windowless_python,
            interactive: std::io::stdin().is_terminal(),
        }
    }
}

/// Search PATH for the first of the given program names, in order.
fn find_in_path(names: &[&str]) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for name in names {
        for dir in env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            #[cfg(windows)]
            {
                let candidate = dir.join(format!("{}.exe", name));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_find_in_path_prefers_earlier_names() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        for name in ["python3", "python"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            let mut perms = std::fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).unwrap();
        }

        let original = env::var_os("PATH");
        env::set_var("PATH", dir.path());
        let found = find_in_path(&["python3", "python"]);
        match original {
            Some(path) => env::set_var("PATH", path),
            None => env::remove_var("PATH"),
        }

        assert_eq!(found.unwrap(), dir.path().join("python3"));
    }

    #[test]
    fn test_find_in_path_misses_absent_programs() {
        assert!(find_in_path(&["definitely-not-a-real-program-name"]).is_none());
    }
}
