//! Version marker scanning
//!
//! The upstream worker script carries its version as an ordinary source
//! line, `VERSION_N = "1.2"`. The marker is a crude ad hoc version string,
//! not a structured number: values are opaque and compared for equality
//! only.

use std::io;
use std::path::Path;

use serde::Serialize;

/// Token that marks the version line inside the worker script.
pub const VERSION_TOKEN: &str = "VERSION_N";

/// A source line carrying the recognized version token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionMarker {
    /// The raw line as it appeared in the source
    pub line: String,
    /// The extracted version value
    pub value: String,
}

impl VersionMarker {
    /// Parse a marker out of a single source line.
    ///
    /// Returns `None` when the line does not contain the token. The value
    /// is everything after the first `=`, trimmed, with one matching pair
    /// of single or double quotes stripped; a token line without `=`
    /// yields the whole trimmed line.
    pub fn from_line(line: &str) -> Option<Self> {
        if !line.contains(VERSION_TOKEN) {
            return None;
        }
        let value = match line.split_once('=') {
            Some((_, rest)) => strip_quotes(rest.trim()).to_string(),
            None => line.trim().to_string(),
        };
        Some(Self {
            line: line.to_string(),
            value,
        })
    }

    /// Scan a body of text for the first marker line.
    pub fn scan(text: &str) -> Option<Self> {
        text.lines().find_map(Self::from_line)
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Read the first version marker from a local file.
///
/// A missing file is `Ok(None)`, not an error; any other I/O failure is
/// returned to the caller.
pub fn read_version_marker(path: &Path) -> io::Result<Option<VersionMarker>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(VersionMarker::scan(&content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_line_extracts_quoted_value() {
        // Double quotes
        let marker = VersionMarker::from_line("VERSION_N = \"1.2\"").unwrap();
        assert_eq!(marker.line, "VERSION_N = \"1.2\"");
        assert_eq!(marker.value, "1.2");

        // Single quotes
        let marker = VersionMarker::from_line("VERSION_N = '2.0-beta'").unwrap();
        assert_eq!(marker.value, "2.0-beta");

        // Unquoted value after the equals sign
        let marker = VersionMarker::from_line("VERSION_N = 1.2").unwrap();
        assert_eq!(marker.value, "1.2");
    }

    #[test]
    fn test_from_line_without_equals_falls_back_to_whole_line() {
        let marker = VersionMarker::from_line("  VERSION_N 1.5  ").unwrap();
        assert_eq!(marker.value, "VERSION_N 1.5");
    }

    #[test]
    fn test_from_line_ignores_unrelated_lines() {
        assert!(VersionMarker::from_line("import os").is_none());
        assert!(VersionMarker::from_line("version = \"1.2\"").is_none());
    }

    #[test]
    fn test_scan_returns_first_marker() {
        let text = "import os\nVERSION_N = \"1.1\"\nVERSION_N = \"9.9\"\n";
        let marker = VersionMarker::scan(text).unwrap();
        assert_eq!(marker.value, "1.1");
    }

    #[test]
    fn test_read_version_marker_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_version_marker(&dir.path().join("absent.py")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_version_marker_file_without_token_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.py");
        std::fs::write(&path, "print('hello')\n").unwrap();
        assert!(read_version_marker(&path).unwrap().is_none());
    }

    #[test]
    fn test_read_version_marker_finds_token_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.py");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "import time").unwrap();
        writeln!(file, "VERSION_N = \"1.2\"").unwrap();
        drop(file);

        let marker = read_version_marker(&path).unwrap().unwrap();
        assert_eq!(marker.line, "VERSION_N = \"1.2\"");
        assert_eq!(marker.value, "1.2");
    }
}
