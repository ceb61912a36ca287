//! Installation health report

use std::path::PathBuf;

use crate::config::Layout;

/// One expected path of the installation and whether it is present.
#[derive(Debug, Clone)]
pub struct FileCheckEntry {
    pub label: &'static str,
    pub path: PathBuf,
    pub exists: bool,
}

/// Check the expected files of the macro distribution.
///
/// Purely informational; missing entries are reported, never created.
pub fn run_file_check(layout: &Layout) -> Vec<FileCheckEntry> {
    let expected: Vec<(&'static str, PathBuf)> = vec![
        ("worker script", layout.worker_script()),
        ("position helper", layout.position_script()),
        ("webhook module", layout.root().join("webhook.py")),
        (
            "macro settings",
            layout.macro_settings_dir().join("Winter_Event.json"),
        ),
        (
            "mouse debugging utility",
            layout.utility_dir().join("mouseDebugging.py"),
        ),
        (
            "settings helper utility",
            layout.utility_dir().join("SettingsHelper.py"),
        ),
        ("av methods tool", layout.tools_dir().join("avMethods.py")),
        ("bot tools", layout.tools_dir().join("botTools.py")),
        ("window tools", layout.tools_dir().join("winTools.py")),
        ("resources directory", layout.resources_dir()),
        ("tesseract directory", layout.tesseract_dir()),
    ];

    expected
        .into_iter()
        .map(|(label, path)| {
            let exists = path.exists();
            FileCheckEntry {
                label,
                path,
                exists,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reports_present_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());

        fs::write(layout.worker_script(), "VERSION_N = \"1.2\"\n").unwrap();
        fs::create_dir(layout.resources_dir()).unwrap();

        let entries = run_file_check(&layout);

        let by_label = |label: &str| {
            entries
                .iter()
                .find(|e| e.label == label)
                .unwrap_or_else(|| panic!("no entry labelled {}", label))
        };
        assert!(by_label("worker script").exists);
        assert!(by_label("resources directory").exists);
        assert!(!by_label("position helper").exists);
        assert!(!by_label("tesseract directory").exists);
    }

    #[test]
    fn test_covers_the_whole_distribution() {
        let dir = tempfile::tempdir().unwrap();
        let entries = run_file_check(&Layout::new(dir.path()));
        assert_eq!(entries.len(), 11);
    }
}
