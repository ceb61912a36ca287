//! Installation layout

use std::env;
use std::path::{Path, PathBuf};

/// File name of the macro worker script.
pub const WORKER_SCRIPT: &str = "Winter_Event.py";

/// File name of the window-positioning helper.
pub const POSITION_SCRIPT: &str = "Position.py";

/// Well-known paths of a macro installation.
///
/// The layout mirrors the upstream distribution: worker scripts at the
/// root, macro settings under `Settings/`, helper modules under `Utility/`
/// and `Tools/`, image resources under `Resources/`, and the bundled OCR
/// engine under `tesseract/`. The launcher keeps its own settings file at
/// the root as well.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Default install root: the launcher executable's directory, falling
    /// back to the current directory.
    pub fn default_root() -> PathBuf {
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn worker_script(&self) -> PathBuf {
        self.root.join(WORKER_SCRIPT)
    }

    pub fn position_script(&self) -> PathBuf {
        self.root.join(POSITION_SCRIPT)
    }

    /// The launcher's own settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.root.join("launcher.toml")
    }

    /// Settings directory of the macro distribution itself.
    pub fn macro_settings_dir(&self) -> PathBuf {
        self.root.join("Settings")
    }

    pub fn utility_dir(&self) -> PathBuf {
        self.root.join("Utility")
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.join("Tools")
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("Resources")
    }

    pub fn tesseract_dir(&self) -> PathBuf {
        self.root.join("tesseract")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_hang_off_the_root() {
        let layout = Layout::new("/opt/winter");
        assert_eq!(layout.worker_script(), Path::new("/opt/winter/Winter_Event.py"));
        assert_eq!(layout.position_script(), Path::new("/opt/winter/Position.py"));
        assert_eq!(layout.settings_path(), Path::new("/opt/winter/launcher.toml"));
        assert_eq!(
            layout.macro_settings_dir(),
            Path::new("/opt/winter/Settings")
        );
        assert_eq!(layout.resources_dir(), Path::new("/opt/winter/Resources"));
    }
}
