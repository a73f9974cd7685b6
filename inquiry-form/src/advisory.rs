use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const FLAG_VALUE: &str = "true";

/// Remembers that this visitor already sent an inquiry.
///
/// Purely advisory: it hides the prompt on later runs and never blocks or
/// triggers a submission.
#[derive(Debug, Clone)]
pub struct SubmittedFlag {
    path: PathBuf,
}

impl SubmittedFlag {
    /// Flag stored under the user config directory
    pub fn in_config_dir() -> io::Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Could not find config directory")
            })?
            .join("inquiry-form");

        Ok(Self::at(config_dir.join("inquiry_submitted")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Anything other than the exact marker value counts as unset
    pub fn is_set(&self) -> bool {
        match fs::read_to_string(&self.path) {
            Ok(contents) => contents.trim() == FLAG_VALUE,
            Err(e) if e.kind() == io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Unreadable submitted flag"
                );
                false
            }
        }
    }

    pub fn set(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, FLAG_VALUE)
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}
