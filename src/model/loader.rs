//! Filesystem model loader.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::Device;
use tracing::debug;

use super::device::select_device;
use super::error::ModelError;
use super::inferer::{ModelHandle, ModelLoader};
use super::language::Language;

/// Loads models from directories.
///
/// A name resolves to the directory itself when it is a path, otherwise to
/// `<data_path>/<name>`. Linking a model under a short name is a symlink in the
/// data path.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    data_path: PathBuf,
    device: Device,
}

impl DirectoryLoader {
    /// Creates a loader rooted at `data_path` on the best available device.
    pub fn new<P: Into<PathBuf>>(data_path: P) -> Result<Self, ModelError> {
        let device = select_device()?;
        Ok(Self::with_device(data_path, device))
    }

    pub fn with_device<P: Into<PathBuf>>(data_path: P, device: Device) -> Self {
        Self {
            data_path: data_path.into(),
            device,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Returns the model directory for `name`, if any.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        let direct = Path::new(name);
        if direct.is_absolute() || name.contains(std::path::MAIN_SEPARATOR) {
            return direct.is_dir().then(|| direct.to_path_buf());
        }

        let linked = self.data_path.join(name);
        linked.is_dir().then_some(linked)
    }
}

impl ModelLoader for DirectoryLoader {
    fn load(&self, name: &str, disable: &[&str]) -> Result<Option<ModelHandle>, ModelError> {
        let dir = self.resolve(name).ok_or_else(|| ModelError::NotFound {
            name: name.to_string(),
            data_path: self.data_path.clone(),
        })?;
        debug!(name, dir = %dir.display(), ?disable, "Resolved model directory");

        let language = Language::from_dir(&dir, disable, &self.device)?;
        Ok(Some(Arc::new(language)))
    }
}
