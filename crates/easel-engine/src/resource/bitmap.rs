use std::any::Any;
use std::path::{Path, PathBuf};

use crate::paint::ImageData;

use super::{Resource, ResourceError};

enum Source {
    Path(PathBuf),
    Encoded { label: String, bytes: Vec<u8> },
    Decoded,
}

/// A bitmap decoded to RGBA8 on [`load`](Resource::load).
pub struct ImageResource {
    source: Source,
    data: Option<ImageData>,
}

impl ImageResource {
    /// Reads and decodes `path` when loaded.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: Source::Path(path.as_ref().to_path_buf()),
            data: None,
        }
    }

    /// Decodes in-memory PNG/JPEG/BMP bytes when loaded.
    pub fn from_encoded(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            source: Source::Encoded { label: label.into(), bytes },
            data: None,
        }
    }

    /// Already loaded.
    pub fn from_data(data: ImageData) -> Self {
        Self {
            source: Source::Decoded,
            data: Some(data),
        }
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.data.as_ref()
    }

    fn describe(&self) -> String {
        match &self.source {
            Source::Path(p) => p.display().to_string(),
            Source::Encoded { label, .. } => label.clone(),
            Source::Decoded => "<decoded image>".to_string(),
        }
    }
}

fn decode(name: String, bytes: &[u8]) -> Result<ImageData, ResourceError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|source| ResourceError::Decode { name: name.clone(), source })?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageData::new(width, height, rgba.into_raw()).ok_or(ResourceError::NotLoaded(name))
}

impl Resource for ImageResource {
    fn loaded(&self) -> bool {
        self.data.is_some()
    }

    fn load(&mut self) -> Result<(), ResourceError> {
        if self.data.is_some() {
            return Ok(());
        }
        let data = match &self.source {
            Source::Path(path) => {
                let bytes = std::fs::read(path)
                    .map_err(|source| ResourceError::Io { path: path.clone(), source })?;
                decode(self.describe(), &bytes)?
            }
            Source::Encoded { bytes, .. } => decode(self.describe(), bytes)?,
            Source::Decoded => return Err(ResourceError::NotLoaded(self.describe())),
        };
        log::debug!("decoded {} ({}x{})", self.describe(), data.width(), data.height());
        self.data = Some(data);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
