use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Chip8Error, Result};

/// File extensions accepted by `RomImage::from_path`
pub const ROM_EXTENSIONS: [&str; 3] = ["ch8", "c8", "rom"];

/// # ROM Image
/// An uninterpreted program, validated to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomImage {
    bytes: Vec<u8>,
}

impl RomImage {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Chip8Error::invalid_image("ROM is empty"));
        }
        Ok(RomImage { bytes })
    }

    /// Load a rom from a source
    ///
    /// # Arguments
    /// * `reader` some reader that contains a ROM
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| Chip8Error::invalid_image(format!("unable to read ROM: {}", e)))?;
        Self::from_bytes(bytes)
    }

    /// Load a rom from a file whose extension is one of `ROM_EXTENSIONS`
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension {
            Some(ext) if ROM_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(Chip8Error::invalid_image(format!(
                    "{} does not have a ROM extension ({})",
                    path.display(),
                    ROM_EXTENSIONS.join(", ")
                )))
            }
        }
        let file = File::open(path).map_err(|e| {
            Chip8Error::invalid_image(format!("unable to open {}: {}", path.display(), e))
        })?;
        Self::from_reader(&mut BufReader::new(file))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
