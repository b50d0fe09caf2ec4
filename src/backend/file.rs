//! File-backed EEPROM simulator.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants::EEPROM_SIZE;
use crate::eeprom::{EepromImage, FieldDescriptor};
use crate::error::Result;

use super::Backend;

/// Flat binary file holding a whole EEPROM image.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Use the image file at `path`. The file is created on first commit.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the image file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    /// A missing file loads as an all-zero image. A short file leaves the
    /// remaining bytes zero.
    fn load(&mut self, image: &mut EepromImage) -> Result<()> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, starting from a blank image", self.path.display());
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        if data.len() > EEPROM_SIZE {
            log::warn!(
                "{} is {} bytes, ignoring everything past {EEPROM_SIZE}",
                self.path.display(),
                data.len()
            );
        }
        log::debug!("loaded {} bytes from {}", data.len(), self.path.display());
        image.set_raw_buf(&data);
        Ok(())
    }

    fn fetch(&mut self, _image: &mut EepromImage, _field: &FieldDescriptor) -> Result<()> {
        // The whole file was read by `load`.
        Ok(())
    }

    fn commit(&mut self, image: &EepromImage, field: &FieldDescriptor) -> Result<()> {
        log::debug!(
            "rewriting {} after {:?} change",
            self.path.display(),
            field.field
        );
        fs::write(&self.path, image.raw_buf())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::{Field, FILE_LAYOUT};
    use crate::error::Error;

    #[test]
    fn missing_file_loads_blank() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("eeprom_data.bin"));
        let mut image = EepromImage::default();
        backend.load(&mut image).unwrap();
        assert_eq!(image, EepromImage::default());
        assert!(!backend.path().exists());
    }

    #[test]
    fn commit_writes_whole_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eeprom_data.bin");
        let mut backend = FileBackend::new(&path);
        let desc = FILE_LAYOUT.descriptor(Field::ProductId).unwrap();

        let mut image = EepromImage::default();
        image.write_field(desc, b"PID-00000042").unwrap();
        backend.commit(&image, desc).unwrap();

        let data = fs::read(&path).unwrap();
        assert_eq!(data.len(), EEPROM_SIZE);
        assert_eq!(&data[36..48], b"PID-00000042");

        let mut reloaded = EepromImage::default();
        FileBackend::new(&path).load(&mut reloaded).unwrap();
        assert_eq!(reloaded, image);
    }

    #[test]
    fn short_file_pads_with_zeros() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        fs::write(&path, b"ABC").unwrap();

        let mut image = EepromImage::default();
        FileBackend::new(&path).load(&mut image).unwrap();
        assert_eq!(&image.raw_buf()[..4], b"ABC\0");
    }

    #[test]
    fn commit_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path().join("no/such/dir/eeprom.bin"));
        let desc = FILE_LAYOUT.descriptor(Field::SerialNumber).unwrap();
        let err = backend.commit(&EepromImage::default(), desc).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
