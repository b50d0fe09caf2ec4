//! Field operations over an EEPROM image and its backend.
//!
//! [`EepromTool`] drives every field through the same descriptor-based
//! update, clear, and read routines. Mutations only touch the in-memory image;
//! [`EepromTool::commit`] persists a field through the backend.

use mac_address::MacAddress;

use crate::backend::Backend;
use crate::constants::MAC_ID_LEN;
use crate::eeprom::{mac, EepromImage, Field, FieldDescriptor, Layout};
use crate::error::{Error, Result};

/// A field value as read back for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A fixed-width text field, cut at the first zero byte.
    Text(String),
    /// One rendered entry per MAC ID slot; cleared slots are empty.
    MacIds(Vec<String>),
}

/// An EEPROM image bound to a layout and a persistence backend.
#[derive(Debug)]
pub struct EepromTool<B> {
    layout: Layout,
    image: EepromImage,
    backend: B,
}

impl<B: Backend> EepromTool<B> {
    /// Create a tool with an all-zero image. Call [`load`](Self::load) to
    /// populate it from the backend.
    pub fn new(layout: Layout, backend: B) -> Self {
        Self {
            layout,
            image: EepromImage::default(),
            backend,
        }
    }

    /// Populate the image from the backend.
    pub fn load(&mut self) -> Result<()> {
        self.backend.load(&mut self.image)
    }

    /// The active field layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The in-memory image.
    pub fn image(&self) -> &EepromImage {
        &self.image
    }

    /// The persistence backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the tool, returning the image and the backend.
    pub fn into_parts(self) -> (EepromImage, B) {
        (self.image, self.backend)
    }

    fn descriptor(&self, field: Field) -> Result<&'static FieldDescriptor> {
        self.layout.descriptor(field)
    }

    /// Overwrite a text field with `value`.
    ///
    /// `value` must be exactly as long as the field; otherwise nothing
    /// changes. The image is not persisted.
    pub fn update(&mut self, field: Field, value: &str) -> Result<()> {
        if field == Field::MacIds {
            return Err(Error::InvalidArgument(
                "MAC IDs are generated, use update_mac_ids",
            ));
        }
        let desc = self.descriptor(field)?;
        self.image.write_field(desc, value.as_bytes())
    }

    /// Assign generated MAC IDs to slots `1..=count`.
    ///
    /// Slots above `count` keep their contents. The image is not persisted.
    pub fn update_mac_ids(&mut self, count: usize) -> Result<Vec<MacAddress>> {
        let desc = self.descriptor(Field::MacIds)?;
        let ids = mac::generate(count)?;
        let block = self.image.field_mut(desc);
        for (slot, id) in block.chunks_exact_mut(MAC_ID_LEN).zip(&ids) {
            slot.copy_from_slice(&id.bytes());
        }
        Ok(ids)
    }

    /// Zero a field. The image is not persisted.
    pub fn clear(&mut self, field: Field) -> Result<()> {
        let desc = self.descriptor(field)?;
        self.image.clear_field(desc);
        Ok(())
    }

    /// Persist `field` through the backend.
    pub fn commit(&mut self, field: Field) -> Result<()> {
        let desc = self.descriptor(field)?;
        self.backend.commit(&self.image, desc)
    }

    /// Read the field named by a command-line selector such as `SRNUM`.
    ///
    /// The field is refreshed from the backend first.
    pub fn read(&mut self, selector: &str) -> Result<(Field, FieldValue)> {
        let desc = self.layout.lookup(selector)?;
        self.backend.fetch(&mut self.image, desc)?;
        Ok((desc.field, self.render(desc)))
    }

    fn render(&self, desc: &FieldDescriptor) -> FieldValue {
        match desc.field {
            Field::MacIds => FieldValue::MacIds(
                self.image
                    .field(desc)
                    .chunks_exact(MAC_ID_LEN)
                    .map(mac::slot_text)
                    .collect(),
            ),
            _ => FieldValue::Text(self.image.text(desc)),
        }
    }
}
