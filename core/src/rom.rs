use std::io::Read;
use std::path::Path;

use log::debug;

use crate::constants::MAX_ROM_SIZE;
use crate::error::RomError;

/// # ROM
/// A program image that is known to fit in the memory above `ROM_START`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rom {
    bytes: Vec<u8>,
}

impl Rom {
    /// Validates an in-memory program image.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RomError> {
        if bytes.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                size: bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }
        Ok(Rom { bytes })
    }

    /// Reads a whole program from `reader`.
    ///
    /// At most one byte past `MAX_ROM_SIZE` is read, which is enough to tell an oversized ROM apart.
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self, RomError> {
        let mut bytes = Vec::with_capacity(MAX_ROM_SIZE);
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut bytes)?;
        Rom::from_bytes(bytes)
    }

    /// Reads a program from a file on disk.
    pub fn from_path(path: &Path) -> Result<Self, RomError> {
        let mut file = std::fs::File::open(path)?;
        let rom = Rom::from_reader(&mut file)?;
        debug!("read {} byte ROM from {}", rom.len(), path.display());
        Ok(rom)
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
