//! Input file abstraction for XNB frames.
//!
//! This module abstracts over the two ways an XNB frame reaches the parser — a file on disk or an
//! in-memory buffer — behind the [`Backend`] trait. Disk files are memory-mapped, so a frame of
//! any size is exposed as one `&[u8]` without an upfront copy.
//!
//! # Examples
//!
//! ```rust,no_run
//! use xnbscope::XnbFile;
//! use std::path::Path;
//!
//! let file = XnbFile::from_path(Path::new("content/player.xnb"))?;
//! println!("{} bytes", file.len());
//! # Ok::<(), xnbscope::Error>(())
//! ```

pub mod io;
pub mod stream;

mod memory;
mod physical;

use std::{io::Write, path::Path};

use crate::{content::ContentReader, reader::registry::TypeReaderRegistry, Result};
use memory::Memory;
use physical::Physical;

/// Backend trait for file data sources.
///
/// Abstracts over the source of frame data, allowing for both in-memory and on-disk
/// representations.
pub trait Backend {
    /// Access to the whole data
    fn data(&self) -> &[u8];
    /// Size of the data
    fn len(&self) -> usize;
}

/// An XNB input file, backed by either a memory map or an owned buffer.
///
/// `XnbFile` only holds bytes; parsing is performed by a [`ContentReader`] borrowing the data.
/// The [`dump`](Self::dump) convenience drives a full parse against a registry and writes the
/// hierarchical listing to the given sink.
pub struct XnbFile {
    backend: Box<dyn Backend>,
}

impl XnbFile {
    /// Open and memory-map a file from disk
    ///
    /// ## Arguments
    /// * 'path' - The file to open
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be opened or mapped
    pub fn from_path(path: &Path) -> Result<XnbFile> {
        Ok(XnbFile {
            backend: Box::new(Physical::new(path)?),
        })
    }

    /// Wrap an in-memory buffer
    ///
    /// ## Arguments
    /// * 'data' - The frame bytes to consume
    #[must_use]
    pub fn from_mem(data: Vec<u8>) -> XnbFile {
        XnbFile {
            backend: Box::new(Memory::new(data)),
        }
    }

    /// Access to the whole frame data
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.backend.data()
    }

    /// Size of the frame data
    #[must_use]
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    /// Returns true if the file holds no data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backend.len() == 0
    }

    /// Parse the whole frame and write the hierarchical listing to `out`.
    ///
    /// ## Arguments
    /// * 'registry' - The reader registry to resolve manifest entries against
    /// * 'out'      - The sink receiving the indented dump
    ///
    /// # Errors
    /// Propagates any parse or write failure; see [`crate::Error`] for the taxonomy
    pub fn dump(&self, registry: &TypeReaderRegistry, out: &mut dyn Write) -> Result<()> {
        let mut reader = ContentReader::new(self.data(), registry, out);
        reader.read_xnb()
    }
}
