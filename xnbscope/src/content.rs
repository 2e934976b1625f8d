//! The per-file content engine.
//!
//! A [`ContentReader`] drives one parse: header, type manifest, primary object, shared resources.
//! It owns the byte stream and the output logger for the duration and borrows the reader registry
//! it resolves manifest entries against. The manifest becomes the per-file reader table; object
//! bodies select readers from it by 1-based tag, with 0 meaning null.
//!
//! # Example
//!
//! ```rust,no_run
//! use xnbscope::{ContentReader, TypeReaderRegistry};
//!
//! let data = std::fs::read("content/player.xnb")?;
//! let registry = TypeReaderRegistry::with_standard_types();
//! let mut out = std::io::stdout().lock();
//!
//! let mut reader = ContentReader::new(&data, &registry, &mut out);
//! reader.read_xnb()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::Write;
use std::rc::Rc;

use bitflags::bitflags;

use crate::{
    file::stream::BinaryStream,
    logger::Logger,
    reader::{registry::TypeReaderRegistry, TypeReader},
    Error, Result,
};

/// The expected format version byte. Other versions are parsed with a warning.
const FORMAT_VERSION: u8 = 5;

bitflags! {
    /// Flag bits carried in the XNB header.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct XnbFlags: u8 {
        /// Content was built for the HiDef graphics profile
        const HI_DEF = 0x01;
        /// The payload after the header is compressed
        const COMPRESSED = 0x80;
    }
}

/// Parses the entire contents of one XNB frame, writing a hierarchical listing as it goes.
///
/// The registry is shared and outlives the engine; specializations interned while this file's
/// manifest loads stay available to later parses. The per-file reader table is fixed once the
/// manifest has been read.
pub struct ContentReader<'a> {
    /// The byte stream, positioned wherever the parse has advanced to
    pub stream: BinaryStream<'a>,
    /// The indentation-aware output sink
    pub log: Logger<'a>,
    registry: &'a TypeReaderRegistry,
    type_readers: Vec<Rc<dyn TypeReader>>,
}

impl<'a> ContentReader<'a> {
    /// Create an engine over `data`, resolving readers from `registry` and dumping to `out`
    pub fn new(
        data: &'a [u8],
        registry: &'a TypeReaderRegistry,
        out: &'a mut dyn Write,
    ) -> Self {
        ContentReader {
            stream: BinaryStream::new(data),
            log: Logger::new(out),
            registry,
            type_readers: Vec::new(),
        }
    }

    /// Parse the whole frame: header, manifest, primary asset, and shared resources.
    ///
    /// # Errors
    /// Any parse failure aborts; see [`Error`] for the taxonomy. After the last shared resource
    /// the stream position must equal the frame end declared by the header, or the parse fails
    /// with [`Error::SizeMismatch`].
    pub fn read_xnb(&mut self) -> Result<()> {
        let end_position = self.read_header()?;

        self.read_type_manifest()?;

        let shared_resource_count = self.stream.read_7bit_encoded_int()?;

        self.log.write_line(format_args!("Asset:"))?;
        self.read_object()?;

        for i in 0..shared_resource_count {
            self.log.write_line(format_args!("Shared resource {i}:"))?;
            self.read_object()?;
        }

        // Make sure we read the amount of data that the file header said we should.
        if self.stream.pos() != end_position {
            return Err(Error::SizeMismatch {
                expected: end_position,
                actual: self.stream.pos(),
            });
        }

        Ok(())
    }

    /// Read the frame header, returning the declared end position.
    ///
    /// # Errors
    /// Returns [`Error::NotXnb`] on a magic mismatch, [`Error::Truncated`] if the declared size
    /// exceeds the data, and [`Error::CompressedUnsupported`] if the compressed flag is set.
    /// An unknown platform byte or unexpected format version only warns.
    pub fn read_header(&mut self) -> Result<usize> {
        let start_position = self.stream.pos();

        let magic1 = self.stream.read_le::<u8>()?;
        let magic2 = self.stream.read_le::<u8>()?;
        let magic3 = self.stream.read_le::<u8>()?;

        if magic1 != b'X' || magic2 != b'N' || magic3 != b'B' {
            return Err(Error::NotXnb);
        }

        let target_platform = self.stream.read_le::<u8>()?;

        match target_platform {
            b'w' => self.log.write_line(format_args!("Target platform: Windows"))?,
            b'm' => self
                .log
                .write_line(format_args!("Target platform: Windows Phone"))?,
            b'x' => self
                .log
                .write_line(format_args!("Target platform: Xbox 360"))?,
            other => {
                log::warn!("unknown target platform byte {other:#04x}");
                self.log
                    .write_line(format_args!("Unknown target platform {other}"))?;
            }
        }

        let format_version = self.stream.read_le::<u8>()?;

        if format_version != FORMAT_VERSION {
            log::warn!(
                "format version {format_version} is not the expected {FORMAT_VERSION}; parsing may fail unexpectedly"
            );
        }

        let flags = XnbFlags::from_bits_retain(self.stream.read_le::<u8>()?);

        if flags.contains(XnbFlags::HI_DEF) {
            self.log.write_line(format_args!("Graphics profile: HiDef"))?;
        } else {
            self.log.write_line(format_args!("Graphics profile: Reach"))?;
        }

        let size_on_disk = self.stream.read_le::<u32>()? as usize;

        let Some(end_position) = start_position.checked_add(size_on_disk) else {
            return Err(Error::Truncated {
                declared: size_on_disk,
                actual: self.stream.len(),
            });
        };

        if end_position > self.stream.len() {
            return Err(Error::Truncated {
                declared: size_on_disk,
                actual: self.stream.len() - start_position,
            });
        }

        if flags.contains(XnbFlags::COMPRESSED) {
            let decompressed_size = self.stream.read_le::<u32>()?;
            let compressed_size = end_position - self.stream.pos();

            self.log.write_line(format_args!(
                "{decompressed_size} bytes of asset data are compressed into {compressed_size}"
            ))?;

            return Err(Error::CompressedUnsupported);
        }

        Ok(end_position)
    }

    /// Read the manifest of what types are contained in this frame.
    ///
    /// Every entry is resolved through the registry and appended to the per-file reader table.
    /// The readers are then initialized in a separate pass after they are all registered, in
    /// case there are circular dependencies between them (eg. an array of classes which
    /// themselves contain arrays).
    ///
    /// # Errors
    /// Returns [`Error::UnknownReader`] or [`Error::UnknownTargetType`] when resolution fails
    pub fn read_type_manifest(&mut self) -> Result<()> {
        self.log.write_line(format_args!("Type readers:"))?;
        self.log.indent();

        let type_reader_count = self.stream.read_7bit_encoded_int()?;

        self.type_readers.clear();

        for _ in 0..type_reader_count {
            let reader_name = self.stream.read_string()?;
            let reader_version = self.stream.read_le::<i32>()?;

            self.log
                .write_line(format_args!("{reader_name} (version {reader_version})"))?;

            let reader = self.registry.get_by_reader_name(&reader_name)?;

            self.type_readers.push(reader);
        }

        for reader in &self.type_readers {
            reader.initialize(self.registry)?;
        }

        self.log.unindent();
        Ok(())
    }

    /// Read a single polymorphic object from the current location.
    ///
    /// # Errors
    /// Returns [`Error::BadTypeId`] if the tag does not select a manifest slot
    pub fn read_object(&mut self) -> Result<()> {
        self.log.indent();

        let result = match self.read_type_id() {
            Ok(Some(type_reader)) => self
                .log
                .write_line(format_args!("Type: {}", type_reader.target_type()))
                .and_then(|()| type_reader.read(self)),
            Ok(None) => self.log.write_line(format_args!("null")),
            Err(error) => Err(error),
        };

        self.log.unindent();
        result
    }

    /// Read either a raw value or a polymorphic object, depending on whether `type_reader`
    /// represents a value type.
    ///
    /// A value type is stored bare; a reference type starts with a tag that may select any
    /// reader, or null.
    ///
    /// # Errors
    /// Propagates the chosen reader's failure
    pub fn read_value_or_object(&mut self, type_reader: &Rc<dyn TypeReader>) -> Result<()> {
        if type_reader.is_value_type() {
            self.log.indent();
            let result = type_reader.read(self);
            self.log.unindent();
            result
        } else {
            self.read_object()
        }
    }

    /// Read a typeId and validate that it selects the expected target type.
    ///
    /// Used by readers whose payloads contain pre-tagged fields, such as the duration of a song.
    ///
    /// # Errors
    /// Returns [`Error::BadTypeId`] on null or on any other target type
    pub fn validate_type_id(&mut self, expected_type: &str) -> Result<()> {
        match self.read_type_id()? {
            Some(reader) if reader.target_type() == expected_type => Ok(()),
            _ => Err(Error::BadTypeId(format!(
                "expected a value of type '{expected_type}'"
            ))),
        }
    }

    /// Read a shared resource ID, which indexes into the table of shared object instances that
    /// come after the primary asset.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the sink fails
    pub fn read_shared_resource(&mut self) -> Result<()> {
        let resource_id = self.stream.read_7bit_encoded_int()?;

        if resource_id != 0 {
            self.log
                .write_line(format_args!("shared resource #{}", resource_id - 1))
        } else {
            self.log.write_line(format_args!("null"))
        }
    }

    /// Read the typeId from the start of a polymorphic object and look up the reader it selects.
    /// A zero typeId indicates a null object.
    fn read_type_id(&mut self) -> Result<Option<Rc<dyn TypeReader>>> {
        let type_id = self.stream.read_7bit_encoded_int()?;

        if type_id == 0 {
            return Ok(None);
        }

        match self.type_readers.get(type_id as usize - 1) {
            Some(reader) => Ok(Some(reader.clone())),
            None => Err(Error::BadTypeId(format!("type id {type_id} is out of range"))),
        }
    }
}
