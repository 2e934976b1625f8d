//! Readers for the system types: collections, nullables, enums, and the remaining
//! non-primitive CLR value types.
//!
//! This module carries all five generic reader families. Each factory mints a specialized reader
//! whose element readers are resolved during the initialize pass — resolution cannot happen at
//! creation time because the element reader may appear later in the same manifest.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::{
    content::ContentReader,
    reader::{
        reader_names, registry::TypeReaderRegistry, specialized_name, GenericReaderFactory,
        TypeReader,
    },
    Error, Result,
};

const DATE_TIME_KINDS: [&str; 3] = ["Unspecified", "Utc", "Local"];

/// Fetch a resolved element reader, which the initialize pass must have filled in.
fn resolved(cell: &OnceCell<Rc<dyn TypeReader>>) -> Result<&Rc<dyn TypeReader>> {
    cell.get()
        .ok_or_else(|| malformed_error!("Type reader was used before its initialize pass"))
}

/// Resolve `target_type` into `cell` unless a previous initialize pass already did.
fn resolve_into(
    cell: &OnceCell<Rc<dyn TypeReader>>,
    registry: &TypeReaderRegistry,
    target_type: &str,
) -> Result<()> {
    if cell.get().is_none() {
        let _ = cell.set(registry.get_by_target_type(target_type)?);
    }
    Ok(())
}

// --- Enum ---

pub(crate) struct EnumReaderFactory;

impl GenericReaderFactory for EnumReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.EnumReader"
    }

    fn arity(&self) -> usize {
        1
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(EnumReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            // The reader decodes values of the enum type itself.
            target_type: args[0].clone(),
        })
    }
}

struct EnumReader {
    reader_name: String,
    target_type: String,
}

impl TypeReader for EnumReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

// --- Nullable ---

pub(crate) struct NullableReaderFactory;

impl GenericReaderFactory for NullableReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.NullableReader"
    }

    fn arity(&self) -> usize {
        1
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(NullableReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            target_type: specialized_name("System.Nullable", args),
            value_type: args[0].clone(),
            value_reader: OnceCell::new(),
        })
    }
}

struct NullableReader {
    reader_name: String,
    target_type: String,
    value_type: String,
    value_reader: OnceCell<Rc<dyn TypeReader>>,
}

impl TypeReader for NullableReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn is_value_type(&self) -> bool {
        true
    }

    fn initialize(&self, registry: &TypeReaderRegistry) -> Result<()> {
        resolve_into(&self.value_reader, registry, &self.value_type)
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        if input.stream.read_bool()? {
            let value_reader = resolved(&self.value_reader)?.clone();
            input.read_value_or_object(&value_reader)
        } else {
            input.log.write_line(format_args!("null"))
        }
    }
}

// --- Array ---

pub(crate) struct ArrayReaderFactory;

impl GenericReaderFactory for ArrayReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.ArrayReader"
    }

    fn arity(&self) -> usize {
        1
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(ArrayReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            target_type: format!("{}[]", args[0]),
            element_type: args[0].clone(),
            element_reader: OnceCell::new(),
        })
    }
}

struct ArrayReader {
    reader_name: String,
    target_type: String,
    element_type: String,
    element_reader: OnceCell<Rc<dyn TypeReader>>,
}

impl TypeReader for ArrayReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn initialize(&self, registry: &TypeReaderRegistry) -> Result<()> {
        resolve_into(&self.element_reader, registry, &self.element_type)
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let element_reader = resolved(&self.element_reader)?.clone();

        let count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Count: {count}"))?;

        for _ in 0..count {
            input.read_value_or_object(&element_reader)?;
        }

        Ok(())
    }
}

// --- List ---

pub(crate) struct ListReaderFactory;

impl GenericReaderFactory for ListReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.ListReader"
    }

    fn arity(&self) -> usize {
        1
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(ListReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            target_type: specialized_name("System.Collections.Generic.List", args),
            element_type: args[0].clone(),
            element_reader: OnceCell::new(),
        })
    }
}

struct ListReader {
    reader_name: String,
    target_type: String,
    element_type: String,
    element_reader: OnceCell<Rc<dyn TypeReader>>,
}

impl TypeReader for ListReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn initialize(&self, registry: &TypeReaderRegistry) -> Result<()> {
        resolve_into(&self.element_reader, registry, &self.element_type)
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let element_reader = resolved(&self.element_reader)?.clone();

        let count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Count: {count}"))?;

        for _ in 0..count {
            input.read_value_or_object(&element_reader)?;
        }

        Ok(())
    }
}

// --- Dictionary ---

pub(crate) struct DictionaryReaderFactory;

impl GenericReaderFactory for DictionaryReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.DictionaryReader"
    }

    fn arity(&self) -> usize {
        2
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(DictionaryReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            target_type: specialized_name("System.Collections.Generic.Dictionary", args),
            key_type: args[0].clone(),
            value_type: args[1].clone(),
            key_reader: OnceCell::new(),
            value_reader: OnceCell::new(),
        })
    }
}

struct DictionaryReader {
    reader_name: String,
    target_type: String,
    key_type: String,
    value_type: String,
    key_reader: OnceCell<Rc<dyn TypeReader>>,
    value_reader: OnceCell<Rc<dyn TypeReader>>,
}

impl TypeReader for DictionaryReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn initialize(&self, registry: &TypeReaderRegistry) -> Result<()> {
        resolve_into(&self.key_reader, registry, &self.key_type)?;
        resolve_into(&self.value_reader, registry, &self.value_type)
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let key_reader = resolved(&self.key_reader)?.clone();
        let value_reader = resolved(&self.value_reader)?.clone();

        let count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Count: {count}"))?;

        for _ in 0..count {
            input.log.write_line(format_args!("Key:"))?;
            input.read_value_or_object(&key_reader)?;

            input.log.write_line(format_args!("Value:"))?;
            input.read_value_or_object(&value_reader)?;
        }

        Ok(())
    }
}

// --- Reflective ---

pub(crate) struct ReflectiveReaderFactory;

impl GenericReaderFactory for ReflectiveReaderFactory {
    fn open_reader_name(&self) -> &str {
        "Microsoft.Xna.Framework.Content.ReflectiveReader"
    }

    fn arity(&self) -> usize {
        1
    }

    fn create(&self, args: &[String]) -> Rc<dyn TypeReader> {
        Rc::new(ReflectiveReader {
            reader_name: specialized_name(self.open_reader_name(), args),
            target_type: args[0].clone(),
        })
    }
}

struct ReflectiveReader {
    reader_name: String,
    target_type: String,
}

impl TypeReader for ReflectiveReader {
    fn target_type(&self) -> &str {
        &self.target_type
    }

    fn reader_name(&self) -> &str {
        &self.reader_name
    }

    fn read(&self, _input: &mut ContentReader<'_>) -> Result<()> {
        // Decoding would need the field layout of the target type, which only
        // the source ecosystem's runtime metadata can provide.
        Err(Error::ReflectiveUnsupported)
    }
}

// --- Remaining system value types ---

pub(crate) struct TimeSpanReader;

impl TypeReader for TimeSpanReader {
    reader_names!("System.TimeSpan", "Microsoft.Xna.Framework.Content.TimeSpanReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        // One tick is 100 nanoseconds.
        let ticks = input.stream.read_le::<i64>()?;
        input.log.write_line(format_args!("{ticks} ticks"))
    }
}

pub(crate) struct DateTimeReader;

impl TypeReader for DateTimeReader {
    reader_names!("System.DateTime", "Microsoft.Xna.Framework.Content.DateTimeReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        // Top two bits carry the kind, the remaining 62 bits the tick count.
        let raw = input.stream.read_le::<u64>()?;
        let kind = (raw >> 62) as usize;
        let ticks = raw & 0x3FFF_FFFF_FFFF_FFFF;

        match DATE_TIME_KINDS.get(kind) {
            Some(name) => input
                .log
                .write_line(format_args!("{ticks} ticks ({name})")),
            None => input
                .log
                .write_line(format_args!("{ticks} ticks (kind {kind})")),
        }
    }
}

pub(crate) struct DecimalReader;

impl TypeReader for DecimalReader {
    reader_names!("System.Decimal", "Microsoft.Xna.Framework.Content.DecimalReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let lo = input.stream.read_le::<u32>()?;
        let mid = input.stream.read_le::<u32>()?;
        let hi = input.stream.read_le::<u32>()?;
        let flags = input.stream.read_le::<u32>()?;

        let magnitude =
            (u128::from(hi) << 64) | (u128::from(mid) << 32) | u128::from(lo);
        let scale = ((flags >> 16) & 0xFF) as usize;
        let negative = flags & 0x8000_0000 != 0;

        let mut digits = magnitude.to_string();
        if scale > 0 {
            if digits.len() <= scale {
                let padding = scale - digits.len() + 1;
                digits.insert_str(0, &"0".repeat(padding));
            }
            digits.insert(digits.len() - scale, '.');
        }

        let sign = if negative { "-" } else { "" };
        input.log.write_line(format_args!("{sign}{digits}"))
    }
}

pub(crate) struct ExternalReferenceReader;

impl TypeReader for ExternalReferenceReader {
    reader_names!(
        "Microsoft.Xna.Framework.Content.ExternalReference",
        "Microsoft.Xna.Framework.Content.ExternalReferenceReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let asset_name = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("External reference: '{asset_name}'"))
    }
}
