//! Readers for the CLR primitive types.
//!
//! Each reader decodes one fixed-width primitive from the stream and renders it. All of them are
//! value types except [`StringReader`] and [`ObjectReader`]; the latter never decodes anything
//! itself — it exists so that `System.Object` slots can be resolved, and the tag in such a slot
//! always selects the concrete reader of the stored value.

use crate::{
    content::ContentReader,
    reader::{reader_names, TypeReader},
    Result,
};

pub(crate) struct ByteReader;

impl TypeReader for ByteReader {
    reader_names!("System.Byte", "Microsoft.Xna.Framework.Content.ByteReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<u8>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct SByteReader;

impl TypeReader for SByteReader {
    reader_names!("System.SByte", "Microsoft.Xna.Framework.Content.SByteReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<i8>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct Int16Reader;

impl TypeReader for Int16Reader {
    reader_names!("System.Int16", "Microsoft.Xna.Framework.Content.Int16Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<i16>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct UInt16Reader;

impl TypeReader for UInt16Reader {
    reader_names!("System.UInt16", "Microsoft.Xna.Framework.Content.UInt16Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<u16>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct Int32Reader;

impl TypeReader for Int32Reader {
    reader_names!("System.Int32", "Microsoft.Xna.Framework.Content.Int32Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct UInt32Reader;

impl TypeReader for UInt32Reader {
    reader_names!("System.UInt32", "Microsoft.Xna.Framework.Content.UInt32Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct Int64Reader;

impl TypeReader for Int64Reader {
    reader_names!("System.Int64", "Microsoft.Xna.Framework.Content.Int64Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<i64>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct UInt64Reader;

impl TypeReader for UInt64Reader {
    reader_names!("System.UInt64", "Microsoft.Xna.Framework.Content.UInt64Reader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<u64>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct SingleReader;

impl TypeReader for SingleReader {
    reader_names!("System.Single", "Microsoft.Xna.Framework.Content.SingleReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct DoubleReader;

impl TypeReader for DoubleReader {
    reader_names!("System.Double", "Microsoft.Xna.Framework.Content.DoubleReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_le::<f64>()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct BooleanReader;

impl TypeReader for BooleanReader {
    reader_names!("System.Boolean", "Microsoft.Xna.Framework.Content.BooleanReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_bool()?;
        input.log.write_line(format_args!("{value}"))
    }
}

pub(crate) struct CharReader;

impl TypeReader for CharReader {
    reader_names!("System.Char", "Microsoft.Xna.Framework.Content.CharReader");

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_char()?;
        input.log.write_line(format_args!("U+{:04X}", value as u32))
    }
}

pub(crate) struct StringReader;

impl TypeReader for StringReader {
    reader_names!("System.String", "Microsoft.Xna.Framework.Content.StringReader");

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let value = input.stream.read_string()?;
        input.log.write_line(format_args!("'{value}'"))
    }
}

pub(crate) struct ObjectReader;

impl TypeReader for ObjectReader {
    reader_names!("System.Object", "Microsoft.Xna.Framework.Content.ObjectReader");

    fn read(&self, _input: &mut ContentReader<'_>) -> Result<()> {
        // An object slot always carries the tag of the concrete stored type.
        Err(malformed_error!(
            "The Object reader cannot be invoked directly"
        ))
    }
}
