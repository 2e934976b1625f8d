//! Readers for the framework math types.
//!
//! All of these are fixed-shape structs of floats, ints, or bytes, rendered on one line each,
//! except the curve, which carries a variable-length key list. Several composite readers
//! (effects, models) invoke `Vector3Reader` and friends directly to decode embedded fields.

use crate::{
    content::ContentReader,
    reader::{reader_names, TypeReader},
    Result,
};

const CURVE_LOOP_TYPES: [&str; 5] = ["Constant", "Cycle", "CycleOffset", "Oscillate", "Linear"];

const CURVE_CONTINUITIES: [&str; 2] = ["Smooth", "Step"];

pub(crate) struct Vector2Reader;

impl TypeReader for Vector2Reader {
    reader_names!(
        "Microsoft.Xna.Framework.Vector2",
        "Microsoft.Xna.Framework.Content.Vector2Reader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<f32>()?;
        let y = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("{{{x}, {y}}}"))
    }
}

pub(crate) struct Vector3Reader;

impl TypeReader for Vector3Reader {
    reader_names!(
        "Microsoft.Xna.Framework.Vector3",
        "Microsoft.Xna.Framework.Content.Vector3Reader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<f32>()?;
        let y = input.stream.read_le::<f32>()?;
        let z = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("{{{x}, {y}, {z}}}"))
    }
}

pub(crate) struct Vector4Reader;

impl TypeReader for Vector4Reader {
    reader_names!(
        "Microsoft.Xna.Framework.Vector4",
        "Microsoft.Xna.Framework.Content.Vector4Reader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<f32>()?;
        let y = input.stream.read_le::<f32>()?;
        let z = input.stream.read_le::<f32>()?;
        let w = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("{{{x}, {y}, {z}, {w}}}"))
    }
}

pub(crate) struct MatrixReader;

impl TypeReader for MatrixReader {
    reader_names!(
        "Microsoft.Xna.Framework.Matrix",
        "Microsoft.Xna.Framework.Content.MatrixReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        // Sixteen floats in row-major order.
        for _ in 0..4 {
            let a = input.stream.read_le::<f32>()?;
            let b = input.stream.read_le::<f32>()?;
            let c = input.stream.read_le::<f32>()?;
            let d = input.stream.read_le::<f32>()?;
            input
                .log
                .write_line(format_args!("{{{a}, {b}, {c}, {d}}}"))?;
        }
        Ok(())
    }
}

pub(crate) struct QuaternionReader;

impl TypeReader for QuaternionReader {
    reader_names!(
        "Microsoft.Xna.Framework.Quaternion",
        "Microsoft.Xna.Framework.Content.QuaternionReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<f32>()?;
        let y = input.stream.read_le::<f32>()?;
        let z = input.stream.read_le::<f32>()?;
        let w = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("{{{x}, {y}, {z}, {w}}}"))
    }
}

pub(crate) struct ColorReader;

impl TypeReader for ColorReader {
    reader_names!(
        "Microsoft.Xna.Framework.Color",
        "Microsoft.Xna.Framework.Content.ColorReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let r = input.stream.read_le::<u8>()?;
        let g = input.stream.read_le::<u8>()?;
        let b = input.stream.read_le::<u8>()?;
        let a = input.stream.read_le::<u8>()?;
        input
            .log
            .write_line(format_args!("{{R:{r} G:{g} B:{b} A:{a}}}"))
    }
}

pub(crate) struct PlaneReader;

impl TypeReader for PlaneReader {
    reader_names!(
        "Microsoft.Xna.Framework.Plane",
        "Microsoft.Xna.Framework.Content.PlaneReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write(format_args!("Normal: "))?;
        Vector3Reader.read(input)?;

        let d = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("D: {d}"))
    }
}

pub(crate) struct PointReader;

impl TypeReader for PointReader {
    reader_names!(
        "Microsoft.Xna.Framework.Point",
        "Microsoft.Xna.Framework.Content.PointReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<i32>()?;
        let y = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("{{{x}, {y}}}"))
    }
}

pub(crate) struct RectangleReader;

impl TypeReader for RectangleReader {
    reader_names!(
        "Microsoft.Xna.Framework.Rectangle",
        "Microsoft.Xna.Framework.Content.RectangleReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let x = input.stream.read_le::<i32>()?;
        let y = input.stream.read_le::<i32>()?;
        let width = input.stream.read_le::<i32>()?;
        let height = input.stream.read_le::<i32>()?;
        input
            .log
            .write_line(format_args!("{{{x}, {y}, {width}, {height}}}"))
    }
}

pub(crate) struct BoundingBoxReader;

impl TypeReader for BoundingBoxReader {
    reader_names!(
        "Microsoft.Xna.Framework.BoundingBox",
        "Microsoft.Xna.Framework.Content.BoundingBoxReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write(format_args!("Min: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Max: "))?;
        Vector3Reader.read(input)
    }
}

pub(crate) struct BoundingSphereReader;

impl TypeReader for BoundingSphereReader {
    reader_names!(
        "Microsoft.Xna.Framework.BoundingSphere",
        "Microsoft.Xna.Framework.Content.BoundingSphereReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write(format_args!("Center: "))?;
        Vector3Reader.read(input)?;

        let radius = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Radius: {radius}"))
    }
}

pub(crate) struct BoundingFrustumReader;

impl TypeReader for BoundingFrustumReader {
    reader_names!(
        "Microsoft.Xna.Framework.BoundingFrustum",
        "Microsoft.Xna.Framework.Content.BoundingFrustumReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        // A frustum is serialized as its defining matrix.
        MatrixReader.read(input)
    }
}

pub(crate) struct RayReader;

impl TypeReader for RayReader {
    reader_names!(
        "Microsoft.Xna.Framework.Ray",
        "Microsoft.Xna.Framework.Content.RayReader"
    );

    fn is_value_type(&self) -> bool {
        true
    }

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write(format_args!("Position: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Direction: "))?;
        Vector3Reader.read(input)
    }
}

pub(crate) struct CurveReader;

impl TypeReader for CurveReader {
    reader_names!(
        "Microsoft.Xna.Framework.Curve",
        "Microsoft.Xna.Framework.Content.CurveReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let pre_loop = input.stream.read_le::<i32>()?;
        input.log.write_enum("Pre loop", pre_loop, &CURVE_LOOP_TYPES)?;

        let post_loop = input.stream.read_le::<i32>()?;
        input
            .log
            .write_enum("Post loop", post_loop, &CURVE_LOOP_TYPES)?;

        let key_count = input.stream.read_7bit_encoded_int()?;
        input.log.write_line(format_args!("Key count: {key_count}"))?;

        for i in 0..key_count {
            input.log.write_line(format_args!("Key {i}:"))?;
            input.log.indent();

            let position = input.stream.read_le::<f32>()?;
            input.log.write_line(format_args!("Position: {position}"))?;

            let value = input.stream.read_le::<f32>()?;
            input.log.write_line(format_args!("Value: {value}"))?;

            let tangent_in = input.stream.read_le::<f32>()?;
            input
                .log
                .write_line(format_args!("Tangent in: {tangent_in}"))?;

            let tangent_out = input.stream.read_le::<f32>()?;
            input
                .log
                .write_line(format_args!("Tangent out: {tangent_out}"))?;

            let continuity = input.stream.read_le::<i32>()?;
            input
                .log
                .write_enum("Continuity", continuity, &CURVE_CONTINUITIES)?;

            input.log.unindent();
        }

        Ok(())
    }
}
