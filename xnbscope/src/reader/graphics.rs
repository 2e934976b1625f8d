//! Readers for the graphics types: textures, buffers, effects, sprite fonts, and models.
//!
//! Texture payloads are dumped as raw byte ranges and shader bytecode as raw bytes; interpreting
//! either is out of scope. The built-in effect readers decode the fixed parameter schema each
//! effect serializes.

use crate::{
    content::ContentReader,
    reader::{
        math::{BoundingSphereReader, MatrixReader, Vector3Reader},
        reader_names, TypeReader,
    },
    Result,
};

const SURFACE_FORMATS: [&str; 20] = [
    "Color",
    "Bgr565",
    "Bgra5551",
    "Bgra4444",
    "Dxt1",
    "Dxt3",
    "Dxt5",
    "NormalizedByte2",
    "NormalizedByte4",
    "Rgba1010102",
    "Rg32",
    "Rgba64",
    "Alpha8",
    "Single",
    "Vector2",
    "Vector4",
    "HalfSingle",
    "HalfVector2",
    "HalfVector4",
    "HdrBlendable",
];

const VERTEX_ELEMENT_FORMATS: [&str; 12] = [
    "Single",
    "Vector2",
    "Vector3",
    "Vector4",
    "Color",
    "Byte4",
    "Short2",
    "Short4",
    "NormalizedShort2",
    "NormalizedShort4",
    "HalfVector2",
    "HalfVector4",
];

const VERTEX_ELEMENT_USAGES: [&str; 13] = [
    "Position",
    "Color",
    "TextureCoordinate",
    "Normal",
    "Binormal",
    "Tangent",
    "BlendIndices",
    "BlendWeight",
    "Depth",
    "Fog",
    "PointSize",
    "Sample",
    "TessellateFactor",
];

const COMPARE_FUNCTIONS: [&str; 8] = [
    "Always",
    "Never",
    "Less",
    "LessEqual",
    "Equal",
    "GreaterEqual",
    "Greater",
    "NotEqual",
];

pub(crate) struct TextureReader;

impl TypeReader for TextureReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.Texture",
        "Microsoft.Xna.Framework.Content.TextureReader"
    );

    fn read(&self, _input: &mut ContentReader<'_>) -> Result<()> {
        // Texture is abstract; a texture slot always tags one of the concrete readers.
        Err(malformed_error!(
            "The Texture reader cannot be invoked directly"
        ))
    }
}

pub(crate) struct Texture2DReader;

impl TypeReader for Texture2DReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.Texture2D",
        "Microsoft.Xna.Framework.Content.Texture2DReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let format = input.stream.read_le::<i32>()?;
        input.log.write_enum("Format", format, &SURFACE_FORMATS)?;

        let width = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Width: {width}"))?;

        let height = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Height: {height}"))?;

        let mip_count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Mip count: {mip_count}"))?;

        for i in 0..mip_count {
            input.log.write(format_args!("Mip {i}"))?;

            let data_size = input.stream.read_le::<u32>()?;
            let data = input.stream.read_bytes(data_size as usize)?;
            input.log.write_bytes("", data)?;
        }

        Ok(())
    }
}

pub(crate) struct Texture3DReader;

impl TypeReader for Texture3DReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.Texture3D",
        "Microsoft.Xna.Framework.Content.Texture3DReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let format = input.stream.read_le::<i32>()?;
        input.log.write_enum("Format", format, &SURFACE_FORMATS)?;

        let width = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Width: {width}"))?;

        let height = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Height: {height}"))?;

        let depth = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Depth: {depth}"))?;

        let mip_count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Mip count: {mip_count}"))?;

        for i in 0..mip_count {
            input.log.write(format_args!("Mip {i}"))?;

            let data_size = input.stream.read_le::<u32>()?;
            let data = input.stream.read_bytes(data_size as usize)?;
            input.log.write_bytes("", data)?;
        }

        Ok(())
    }
}

pub(crate) struct TextureCubeReader;

impl TypeReader for TextureCubeReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.TextureCube",
        "Microsoft.Xna.Framework.Content.TextureCubeReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let format = input.stream.read_le::<i32>()?;
        input.log.write_enum("Format", format, &SURFACE_FORMATS)?;

        let size = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Size: {size}"))?;

        let mip_count = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Mip count: {mip_count}"))?;

        // Six faces, each with the full mip chain, in face-major order.
        for face in 0..6 {
            for i in 0..mip_count {
                input.log.write(format_args!("Face {face} mip {i}"))?;

                let data_size = input.stream.read_le::<u32>()?;
                let data = input.stream.read_bytes(data_size as usize)?;
                input.log.write_bytes("", data)?;
            }
        }

        Ok(())
    }
}

pub(crate) struct IndexBufferReader;

impl TypeReader for IndexBufferReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.IndexBuffer",
        "Microsoft.Xna.Framework.Content.IndexBufferReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let is_16_bit = input.stream.read_bool()?;
        input.log.write_line(format_args!(
            "Index format: {}",
            if is_16_bit { "16 bit" } else { "32 bit" }
        ))?;

        let data_size = input.stream.read_le::<u32>()?;
        let data = input.stream.read_bytes(data_size as usize)?;
        input.log.write_bytes("Index data", data)
    }
}

/// Decode a vertex declaration, returning the stride for the caller's vertex data read.
fn read_vertex_declaration(input: &mut ContentReader<'_>) -> Result<u32> {
    let vertex_stride = input.stream.read_le::<u32>()?;
    input
        .log
        .write_line(format_args!("Vertex stride: {vertex_stride}"))?;

    let element_count = input.stream.read_le::<u32>()?;
    input
        .log
        .write_line(format_args!("Element count: {element_count}"))?;

    for i in 0..element_count {
        input.log.write_line(format_args!("Element {i}:"))?;
        input.log.indent();

        let offset = input.stream.read_le::<u32>()?;
        input.log.write_line(format_args!("Offset: {offset}"))?;

        let format = input.stream.read_le::<i32>()?;
        input
            .log
            .write_enum("Element format", format, &VERTEX_ELEMENT_FORMATS)?;

        let usage = input.stream.read_le::<i32>()?;
        input
            .log
            .write_enum("Element usage", usage, &VERTEX_ELEMENT_USAGES)?;

        let usage_index = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Usage index: {usage_index}"))?;

        input.log.unindent();
    }

    Ok(vertex_stride)
}

pub(crate) struct VertexBufferReader;

impl TypeReader for VertexBufferReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.VertexBuffer",
        "Microsoft.Xna.Framework.Content.VertexBufferReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write_line(format_args!("Vertex declaration:"))?;
        input.log.indent();

        let vertex_stride = read_vertex_declaration(input)?;

        input.log.unindent();

        let vertex_count = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Vertex count: {vertex_count}"))?;

        let data_size = (vertex_count as usize).saturating_mul(vertex_stride as usize);
        let data = input.stream.read_bytes(data_size)?;
        input.log.write_bytes("Vertex data", data)
    }
}

pub(crate) struct VertexDeclarationReader;

impl TypeReader for VertexDeclarationReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.VertexDeclaration",
        "Microsoft.Xna.Framework.Content.VertexDeclarationReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        read_vertex_declaration(input)?;
        Ok(())
    }
}

pub(crate) struct EffectReader;

impl TypeReader for EffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.Effect",
        "Microsoft.Xna.Framework.Content.EffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let size = input.stream.read_le::<u32>()?;
        let bytecode = input.stream.read_bytes(size as usize)?;
        input.log.write_bytes("Effect bytecode", bytecode)
    }
}

pub(crate) struct EffectMaterialReader;

impl TypeReader for EffectMaterialReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.EffectMaterial",
        "Microsoft.Xna.Framework.Content.EffectMaterialReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let effect = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Effect reference: '{effect}'"))?;

        input.log.write_line(format_args!("Parameters:"))?;
        input.read_object()
    }
}

pub(crate) struct BasicEffectReader;

impl TypeReader for BasicEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.BasicEffect",
        "Microsoft.Xna.Framework.Content.BasicEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let texture = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture reference: '{texture}'"))?;

        input.log.write(format_args!("Diffuse color: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Emissive color: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Specular color: "))?;
        Vector3Reader.read(input)?;

        let specular_power = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Specular power: {specular_power}"))?;

        let alpha = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Alpha: {alpha}"))?;

        let vertex_color = input.stream.read_bool()?;
        input
            .log
            .write_line(format_args!("Vertex color enabled: {vertex_color}"))
    }
}

pub(crate) struct AlphaTestEffectReader;

impl TypeReader for AlphaTestEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.AlphaTestEffect",
        "Microsoft.Xna.Framework.Content.AlphaTestEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let texture = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture reference: '{texture}'"))?;

        let compare = input.stream.read_le::<i32>()?;
        input
            .log
            .write_enum("Compare function", compare, &COMPARE_FUNCTIONS)?;

        let reference_alpha = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Reference alpha: {reference_alpha}"))?;

        input.log.write(format_args!("Diffuse color: "))?;
        Vector3Reader.read(input)?;

        let alpha = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Alpha: {alpha}"))?;

        let vertex_color = input.stream.read_bool()?;
        input
            .log
            .write_line(format_args!("Vertex color enabled: {vertex_color}"))
    }
}

pub(crate) struct DualTextureEffectReader;

impl TypeReader for DualTextureEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.DualTextureEffect",
        "Microsoft.Xna.Framework.Content.DualTextureEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let texture1 = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture 1 reference: '{texture1}'"))?;

        let texture2 = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture 2 reference: '{texture2}'"))?;

        input.log.write(format_args!("Diffuse color: "))?;
        Vector3Reader.read(input)?;

        let alpha = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Alpha: {alpha}"))?;

        let vertex_color = input.stream.read_bool()?;
        input
            .log
            .write_line(format_args!("Vertex color enabled: {vertex_color}"))
    }
}

pub(crate) struct EnvironmentMapEffectReader;

impl TypeReader for EnvironmentMapEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.EnvironmentMapEffect",
        "Microsoft.Xna.Framework.Content.EnvironmentMapEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let texture = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture reference: '{texture}'"))?;

        let environment_map = input.stream.read_string()?;
        input.log.write_line(format_args!(
            "Environment map reference: '{environment_map}'"
        ))?;

        let amount = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Environment map amount: {amount}"))?;

        input.log.write(format_args!("Environment map specular: "))?;
        Vector3Reader.read(input)?;

        let fresnel = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Fresnel factor: {fresnel}"))?;

        input.log.write(format_args!("Diffuse color: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Emissive color: "))?;
        Vector3Reader.read(input)?;

        let alpha = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Alpha: {alpha}"))
    }
}

pub(crate) struct SkinnedEffectReader;

impl TypeReader for SkinnedEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.SkinnedEffect",
        "Microsoft.Xna.Framework.Content.SkinnedEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let texture = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Texture reference: '{texture}'"))?;

        let weights = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Weights per vertex: {weights}"))?;

        input.log.write(format_args!("Diffuse color: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Emissive color: "))?;
        Vector3Reader.read(input)?;

        input.log.write(format_args!("Specular color: "))?;
        Vector3Reader.read(input)?;

        let specular_power = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Specular power: {specular_power}"))?;

        let alpha = input.stream.read_le::<f32>()?;
        input.log.write_line(format_args!("Alpha: {alpha}"))
    }
}

pub(crate) struct SpriteFontReader;

impl TypeReader for SpriteFontReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.SpriteFont",
        "Microsoft.Xna.Framework.Content.SpriteFontReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.log.write_line(format_args!("Texture:"))?;
        input.read_object()?;

        input.log.write_line(format_args!("Glyphs:"))?;
        input.read_object()?;

        input.log.write_line(format_args!("Cropping:"))?;
        input.read_object()?;

        input.log.write_line(format_args!("Character map:"))?;
        input.read_object()?;

        let line_spacing = input.stream.read_le::<i32>()?;
        input
            .log
            .write_line(format_args!("Vertical line spacing: {line_spacing}"))?;

        let spacing = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Horizontal spacing: {spacing}"))?;

        input.log.write_line(format_args!("Kerning:"))?;
        input.read_object()?;

        input.log.write(format_args!("Default character: "))?;

        if input.stream.read_bool()? {
            let character = input.stream.read_char()?;
            input
                .log
                .write_line(format_args!("U+{:04X}", character as u32))
        } else {
            input.log.write_line(format_args!("null"))
        }
    }
}

/// Decode a bone reference, encoded as one byte when the model has fewer than 255 bones.
fn read_bone_reference(input: &mut ContentReader<'_>, bone_count: u32) -> Result<()> {
    let bone_id = if bone_count < 255 {
        u32::from(input.stream.read_le::<u8>()?)
    } else {
        input.stream.read_le::<u32>()?
    };

    if bone_id != 0 {
        input.log.write_line(format_args!("bone #{}", bone_id - 1))
    } else {
        input.log.write_line(format_args!("null"))
    }
}

pub(crate) struct ModelReader;

impl TypeReader for ModelReader {
    reader_names!(
        "Microsoft.Xna.Framework.Graphics.Model",
        "Microsoft.Xna.Framework.Content.ModelReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let bone_count = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Bone count: {bone_count}"))?;

        for i in 0..bone_count {
            input.log.write_line(format_args!("Bone {i}:"))?;
            input.log.indent();

            input.log.write_line(format_args!("Name:"))?;
            input.read_object()?;

            input.log.write_line(format_args!("Transform:"))?;
            input.log.indent();
            MatrixReader.read(input)?;
            input.log.unindent();

            input.log.unindent();
        }

        for i in 0..bone_count {
            input.log.write_line(format_args!("Bone {i} hierarchy:"))?;
            input.log.indent();

            input.log.write(format_args!("Parent: "))?;
            read_bone_reference(input, bone_count)?;

            let child_count = input.stream.read_le::<u32>()?;

            if child_count != 0 {
                input.log.write_line(format_args!("Children:"))?;
                input.log.indent();

                for _ in 0..child_count {
                    read_bone_reference(input, bone_count)?;
                }

                input.log.unindent();
            }

            input.log.unindent();
        }

        let mesh_count = input.stream.read_le::<u32>()?;
        input
            .log
            .write_line(format_args!("Mesh count: {mesh_count}"))?;

        for i in 0..mesh_count {
            input.log.write_line(format_args!("Mesh {i}"))?;
            input.log.indent();

            input.log.write_line(format_args!("Mesh name:"))?;
            input.read_object()?;

            input.log.write(format_args!("Mesh parent: "))?;
            read_bone_reference(input, bone_count)?;

            input.log.write_line(format_args!("Mesh bounds:"))?;
            input.log.indent();
            BoundingSphereReader.read(input)?;
            input.log.unindent();

            input.log.write_line(format_args!("Mesh tag:"))?;
            input.read_object()?;

            let part_count = input.stream.read_le::<u32>()?;
            input
                .log
                .write_line(format_args!("Mesh part count: {part_count}"))?;

            for j in 0..part_count {
                input.log.write_line(format_args!("Mesh part {j}"))?;
                input.log.indent();

                let vertex_offset = input.stream.read_le::<i32>()?;
                input
                    .log
                    .write_line(format_args!("Vertex offset: {vertex_offset}"))?;

                let num_vertices = input.stream.read_le::<i32>()?;
                input
                    .log
                    .write_line(format_args!("Num vertices: {num_vertices}"))?;

                let start_index = input.stream.read_le::<i32>()?;
                input
                    .log
                    .write_line(format_args!("Start index: {start_index}"))?;

                let primitive_count = input.stream.read_le::<i32>()?;
                input
                    .log
                    .write_line(format_args!("Primitive count: {primitive_count}"))?;

                input.log.write_line(format_args!("Mesh part tag:"))?;
                input.read_object()?;

                input.log.write(format_args!("Vertex buffer: "))?;
                input.read_shared_resource()?;

                input.log.write(format_args!("Index buffer: "))?;
                input.read_shared_resource()?;

                input.log.write(format_args!("Effect: "))?;
                input.read_shared_resource()?;

                input.log.unindent();
            }

            input.log.unindent();
        }

        input.log.write(format_args!("Model root: "))?;
        read_bone_reference(input, bone_count)?;

        input.log.write_line(format_args!("Model tag:"))?;
        input.read_object()
    }
}
