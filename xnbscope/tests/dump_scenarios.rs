//! End-to-end parses of hand-built XNB frames.
//!
//! Each test assembles a frame as literal bytes, runs a full parse, and checks either the
//! rendered listing or the failure. The builder computes the declared frame size from the
//! assembled body, so every successful scenario also exercises the end-position check.

use xnbscope::prelude::*;
use xnbscope::Error;

const INT32_READER: &str = "Microsoft.Xna.Framework.Content.Int32Reader";
const STRING_READER: &str = "Microsoft.Xna.Framework.Content.StringReader";

/// 7-bit little-endian continuation encoding, the inverse of the stream decoder.
fn varuint(mut value: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    loop {
        let low = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            bytes.push(low);
            return bytes;
        }
        bytes.push(low | 0x80);
    }
}

fn xnb_string(text: &str) -> Vec<u8> {
    let mut bytes = varuint(text.len() as u32);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Assemble a frame: header, manifest, shared count, payload. The declared size is computed
/// from the assembled length.
fn frame(manifest: &[(&str, i32)], shared_count: u32, payload: &[u8]) -> Vec<u8> {
    let mut body = varuint(manifest.len() as u32);
    for (reader_name, version) in manifest {
        body.extend_from_slice(&xnb_string(reader_name));
        body.extend_from_slice(&version.to_le_bytes());
    }
    body.extend_from_slice(&varuint(shared_count));
    body.extend_from_slice(payload);

    let mut bytes = vec![b'X', b'N', b'B', b'w', 5, 0];
    bytes.extend_from_slice(&((10 + body.len()) as u32).to_le_bytes());
    bytes.extend_from_slice(&body);
    bytes
}

fn dump(data: &[u8]) -> xnbscope::Result<String> {
    let registry = TypeReaderRegistry::with_standard_types();
    let mut out = Vec::new();
    let mut reader = ContentReader::new(data, &registry, &mut out);
    reader.read_xnb()?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn empty_frame_is_a_null_asset() {
    let data = frame(&[], 0, &varuint(0));
    let output = dump(&data).unwrap();

    assert_eq!(
        output,
        "Target platform: Windows\n\
         Graphics profile: Reach\n\
         Type readers:\n\
         Asset:\n\
         \x20 null\n"
    );
}

#[test]
fn int32_asset() {
    let mut payload = varuint(1);
    payload.extend_from_slice(&42_i32.to_le_bytes());

    let data = frame(&[(INT32_READER, 0)], 0, &payload);
    let output = dump(&data).unwrap();

    assert_eq!(
        output,
        "Target platform: Windows\n\
         Graphics profile: Reach\n\
         Type readers:\n\
         \x20 Microsoft.Xna.Framework.Content.Int32Reader (version 0)\n\
         Asset:\n\
         \x20 Type: System.Int32\n\
         \x20 42\n"
    );
}

#[test]
fn list_of_int32_elements_are_untagged() {
    // The list reader arrives fully assembly-qualified, inside and out.
    let list_reader = "Microsoft.Xna.Framework.Content.ListReader`1[[System.Int32, mscorlib, \
                       Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089]], \
                       Microsoft.Xna.Framework, Version=4.0.0.0";

    let mut payload = varuint(2);
    for value in [3_i32, 1, 2, 3] {
        payload.extend_from_slice(&value.to_le_bytes());
    }

    let data = frame(&[(INT32_READER, 0), (list_reader, 0)], 0, &payload);
    let output = dump(&data).unwrap();

    assert!(output.contains("Type: System.Collections.Generic.List`1[[System.Int32]]\n"));
    assert!(output.ends_with(
        "  Count: 3\n\
         \x20   1\n\
         \x20   2\n\
         \x20   3\n"
    ));
}

#[test]
fn nullable_single_null_and_value() {
    let nullable_reader = "Microsoft.Xna.Framework.Content.NullableReader`1[[System.Single]]";

    let mut payload = varuint(1);
    payload.push(0);
    let data = frame(&[(nullable_reader, 0)], 0, &payload);
    let output = dump(&data).unwrap();
    assert!(output.ends_with(
        "  Type: System.Nullable`1[[System.Single]]\n\
         \x20 null\n"
    ));

    let mut payload = varuint(1);
    payload.push(1);
    payload.extend_from_slice(&3.5_f32.to_le_bytes());
    let data = frame(&[(nullable_reader, 0)], 0, &payload);
    let output = dump(&data).unwrap();
    assert!(output.ends_with(
        "  Type: System.Nullable`1[[System.Single]]\n\
         \x20   3.5\n"
    ));
}

#[test]
fn dictionary_keys_bare_values_tagged() {
    let dictionary_reader = "Microsoft.Xna.Framework.Content.DictionaryReader`2[[System.Int32],\
                             [System.String]]";

    let mut payload = varuint(3);
    payload.extend_from_slice(&1_u32.to_le_bytes());
    payload.extend_from_slice(&7_i32.to_le_bytes());
    payload.extend_from_slice(&varuint(2));
    payload.extend_from_slice(&xnb_string("seven"));

    let data = frame(
        &[(INT32_READER, 0), (STRING_READER, 0), (dictionary_reader, 0)],
        0,
        &payload,
    );
    let output = dump(&data).unwrap();

    assert!(output
        .contains("Type: System.Collections.Generic.Dictionary`2[[System.Int32],[System.String]]\n"));
    assert!(output.ends_with(
        "  Count: 1\n\
         \x20 Key:\n\
         \x20   7\n\
         \x20 Value:\n\
         \x20   Type: System.String\n\
         \x20   'seven'\n"
    ));
}

#[test]
fn nested_list_initializes_across_manifest_order() {
    // The outer list is listed before the inner specialization it depends on; the second
    // initialize pass must still resolve it.
    let outer = "Microsoft.Xna.Framework.Content.ListReader`1[[System.Collections.Generic.\
                 List`1[[System.Int32]]]]";
    let inner = "Microsoft.Xna.Framework.Content.ListReader`1[[System.Int32]]";

    let mut payload = varuint(1);
    payload.extend_from_slice(&1_u32.to_le_bytes());
    payload.extend_from_slice(&varuint(2));
    payload.extend_from_slice(&2_u32.to_le_bytes());
    payload.extend_from_slice(&5_i32.to_le_bytes());
    payload.extend_from_slice(&6_i32.to_le_bytes());

    let data = frame(&[(outer, 0), (inner, 0), (INT32_READER, 0)], 0, &payload);
    let output = dump(&data).unwrap();

    assert!(output.ends_with(
        "  Count: 1\n\
         \x20   Type: System.Collections.Generic.List`1[[System.Int32]]\n\
         \x20   Count: 2\n\
         \x20     5\n\
         \x20     6\n"
    ));
}

#[test]
fn shared_resources_follow_the_primary_asset() {
    let mut payload = varuint(1);
    payload.extend_from_slice(&1_i32.to_le_bytes());
    payload.extend_from_slice(&varuint(1));
    payload.extend_from_slice(&2_i32.to_le_bytes());

    let data = frame(&[(INT32_READER, 0)], 1, &payload);
    let output = dump(&data).unwrap();

    assert!(output.contains("Asset:\n  Type: System.Int32\n  1\n"));
    assert!(output.ends_with("Shared resource 0:\n  Type: System.Int32\n  2\n"));
}

#[test]
fn char_asset_above_the_basic_plane() {
    let char_reader = "Microsoft.Xna.Framework.Content.CharReader";

    let mut payload = varuint(1);
    payload.extend_from_slice("😀".as_bytes());

    let data = frame(&[(char_reader, 0)], 0, &payload);
    let output = dump(&data).unwrap();

    assert!(output.ends_with("  U+1F600\n"));
}

#[test]
fn texture2d_is_dumped_as_bytes() {
    let texture_reader = "Microsoft.Xna.Framework.Content.Texture2DReader";

    let mut payload = varuint(1);
    payload.extend_from_slice(&4_i32.to_le_bytes()); // Dxt1
    payload.extend_from_slice(&2_u32.to_le_bytes());
    payload.extend_from_slice(&2_u32.to_le_bytes());
    payload.extend_from_slice(&1_u32.to_le_bytes());
    payload.extend_from_slice(&4_u32.to_le_bytes());
    payload.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

    let data = frame(&[(texture_reader, 0)], 0, &payload);
    let output = dump(&data).unwrap();

    assert!(output.contains("Format: Dxt1\n"));
    assert!(output.contains("Width: 2\n"));
    assert!(output.contains("Mip count: 1\n"));
    assert!(output.contains("Mip 0: 4 bytes\n"));
    assert!(output.contains("aa bb cc dd\n"));
}

#[test]
fn wrong_magic_is_not_xnb() {
    let mut data = frame(&[], 0, &varuint(0));
    data[0] = b'P';

    assert!(matches!(dump(&data), Err(Error::NotXnb)));
}

#[test]
fn declared_size_beyond_the_file_is_truncated() {
    let mut data = frame(&[], 0, &varuint(0));
    data[6..10].copy_from_slice(&1000_u32.to_le_bytes());

    assert!(matches!(dump(&data), Err(Error::Truncated { .. })));
}

#[test]
fn compressed_frames_are_rejected() {
    let mut data = vec![b'X', b'N', b'B', b'w', 5, 0x80];
    data.extend_from_slice(&18_u32.to_le_bytes());
    data.extend_from_slice(&4096_u32.to_le_bytes()); // decompressed size
    data.extend_from_slice(&[0; 4]); // stand-in for the compressed payload

    assert!(matches!(dump(&data), Err(Error::CompressedUnsupported)));
}

#[test]
fn unknown_manifest_reader() {
    let data = frame(&[("Custom.Game.WidgetReader", 0)], 0, &varuint(0));

    match dump(&data) {
        Err(Error::UnknownReader(name)) => assert_eq!(name, "Custom.Game.WidgetReader"),
        other => panic!("expected UnknownReader, got {other:?}"),
    }
}

#[test]
fn unresolvable_generic_argument() {
    let list_reader = "Microsoft.Xna.Framework.Content.ListReader`1[[Custom.Game.Widget]]";
    let data = frame(&[(list_reader, 0)], 0, &varuint(0));

    match dump(&data) {
        Err(Error::UnknownTargetType(name)) => assert_eq!(name, "Custom.Game.Widget"),
        other => panic!("expected UnknownTargetType, got {other:?}"),
    }
}

#[test]
fn reflective_manifest_entry_fails_at_read_time() {
    let reflective_reader =
        "Microsoft.Xna.Framework.Content.ReflectiveReader`1[[Custom.Game.Widget]]";

    // The manifest resolves; only dereferencing the object fails.
    let data = frame(&[(reflective_reader, 0)], 0, &varuint(1));

    assert!(matches!(dump(&data), Err(Error::ReflectiveUnsupported)));
}

#[test]
fn out_of_range_tag_is_a_bad_type_id() {
    let data = frame(&[(INT32_READER, 0)], 0, &varuint(2));

    assert!(matches!(dump(&data), Err(Error::BadTypeId(_))));
}

#[test]
fn pre_tagged_field_of_the_wrong_type() {
    let song_reader = "Microsoft.Xna.Framework.Content.SongReader";

    // Song expects its duration tagged as Int32; tag the string reader instead.
    let mut payload = varuint(1);
    payload.extend_from_slice(&xnb_string("track01.wma"));
    payload.extend_from_slice(&varuint(2));

    let data = frame(&[(song_reader, 0), (STRING_READER, 0)], 0, &payload);

    assert!(matches!(dump(&data), Err(Error::BadTypeId(_))));
}

#[test]
fn trailing_bytes_are_a_size_mismatch() {
    let mut data = frame(&[], 0, &varuint(0));
    let declared = (data.len() + 1) as u32;
    data[6..10].copy_from_slice(&declared.to_le_bytes());
    data.push(0xFF);

    assert!(matches!(
        dump(&data),
        Err(Error::SizeMismatch { expected, actual }) if expected == actual + 1
    ));
}

#[test]
fn dump_from_disk_matches_dump_from_memory() {
    use std::io::Write;

    let mut payload = varuint(1);
    payload.extend_from_slice(&42_i32.to_le_bytes());
    let data = frame(&[(INT32_READER, 0)], 0, &payload);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let registry = TypeReaderRegistry::with_standard_types();

    let from_disk = XnbFile::from_path(file.path()).unwrap();
    let mut disk_out = Vec::new();
    from_disk.dump(&registry, &mut disk_out).unwrap();

    let from_memory = XnbFile::from_mem(data);
    let mut memory_out = Vec::new();
    from_memory.dump(&registry, &mut memory_out).unwrap();

    assert_eq!(disk_out, memory_out);
    assert!(!disk_out.is_empty());
}

#[test]
fn varuint_round_trips() {
    let values = [
        0_u32,
        1,
        42,
        0x7F,
        0x80,
        300,
        0x3FFF,
        0x4000,
        0x001F_FFFF,
        0x0FFF_FFFF,
        0x1000_0000,
        0x7FFF_FFFF,
        u32::MAX,
    ];

    for value in values {
        let encoded = varuint(value);
        let mut stream = xnbscope::BinaryStream::new(&encoded);
        assert_eq!(stream.read_7bit_encoded_int().unwrap(), value);
        assert_eq!(stream.pos(), encoded.len());
    }
}
