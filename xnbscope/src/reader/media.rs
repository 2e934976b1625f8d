//! Readers for the media types: sound effects, songs, and videos.
//!
//! Song and video payloads embed pre-tagged fields; those are read through
//! [`ContentReader::validate_type_id`] so a manifest pointing the tag at the wrong type fails
//! instead of misparsing.

use crate::{
    content::ContentReader,
    reader::{reader_names, TypeReader},
    Result,
};

const VIDEO_SOUNDTRACKS: [&str; 3] = ["Music", "Dialog", "MusicAndDialog"];

pub(crate) struct SoundEffectReader;

impl TypeReader for SoundEffectReader {
    reader_names!(
        "Microsoft.Xna.Framework.Audio.SoundEffect",
        "Microsoft.Xna.Framework.Content.SoundEffectReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let format_size = input.stream.read_le::<u32>()?;
        let format = input.stream.read_bytes(format_size as usize)?;
        input.log.write_bytes("Format", format)?;

        let data_size = input.stream.read_le::<u32>()?;
        let data = input.stream.read_bytes(data_size as usize)?;
        input.log.write_bytes("Data", data)?;

        let loop_start = input.stream.read_le::<i32>()?;
        input
            .log
            .write_line(format_args!("Loop start: {loop_start}"))?;

        let loop_length = input.stream.read_le::<i32>()?;
        input
            .log
            .write_line(format_args!("Loop length: {loop_length}"))?;

        let duration = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("Duration: {duration}"))
    }
}

pub(crate) struct SongReader;

impl TypeReader for SongReader {
    reader_names!(
        "Microsoft.Xna.Framework.Media.Song",
        "Microsoft.Xna.Framework.Content.SongReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        let filename = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Filename: '{filename}'"))?;

        input.validate_type_id("System.Int32")?;
        let duration = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("Duration: {duration}"))
    }
}

pub(crate) struct VideoReader;

impl TypeReader for VideoReader {
    reader_names!(
        "Microsoft.Xna.Framework.Media.Video",
        "Microsoft.Xna.Framework.Content.VideoReader"
    );

    fn read(&self, input: &mut ContentReader<'_>) -> Result<()> {
        input.validate_type_id("System.String")?;
        let filename = input.stream.read_string()?;
        input
            .log
            .write_line(format_args!("Filename: '{filename}'"))?;

        input.validate_type_id("System.Int32")?;
        let duration = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("Duration: {duration}"))?;

        input.validate_type_id("System.Int32")?;
        let width = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("Width: {width}"))?;

        input.validate_type_id("System.Int32")?;
        let height = input.stream.read_le::<i32>()?;
        input.log.write_line(format_args!("Height: {height}"))?;

        input.validate_type_id("System.Single")?;
        let frames_per_second = input.stream.read_le::<f32>()?;
        input
            .log
            .write_line(format_args!("Frames per second: {frames_per_second}"))?;

        input.validate_type_id("System.Int32")?;
        let soundtrack = input.stream.read_le::<i32>()?;
        input
            .log
            .write_enum("Video soundtrack type", soundtrack, &VIDEO_SOUNDTRACKS)
    }
}
