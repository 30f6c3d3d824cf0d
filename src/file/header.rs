use crate::{
    CodecResult,
    cursor::{ByteReader, ByteWriter},
    file::TimeDivision,
};

/// The fields of a decoded MThd chunk.
///
/// The chunk tag is surfaced rather than enforced; a file whose first
/// chunk is not literally `"MThd"` still parses, and the validator
/// reports the deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawHeader {
    pub chunk_type: [u8; 4],
    pub format: u16,
    pub track_count: u16,
    pub timing: TimeDivision,
}

/// Decode the 14-byte header chunk.
///
/// The standard fixes the declared length at 6; larger values are
/// tolerated and the excess bytes skipped.
pub(crate) fn read_header(reader: &mut ByteReader<'_>) -> CodecResult<RawHeader> {
    let chunk_type = reader.read_array::<4>()?;
    #[cfg(feature = "tracing")]
    if &chunk_type != b"MThd" {
        tracing::warn!(
            "header chunk tagged {:?} instead of MThd",
            String::from_utf8_lossy(&chunk_type)
        );
    }

    let declared_length = reader.read_u32_be()?;
    let format = reader.read_u16_be()?;
    let track_count = reader.read_u16_be()?;
    let timing = TimeDivision::read(reader)?;

    if declared_length > 6 {
        #[cfg(feature = "tracing")]
        tracing::warn!("header declares {declared_length} bytes, skipping the excess");
        reader.advance(declared_length as usize - 6)?;
    }

    Ok(RawHeader {
        chunk_type,
        format,
        track_count,
        timing,
    })
}

/// Encode the header chunk: literal `"MThd"`, length 6, format, track
/// count, and the two division bytes.
pub(crate) fn write_header(
    writer: &mut ByteWriter,
    format: u16,
    track_count: u16,
    timing: &TimeDivision,
) {
    writer.write_bytes(b"MThd");
    writer.write_u32_be(6);
    writer.write_u16_be(format);
    writer.write_u16_be(track_count);
    timing.write(writer);
}
