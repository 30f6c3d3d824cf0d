#![doc = r#"
The owned representation of a [`MidiFile`] and its header fields.
"#]

pub(crate) mod header;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use crate::{CodecResult, codec};

/// A decoded Standard MIDI File: header fields plus the track chunks
/// in file order.
///
/// On a freshly parsed file `track_count` is the count read from the
/// header, which a damaged file may contradict; files built in memory
/// should keep it equal to `tracks.len()`. Neither the parser nor the
/// encoder enforces the match; [`validate`](crate::validate) reports
/// it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    /// The header chunk tag, `"MThd"` unless the file is damaged.
    pub header_type: [u8; 4],
    /// SMF format: 0, 1 or 2.
    pub format: u16,
    /// Track count declared in the header.
    pub track_count: u16,
    /// How delta times are to be interpreted.
    pub timing: TimeDivision,
    /// The track chunks.
    pub tracks: Vec<Track>,
}

impl Default for MidiFile {
    fn default() -> Self {
        Self {
            header_type: *b"MThd",
            format: 0,
            track_count: 0,
            timing: TimeDivision::default(),
            tracks: Vec::new(),
        }
    }
}

impl MidiFile {
    /// An empty format-0 file at 480 ticks per quarter note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a byte stream into a file.
    ///
    /// Wire-side anomalies (unknown chunk tags, non-standard meta
    /// lengths, missing End-of-Track) are tolerated and surface
    /// through [`validate`](crate::validate); only input that cannot
    /// be interpreted at all (chiefly truncation) fails.
    pub fn parse(bytes: &[u8]) -> CodecResult<Self> {
        codec::decode_file(bytes)
    }

    /// Emit the file as bytes.
    ///
    /// Chunk lengths are computed and back-patched; every event gets
    /// an explicit status byte (running-status compression is not
    /// reconstructed).
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        codec::encode_file(self)
    }

    /// The typed reading of the `format` field, if it names one of the
    /// three standard formats.
    pub const fn format_type(&self) -> Option<FormatType> {
        FormatType::from_raw(self.format)
    }
}

/// The three playback arrangements a header format word can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    /// Format 0: one track carrying all channels.
    SingleMultiChannel,
    /// Format 1: simultaneous tracks of one song.
    Simultaneous,
    /// Format 2: sequentially independent patterns.
    SequentiallyIndependent,
}

impl FormatType {
    /// Interpret a raw header format word.
    pub const fn from_raw(format: u16) -> Option<Self> {
        Some(match format {
            0 => Self::SingleMultiChannel,
            1 => Self::Simultaneous,
            2 => Self::SequentiallyIndependent,
            _ => return None,
        })
    }
}
