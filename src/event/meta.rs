#![doc = r#"
Meta events: the non-MIDI control events inside a track, identified by
a leading `0xFF` status, a one-byte type and a VLQ-encoded length.

The declared length is kept on every [`MetaEvent`] so the validator
can report files whose fixed-size meta events (tempo, SMPTE offset,
time and key signature, end of track) declare a non-standard length;
the decoder itself tolerates the mismatch and interprets what is
there.
"#]

use crate::{file::SmpteFps, labels::key_name};
use std::borrow::Cow;

/// A meta event: the declared payload length as read from (or
/// destined for) the wire, plus the typed payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    /// Payload length declared on the wire. The encoder recomputes
    /// lengths and ignores this field.
    pub declared_length: u32,
    /// The typed payload.
    pub message: MetaMessage,
}

impl MetaEvent {
    /// Wrap a payload, declaring the length its wire image will have.
    pub fn new(message: MetaMessage) -> Self {
        let declared_length = match &message {
            MetaMessage::Text(_, text) => text.len() as u32,
            MetaMessage::MLiveTag(tag) => 1 + tag.value.len() as u32,
            MetaMessage::SequencerSpecific(data) => data.len() as u32,
            MetaMessage::Unknown { data, .. } => data.len() as u32,
            fixed => fixed.standard_length().unwrap_or(0),
        };
        Self {
            declared_length,
            message,
        }
    }
}

impl From<MetaMessage> for MetaEvent {
    fn from(message: MetaMessage) -> Self {
        Self::new(message)
    }
}

/// The set of possible meta payloads.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// `0x00`, length 2: explicit sequence number.
    SequenceNumber(u16),
    /// `0x00` with a non-standard length: the decoder substitutes the
    /// zero-based index of the track being read.
    NextTrackIndex(u16),
    /// `0x01`–`0x09`: text of the given kind.
    Text(TextKind, String),
    /// `0x20`, length 1: channel prefix (obsolete).
    ChannelPrefix(u8),
    /// `0x21`, length 1: MIDI port (obsolete).
    MidiPort(u8),
    /// `0x2F`, length 0: end of track.
    EndOfTrack,
    /// `0x4B`: non-standard M-Live tag.
    MLiveTag(MLiveTag),
    /// `0x51`, length 3: tempo in microseconds per quarter note.
    SetTempo(Tempo),
    /// `0x54`, length 5: SMPTE start time of the track.
    SmpteOffset(SmpteOffset),
    /// `0x58`, length 4: time signature.
    TimeSignature(TimeSignature),
    /// `0x59`, length 2: key signature.
    KeySignature(KeySignature),
    /// `0x7F`: sequencer-specific payload, kept opaque.
    SequencerSpecific(Vec<u8>),
    /// Any other meta type; the payload bytes are copied through.
    Unknown {
        /// The meta type byte.
        meta_type: u8,
        /// Raw payload bytes.
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// The meta type byte this payload encodes to.
    pub const fn meta_type(&self) -> u8 {
        match self {
            Self::SequenceNumber(_) | Self::NextTrackIndex(_) => 0x00,
            Self::Text(kind, _) => kind.meta_type(),
            Self::ChannelPrefix(_) => 0x20,
            Self::MidiPort(_) => 0x21,
            Self::EndOfTrack => 0x2F,
            Self::MLiveTag(_) => 0x4B,
            Self::SetTempo(_) => 0x51,
            Self::SmpteOffset(_) => 0x54,
            Self::TimeSignature(_) => 0x58,
            Self::KeySignature(_) => 0x59,
            Self::SequencerSpecific(_) => 0x7F,
            Self::Unknown { meta_type, .. } => *meta_type,
        }
    }

    /// The wire-standard payload length for fixed-size meta types,
    /// None for the variable-length ones.
    pub const fn standard_length(&self) -> Option<u32> {
        Some(match self {
            Self::SequenceNumber(_) | Self::NextTrackIndex(_) => 2,
            Self::ChannelPrefix(_) | Self::MidiPort(_) => 1,
            Self::EndOfTrack => 0,
            Self::SetTempo(_) => 3,
            Self::SmpteOffset(_) => 5,
            Self::TimeSignature(_) => 4,
            Self::KeySignature(_) => 2,
            _ => return None,
        })
    }

    /// Human-readable name of the payload.
    pub fn label(&self) -> Cow<'static, str> {
        let name = match self {
            Self::SequenceNumber(_) => "Sequence Number",
            Self::NextTrackIndex(_) => "Next Track Index",
            Self::Text(kind, _) => kind.label(),
            Self::ChannelPrefix(_) => "MIDI Channel Prefix",
            Self::MidiPort(_) => "MIDI Port",
            Self::EndOfTrack => "End of Track",
            Self::MLiveTag(_) => "M-Live Tag",
            Self::SetTempo(_) => "Set Tempo",
            Self::SmpteOffset(_) => "SMPTE Offset",
            Self::TimeSignature(_) => "Time Signature",
            Self::KeySignature(_) => "Key Signature",
            Self::SequencerSpecific(_) => "Sequencer Specific",
            Self::Unknown { meta_type, .. } => {
                return Cow::Owned(format!("Unknown Meta: {meta_type:#04X}"));
            }
        };
        Cow::Borrowed(name)
    }
}

/// The nine text meta kinds, `0x01`–`0x09`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextKind {
    /// `0x01` free text
    Text,
    /// `0x02` copyright notice
    Copyright,
    /// `0x03` sequence or track name
    TrackName,
    /// `0x04` instrument name
    InstrumentName,
    /// `0x05` lyric
    Lyric,
    /// `0x06` marker
    Marker,
    /// `0x07` cue point
    CuePoint,
    /// `0x08` program name
    ProgramName,
    /// `0x09` device name
    DeviceName,
}

impl TextKind {
    /// Match a meta type byte in `0x01..=0x09`.
    pub const fn from_meta_type(meta_type: u8) -> Option<Self> {
        Some(match meta_type {
            0x01 => Self::Text,
            0x02 => Self::Copyright,
            0x03 => Self::TrackName,
            0x04 => Self::InstrumentName,
            0x05 => Self::Lyric,
            0x06 => Self::Marker,
            0x07 => Self::CuePoint,
            0x08 => Self::ProgramName,
            0x09 => Self::DeviceName,
            _ => return None,
        })
    }

    /// The meta type byte.
    pub const fn meta_type(&self) -> u8 {
        match self {
            Self::Text => 0x01,
            Self::Copyright => 0x02,
            Self::TrackName => 0x03,
            Self::InstrumentName => 0x04,
            Self::Lyric => 0x05,
            Self::Marker => 0x06,
            Self::CuePoint => 0x07,
            Self::ProgramName => 0x08,
            Self::DeviceName => 0x09,
        }
    }

    /// Fixed human-readable name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text Event",
            Self::Copyright => "Copyright Notice",
            Self::TrackName => "Sequence/Track Name",
            Self::InstrumentName => "Instrument Name",
            Self::Lyric => "Lyric",
            Self::Marker => "Marker",
            Self::CuePoint => "Cue Point",
            Self::ProgramName => "Program Name",
            Self::DeviceName => "Device Name",
        }
    }
}

/// Tempo as microseconds per quarter note (the wire unit).
///
/// The wire value may be zero: a Set Tempo payload of `00 00 00`
/// decodes without complaint, so the bpm conversions answer `None`
/// rather than divide by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo {
    micros_per_quarter_note: u32,
}

impl Tempo {
    /// From the wire value, microseconds per quarter note.
    pub const fn new(micros_per_quarter_note: u32) -> Self {
        Self {
            micros_per_quarter_note,
        }
    }

    /// From beats per minute, rounding to the nearest microsecond
    /// count.
    ///
    /// Answers `None` when no tempo represents the rate: zero bpm,
    /// or a rate so high the microsecond count rounds to zero.
    pub const fn from_bpm(bpm: u32) -> Option<Self> {
        if bpm == 0 {
            return None;
        }
        let micros_per_quarter_note = (60_000_000 + bpm / 2) / bpm;
        if micros_per_quarter_note == 0 {
            return None;
        }
        Some(Self {
            micros_per_quarter_note,
        })
    }

    /// The wire value.
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.micros_per_quarter_note
    }

    /// Beats per minute, rounded to the nearest whole beat, or `None`
    /// for a zero tempo.
    pub const fn bpm(&self) -> Option<u32> {
        if self.micros_per_quarter_note == 0 {
            return None;
        }
        Some((60_000_000 + self.micros_per_quarter_note / 2) / self.micros_per_quarter_note)
    }
}

/// A track's starting position in SMPTE time code.
///
/// The wire image is five bytes: `0rrhhhhh` packing the two-bit frame
/// rate with the hour, then minutes, seconds, frames, and fractional
/// frames in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate from bits 5–6 of the hour byte.
    pub fps: SmpteFps,
    /// Hour component (0–23 when well-formed).
    pub hour: u8,
    /// Minute component (0–59 when well-formed).
    pub minute: u8,
    /// Second component (0–59 when well-formed).
    pub second: u8,
    /// Frame within the second; the valid range depends on the rate.
    pub frame: u8,
    /// Hundredths of a frame (0–99 when well-formed).
    pub subframe: u8,
}

impl SmpteOffset {
    /// Interpret the five payload bytes. Out-of-range field values
    /// are kept as read; [`validate`](crate::validate) reports them.
    pub const fn from_bytes(bytes: [u8; 5]) -> Self {
        Self {
            fps: SmpteFps::from_code(bytes[0] >> 5),
            hour: bytes[0] & 0x1F,
            minute: bytes[1],
            second: bytes[2],
            frame: bytes[3],
            subframe: bytes[4],
        }
    }

    /// The five-byte wire image.
    pub const fn to_bytes(&self) -> [u8; 5] {
        [
            (self.fps.code() << 5) | (self.hour & 0x1F),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }

    /// The absolute position in microseconds, using this offset's own
    /// frame rate.
    pub const fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// The absolute position in microseconds, computed against a
    /// different frame rate (a file whose header timing is SMPTE
    /// overrides the offset's internal rate).
    pub const fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        ((((self.hour as u64 * 3600) + (self.minute as u64) * 60 + self.second as u64) * 1_000_000)
            as f64)
            + ((self.frame as u64) * 1_000_000) as f64 / fps.as_f64()
            + ((self.subframe as u32) * 10_000) as f64 / fps.as_f64()
    }
}

/// A time signature: numerator, denominator as a power-of-two
/// exponent, MIDI clocks per metronome click, and notated 32nds per
/// quarter note, all as raw wire bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u8,
    /// Denominator exponent; 2 means a quarter note, 3 an eighth.
    pub denominator: u8,
    /// MIDI clocks per metronome click.
    pub metronome: u8,
    /// Notated thirty-second notes per MIDI quarter note.
    pub thirty_seconds: u8,
}

/// A key signature: accidental count (negative for flats) and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative; `-7..=7` names a
    /// key.
    pub accidentals: i8,
    /// Raw mode byte: 0 is major, anything else reads as minor.
    pub mode: u8,
}

impl KeySignature {
    /// The conventional key name, when the accidental count is in
    /// range.
    pub const fn key_name(&self) -> Option<&'static str> {
        key_name(self.accidentals)
    }

    /// True unless the mode byte is 0.
    pub const fn is_minor(&self) -> bool {
        self.mode != 0
    }

    /// `"Major"` or `"Minor"`.
    pub const fn mode_name(&self) -> &'static str {
        if self.is_minor() { "Minor" } else { "Major" }
    }
}

/// The non-standard `0x4B` M-Live tag: a one-byte tag kind plus the
/// remaining payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MLiveTag {
    /// Tag kind byte.
    pub tag: u8,
    /// The tag's value bytes, typically text.
    pub value: Vec<u8>,
}

impl MLiveTag {
    /// The tag kind's name.
    pub fn tag_label(&self) -> Cow<'static, str> {
        let name = match self.tag {
            1 => "Genre",
            2 => "Artist",
            3 => "Composer",
            4 => "Duration",
            5 => "BPM",
            other => return Cow::Owned(format!("Unknown Tag: {other}")),
        };
        Cow::Borrowed(name)
    }
}
