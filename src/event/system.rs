use crate::labels::manufacturer_name;
use std::borrow::Cow;

/// A system-exclusive event: one manufacturer ID byte followed by the
/// payload bytes, which on the wire run up to (but do not include) the
/// `0xF7` terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysExEvent {
    /// One-byte manufacturer ID; `0x7E`/`0x7F` are the universal IDs.
    pub manufacturer_id: u8,
    /// Payload bytes, terminator excluded.
    pub data: Vec<u8>,
}

impl SysExEvent {
    /// The manufacturer's name from the static table.
    pub fn manufacturer_label(&self) -> Cow<'static, str> {
        manufacturer_name(self.manufacturer_id)
    }

    /// Same as [`manufacturer_label`](Self::manufacturer_label).
    pub fn label(&self) -> Cow<'static, str> {
        self.manufacturer_label()
    }
}

/// System common statuses `0xF1`–`0xF7`.
///
/// These are parsed the way this codec's lineage parses them: a
/// VLQ-encoded length followed by that many raw payload bytes, even
/// though plain SMF gives each status a fixed argument count. The raw
/// bytes are preserved so nothing is lost either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemCommonKind {
    /// `0xF1` MIDI time code quarter frame
    MtcQuarterFrame,
    /// `0xF2` song position pointer (14-bit beat count)
    SongPositionPointer,
    /// `0xF3` song select
    SongSelect,
    /// `0xF4` undefined
    UndefinedF4,
    /// `0xF5` undefined
    UndefinedF5,
    /// `0xF6` tune request
    TuneRequest,
    /// `0xF7` end of exclusive
    EndOfExclusive,
}

impl SystemCommonKind {
    /// Match a status byte in `0xF1..=0xF7`.
    pub const fn from_status(status: u8) -> Option<Self> {
        Some(match status {
            0xF1 => Self::MtcQuarterFrame,
            0xF2 => Self::SongPositionPointer,
            0xF3 => Self::SongSelect,
            0xF4 => Self::UndefinedF4,
            0xF5 => Self::UndefinedF5,
            0xF6 => Self::TuneRequest,
            0xF7 => Self::EndOfExclusive,
            _ => return None,
        })
    }

    /// The wire status byte.
    pub const fn status(&self) -> u8 {
        match self {
            Self::MtcQuarterFrame => 0xF1,
            Self::SongPositionPointer => 0xF2,
            Self::SongSelect => 0xF3,
            Self::UndefinedF4 => 0xF4,
            Self::UndefinedF5 => 0xF5,
            Self::TuneRequest => 0xF6,
            Self::EndOfExclusive => 0xF7,
        }
    }

    /// Fixed human-readable name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MtcQuarterFrame => "MTC Quarter Frame",
            Self::SongPositionPointer => "Song Position Pointer",
            Self::SongSelect => "Song Select",
            Self::UndefinedF4 | Self::UndefinedF5 => "Undefined",
            Self::TuneRequest => "Tune Request",
            Self::EndOfExclusive => "End of Exclusive",
        }
    }
}

/// A system common message and its raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemCommonEvent {
    /// Which common status this is.
    pub kind: SystemCommonKind,
    /// Raw payload bytes.
    pub data: Vec<u8>,
}

impl SystemCommonEvent {
    /// For a song position pointer, the `(lsb, msb)` pair if both
    /// bytes are present.
    pub fn position_bytes(&self) -> Option<(u8, u8)> {
        if self.kind != SystemCommonKind::SongPositionPointer {
            return None;
        }
        match self.data[..] {
            [lsb, msb, ..] => Some((lsb, msb)),
            _ => None,
        }
    }

    /// The 14-bit song position, if this is a complete song position
    /// pointer.
    pub fn song_position(&self) -> Option<u16> {
        self.position_bytes()
            .map(|(lsb, msb)| ((msb as u16) << 7) | lsb as u16)
    }
}

/// System real-time statuses `0xF8`–`0xFE`.
///
/// Real-time messages carry no arguments in live MIDI; inside a file
/// this codec still reads (and re-emits) the VLQ-prefixed payload its
/// lineage defined for them, which is empty in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemRealTimeKind {
    /// `0xF8` timing clock
    TimingClock,
    /// `0xF9` undefined
    UndefinedF9,
    /// `0xFA` start
    Start,
    /// `0xFB` continue
    Continue,
    /// `0xFC` stop
    Stop,
    /// `0xFD` undefined
    UndefinedFD,
    /// `0xFE` active sensing
    ActiveSensing,
}

impl SystemRealTimeKind {
    /// Match a status byte in `0xF8..=0xFE`.
    pub const fn from_status(status: u8) -> Option<Self> {
        Some(match status {
            0xF8 => Self::TimingClock,
            0xF9 => Self::UndefinedF9,
            0xFA => Self::Start,
            0xFB => Self::Continue,
            0xFC => Self::Stop,
            0xFD => Self::UndefinedFD,
            0xFE => Self::ActiveSensing,
            _ => return None,
        })
    }

    /// The wire status byte.
    pub const fn status(&self) -> u8 {
        match self {
            Self::TimingClock => 0xF8,
            Self::UndefinedF9 => 0xF9,
            Self::Start => 0xFA,
            Self::Continue => 0xFB,
            Self::Stop => 0xFC,
            Self::UndefinedFD => 0xFD,
            Self::ActiveSensing => 0xFE,
        }
    }

    /// Fixed human-readable name.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::TimingClock => "Timing Clock",
            Self::UndefinedF9 | Self::UndefinedFD => "Undefined",
            Self::Start => "Start",
            Self::Continue => "Continue",
            Self::Stop => "Stop",
            Self::ActiveSensing => "Active Sensing",
        }
    }
}

/// A system real-time message and its raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemRealTimeEvent {
    /// Which real-time status this is.
    pub kind: SystemRealTimeKind,
    /// Raw payload bytes, empty in well-formed input.
    pub data: Vec<u8>,
}
