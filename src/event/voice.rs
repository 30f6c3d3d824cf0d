use crate::labels::controller_name;
use std::borrow::Cow;

/// A channel voice message: the channel from the status byte's low
/// nibble plus the payload selected by its high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceEvent {
    /// Channel 0–15.
    pub channel: u8,
    /// The voice payload.
    pub event: VoiceEvent,
}

impl ChannelVoiceEvent {
    /// Pair a channel with a voice payload.
    pub const fn new(channel: u8, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The status byte this message encodes to: kind nibble over
    /// channel nibble.
    pub const fn status(&self) -> u8 {
        (self.event.status_nibble() << 4) | (self.channel & 0x0F)
    }

    /// Human-readable name; control changes answer with the
    /// controller's assigned name.
    pub fn label(&self) -> Cow<'static, str> {
        match self.event {
            VoiceEvent::ControlChange { controller, .. } => controller_name(controller),
            other => Cow::Borrowed(other.kind_name()),
        }
    }
}

/// The seven channel voice payloads.
///
/// `NoteOn::length` and `NoteOff::length` are not wire data: the
/// decoder's note pairer back-patches the NoteOn with the tick
/// distance to its matching NoteOff (and stamps the NoteOff with the
/// same distance). An unmatched note keeps length 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Key released.
    NoteOff {
        /// Key number 0–127
        note: u8,
        /// Release velocity
        velocity: u8,
        /// Ticks since the matching NoteOn, 0 if unmatched
        length: u32,
    },
    /// Key pressed. Velocity 0 conventionally means NoteOff.
    NoteOn {
        /// Key number 0–127
        note: u8,
        /// Attack velocity
        velocity: u8,
        /// Ticks until the matching NoteOff, 0 if unmatched
        length: u32,
    },
    /// Per-key pressure change while held.
    PolyAftertouch {
        /// Key number 0–127
        note: u8,
        /// Pressure amount
        pressure: u8,
    },
    /// Controller moved.
    ControlChange {
        /// Controller number 0–127
        controller: u8,
        /// New controller value
        value: u8,
    },
    /// Program (patch) selected.
    ProgramChange {
        /// Program number 0–127
        program: u8,
    },
    /// Channel-wide pressure change.
    ChannelPressure {
        /// Pressure amount
        pressure: u8,
    },
    /// Pitch wheel moved; the 14-bit position spans two data bytes.
    PitchBend {
        /// Low seven bits
        lsb: u8,
        /// High seven bits
        msb: u8,
    },
}

impl VoiceEvent {
    /// The status high nibble for this payload, `0x8`–`0xE`.
    pub const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x8,
            Self::NoteOn { .. } => 0x9,
            Self::PolyAftertouch { .. } => 0xA,
            Self::ControlChange { .. } => 0xB,
            Self::ProgramChange { .. } => 0xC,
            Self::ChannelPressure { .. } => 0xD,
            Self::PitchBend { .. } => 0xE,
        }
    }

    /// The generic name of this payload kind.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::NoteOff { .. } => "Note Off",
            Self::NoteOn { .. } => "Note On",
            Self::PolyAftertouch { .. } => "Polyphonic Aftertouch",
            Self::ControlChange { .. } => "Control Change",
            Self::ProgramChange { .. } => "Program Change",
            Self::ChannelPressure { .. } => "Channel Pressure",
            Self::PitchBend { .. } => "Pitch Bend",
        }
    }

    /// The combined 14-bit pitch-bend position, for
    /// [`VoiceEvent::PitchBend`] only.
    pub const fn bend_value(&self) -> Option<u16> {
        match self {
            Self::PitchBend { lsb, msb } => Some(((*msb as u16) << 7) | *lsb as u16),
            _ => None,
        }
    }
}
