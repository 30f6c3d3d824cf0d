#![doc = r#"
The event model.

Every track is a sequence of [`TrackEvent`]s: a delta time in ticks
since the previous event, plus a [`TrackMessage`] from one of five
families:

```text
                    |---------------|
                    | TrackMessage  |
                    |---------------|
        /        /         |         \           \
  ChannelVoice  SysEx  SystemCommon  SystemRealTime  Meta
```

Running status is wire-level compression only; each decoded event
carries its own status information, and the encoder re-emits a status
byte per event.
"#]

mod voice;
pub use voice::*;

mod system;
pub use system::*;

mod meta;
pub use meta::*;

use std::borrow::Cow;

/// A delta time and the message that fires after it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    /// Ticks since the previous event in the same track.
    pub delta: u32,
    /// The decoded message.
    pub message: TrackMessage,
}

impl TrackEvent {
    /// Pair a delta time with a message.
    pub fn new(delta: u32, message: impl Into<TrackMessage>) -> Self {
        Self {
            delta,
            message: message.into(),
        }
    }

    /// Human-readable name of the event, from the static label tables.
    pub fn label(&self) -> Cow<'static, str> {
        self.message.label()
    }
}

/// The set of possible track messages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A channel voice message (status `0x80`–`0xEF`).
    ChannelVoice(ChannelVoiceEvent),
    /// A system-exclusive blob (status `0xF0`).
    SystemExclusive(SysExEvent),
    /// A system common message (status `0xF1`–`0xF7`).
    SystemCommon(SystemCommonEvent),
    /// A system real-time message (status `0xF8`–`0xFE`).
    SystemRealTime(SystemRealTimeEvent),
    /// A meta event (status `0xFF`).
    Meta(MetaEvent),
}

impl TrackMessage {
    /// Human-readable name of the message.
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Self::ChannelVoice(v) => v.label(),
            Self::SystemExclusive(s) => s.label(),
            Self::SystemCommon(c) => Cow::Borrowed(c.kind.label()),
            Self::SystemRealTime(r) => Cow::Borrowed(r.kind.label()),
            Self::Meta(m) => m.message.label(),
        }
    }
}

impl From<ChannelVoiceEvent> for TrackMessage {
    fn from(value: ChannelVoiceEvent) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SysExEvent> for TrackMessage {
    fn from(value: SysExEvent) -> Self {
        Self::SystemExclusive(value)
    }
}

impl From<SystemCommonEvent> for TrackMessage {
    fn from(value: SystemCommonEvent) -> Self {
        Self::SystemCommon(value)
    }
}

impl From<SystemRealTimeEvent> for TrackMessage {
    fn from(value: SystemRealTimeEvent) -> Self {
        Self::SystemRealTime(value)
    }
}

impl From<MetaEvent> for TrackMessage {
    fn from(value: MetaEvent) -> Self {
        Self::Meta(value)
    }
}
