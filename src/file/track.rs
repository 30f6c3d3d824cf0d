use crate::event::{MetaMessage, TrackEvent, TrackMessage};

/// One track chunk: the raw chunk tag and declared length as they
/// appeared on the wire, plus the decoded events in wire order.
///
/// `chunk_length` is informational on parse; the encoder recomputes
/// and back-patches it, so in-memory edits never have to keep it in
/// sync (the validator flags a zero length on a non-empty track).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    /// Chunk tag, `"MTrk"` for every well-formed track.
    pub chunk_type: [u8; 4],
    /// Declared chunk length in bytes.
    pub chunk_length: u32,
    /// Events in on-wire order.
    pub events: Vec<TrackEvent>,
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

impl Track {
    /// An empty `MTrk` track.
    pub fn new() -> Self {
        Self {
            chunk_type: *b"MTrk",
            chunk_length: 0,
            events: Vec::new(),
        }
    }

    /// Append an event.
    pub fn push(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// True if the final event is the End-of-Track meta event.
    pub fn is_terminated(&self) -> bool {
        matches!(
            self.events.last().map(|e| &e.message),
            Some(TrackMessage::Meta(meta)) if matches!(meta.message, MetaMessage::EndOfTrack)
        )
    }
}
