#![doc = r#"
`smfio` is a bidirectional codec for Standard MIDI Files.

[`MidiFile::parse`] turns bytes into a structured file: header,
track chunks, time-ordered events. [`MidiFile::encode`] turns
the structure back into bytes, recomputing chunk lengths and emitting
an explicit status byte per event. On top of the codec sit
[`validate`], which reports SMF-convention violations as plain
strings, and [`convert_to_midi`], which assembles a file from a
sketch of notes.

# Example

```
use smfio::prelude::*;

let bytes = [
    0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd
    0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, // format 0, 1 track, 480 ppq
    0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, // MTrk
    0x00, 0xFF, 0x2F, 0x00, // end of track
];

let file = MidiFile::parse(&bytes)?;
assert_eq!(file.timing, TimeDivision::TicksPerQuarterNote(480));
assert!(validate(&file).is_empty());
assert_eq!(file.encode()?, bytes);
# Ok::<(), smfio::CodecError>(())
```

# Leniency and strictness

The decoder is lenient: running status, unknown meta types,
non-standard declared lengths and missing End-of-Track markers all
parse, and the anomalies surface later through [`validate`]. The
encoder is strict: a model value that cannot be represented in
seven-bit wire fields refuses to encode. Both sides report structural
failure through the one [`CodecError`] type.

Optional features: `serde` derives serialization across the data
model, `tracing` emits warnings at the decoder's tolerance points.
"#]
#![warn(missing_docs)]

mod error;
pub use error::*;

pub mod cursor;

pub mod event;

pub mod file;
pub use file::{FormatType, MidiFile, TimeDivision, Track};

pub mod labels;

mod note;
pub use note::*;

mod builder;
pub use builder::*;

mod validate;
pub use validate::validate;

mod codec;

/// Everything a typical caller needs in one import.
pub mod prelude {
    pub use crate::{
        CodecError, CodecErrorKind, CodecResult, FormatType, MidiFile, NoteSketch, SongSketch,
        TimeDivision, Track, TrackSketch, UsedNote, convert_to_midi, end_of_track_event,
        event::{
            ChannelVoiceEvent, KeySignature, MLiveTag, MetaEvent, MetaMessage, SmpteOffset,
            SysExEvent, SystemCommonEvent, SystemCommonKind, SystemRealTimeEvent,
            SystemRealTimeKind, Tempo, TextKind, TimeSignature, TrackEvent, TrackMessage,
            VoiceEvent,
        },
        file::SmpteFps,
        labels::{controller_name, key_name, manufacturer_name},
        meta_string_event, midi_to_note, midi_to_note_with_offset, note_to_midi,
        note_to_midi_with_offset, tempo_event, used_notes, validate,
    };
}
