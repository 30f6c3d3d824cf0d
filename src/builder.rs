#![doc = r#"
The note builder: assemble a [`MidiFile`] from a sketch of notes.

A [`SongSketch`] lists tracks of notes with velocities, sounding
lengths and step sizes, all in ticks. The builder lays the notes on an
absolute-tick clock held in fractional quarter notes, optionally
prefixes a tempo and text meta events, sorts everything by time, and
converts the absolute times back to the delta encoding tracks use.
"#]

use crate::{
    CodecError, CodecErrorKind, CodecResult, MidiFile, Track, codec,
    event::{
        ChannelVoiceEvent, MetaEvent, MetaMessage, Tempo, TextKind, TrackEvent, TrackMessage,
        VoiceEvent,
    },
    file::TimeDivision,
    note::midi_to_note,
};

/// The input to [`convert_to_midi`]: tick resolution, optional tempo,
/// tracks of notes, and note numbers to leave out.
#[derive(Debug, Clone, PartialEq)]
pub struct SongSketch {
    /// Pulses per quarter note for the produced file.
    pub ppq: u16,
    /// When set, every track opens with a Set-Tempo meta event.
    pub bpm: Option<u32>,
    /// One sketch per track to produce.
    pub tracks: Vec<TrackSketch>,
    /// Note numbers to skip; skipped notes still advance the clock,
    /// leaving a rest.
    pub skip_notes: Vec<u8>,
}

impl Default for SongSketch {
    fn default() -> Self {
        Self {
            ppq: 480,
            bpm: None,
            tracks: Vec::new(),
            skip_notes: Vec::new(),
        }
    }
}

/// One track's worth of notes plus optional text meta events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSketch {
    /// Notes in playing order.
    pub notes: Vec<NoteSketch>,
    /// `(meta type, text)` pairs emitted at time zero.
    pub meta_text: Vec<(u8, String)>,
}

/// One note: what to play, how hard, how long it sounds, and how far
/// the clock steps afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSketch {
    /// MIDI note number 0–127.
    pub midi_note: u8,
    /// Attack velocity.
    pub velocity: u8,
    /// Sounding length in ticks; rounded up to whole ticks.
    pub length: f64,
    /// Clock advance in ticks before the next note.
    pub ticks: f64,
}

/// Build a file from a sketch.
///
/// The produced file keeps `track_count` equal to `tracks.len()`,
/// terminates every track, and passes [`validate`](crate::validate)
/// clean, so it round-trips through [`MidiFile::encode`] byte-stably.
pub fn convert_to_midi(sketch: &SongSketch) -> CodecResult<MidiFile> {
    let mut file = MidiFile {
        format: if sketch.tracks.len() > 1 { 1 } else { 0 },
        timing: TimeDivision::TicksPerQuarterNote(sketch.ppq),
        ..MidiFile::new()
    };

    for track_sketch in &sketch.tracks {
        let mut timed: Vec<(u32, TrackEvent)> = Vec::new();

        if let Some(bpm) = sketch.bpm {
            timed.push((0, tempo_event(bpm)?));
        }
        for (meta_type, text) in &track_sketch.meta_text {
            timed.push((0, meta_string_event(*meta_type, text)));
        }

        // the clock runs in fractional quarter notes so non-integral
        // step sizes accumulate without drift
        let mut current_quarters = 0.0f64;
        for note in &track_sketch.notes {
            if note.midi_note > 127 {
                return Err(CodecError::new(
                    0,
                    CodecErrorKind::NoteOutOfRange(note.midi_note as i32),
                ));
            }
            if !sketch.skip_notes.contains(&note.midi_note) {
                let at = (current_quarters * sketch.ppq as f64).round() as u32;
                let length = note.length.ceil() as u32;
                timed.push((
                    at,
                    TrackEvent::new(
                        0,
                        ChannelVoiceEvent::new(
                            0,
                            VoiceEvent::NoteOn {
                                note: note.midi_note,
                                velocity: note.velocity,
                                length,
                            },
                        ),
                    ),
                ));
                timed.push((
                    at + length,
                    TrackEvent::new(
                        0,
                        ChannelVoiceEvent::new(
                            0,
                            VoiceEvent::NoteOff {
                                note: note.midi_note,
                                velocity: 0,
                                length,
                            },
                        ),
                    ),
                ));
            }
            current_quarters += note.ticks / sketch.ppq as f64;
        }

        // stable by absolute time, so same-instant events keep their
        // push order (metas first, NoteOn before its NoteOff)
        timed.sort_by_key(|(at, _)| *at);

        let mut track = Track::new();
        let mut last = 0u32;
        for (at, mut event) in timed {
            event.delta = at - last;
            last = at;
            track.events.push(event);
        }
        track.events.push(end_of_track_event());
        track.chunk_length = codec::encoded_events_len(&track.events)?;
        file.tracks.push(track);
    }

    file.track_count = file.tracks.len() as u16;
    Ok(file)
}

/// A Set-Tempo meta event at delta 0 for the given beats per minute.
///
/// Rates with no representable tempo (zero, or high enough that the
/// microsecond count rounds to zero) fail with
/// [`CodecErrorKind::BpmOutOfRange`](crate::CodecErrorKind).
pub fn tempo_event(bpm: u32) -> CodecResult<TrackEvent> {
    let tempo = Tempo::from_bpm(bpm)
        .ok_or_else(|| CodecError::new(0, CodecErrorKind::BpmOutOfRange(bpm)))?;
    Ok(TrackEvent::new(
        0,
        MetaEvent::new(MetaMessage::SetTempo(tempo)),
    ))
}

/// A text-style meta event at delta 0. Types `0x01`–`0x09` become the
/// corresponding text kind; any other type carries the text as an
/// opaque payload.
pub fn meta_string_event(meta_type: u8, text: &str) -> TrackEvent {
    let message = match TextKind::from_meta_type(meta_type) {
        Some(kind) => MetaMessage::Text(kind, text.to_owned()),
        None => MetaMessage::Unknown {
            meta_type,
            data: text.as_bytes().to_vec(),
        },
    };
    TrackEvent::new(0, MetaEvent::new(message))
}

/// The End-of-Track meta event at delta 0.
pub fn end_of_track_event() -> TrackEvent {
    TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack))
}

/// A note number paired with its pitch name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedNote {
    /// MIDI note number.
    pub number: u8,
    /// Pitch name at the default octave offset.
    pub name: String,
}

/// The distinct notes a file actually strikes: note numbers from
/// NoteOn events with velocity above zero, sorted and de-duplicated.
pub fn used_notes(file: &MidiFile) -> Vec<UsedNote> {
    let mut numbers: Vec<u8> = file
        .tracks
        .iter()
        .flat_map(|track| &track.events)
        .filter_map(|event| match &event.message {
            TrackMessage::ChannelVoice(voice) => match voice.event {
                VoiceEvent::NoteOn { note, velocity, .. } if velocity > 0 => Some(note),
                _ => None,
            },
            _ => None,
        })
        .collect();
    numbers.sort_unstable();
    numbers.dedup();

    numbers
        .into_iter()
        .map(|number| UsedNote {
            number,
            name: midi_to_note(number).unwrap_or_else(|_| number.to_string()),
        })
        .collect()
}
