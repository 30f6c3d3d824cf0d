#![doc = r#"
The semantic validator.

A single pass over an already-parsed [`MidiFile`] that accumulates
human-readable issue strings. Nothing here is fatal (the parse has
already succeeded) and nothing here mutates the file. An empty result
means the file honors SMF conventions; the byte-level round-trip
guarantee only holds for such files.
"#]

use std::collections::HashMap;

use crate::{
    MidiFile, Track,
    event::{MetaEvent, MetaMessage, TrackMessage, VoiceEvent},
};

/// Check a parsed file against SMF conventions, returning one string
/// per issue found, in file order.
pub fn validate(file: &MidiFile) -> Vec<String> {
    let mut issues = Vec::new();

    if file.format > 2 {
        issues.push(format!("header format {} is not 0, 1 or 2", file.format));
    }
    if file.track_count as usize != file.tracks.len() {
        issues.push(format!(
            "header declares {} tracks but the file holds {}",
            file.track_count,
            file.tracks.len()
        ));
    }
    if &file.header_type != b"MThd" {
        issues.push(format!(
            "header chunk tagged {:?} instead of MThd",
            String::from_utf8_lossy(&file.header_type)
        ));
    }

    for (index, track) in file.tracks.iter().enumerate() {
        validate_track(index, track, &mut issues);
    }

    issues
}

fn validate_track(index: usize, track: &Track, issues: &mut Vec<String>) {
    if &track.chunk_type != b"MTrk" && &track.chunk_type != b"MThd" {
        issues.push(format!(
            "track {index}: chunk tagged {:?} is neither MThd nor MTrk",
            String::from_utf8_lossy(&track.chunk_type)
        ));
    }

    if (track.chunk_length == 0) != track.events.is_empty() {
        issues.push(format!(
            "track {index}: declared chunk length {} does not match its {} events",
            track.chunk_length,
            track.events.len()
        ));
    }

    let mut active_counts: HashMap<u8, u32> = HashMap::new();
    let mut end_of_track_count = 0usize;

    for event in &track.events {
        match &event.message {
            TrackMessage::ChannelVoice(voice) => match voice.event {
                VoiceEvent::NoteOn { note, velocity, .. } if velocity > 0 => {
                    *active_counts.entry(note).or_default() += 1;
                }
                // a zero-velocity NoteOn counts as a release
                VoiceEvent::NoteOn { note, .. } | VoiceEvent::NoteOff { note, .. } => {
                    match active_counts.get_mut(&note) {
                        Some(count) if *count > 0 => *count -= 1,
                        _ => issues.push(format!(
                            "track {index}: Note-Off without active Note-On for note {note}"
                        )),
                    }
                }
                _ => {}
            },
            TrackMessage::Meta(meta) => {
                if matches!(meta.message, MetaMessage::EndOfTrack) {
                    end_of_track_count += 1;
                }
                validate_meta(index, meta, issues);
            }
            _ => {}
        }
    }

    let mut unmatched: Vec<(u8, u32)> = active_counts
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .collect();
    unmatched.sort_unstable();
    for (note, _) in unmatched {
        issues.push(format!("track {index}: unmatched Note On for note {note}"));
    }

    match end_of_track_count {
        0 => issues.push(format!("track {index}: missing End-of-Track meta event")),
        1 => {}
        n => issues.push(format!(
            "track {index}: {n} End-of-Track meta events, expected exactly one"
        )),
    }
}

/// Declared-length checks for the fixed-size meta types, plus the
/// field-range checks on SMPTE offsets that the lenient decoder
/// deferred here.
fn validate_meta(index: usize, meta: &MetaEvent, issues: &mut Vec<String>) {
    let declared = meta.declared_length;
    match &meta.message {
        MetaMessage::SequenceNumber(_) | MetaMessage::NextTrackIndex(_) => {
            if declared != 0 && declared != 2 {
                issues.push(format!(
                    "track {index}: Sequence Number declares length {declared}, expected 0 or 2"
                ));
            }
        }
        MetaMessage::EndOfTrack => {
            if declared != 0 {
                issues.push(format!(
                    "track {index}: End-of-Track declares length {declared}, expected 0"
                ));
            }
        }
        MetaMessage::SetTempo(_) => {
            if declared != 3 {
                issues.push(format!(
                    "track {index}: Set Tempo declares length {declared}, expected 3"
                ));
            }
        }
        MetaMessage::SmpteOffset(offset) => {
            if declared != 5 {
                issues.push(format!(
                    "track {index}: SMPTE Offset declares length {declared}, expected 5"
                ));
            }
            if offset.hour > 23 {
                issues.push(format!(
                    "track {index}: SMPTE Offset hour {} out of range 0..=23",
                    offset.hour
                ));
            }
            if offset.minute > 59 {
                issues.push(format!(
                    "track {index}: SMPTE Offset minute {} out of range 0..=59",
                    offset.minute
                ));
            }
            if offset.second > 59 {
                issues.push(format!(
                    "track {index}: SMPTE Offset second {} out of range 0..=59",
                    offset.second
                ));
            }
            if offset.subframe > 99 {
                issues.push(format!(
                    "track {index}: SMPTE Offset subframe {} out of range 0..=99",
                    offset.subframe
                ));
            }
        }
        MetaMessage::TimeSignature(_) => {
            if declared != 4 {
                issues.push(format!(
                    "track {index}: Time Signature declares length {declared}, expected 4"
                ));
            }
        }
        MetaMessage::KeySignature(_) => {
            if declared != 2 {
                issues.push(format!(
                    "track {index}: Key Signature declares length {declared}, expected 2"
                ));
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ChannelVoiceEvent, SmpteOffset, Tempo, TrackEvent};
    use crate::file::SmpteFps;
    use pretty_assertions::assert_eq;

    fn note_on(note: u8, velocity: u8) -> TrackEvent {
        TrackEvent::new(
            0,
            ChannelVoiceEvent::new(
                0,
                VoiceEvent::NoteOn {
                    note,
                    velocity,
                    length: 0,
                },
            ),
        )
    }

    fn note_off(note: u8) -> TrackEvent {
        TrackEvent::new(
            0,
            ChannelVoiceEvent::new(
                0,
                VoiceEvent::NoteOff {
                    note,
                    velocity: 0,
                    length: 0,
                },
            ),
        )
    }

    fn file_with_events(events: Vec<TrackEvent>) -> MidiFile {
        let mut file = MidiFile::new();
        file.track_count = 1;
        file.tracks.push(Track {
            chunk_type: *b"MTrk",
            chunk_length: 1,
            events,
        });
        file
    }

    #[test]
    fn a_clean_file_has_no_issues() {
        let mut events = vec![note_on(60, 100), note_off(60)];
        events.push(TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)));
        assert_eq!(validate(&file_with_events(events)), Vec::<String>::new());
    }

    #[test]
    fn missing_end_of_track_and_unmatched_note_yield_two_issues() {
        let issues = validate(&file_with_events(vec![note_on(60, 100)]));
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.contains("unmatched Note On for note 60")));
        assert!(issues.iter().any(|i| i.contains("End-of-Track")));
    }

    #[test]
    fn zero_velocity_note_on_counts_as_a_release() {
        let mut events = vec![note_on(72, 100), note_on(72, 0)];
        events.push(TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)));
        assert_eq!(validate(&file_with_events(events)), Vec::<String>::new());
    }

    #[test]
    fn note_off_without_note_on_is_reported() {
        let mut events = vec![note_off(64)];
        events.push(TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)));
        let issues = validate(&file_with_events(events));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("Note-Off without active Note-On for note 64"));
    }

    #[test]
    fn declared_meta_length_mismatches_are_reported() {
        let mut events = Vec::new();
        events.push(TrackEvent::new(
            0,
            MetaEvent {
                declared_length: 4,
                message: MetaMessage::SetTempo(Tempo::from_bpm(120).unwrap()),
            },
        ));
        events.push(TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)));
        let issues = validate(&file_with_events(events));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("Set Tempo declares length 4"));
    }

    #[test]
    fn format_and_track_count_checks() {
        let mut file = MidiFile::new();
        file.format = 3;
        file.track_count = 2;
        let issues = validate(&file);
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("format 3"));
        assert!(issues[1].contains("declares 2 tracks"));
    }

    #[test]
    fn smpte_offset_ranges_are_checked() {
        let mut events = Vec::new();
        events.push(TrackEvent::new(
            0,
            MetaEvent {
                declared_length: 5,
                message: MetaMessage::SmpteOffset(SmpteOffset {
                    fps: SmpteFps::TwentyFour,
                    hour: 31,
                    minute: 80,
                    second: 10,
                    frame: 3,
                    subframe: 0,
                }),
            },
        ));
        events.push(TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)));
        let issues = validate(&file_with_events(events));
        assert_eq!(issues.len(), 2);
        assert!(issues[0].contains("hour 31"));
        assert!(issues[1].contains("minute 80"));
    }

    #[test]
    fn duplicate_end_of_track_is_reported() {
        let events = vec![
            TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)),
            TrackEvent::new(0, MetaEvent::new(MetaMessage::EndOfTrack)),
        ];
        let issues = validate(&file_with_events(events));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("expected exactly one"));
    }
}
