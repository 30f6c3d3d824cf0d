use smfio::prelude::*;

/// Helper to frame a track body in a complete single-track file.
fn single_track_file(body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();

    // MIDI Header
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]); // Header length (6 bytes)
    bytes.extend_from_slice(&[0x00, 0x00]); // Format 0 (single track)
    bytes.extend_from_slice(&[0x00, 0x01]); // Number of tracks (1)
    bytes.extend_from_slice(&[0x01, 0xE0]); // 480 ticks per quarter note

    // Track
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);

    bytes
}

#[test]
fn minimal_empty_file() {
    let bytes: [u8; 26] = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, // MThd len 6
        0x00, 0x00, 0x00, 0x01, 0x01, 0xE0, // format 0, 1 track, 480 ppq
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, // MTrk len 4
        0x00, 0xFF, 0x2F, 0x00, // End of Track at delta 0
    ];

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(&file.header_type, b"MThd");
    assert_eq!(file.format, 0);
    assert_eq!(file.track_count, 1);
    assert_eq!(file.timing, TimeDivision::TicksPerQuarterNote(480));
    assert_eq!(file.tracks.len(), 1);

    let track = &file.tracks[0];
    assert_eq!(track.chunk_length, 4);
    assert_eq!(track.events.len(), 1);
    assert_eq!(track.events[0].delta, 0);
    assert!(track.is_terminated());

    assert_eq!(validate(&file), Vec::<String>::new());
    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn running_status_decodes_three_note_ons() {
    // only the first NoteOn carries its status byte
    let bytes = single_track_file(&[
        0x00, 0x90, 0x3C, 0x40, //
        0x00, 0x3E, 0x40, //
        0x00, 0x40, 0x40, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let notes: Vec<u8> = file.tracks[0]
        .events
        .iter()
        .filter_map(|event| match &event.message {
            TrackMessage::ChannelVoice(voice) => match voice.event {
                VoiceEvent::NoteOn { note, .. } => {
                    assert_eq!(voice.channel, 0);
                    Some(note)
                }
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(notes, vec![60, 62, 64]);
}

#[test]
fn note_pairing_attaches_durations() {
    let bytes = single_track_file(&[
        0x00, 0x90, 0x3C, 0x64, // NoteOn 60 vel 100 at delta 0
        0x81, 0x70, 0x80, 0x3C, 0x00, // NoteOff 60 at delta 240
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let TrackMessage::ChannelVoice(on) = &file.tracks[0].events[0].message else {
        panic!("expected NoteOn first");
    };
    assert_eq!(
        on.event,
        VoiceEvent::NoteOn {
            note: 60,
            velocity: 100,
            length: 240
        }
    );
}

#[test]
fn tempo_meta_decodes_microseconds_and_bpm() {
    let bytes = single_track_file(&[
        0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // 500000 µs per quarter
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let TrackMessage::Meta(meta) = &file.tracks[0].events[0].message else {
        panic!("expected a meta event");
    };
    assert_eq!(meta.declared_length, 3);
    let MetaMessage::SetTempo(tempo) = &meta.message else {
        panic!("expected Set Tempo");
    };
    assert_eq!(tempo.micros_per_quarter_note(), 500_000);
    assert_eq!(tempo.bpm(), Some(120));
}

#[test]
fn zero_tempo_decodes_without_a_representable_bpm() {
    // a well-formed-looking Set Tempo whose payload is 00 00 00
    let bytes = single_track_file(&[
        0x00, 0xFF, 0x51, 0x03, 0x00, 0x00, 0x00, //
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let TrackMessage::Meta(meta) = &file.tracks[0].events[0].message else {
        panic!("expected a meta event");
    };
    let MetaMessage::SetTempo(tempo) = &meta.message else {
        panic!("expected Set Tempo");
    };
    assert_eq!(tempo.micros_per_quarter_note(), 0);
    assert_eq!(tempo.bpm(), None);

    // the zero tempo survives a re-encode untouched
    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn smpte_offset_event_in_a_smpte_timed_file() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"MThd");
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x06]);
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x01]);
    bytes.push(0x80 | 25); // SMPTE timing, 25 fps
    bytes.push(40); // 40 ticks per frame

    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(&[
        0x00, 0xFF, 0x54, 0x05, // SMPTE Offset, length 5
        0x41, 0x17, 0x2D, 0x0C, 0x22, // 29.97 fps, 01:23:45, frame 12.34
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(
        file.timing,
        TimeDivision::Smpte {
            frames_per_second: 25,
            ticks_per_frame: 40
        }
    );

    let TrackMessage::Meta(meta) = &file.tracks[0].events[0].message else {
        panic!("expected a meta event");
    };
    let MetaMessage::SmpteOffset(offset) = &meta.message else {
        panic!("expected an SMPTE offset");
    };
    assert_eq!(offset.fps, SmpteFps::TwentyNine);
    assert_eq!(offset.hour, 1);
    assert_eq!(offset.minute, 23);
    assert_eq!(offset.second, 45);
    assert_eq!(offset.frame, 12);
    assert_eq!(offset.subframe, 34);

    assert_eq!(validate(&file), Vec::<String>::new());
    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn sysex_and_system_messages() {
    let bytes = single_track_file(&[
        0x00, 0xF0, 0x43, 0x01, 0x02, 0xF7, // Yamaha sysex
        0x00, 0xF2, 0x02, 0x01, 0x40, // song position pointer
        0x00, 0xF8, 0x00, // timing clock
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let events = &file.tracks[0].events;

    let TrackMessage::SystemExclusive(sysex) = &events[0].message else {
        panic!("expected sysex");
    };
    assert_eq!(sysex.manufacturer_id, 0x43);
    assert_eq!(sysex.manufacturer_label(), "Yamaha");
    assert_eq!(sysex.data, vec![0x01, 0x02]);

    let TrackMessage::SystemCommon(spp) = &events[1].message else {
        panic!("expected a system common event");
    };
    assert_eq!(spp.kind, SystemCommonKind::SongPositionPointer);
    assert_eq!(spp.song_position(), Some(0x2001));

    let TrackMessage::SystemRealTime(clock) = &events[2].message else {
        panic!("expected a system real-time event");
    };
    assert_eq!(clock.kind, SystemRealTimeKind::TimingClock);

    assert_eq!(file.encode().unwrap(), bytes);
}

#[test]
fn unknown_chunk_stops_the_track_scan() {
    let mut bytes = single_track_file(&[0x00, 0xFF, 0x2F, 0x00]);
    // a proprietary chunk after the only real track
    bytes.extend_from_slice(b"XFIH");
    bytes.extend_from_slice(&2u32.to_be_bytes());
    bytes.extend_from_slice(&[0xAA, 0xBB]);

    let file = MidiFile::parse(&bytes).unwrap();
    assert_eq!(file.tracks.len(), 1);
    assert_eq!(validate(&file), Vec::<String>::new());
}

#[test]
fn truncated_file_raises_underflow() {
    let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00];
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_underflow());
    assert_eq!(err.position(), 4);
}

#[test]
fn event_truncated_after_its_delta_raises_underflow() {
    // the trailing VLQ has its continuation bit set and no successor:
    // the reader treats end-of-input as the VLQ terminator instead of
    // over-reading, and the missing status byte is what fails
    let mut bytes = single_track_file(&[0x00, 0xFF, 0x2F, 0x00]);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&1u32.to_be_bytes());
    bytes.push(0x81);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_underflow());
    assert_eq!(err.position(), bytes.len());
}

#[test]
fn used_notes_reports_struck_pitches() {
    let bytes = single_track_file(&[
        0x00, 0x90, 0x3C, 0x64, // C3 struck
        0x00, 0x90, 0x40, 0x50, // E3 struck
        0x10, 0x80, 0x3C, 0x00, //
        0x10, 0x80, 0x40, 0x00, //
        0x00, 0x90, 0x30, 0x00, // zero velocity, not a strike
        0x00, 0xFF, 0x2F, 0x00,
    ]);

    let file = MidiFile::parse(&bytes).unwrap();
    let used = used_notes(&file);
    let pairs: Vec<(u8, &str)> = used
        .iter()
        .map(|n| (n.number, n.name.as_str()))
        .collect();
    assert_eq!(pairs, vec![(60, "C3"), (64, "E3")]);
}
