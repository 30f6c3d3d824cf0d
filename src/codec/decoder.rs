#![doc = r#"
The per-track event decoder.

One pass over the byte stream: header chunk, then track chunks until
the input ends or a chunk is not tagged `MTrk`. Within a track the
loop is VLQ delta time, status byte (or running status when the next
byte has its high bit clear), then a payload dispatch across the three
event families.

The decoder is deliberately lenient: unknown meta types become opaque
payloads, declared-length mismatches are interpreted best-effort, and
a missing End-of-Track simply runs the track to the end of the input.
The validator reports those anomalies; only input the decoder cannot
interpret at all raises an error.
"#]

use std::collections::HashMap;

use crate::{
    CodecError, CodecErrorKind, CodecResult,
    cursor::ByteReader,
    event::{
        ChannelVoiceEvent, KeySignature, MLiveTag, MetaEvent, MetaMessage, SmpteOffset,
        SysExEvent, SystemCommonEvent, SystemCommonKind, SystemRealTimeEvent, SystemRealTimeKind,
        Tempo, TextKind, TimeSignature, TrackEvent, TrackMessage, VoiceEvent,
    },
    file::{MidiFile, Track, header},
};

pub(crate) fn decode_file(bytes: &[u8]) -> CodecResult<MidiFile> {
    let mut reader = ByteReader::new(bytes);
    let raw = header::read_header(&mut reader)?;

    let mut file = MidiFile {
        header_type: raw.chunk_type,
        format: raw.format,
        track_count: raw.track_count,
        timing: raw.timing,
        tracks: Vec::new(),
    };

    // anything shorter than a chunk header is trailing garbage
    while reader.remaining() >= 8 {
        match read_track(&mut reader, file.tracks.len())? {
            Some(track) => file.tracks.push(track),
            None => break,
        }
    }

    Ok(file)
}

/// Decode state local to one track chunk, dropped when the track
/// ends.
struct TrackState {
    track_index: usize,
    running_status: Option<u8>,
    current_time: u32,
    active_notes: HashMap<u8, ActiveNote>,
}

/// A NoteOn waiting for its NoteOff. The handle back to the event is
/// an index into the track's event vector, which stays valid as the
/// vector grows.
struct ActiveNote {
    event_index: usize,
    start_time: u32,
}

/// Read one `MTrk` chunk. A chunk with any other tag ends the track
/// scan: the decoder returns `None` and the caller stops reading
/// further tracks.
fn read_track(reader: &mut ByteReader<'_>, track_index: usize) -> CodecResult<Option<Track>> {
    let chunk_type = reader.read_array::<4>()?;
    if &chunk_type != b"MTrk" {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            "chunk tagged {:?} where MTrk was expected, ignoring the rest of the file",
            String::from_utf8_lossy(&chunk_type)
        );
        return Ok(None);
    }
    let chunk_length = reader.read_u32_be()?;

    let mut track = Track {
        chunk_type,
        chunk_length,
        events: Vec::new(),
    };
    let mut state = TrackState {
        track_index,
        running_status: None,
        current_time: 0,
        active_notes: HashMap::new(),
    };

    // End-of-Track terminates the event loop; bytes the chunk declared
    // beyond it are left for the outer loop's next chunk attempt.
    while reader.remaining() > 0 {
        if read_event(reader, &mut state, &mut track.events)? {
            break;
        }
    }

    Ok(Some(track))
}

/// Read one event into `events`. Returns true when the event was
/// End-of-Track.
fn read_event(
    reader: &mut ByteReader<'_>,
    state: &mut TrackState,
    events: &mut Vec<TrackEvent>,
) -> CodecResult<bool> {
    let delta = reader.read_vlq()?;
    state.current_time = state.current_time.wrapping_add(delta);

    let first = reader.read_u8()?;
    let status = if first & 0x80 != 0 {
        state.running_status = Some(first);
        first
    } else {
        // a data byte: the status was omitted, reuse the running one
        reader.rewind(1);
        state.running_status.ok_or_else(|| {
            CodecError::new(reader.position(), CodecErrorKind::MissingRunningStatus)
        })?
    };

    match status {
        0x80..=0xEF => {
            read_voice_event(reader, state, events, delta, status)?;
            Ok(false)
        }
        0xF0 => {
            let sysex = read_sysex(reader)?;
            events.push(TrackEvent::new(delta, sysex));
            Ok(false)
        }
        0xFF => {
            let meta_type = reader.read_u8()?;
            let declared_length = reader.read_vlq()?;
            let message = read_meta(reader, meta_type, declared_length, state.track_index)?;
            let at_end = matches!(message, MetaMessage::EndOfTrack);
            events.push(TrackEvent::new(
                delta,
                MetaEvent {
                    declared_length,
                    message,
                },
            ));
            Ok(at_end)
        }
        status => {
            let length = reader.read_vlq()? as usize;
            let data = reader.read_bytes(length)?.to_vec();
            let message = if let Some(kind) = SystemCommonKind::from_status(status) {
                TrackMessage::SystemCommon(SystemCommonEvent { kind, data })
            } else if let Some(kind) = SystemRealTimeKind::from_status(status) {
                TrackMessage::SystemRealTime(SystemRealTimeEvent { kind, data })
            } else {
                // the arms above cover 0x80..=0xFF and running status
                // only ever records bytes with the high bit set
                unreachable!()
            };
            events.push(TrackEvent { delta, message });
            Ok(false)
        }
    }
}

/// Decode a channel voice event and maintain the note pairer.
fn read_voice_event(
    reader: &mut ByteReader<'_>,
    state: &mut TrackState,
    events: &mut Vec<TrackEvent>,
    delta: u32,
    status: u8,
) -> CodecResult<()> {
    let channel = status & 0x0F;
    let event = match status >> 4 {
        0x8 => {
            let note = reader.read_u8()?;
            let velocity = reader.read_u8()?;
            let length = match state.active_notes.remove(&note) {
                Some(active) => {
                    let length = state.current_time.wrapping_sub(active.start_time);
                    patch_note_length(events, active.event_index, length);
                    length
                }
                None => 0,
            };
            VoiceEvent::NoteOff {
                note,
                velocity,
                length,
            }
        }
        0x9 => VoiceEvent::NoteOn {
            note: reader.read_u8()?,
            velocity: reader.read_u8()?,
            length: 0,
        },
        0xA => VoiceEvent::PolyAftertouch {
            note: reader.read_u8()?,
            pressure: reader.read_u8()?,
        },
        0xB => VoiceEvent::ControlChange {
            controller: reader.read_u8()?,
            value: reader.read_u8()?,
        },
        0xC => VoiceEvent::ProgramChange {
            program: reader.read_u8()?,
        },
        0xD => VoiceEvent::ChannelPressure {
            pressure: reader.read_u8()?,
        },
        0xE => VoiceEvent::PitchBend {
            lsb: reader.read_u8()?,
            msb: reader.read_u8()?,
        },
        _ => unreachable!(),
    };

    events.push(TrackEvent::new(delta, ChannelVoiceEvent::new(channel, event)));

    // every NoteOn arms the pairer, velocity 0 included; a doubled
    // pitch overwrites (last wins) and the validator reports the count
    if let VoiceEvent::NoteOn { note, .. } = event {
        state.active_notes.insert(
            note,
            ActiveNote {
                event_index: events.len() - 1,
                start_time: state.current_time,
            },
        );
    }
    Ok(())
}

/// Back-patch the length onto a previously decoded NoteOn.
fn patch_note_length(events: &mut [TrackEvent], event_index: usize, length: u32) {
    if let Some(event) = events.get_mut(event_index)
        && let TrackMessage::ChannelVoice(voice) = &mut event.message
        && let VoiceEvent::NoteOn { length: slot, .. } = &mut voice.event
    {
        *slot = length;
    }
}

/// Read a system-exclusive payload: one manufacturer ID, then bytes
/// until the `0xF7` terminator (consumed, not stored) or end of
/// input.
fn read_sysex(reader: &mut ByteReader<'_>) -> CodecResult<SysExEvent> {
    let manufacturer_id = reader.read_u8()?;
    let mut data = Vec::new();
    while reader.remaining() > 0 {
        let byte = reader.read_u8()?;
        if byte == 0xF7 {
            break;
        }
        data.push(byte);
    }
    Ok(SysExEvent {
        manufacturer_id,
        data,
    })
}

/// Consume a declared-length payload and zero-pad or truncate it to
/// the fixed size a meta type expects.
fn read_padded<const N: usize>(reader: &mut ByteReader<'_>, length: usize) -> CodecResult<[u8; N]> {
    let data = reader.read_bytes(length)?;
    let mut out = [0u8; N];
    let take = N.min(data.len());
    out[..take].copy_from_slice(&data[..take]);
    Ok(out)
}

/// Decode one meta payload per its type byte.
fn read_meta(
    reader: &mut ByteReader<'_>,
    meta_type: u8,
    declared_length: u32,
    track_index: usize,
) -> CodecResult<MetaMessage> {
    let length = declared_length as usize;
    let message = match meta_type {
        0x00 => {
            if length == 2 {
                MetaMessage::SequenceNumber(reader.read_u16_be()?)
            } else {
                // non-standard length: stand in the track's own index
                if reader.remaining() > 0 {
                    reader.advance(1)?;
                }
                MetaMessage::NextTrackIndex(track_index as u16)
            }
        }
        0x01..=0x09 => {
            let text = reader.read_string(length)?;
            match TextKind::from_meta_type(meta_type) {
                Some(kind) => MetaMessage::Text(kind, text),
                None => unreachable!(),
            }
        }
        0x20 => {
            let [channel] = read_padded::<1>(reader, length)?;
            MetaMessage::ChannelPrefix(channel)
        }
        0x21 => {
            let [port] = read_padded::<1>(reader, length)?;
            MetaMessage::MidiPort(port)
        }
        0x2F => {
            // a nonzero length is not consumed; whatever follows is
            // left for the outer chunk loop and flagged by the
            // validator
            #[cfg(feature = "tracing")]
            if declared_length != 0 {
                tracing::warn!("End-of-Track declares {declared_length} payload bytes");
            }
            MetaMessage::EndOfTrack
        }
        0x4B => {
            let data = reader.read_bytes(length)?;
            let (tag, value) = match data.split_first() {
                Some((&tag, value)) => (tag, value.to_vec()),
                None => (0, Vec::new()),
            };
            MetaMessage::MLiveTag(MLiveTag { tag, value })
        }
        0x51 => {
            let [b0, b1, b2] = read_padded::<3>(reader, length)?;
            MetaMessage::SetTempo(Tempo::new(u32::from_be_bytes([0, b0, b1, b2])))
        }
        0x54 => {
            let bytes = read_padded::<5>(reader, length)?;
            MetaMessage::SmpteOffset(SmpteOffset::from_bytes(bytes))
        }
        0x58 => {
            let [numerator, denominator, metronome, thirty_seconds] =
                read_padded::<4>(reader, length)?;
            MetaMessage::TimeSignature(TimeSignature {
                numerator,
                denominator,
                metronome,
                thirty_seconds,
            })
        }
        0x59 => {
            let [accidentals, mode] = read_padded::<2>(reader, length)?;
            MetaMessage::KeySignature(KeySignature {
                accidentals: accidentals as i8,
                mode,
            })
        }
        0x7F => MetaMessage::SequencerSpecific(reader.read_bytes(length)?.to_vec()),
        _ => MetaMessage::Unknown {
            meta_type,
            data: reader.read_bytes(length)?.to_vec(),
        },
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode_track_body(body: &[u8]) -> Track {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
        bytes.extend_from_slice(body);
        let mut reader = ByteReader::new(&bytes);
        read_track(&mut reader, 0).unwrap().unwrap()
    }

    #[test]
    fn running_status_reuses_the_last_status_byte() {
        // three NoteOns, only the first carries 0x90
        let track = decode_track_body(&[
            0x00, 0x90, 0x3C, 0x40, //
            0x00, 0x3E, 0x40, //
            0x00, 0x40, 0x40,
        ]);
        assert_eq!(track.events.len(), 3);
        for (event, note) in track.events.iter().zip([0x3C, 0x3E, 0x40]) {
            let TrackMessage::ChannelVoice(voice) = &event.message else {
                panic!("expected a voice event");
            };
            assert_eq!(voice.channel, 0);
            assert_eq!(
                voice.event,
                VoiceEvent::NoteOn {
                    note,
                    velocity: 0x40,
                    length: 0
                }
            );
        }
    }

    #[test]
    fn data_byte_without_any_status_fails() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&4u32.to_be_bytes());
        bytes.extend_from_slice(&[0x00, 0x3C, 0x40, 0x00]);
        let mut reader = ByteReader::new(&bytes);
        let err = read_track(&mut reader, 0).unwrap_err();
        assert_eq!(*err.kind(), CodecErrorKind::MissingRunningStatus);
    }

    #[test]
    fn note_pairing_back_patches_the_note_on() {
        let track = decode_track_body(&[
            0x00, 0x90, 0x3C, 0x64, // NoteOn C4 vel 100
            0x81, 0x70, 0x80, 0x3C, 0x00, // NoteOff after 240 ticks
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let TrackMessage::ChannelVoice(on) = &track.events[0].message else {
            panic!();
        };
        assert_eq!(
            on.event,
            VoiceEvent::NoteOn {
                note: 0x3C,
                velocity: 100,
                length: 240
            }
        );
        let TrackMessage::ChannelVoice(off) = &track.events[1].message else {
            panic!();
        };
        assert_eq!(
            off.event,
            VoiceEvent::NoteOff {
                note: 0x3C,
                velocity: 0,
                length: 240
            }
        );
    }

    #[test]
    fn unmatched_note_off_keeps_length_zero() {
        let track = decode_track_body(&[0x10, 0x80, 0x3C, 0x00]);
        let TrackMessage::ChannelVoice(off) = &track.events[0].message else {
            panic!();
        };
        assert_eq!(
            off.event,
            VoiceEvent::NoteOff {
                note: 0x3C,
                velocity: 0,
                length: 0
            }
        );
    }

    #[test]
    fn sysex_runs_to_the_terminator() {
        let track = decode_track_body(&[
            0x00, 0xF0, 0x41, 0x01, 0x02, 0x03, 0xF7, //
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let TrackMessage::SystemExclusive(sysex) = &track.events[0].message else {
            panic!();
        };
        assert_eq!(sysex.manufacturer_id, 0x41);
        assert_eq!(sysex.data, vec![0x01, 0x02, 0x03]);
        assert_eq!(sysex.manufacturer_label(), "Roland");
        assert!(track.is_terminated());
    }

    #[test]
    fn meta_table_covers_the_fixed_types() {
        let track = decode_track_body(&[
            0x00, 0xFF, 0x00, 0x02, 0x00, 0x07, // sequence number 7
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // 120 bpm
            0x00, 0xFF, 0x58, 0x04, 0x06, 0x03, 0x24, 0x08, // 6/8
            0x00, 0xFF, 0x59, 0x02, 0xFD, 0x00, // Eb major
            0x00, 0xFF, 0x03, 0x04, b'l', b'e', b'a', b'd', // track name
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let metas: Vec<&MetaMessage> = track
            .events
            .iter()
            .map(|e| match &e.message {
                TrackMessage::Meta(m) => &m.message,
                _ => panic!("expected only meta events"),
            })
            .collect();

        assert_eq!(*metas[0], MetaMessage::SequenceNumber(7));
        let MetaMessage::SetTempo(tempo) = metas[1] else {
            panic!();
        };
        assert_eq!(tempo.micros_per_quarter_note(), 500_000);
        assert_eq!(tempo.bpm(), Some(120));
        assert_eq!(
            *metas[2],
            MetaMessage::TimeSignature(TimeSignature {
                numerator: 6,
                denominator: 3,
                metronome: 0x24,
                thirty_seconds: 8
            })
        );
        let MetaMessage::KeySignature(key) = metas[3] else {
            panic!();
        };
        assert_eq!(key.accidentals, -3);
        assert_eq!(key.key_name(), Some("Eb"));
        assert_eq!(*metas[4], MetaMessage::Text(TextKind::TrackName, "lead".into()));
        assert_eq!(*metas[5], MetaMessage::EndOfTrack);
    }

    #[test]
    fn sequence_number_with_bad_length_falls_back_to_the_track_index() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MTrk");
        bytes.extend_from_slice(&9u32.to_be_bytes());
        bytes.extend_from_slice(&[
            0x00, 0xFF, 0x00, 0x01, 0x09, // declared length 1
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let mut reader = ByteReader::new(&bytes);
        let track = read_track(&mut reader, 3).unwrap().unwrap();
        let TrackMessage::Meta(meta) = &track.events[0].message else {
            panic!();
        };
        assert_eq!(meta.message, MetaMessage::NextTrackIndex(3));
        assert_eq!(meta.declared_length, 1);
        assert!(track.is_terminated());
    }

    #[test]
    fn mlive_tag_splits_tag_and_value() {
        let track = decode_track_body(&[
            0x00, 0xFF, 0x4B, 0x05, 0x02, b'A', b'B', b'B', b'A', //
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let TrackMessage::Meta(meta) = &track.events[0].message else {
            panic!();
        };
        let MetaMessage::MLiveTag(tag) = &meta.message else {
            panic!();
        };
        assert_eq!(tag.tag, 2);
        assert_eq!(tag.tag_label(), "Artist");
        assert_eq!(tag.value, b"ABBA");
    }

    #[test]
    fn system_messages_read_a_vlq_prefixed_blob() {
        let track = decode_track_body(&[
            0x00, 0xF2, 0x02, 0x01, 0x40, // song position pointer
            0x00, 0xF8, 0x00, // timing clock, empty payload
            0x00, 0xFF, 0x2F, 0x00,
        ]);
        let TrackMessage::SystemCommon(spp) = &track.events[0].message else {
            panic!();
        };
        assert_eq!(spp.kind, SystemCommonKind::SongPositionPointer);
        assert_eq!(spp.song_position(), Some(0x2001));
        let TrackMessage::SystemRealTime(clock) = &track.events[1].message else {
            panic!();
        };
        assert_eq!(clock.kind, SystemRealTimeKind::TimingClock);
        assert!(clock.data.is_empty());
    }

    #[test]
    fn non_mtrk_chunk_stops_the_track_scan() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"XFIH");
        bytes.extend_from_slice(&2u32.to_be_bytes());
        let mut reader = ByteReader::new(&bytes);
        assert!(read_track(&mut reader, 0).unwrap().is_none());
    }
}
