#![doc = r#"
The event encoder, mirroring the decoder.

Each track is written as `"MTrk"`, a four-byte length placeholder, the
events, and finally a seek back to patch the computed chunk length in.
Running status is never reconstructed: every event carries an explicit
status byte, so two encodes of the same model are byte-identical even
when the original wire bytes used compression.

Where the decoder is lenient, the encoder is strict: emitting invalid
bytes is worse than refusing, so any seven-bit wire field holding a
wider value aborts the encode.
"#]

use crate::{
    CodecError, CodecErrorKind, CodecResult,
    cursor::ByteWriter,
    event::{
        ChannelVoiceEvent, MetaEvent, MetaMessage, SysExEvent, TrackEvent, TrackMessage,
        VoiceEvent,
    },
    file::{MidiFile, Track, header},
};

pub(crate) fn encode_file(file: &MidiFile) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::new();
    header::write_header(&mut writer, file.format, file.track_count, &file.timing);
    for track in &file.tracks {
        write_track(&mut writer, track)?;
    }
    Ok(writer.into_bytes())
}

/// Write one track chunk, reserving the length and back-patching it
/// once the body size is known. An error while writing an event
/// propagates out; there is no partial-chunk recovery.
fn write_track(writer: &mut ByteWriter, track: &Track) -> CodecResult<()> {
    writer.write_bytes(b"MTrk");
    let length_position = writer.position();
    writer.write_u32_be(0);
    let body_start = writer.position();

    for event in &track.events {
        write_event(writer, event)?;
    }

    let chunk_length = (writer.position() - body_start) as u32;
    writer.seek(length_position);
    writer.write_u32_be(chunk_length);
    writer.seek_to_end();
    Ok(())
}

/// Write one event: VLQ delta, status byte, payload.
pub(crate) fn write_event(writer: &mut ByteWriter, event: &TrackEvent) -> CodecResult<()> {
    writer.write_vlq(event.delta)?;
    match &event.message {
        TrackMessage::ChannelVoice(voice) => write_voice(writer, voice),
        TrackMessage::SystemExclusive(sysex) => write_sysex(writer, sysex),
        TrackMessage::SystemCommon(common) => {
            writer.write_u8(common.kind.status());
            write_blob(writer, &common.data)
        }
        TrackMessage::SystemRealTime(realtime) => {
            writer.write_u8(realtime.kind.status());
            write_blob(writer, &realtime.data)
        }
        TrackMessage::Meta(meta) => write_meta(writer, meta),
    }
}

/// The encoded size of an event sequence, without emitting it into
/// the surrounding chunk framing.
pub(crate) fn encoded_events_len(events: &[TrackEvent]) -> CodecResult<u32> {
    let mut scratch = ByteWriter::new();
    for event in events {
        write_event(&mut scratch, event)?;
    }
    Ok(scratch.len() as u32)
}

/// Write a seven-bit wire field, refusing wider values.
fn data_byte(writer: &mut ByteWriter, field: &'static str, value: u8) -> CodecResult<()> {
    if value & 0x80 != 0 {
        return Err(CodecError::new(
            writer.position(),
            CodecErrorKind::DataByteOutOfRange { field, value },
        ));
    }
    writer.write_u8(value);
    Ok(())
}

fn write_voice(writer: &mut ByteWriter, voice: &ChannelVoiceEvent) -> CodecResult<()> {
    writer.write_u8(voice.status());
    match voice.event {
        VoiceEvent::NoteOff { note, velocity, .. } | VoiceEvent::NoteOn { note, velocity, .. } => {
            data_byte(writer, "note", note)?;
            data_byte(writer, "velocity", velocity)
        }
        VoiceEvent::PolyAftertouch { note, pressure } => {
            data_byte(writer, "note", note)?;
            data_byte(writer, "pressure", pressure)
        }
        VoiceEvent::ControlChange { controller, value } => {
            data_byte(writer, "controller", controller)?;
            data_byte(writer, "value", value)
        }
        VoiceEvent::ProgramChange { program } => data_byte(writer, "program", program),
        VoiceEvent::ChannelPressure { pressure } => data_byte(writer, "pressure", pressure),
        VoiceEvent::PitchBend { lsb, msb } => {
            data_byte(writer, "lsb", lsb)?;
            data_byte(writer, "msb", msb)
        }
    }
}

/// SysEx: status, manufacturer ID, payload, literal `0xF7`
/// terminator. Payload bytes must stay seven-bit or the terminator
/// scan on the way back in would misfire.
fn write_sysex(writer: &mut ByteWriter, sysex: &SysExEvent) -> CodecResult<()> {
    writer.write_u8(0xF0);
    data_byte(writer, "manufacturer id", sysex.manufacturer_id)?;
    for &byte in &sysex.data {
        data_byte(writer, "sysex data", byte)?;
    }
    writer.write_u8(0xF7);
    Ok(())
}

/// The VLQ-length-prefixed payload shared by system common and
/// real-time messages.
fn write_blob(writer: &mut ByteWriter, data: &[u8]) -> CodecResult<()> {
    writer.write_vlq(data.len() as u32)?;
    writer.write_bytes(data);
    Ok(())
}

/// Meta: `0xFF`, type byte, recomputed VLQ length, payload. The
/// declared length carried from a parse is deliberately ignored so a
/// damaged file re-encodes with consistent framing.
fn write_meta(writer: &mut ByteWriter, meta: &MetaEvent) -> CodecResult<()> {
    writer.write_u8(0xFF);
    writer.write_u8(meta.message.meta_type());

    let payload: Vec<u8> = match &meta.message {
        MetaMessage::SequenceNumber(number) | MetaMessage::NextTrackIndex(number) => {
            number.to_be_bytes().to_vec()
        }
        MetaMessage::Text(_, text) => text.as_bytes().to_vec(),
        MetaMessage::ChannelPrefix(byte) | MetaMessage::MidiPort(byte) => vec![*byte],
        MetaMessage::EndOfTrack => Vec::new(),
        MetaMessage::MLiveTag(tag) => {
            let mut bytes = Vec::with_capacity(1 + tag.value.len());
            bytes.push(tag.tag);
            bytes.extend_from_slice(&tag.value);
            bytes
        }
        MetaMessage::SetTempo(tempo) => {
            tempo.micros_per_quarter_note().to_be_bytes()[1..].to_vec()
        }
        MetaMessage::SmpteOffset(offset) => offset.to_bytes().to_vec(),
        MetaMessage::TimeSignature(ts) => {
            vec![ts.numerator, ts.denominator, ts.metronome, ts.thirty_seconds]
        }
        MetaMessage::KeySignature(key) => vec![key.accidentals as u8, key.mode],
        MetaMessage::SequencerSpecific(data) => data.clone(),
        MetaMessage::Unknown { data, .. } => data.clone(),
    };

    writer.write_vlq(payload.len() as u32)?;
    writer.write_bytes(&payload);
    Ok(())
}
