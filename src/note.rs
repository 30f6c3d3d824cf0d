#![doc = r#"
Scientific-pitch-notation conversions.

A pitch name is a letter `A`–`G`, an optional `#` or `b` accidental,
and an octave number that may be negative (`"C4"`, `"F#3"`, `"Bb-1"`).
The MIDI value is `(octave + octave_offset) * 12 + semitone`; with the
default offset of 2, `"C4"` is MIDI 72.

Enharmonic spellings collapse to one value: `E#` equals `F`, `Cb`
equals `B`, and `B#` wraps to `C` of the same written octave. The
spelling is therefore not preserved on a round trip;
[`midi_to_note`] always answers with the sharp spelling.
"#]

use crate::{CodecError, CodecErrorKind, CodecResult};

/// Octave offset that places `"C4"` at MIDI 72.
pub const DEFAULT_OCTAVE_OFFSET: i32 = 2;

/// The twelve chromatic names used when formatting a MIDI value.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone within the octave for a letter-plus-accidental spelling.
///
/// `B#` maps to 0 and `Cb` to 11 without an octave adjustment, which
/// matches the conventional map this crate inherited: `B#4` lands on
/// the same value as `C4`.
fn semitone(letter: char, accidental: Option<char>) -> Option<u8> {
    let natural: i8 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let shifted = match accidental {
        None => natural,
        Some('#') => natural + 1,
        Some('b') => natural - 1,
        Some(_) => return None,
    };
    Some(shifted.rem_euclid(12) as u8)
}

/// Convert a pitch name to its MIDI value at the default octave offset.
///
/// ```
/// # use smfio::note_to_midi;
/// assert_eq!(note_to_midi("C4").unwrap(), 72);
/// assert_eq!(note_to_midi("E#4").unwrap(), note_to_midi("F4").unwrap());
/// ```
pub fn note_to_midi(name: &str) -> CodecResult<u8> {
    note_to_midi_with_offset(name, DEFAULT_OCTAVE_OFFSET)
}

/// Convert a pitch name to its MIDI value at a chosen octave offset.
///
/// Values outside `0..=127` fail with
/// [`CodecErrorKind::NoteOutOfRange`](crate::CodecErrorKind).
pub fn note_to_midi_with_offset(name: &str, octave_offset: i32) -> CodecResult<u8> {
    let unknown = || CodecError::new(0, CodecErrorKind::UnknownNoteName(name.to_owned()));

    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(unknown)?;
    let rest = chars.as_str();
    let (accidental, octave_text) = match rest.chars().next() {
        Some(c @ ('#' | 'b')) => (Some(c), &rest[1..]),
        _ => (None, rest),
    };
    let semitone = semitone(letter, accidental).ok_or_else(unknown)?;
    let octave: i32 = octave_text.parse().map_err(|_| unknown())?;

    let value = (octave + octave_offset) * 12 + semitone as i32;
    if !(0..=127).contains(&value) {
        return Err(CodecError::new(0, CodecErrorKind::NoteOutOfRange(value)));
    }
    Ok(value as u8)
}

/// Format a MIDI value as a pitch name at the default octave offset.
///
/// ```
/// # use smfio::midi_to_note;
/// assert_eq!(midi_to_note(72).unwrap(), "C4");
/// ```
pub fn midi_to_note(value: u8) -> CodecResult<String> {
    midi_to_note_with_offset(value, DEFAULT_OCTAVE_OFFSET)
}

/// Format a MIDI value as a pitch name at a chosen octave offset,
/// spelling accidentals as sharps.
pub fn midi_to_note_with_offset(value: u8, octave_offset: i32) -> CodecResult<String> {
    if value > 127 {
        return Err(CodecError::new(
            0,
            CodecErrorKind::NoteOutOfRange(value as i32),
        ));
    }
    let octave = value as i32 / 12 - octave_offset;
    Ok(format!("{}{octave}", SHARP_NAMES[value as usize % 12]))
}
