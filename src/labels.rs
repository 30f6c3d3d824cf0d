#![doc = r#"
Static lookup tables for human-readable labels.

Controller and manufacturer names come from the MIDI 1.0 association
tables; key names cover the fifteen signatures from seven flats to
seven sharps. All tables are `'static` data behind plain functions and
are safe to share across threads.
"#]

use std::borrow::Cow;

/// Look up the assigned name of a control-change controller number.
///
/// Unassigned and out-of-range codes yield `"Unknown Controller: <id>"`.
pub fn controller_name(controller: u8) -> Cow<'static, str> {
    let name = match controller {
        0x00 => "Bank Select",
        0x01 => "Modulation Wheel",
        0x02 => "Breath Controller",
        0x04 => "Foot Controller",
        0x05 => "Portamento Time",
        0x06 => "Data Entry MSB",
        0x07 => "Channel Volume",
        0x08 => "Balance",
        0x0A => "Pan",
        0x0B => "Expression Controller",
        0x0C => "Effect Control 1",
        0x0D => "Effect Control 2",
        0x10 => "General Purpose Controller 1",
        0x11 => "General Purpose Controller 2",
        0x12 => "General Purpose Controller 3",
        0x13 => "General Purpose Controller 4",
        0x20 => "Bank Select LSB",
        0x21 => "Modulation Wheel LSB",
        0x22 => "Breath Controller LSB",
        0x24 => "Foot Controller LSB",
        0x25 => "Portamento Time LSB",
        0x26 => "Data Entry LSB",
        0x27 => "Channel Volume LSB",
        0x28 => "Balance LSB",
        0x2A => "Pan LSB",
        0x2B => "Expression Controller LSB",
        0x2C => "Effect Control 1 LSB",
        0x2D => "Effect Control 2 LSB",
        0x30 => "General Purpose Controller 1 LSB",
        0x31 => "General Purpose Controller 2 LSB",
        0x32 => "General Purpose Controller 3 LSB",
        0x33 => "General Purpose Controller 4 LSB",
        0x40 => "Sustain Pedal",
        0x41 => "Portamento On/Off",
        0x42 => "Sostenuto",
        0x43 => "Soft Pedal",
        0x44 => "Legato Footswitch",
        0x45 => "Hold 2",
        0x46 => "Sound Controller 1 (Sound Variation)",
        0x47 => "Sound Controller 2 (Timbre)",
        0x48 => "Sound Controller 3 (Release Time)",
        0x49 => "Sound Controller 4 (Attack Time)",
        0x4A => "Sound Controller 5 (Brightness)",
        0x4B => "Sound Controller 6 (Decay Time)",
        0x4C => "Sound Controller 7 (Vibrato Rate)",
        0x4D => "Sound Controller 8 (Vibrato Depth)",
        0x4E => "Sound Controller 9 (Vibrato Delay)",
        0x4F => "Sound Controller 10",
        0x50 => "General Purpose Controller 5",
        0x51 => "General Purpose Controller 6",
        0x52 => "General Purpose Controller 7",
        0x53 => "General Purpose Controller 8",
        0x54 => "Portamento Control",
        0x58 => "High Resolution Velocity Prefix",
        0x5B => "Effects 1 Depth (Reverb)",
        0x5C => "Effects 2 Depth (Tremolo)",
        0x5D => "Effects 3 Depth (Chorus)",
        0x5E => "Effects 4 Depth (Detune)",
        0x5F => "Effects 5 Depth (Phaser)",
        0x60 => "Data Increment",
        0x61 => "Data Decrement",
        0x62 => "Non-Registered Parameter Number LSB",
        0x63 => "Non-Registered Parameter Number MSB",
        0x64 => "Registered Parameter Number LSB",
        0x65 => "Registered Parameter Number MSB",
        0x78 => "All Sound Off",
        0x79 => "Reset All Controllers",
        0x7A => "Local Control On/Off",
        0x7B => "All Notes Off",
        0x7C => "Omni Mode Off",
        0x7D => "Omni Mode On",
        0x7E => "Mono Mode On",
        0x7F => "Poly Mode On",
        other => return Cow::Owned(format!("Unknown Controller: {other}")),
    };
    Cow::Borrowed(name)
}

/// Look up the name behind a one-byte system-exclusive manufacturer ID.
///
/// `0x7E` and `0x7F` are the two universal IDs. Unassigned codes yield
/// `"Unknown Manufacturer: 0x<id>"`.
pub fn manufacturer_name(id: u8) -> Cow<'static, str> {
    let name = match id {
        0x01 => "Sequential Circuits",
        0x02 => "Big Briar",
        0x03 => "Octave / Plateau",
        0x04 => "Moog",
        0x05 => "Passport Designs",
        0x06 => "Lexicon",
        0x07 => "Kurzweil",
        0x08 => "Fender",
        0x09 => "Gulbransen",
        0x0A => "Delta Labs",
        0x0B => "Sound Comp",
        0x0C => "General Electro",
        0x0D => "Techmar",
        0x0E => "Matthews Research",
        0x0F => "Ensoniq",
        0x10 => "Oberheim",
        0x11 => "Apple Computer",
        0x12 => "Grey Matter Response",
        0x13 => "Digidesign",
        0x14 => "Palmtree Instruments",
        0x15 => "JLCooper Electronics",
        0x16 => "Lowrey",
        0x17 => "Adams-Smith",
        0x18 => "E-mu Systems",
        0x19 => "Harmony Systems",
        0x1A => "ART",
        0x1B => "Baldwin",
        0x1C => "Eventide",
        0x1D => "Inventronics",
        0x1F => "Clarity",
        0x21 => "SIEL",
        0x22 => "Synthaxe",
        0x24 => "Hohner",
        0x25 => "Twister",
        0x26 => "Solton",
        0x27 => "Jellinghaus MS",
        0x28 => "Southworth Music Systems",
        0x29 => "PPG",
        0x2A => "JEN",
        0x2B => "Solid State Logic",
        0x2C => "Audio Veritrieb",
        0x2F => "Elka",
        0x30 => "Dynacord",
        0x33 => "Clavia Digital Instruments",
        0x36 => "Cheetah Marketing",
        0x3E => "Waldorf Electronics",
        0x40 => "Kawai",
        0x41 => "Roland",
        0x42 => "Korg",
        0x43 => "Yamaha",
        0x44 => "Casio",
        0x46 => "Kamiya Studio",
        0x47 => "Akai",
        0x48 => "Japan Victor",
        0x4B => "Fujitsu",
        0x4C => "Sony",
        0x4E => "Teac Corporation",
        0x50 => "Matsushita Electric",
        0x51 => "Fostex",
        0x52 => "Zoom",
        0x54 => "Matsushita Communication",
        0x55 => "Suzuki",
        0x7E => "Universal Non-Real Time",
        0x7F => "Universal Real Time",
        other => return Cow::Owned(format!("Unknown Manufacturer: {other:#04X}")),
    };
    Cow::Borrowed(name)
}

/// Look up the conventional name of a key signature.
///
/// `accidentals` counts sharps when positive and flats when negative;
/// only `-7..=7` name a key. The spelling is the major-key spelling
/// regardless of mode.
pub const fn key_name(accidentals: i8) -> Option<&'static str> {
    Some(match accidentals {
        -7 => "Cb",
        -6 => "Gb",
        -5 => "Db",
        -4 => "Ab",
        -3 => "Eb",
        -2 => "Bb",
        -1 => "F",
        0 => "C",
        1 => "G",
        2 => "D",
        3 => "A",
        4 => "E",
        5 => "B",
        6 => "F#",
        7 => "C#",
        _ => return None,
    })
}
