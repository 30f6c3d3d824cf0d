#![doc = r#"
SMPTE frame rates as they appear inside MIDI files.

The SMPTE-offset meta event encodes its frame rate in two bits, so
only four rates exist on the wire:

- 24 fps: film
- 25 fps: PAL/SECAM video
- 29.97 fps: NTSC color "drop frame"
- 30 fps: NTSC black & white

29.97 is genuinely fractional (30000/1001); it is kept as a variant of
[`SmpteFps`] rather than a raw float so the value stays comparable and
never picks up rounding error on its way through the model.
"#]

/// The four frame rates a two-bit SMPTE rate code can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second
    TwentyFour,
    /// 25 frames per second
    TwentyFive,
    /// 29.97 frames per second (30000/1001), drop-frame timecode
    TwentyNine,
    /// 30 frames per second
    Thirty,
}

/// The precise NTSC drop-frame rate: 29.97002997… fps
const DROP_FRAME: f64 = 30_000. / 1001.;

impl SmpteFps {
    /// Decode the two-bit rate code from bits 5–6 of an SMPTE hour
    /// byte.
    pub const fn from_code(code: u8) -> Self {
        match code & 0b11 {
            0 => Self::TwentyFour,
            1 => Self::TwentyFive,
            2 => Self::TwentyNine,
            _ => Self::Thirty,
        }
    }

    /// The two-bit rate code for this rate.
    pub const fn code(&self) -> u8 {
        match self {
            Self::TwentyFour => 0,
            Self::TwentyFive => 1,
            Self::TwentyNine => 2,
            Self::Thirty => 3,
        }
    }

    /// The nominal integer rate used in division arithmetic.
    ///
    /// Drop-frame 29.97 answers 30 here; MIDI timing math uses the
    /// nominal rate.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// The exact rate, including the fractional drop-frame value.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}
