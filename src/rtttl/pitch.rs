/*
RTTTL Pitch Names
=================

RTTTL spells pitches with a single letter plus an optional sharp. The letter
maps to a semitone offset inside the octave, the octave digit selects which
octave, and the pair becomes a MIDI-style note number:

    midi = 12 * octave + semitone + (1 if sharp)

Semitone table:

    c=0  d=2  e=4  f=5  g=7  a=9  b=11  h=11

`h` is the German spelling of B and aliases it. `p` is a pause (rest) and has
no pitch at all.

Note that RTTTL octaves sit one below the MIDI convention used elsewhere
(where C4 = 60): here `12 * 5 + 9 = 69` is A4 at 440 Hz, so `a5` in an RTTTL
tune sounds at 440 Hz and `a6` at 880 Hz.

Frequency uses twelve-tone equal temperament anchored at A = 440 Hz:

    freq = 440 * 2^((midi - 69) / 12)
*/

/// Reference pitch for equal temperament.
pub const A4_HZ: f64 = 440.0;
/// MIDI number of the reference pitch.
pub const A4_MIDI: i32 = 69;

/// A note letter from the `[a-h]` / `p` alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    /// Both `b` and `h` spell this letter.
    B,
    /// `p`: silence for the note's duration.
    Pause,
}

impl NoteLetter {
    /// Case-insensitive lookup. Returns `None` outside `a-h` and `p`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'c' => Some(Self::C),
            'd' => Some(Self::D),
            'e' => Some(Self::E),
            'f' => Some(Self::F),
            'g' => Some(Self::G),
            'a' => Some(Self::A),
            'b' | 'h' => Some(Self::B),
            'p' => Some(Self::Pause),
            _ => None,
        }
    }

    /// Semitone offset inside the octave, `None` for a pause.
    pub fn semitone(self) -> Option<i32> {
        match self {
            Self::C => Some(0),
            Self::D => Some(2),
            Self::E => Some(4),
            Self::F => Some(5),
            Self::G => Some(7),
            Self::A => Some(9),
            Self::B => Some(11),
            Self::Pause => None,
        }
    }

    pub fn is_pause(self) -> bool {
        matches!(self, Self::Pause)
    }
}

/// MIDI-style note number for a letter in an RTTTL octave.
///
/// `None` for a pause, and for octaves so far out that the note number
/// does not fit in an `i32`.
pub fn midi_number(letter: NoteLetter, sharp: bool, octave: i32) -> Option<i32> {
    let semitone = letter.semitone()?;
    octave
        .checked_mul(12)?
        .checked_add(semitone)?
        .checked_add(i32::from(sharp))
}

/// Equal-temperament frequency of a MIDI note number.
#[inline]
pub fn midi_to_freq(midi: i32) -> f64 {
    A4_HZ * 2.0_f64.powf((f64::from(midi) - f64::from(A4_MIDI)) / 12.0)
}
