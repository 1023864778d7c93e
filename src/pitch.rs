//! Pitch classes, spelled note names and the intervals used to build chords.

use derive_more::{Display, Into};

// -------------------------------------------------------------------------------------------------

/// A note identity modulo octave: 0 = C, 1 = C#/Db ... 11 = B.
///
/// Spelling (flat or sharp name) is not part of a pitch class, see [`crate::Speller`].
#[derive(Debug, Display, Into, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Create a pitch class from any semitone number, wrapping it into [0..11].
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    /// Pitch class of a note name or note with octave, e.g. `Eb`, `f#` or `C4`.
    pub fn from_name(name: &str) -> Option<Self> {
        NoteName::try_from(name).ok().map(|name| name.pitch_class())
    }

    /// Raw value in range [0..11].
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Return a new pitch class, moved by the given number of semitones.
    #[must_use]
    pub fn transposed(&self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }
}

impl From<u8> for PitchClass {
    fn from(value: u8) -> Self {
        Self::new(value as i32)
    }
}

// -------------------------------------------------------------------------------------------------

/// A parsed note name: letter, accidentals and an optional octave.
///
/// Supported notation: `C`, `c#`, `Db`, `Ebb`, `F##`, `G♭`, `A♯`, each optionally followed by an
/// octave number: `C4`, `Bb-1`. Alterations do not wrap: `Cb4` is B3 and `B#4` is C5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    letter: char,
    alteration: i32,
    octave: Option<i32>,
}

impl NoteName {
    /// Upper case note letter.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// Sum of all accidentals: sharps count +1, flats -1.
    pub fn alteration(&self) -> i32 {
        self.alteration
    }

    /// Octave, when the name carried one.
    pub fn octave(&self) -> Option<i32> {
        self.octave
    }

    /// Semitones above the C of the note's own octave. May be negative or above 11.
    fn height(&self) -> i32 {
        let natural = match self.letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            _ => 11,
        };
        natural + self.alteration
    }

    /// Pitch class of the note.
    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::new(self.height())
    }

    /// The pitch class part of the name, spelled as it was parsed, e.g. `Eb` for `Eb4`.
    pub fn pitch_class_name(&self) -> String {
        let accidental = if self.alteration < 0 { "b" } else { "#" };
        let mut name = String::from(self.letter);
        for _ in 0..self.alteration.abs() {
            name.push_str(accidental);
        }
        name
    }

    /// MIDI note number, when the name has an octave and lies within the MIDI range.
    pub fn midi(&self) -> Option<i32> {
        let octave = self.octave?;
        let midi = octave
            .checked_add(1)?
            .checked_mul(12)?
            .checked_add(self.height())?;
        if (0..=127).contains(&midi) {
            Some(midi)
        } else {
            None
        }
    }
}

impl TryFrom<&str> for NoteName {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        fn is_sharp_symbol(c: char) -> bool {
            c == '#' || c == '♯'
        }
        fn is_flat_symbol(c: char) -> bool {
            c == 'b' || c == '♭'
        }

        let s = s.trim();
        let mut chars = s.char_indices().peekable();
        let letter = match chars.next() {
            Some((_, c)) if matches!(c.to_ascii_uppercase(), 'A'..='G') => c.to_ascii_uppercase(),
            Some((_, c)) => {
                return Err(format!(
                    "invalid note str '{}' - note character '{}' is invalid.",
                    s, c
                ))
            }
            None => return Err(format!("invalid note str '{}' - string is too short.", s)),
        };

        let mut alteration = 0;
        let mut octave_start = s.len();
        while let Some((index, c)) = chars.peek().copied() {
            if is_sharp_symbol(c) {
                if alteration < 0 {
                    return Err(format!("invalid note str '{}' - mixed accidentals.", s));
                }
                alteration += 1;
            } else if is_flat_symbol(c) {
                if alteration > 0 {
                    return Err(format!("invalid note str '{}' - mixed accidentals.", s));
                }
                alteration -= 1;
            } else {
                octave_start = index;
                break;
            }
            chars.next();
        }

        let octave_str = &s[octave_start..];
        let octave = if octave_str.is_empty() {
            None
        } else {
            Some(
                octave_str
                    .parse::<i32>()
                    .map_err(|err| format!("invalid note str '{}': {}", s, err))?,
            )
        };

        Ok(Self {
            letter,
            alteration,
            octave,
        })
    }
}

// -------------------------------------------------------------------------------------------------

/// Intervals used to transpose a chord root into suspensions, added tones and tensions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Interval {
    MajorSecond,
    PerfectFourth,
    PerfectFifth,
    MajorSixth,
    MajorNinth,
    PerfectEleventh,
    MajorThirteenth,
}

impl Interval {
    /// Size of the interval in semitones.
    pub fn semitones(&self) -> i32 {
        match self {
            Self::MajorSecond => 2,
            Self::PerfectFourth => 5,
            Self::PerfectFifth => 7,
            Self::MajorSixth => 9,
            Self::MajorNinth => 14,
            Self::PerfectEleventh => 17,
            Self::MajorThirteenth => 21,
        }
    }

    /// Short name in `<number><quality>` notation, e.g. `9M` or `11P`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MajorSecond => "2M",
            Self::PerfectFourth => "4P",
            Self::PerfectFifth => "5P",
            Self::MajorSixth => "6M",
            Self::MajorNinth => "9M",
            Self::PerfectEleventh => "11P",
            Self::MajorThirteenth => "13M",
        }
    }

    /// Transpose a pitch class up by this interval.
    pub fn above(&self, pitch_class: PitchClass) -> PitchClass {
        pitch_class.transposed(self.semitones())
    }
}

impl TryFrom<&str> for Interval {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, String> {
        const ALL: [Interval; 7] = [
            Interval::MajorSecond,
            Interval::PerfectFourth,
            Interval::PerfectFifth,
            Interval::MajorSixth,
            Interval::MajorNinth,
            Interval::PerfectEleventh,
            Interval::MajorThirteenth,
        ];
        ALL.into_iter()
            .find(|interval| interval.name() == s.trim())
            .ok_or_else(|| format!("unknown interval '{}'", s))
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------
