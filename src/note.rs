//! Note tokens: a spelled pitch class with an optional octave, e.g. `Eb4` or `F#`.

use derive_more::{Display, From, Into};

use crate::pitch::{NoteName, PitchClass};

// -------------------------------------------------------------------------------------------------

/// A note token as exchanged with device and display collaborators.
///
/// Untagged tokens (`"Eb"`) denote a pitch class only, tagged ones (`"Eb4"`) an absolute pitch.
/// Tokens which can't be parsed are kept verbatim: operations on notes pass them through
/// unchanged instead of dropping them.
#[derive(Debug, Display, From, Into, Clone, PartialEq, Eq, Hash)]
pub struct Note(String);

impl Note {
    /// Create a tagged note from a pitch class name and octave.
    pub fn new(pitch_class: &str, octave: i32) -> Self {
        Self(format!("{}{}", pitch_class, octave))
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the token into its head and a trailing octave number, if any.
    /// `"C#4"` splits into `("C#", Some(4))`, `"Bb-1"` into `("Bb", Some(-1))`.
    pub fn split(&self) -> (&str, Option<i32>) {
        let s = self.0.as_str();
        let digits = s.len() - s.trim_end_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return (s, None);
        }
        let mut octave_start = s.len() - digits;
        if s[..octave_start].ends_with('-') {
            octave_start -= 1;
        }
        match s[octave_start..].parse::<i32>() {
            Ok(octave) => (&s[..octave_start], Some(octave)),
            Err(_) => (s, None),
        }
    }

    /// The token without its octave.
    pub fn head(&self) -> &str {
        self.split().0
    }

    /// The token's octave, if tagged.
    pub fn octave(&self) -> Option<i32> {
        self.split().1
    }

    /// Test if the token ends with an octave number.
    pub fn has_octave(&self) -> bool {
        self.0.ends_with(|c: char| c.is_ascii_digit())
    }

    /// MIDI note number of a tagged and valid note.
    pub fn midi(&self) -> Option<i32> {
        NoteName::try_from(self.as_str()).ok()?.midi()
    }

    /// Pitch class of a valid note, tagged or not.
    pub fn pitch_class(&self) -> Option<PitchClass> {
        PitchClass::from_name(self.as_str())
    }

    /// Return the note with its octave replaced or added.
    #[must_use]
    pub fn with_octave(&self, octave: i32) -> Self {
        Self::new(self.head(), octave)
    }

    /// Return the note moved by the given number of octaves. Untagged notes, and notes whose
    /// octave would overflow, are returned as they are.
    #[must_use]
    pub fn transposed_octaves(&self, steps: i32) -> Self {
        match self.split() {
            (head, Some(octave)) => match octave.checked_add(steps) {
                Some(octave) => Self::new(head, octave),
                None => self.clone(),
            },
            (_, None) => self.clone(),
        }
    }
}

impl From<&str> for Note {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Note {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Convert a list of strings into notes.
pub fn notes_from<S: AsRef<str>>(notes: &[S]) -> Vec<Note> {
    notes.iter().map(|n| Note::from(n.as_ref())).collect()
}

// --------------------------------------------------------------------------------------------------
