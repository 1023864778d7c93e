//! Major and natural minor keys, their degree vocabularies and diatonic chords.

use std::{fmt::Display, str::FromStr};

use crate::{chord::ChordType, pitch::PitchClass, spelling::Speller};

// -------------------------------------------------------------------------------------------------

/// Roman numeral degree tokens of a major key.
pub const MAJOR_DEGREES: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
/// Roman numeral degree tokens of a natural minor key.
pub const MINOR_DEGREES: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];

// -------------------------------------------------------------------------------------------------

/// Scale type of a pad's key.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScaleType {
    #[default]
    Major,
    Minor,
}

impl ScaleType {
    /// Lenient conversion: "minor" in any case is minor, everything else major.
    pub fn from_loose(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("minor") {
            Self::Minor
        } else {
            Self::Major
        }
    }

    /// Degree tokens valid for this scale type.
    pub fn degrees(&self) -> &'static [&'static str; 7] {
        match self {
            Self::Major => &MAJOR_DEGREES,
            Self::Minor => &MINOR_DEGREES,
        }
    }

    /// Index of the given degree token in this scale type's vocabulary.
    pub fn degree_index(&self, degree: &str) -> Option<usize> {
        self.degrees().iter().position(|d| *d == degree)
    }

    /// Scale degree layout: non zero entries mark the scale's steps.
    fn degree_layout(&self) -> [usize; 12] {
        match self {
            Self::Major => [1, 0, 2, 0, 3, 4, 0, 5, 0, 6, 0, 7],
            Self::Minor => [1, 0, 2, 3, 0, 4, 0, 5, 6, 0, 7, 0],
        }
    }
}

impl FromStr for ScaleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(Self::Major),
            "minor" | "min" => Ok(Self::Minor),
            _ => Err(format!("unknown scale type '{}'", s)),
        }
    }
}

impl Display for ScaleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A major or natural minor key, which provides the diatonic chords of its seven degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    tonic: PitchClass,
    scale_type: ScaleType,
}

impl Key {
    pub fn new(tonic: PitchClass, scale_type: ScaleType) -> Self {
        Self { tonic, scale_type }
    }

    pub fn tonic(&self) -> PitchClass {
        self.tonic
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// List of steps / intervals above the tonic.
    pub fn steps(&self) -> Vec<u8> {
        self.scale_type
            .degree_layout()
            .iter()
            .copied()
            .enumerate()
            .filter(|(_s, d)| *d != 0)
            .map(|(s, _d)| s as u8)
            .collect()
    }

    /// Pitch classes of the scale, starting with the tonic.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.steps()
            .into_iter()
            .map(|step| self.tonic.transposed(step as i32))
            .collect()
    }

    /// Stack `count` thirds of the scale on top of the degree with the given index.
    /// Returns semitone offsets above the degree's root, ascending.
    ///
    /// ### Panics
    ///
    /// Panics if `degree_index` is not in range `[0..=6]`.
    pub fn chord_intervals(&self, degree_index: usize, count: usize) -> Vec<u8> {
        assert!(degree_index < 7, "degree index out of bounds");
        let steps = self.steps();
        let root = steps[degree_index];
        (0..count)
            .map(|n| {
                let index = degree_index + n * 2;
                let step = steps[index % 7] + 12 * (index / 7) as u8;
                step - root
            })
            .collect()
    }

    /// Root pitch class of the degree with the given index.
    pub fn degree_root(&self, degree_index: usize) -> PitchClass {
        self.tonic.transposed(self.steps()[degree_index % 7] as i32)
    }

    /// Diatonic triad symbol of a degree, e.g. `Bdim` for the 7th degree of C major.
    pub fn triad_symbol(&self, degree_index: usize, speller: &Speller, prefer_flats: bool) -> String {
        self.chord_symbol(degree_index, 3, speller, prefer_flats)
    }

    /// Diatonic seventh chord symbol of a degree, e.g. `G7` for the 5th degree of C major.
    pub fn seventh_symbol(
        &self,
        degree_index: usize,
        speller: &Speller,
        prefer_flats: bool,
    ) -> String {
        self.chord_symbol(degree_index, 4, speller, prefer_flats)
    }

    /// All seven diatonic triad symbols.
    pub fn triads(&self, speller: &Speller, prefer_flats: bool) -> Vec<String> {
        (0..7)
            .map(|index| self.triad_symbol(index, speller, prefer_flats))
            .collect()
    }

    /// All seven diatonic seventh chord symbols.
    pub fn seventh_chords(&self, speller: &Speller, prefer_flats: bool) -> Vec<String> {
        (0..7)
            .map(|index| self.seventh_symbol(index, speller, prefer_flats))
            .collect()
    }

    fn chord_symbol(
        &self,
        degree_index: usize,
        count: usize,
        speller: &Speller,
        prefer_flats: bool,
    ) -> String {
        let root = speller.spell(self.degree_root(degree_index), prefer_flats);
        let intervals = self.chord_intervals(degree_index, count);
        match ChordType::from_intervals(&intervals) {
            Some(chord_type) => format!("{}{}", root, chord_type.symbol),
            None => root.to_string(),
        }
    }
}

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn scale_types() {
        assert_eq!(ScaleType::from_loose("MINOR"), ScaleType::Minor);
        assert_eq!(ScaleType::from_loose("dorian"), ScaleType::Major);
        assert_eq!("min".parse::<ScaleType>(), Ok(ScaleType::Minor));
        assert!("dorian".parse::<ScaleType>().is_err());
        assert_eq!(ScaleType::Minor.to_string(), "minor");
        assert_eq!(ScaleType::Major.degree_index("V"), Some(4));
        assert_eq!(ScaleType::Minor.degree_index("V"), None);
        assert_eq!(ScaleType::Minor.degree_index("ii°"), Some(1));
    }

    #[test]
    fn key_notes() {
        let key = Key::new(PitchClass::new(0), ScaleType::Minor);
        assert_eq!(key.steps(), vec![0, 2, 3, 5, 7, 8, 10]);
        let key = Key::new(PitchClass::new(7), ScaleType::Major);
        assert_eq!(
            key.pitch_classes(),
            [7, 9, 11, 0, 2, 4, 6].map(PitchClass::new).to_vec()
        );
    }

    #[test]
    fn chord_intervals() {
        let key = Key::new(PitchClass::new(0), ScaleType::Major);
        assert_eq!(key.chord_intervals(0, 3), vec![0, 4, 7]);
        assert_eq!(key.chord_intervals(4, 4), vec![0, 4, 7, 10]);
        assert_eq!(key.chord_intervals(6, 4), vec![0, 3, 6, 10]);
    }

    #[test]
    fn diatonic_symbols() {
        let speller = Speller::new();
        let c_major = Key::new(PitchClass::new(0), ScaleType::Major);
        assert_eq!(
            c_major.triads(&speller, false),
            vec!["C", "Dm", "Em", "F", "G", "Am", "Bdim"]
        );
        assert_eq!(
            c_major.seventh_chords(&speller, false),
            vec!["Cmaj7", "Dm7", "Em7", "Fmaj7", "G7", "Am7", "Bm7b5"]
        );
        let a_minor = Key::new(PitchClass::new(9), ScaleType::Minor);
        assert_eq!(
            a_minor.triads(&speller, false),
            vec!["Am", "Bdim", "C", "Dm", "Em", "F", "G"]
        );
        assert_eq!(
            a_minor.seventh_chords(&speller, false),
            vec!["Am7", "Bm7b5", "Cmaj7", "Dm7", "Em7", "Fmaj7", "G7"]
        );
        let f_major = Key::new(PitchClass::new(5), ScaleType::Major);
        assert_eq!(f_major.triad_symbol(3, &speller, true), "Bb");
        assert_eq!(f_major.seventh_symbol(4, &speller, true), "C7");
    }
}
