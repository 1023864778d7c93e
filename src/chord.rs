//! Chord-quality lookup: chord symbols such as `G7`, `Bm7b5` or `Csus4` as root and intervals.

use lazy_static::lazy_static;
use std::collections::HashMap;

use derive_more::Display;

use crate::pitch::{NoteName, PitchClass};

// --------------------------------------------------------------------------------------------------

// triads
const MAJOR: [u8; 3] = [0, 4, 7];
const MINOR: [u8; 3] = [0, 3, 7];
const DIMINISHED: [u8; 3] = [0, 3, 6];
const AUG: [u8; 3] = [0, 4, 8];
const SUS2: [u8; 3] = [0, 2, 7];
const SUS4: [u8; 3] = [0, 5, 7];
const FIVE: [u8; 2] = [0, 7];
// sixths and added tones
const SIX: [u8; 4] = [0, 4, 7, 9];
const MINOR6: [u8; 4] = [0, 3, 7, 9];
const ADD9: [u8; 4] = [0, 4, 7, 14];
const MINOR_ADD9: [u8; 4] = [0, 3, 7, 14];
// sevenths
const MAJOR7: [u8; 4] = [0, 4, 7, 11];
const DOM7: [u8; 4] = [0, 4, 7, 10];
const MINOR7: [u8; 4] = [0, 3, 7, 10];
const MINOR7FLAT5: [u8; 4] = [0, 3, 6, 10];
const DIMINISHED7: [u8; 4] = [0, 3, 6, 9];
const MINOR_MAJOR7: [u8; 4] = [0, 3, 7, 11];
const SEVEN_SUS4: [u8; 4] = [0, 5, 7, 10];
// extended chords
const MAJOR9: [u8; 5] = [0, 4, 7, 11, 14];
const NINE: [u8; 5] = [0, 4, 7, 10, 14];
const MINOR9: [u8; 5] = [0, 3, 7, 10, 14];
const ELEVEN: [u8; 5] = [0, 7, 10, 14, 17];
const MINOR11: [u8; 6] = [0, 3, 7, 10, 14, 17];
const MAJOR13: [u8; 6] = [0, 4, 7, 11, 14, 21];
const THIRTEEN: [u8; 6] = [0, 4, 7, 10, 14, 21];
const MINOR13: [u8; 6] = [0, 3, 7, 10, 14, 21];

/// Triad quality of a chord type.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChordQuality {
    Major,
    Minor,
    Augmented,
    Diminished,
    Unknown,
}

/// A known chord type: a name, the symbol suffix it is written with, and its intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordType {
    pub name: &'static str,
    pub symbol: &'static str,
    pub quality: ChordQuality,
    pub intervals: &'static [u8],
}

impl ChordType {
    const fn new(
        name: &'static str,
        symbol: &'static str,
        quality: ChordQuality,
        intervals: &'static [u8],
    ) -> Self {
        Self {
            name,
            symbol,
            quality,
            intervals,
        }
    }

    /// Find a chord type by its symbol suffix or one of its aliases.
    pub fn get(suffix: &str) -> Option<&'static ChordType> {
        CHORD_TABLE.get(suffix).copied()
    }

    /// Find the chord type with exactly the given intervals.
    pub fn from_intervals(intervals: &[u8]) -> Option<&'static ChordType> {
        CHORD_TYPES.iter().find(|t| t.intervals == intervals)
    }

    /// All known chord types.
    pub fn all() -> &'static [ChordType] {
        &CHORD_TYPES
    }
}

use ChordQuality::*;

static CHORD_TYPES: [ChordType; 25] = [
    ChordType::new("major", "", Major, &MAJOR),
    ChordType::new("minor", "m", Minor, &MINOR),
    ChordType::new("diminished", "dim", Diminished, &DIMINISHED),
    ChordType::new("augmented", "aug", Augmented, &AUG),
    ChordType::new("suspended second", "sus2", Unknown, &SUS2),
    ChordType::new("suspended fourth", "sus4", Unknown, &SUS4),
    ChordType::new("fifth", "5", Unknown, &FIVE),
    ChordType::new("sixth", "6", Major, &SIX),
    ChordType::new("minor sixth", "m6", Minor, &MINOR6),
    ChordType::new("added ninth", "add9", Major, &ADD9),
    ChordType::new("minor added ninth", "madd9", Minor, &MINOR_ADD9),
    ChordType::new("major seventh", "maj7", Major, &MAJOR7),
    ChordType::new("dominant seventh", "7", Major, &DOM7),
    ChordType::new("minor seventh", "m7", Minor, &MINOR7),
    ChordType::new("half-diminished", "m7b5", Diminished, &MINOR7FLAT5),
    ChordType::new("diminished seventh", "dim7", Diminished, &DIMINISHED7),
    ChordType::new("minor/major seventh", "mMaj7", Minor, &MINOR_MAJOR7),
    ChordType::new("suspended fourth seventh", "7sus4", Unknown, &SEVEN_SUS4),
    ChordType::new("major ninth", "maj9", Major, &MAJOR9),
    ChordType::new("dominant ninth", "9", Major, &NINE),
    ChordType::new("minor ninth", "m9", Minor, &MINOR9),
    ChordType::new("eleventh", "11", Unknown, &ELEVEN),
    ChordType::new("minor eleventh", "m11", Minor, &MINOR11),
    ChordType::new("major thirteenth", "maj13", Major, &MAJOR13),
    ChordType::new("dominant thirteenth", "13", Major, &THIRTEEN),
];

// minor thirteenth is only reachable via aliases, keeping the list above free of duplicates
static MINOR_THIRTEENTH: ChordType = ChordType::new("minor thirteenth", "m13", Minor, &MINOR13);

// map of all known chord suffixes with various aliases
lazy_static! {
    static ref CHORD_TABLE: HashMap<&'static str, &'static ChordType> = {
        let aliases: [(&'static str, &'static str); 30] = [
            ("M", ""),
            ("maj", ""),
            ("^", ""),
            ("min", "m"),
            ("-", "m"),
            ("°", "dim"),
            ("o", "dim"),
            ("+", "aug"),
            ("M6", "6"),
            ("-6", "m6"),
            ("Madd9", "add9"),
            ("2", "add9"),
            ("M7", "maj7"),
            ("Maj7", "maj7"),
            ("^7", "maj7"),
            ("dom7", "7"),
            ("min7", "m7"),
            ("-7", "m7"),
            ("ø", "m7b5"),
            ("ø7", "m7b5"),
            ("min7b5", "m7b5"),
            ("°7", "dim7"),
            ("o7", "dim7"),
            ("mM7", "mMaj7"),
            ("M9", "maj9"),
            ("Maj9", "maj9"),
            ("dom9", "9"),
            ("min9", "m9"),
            ("M13", "maj13"),
            ("dom13", "13"),
        ];
        let mut table = HashMap::new();
        for chord_type in CHORD_TYPES.iter() {
            table.insert(chord_type.symbol, chord_type);
        }
        table.insert(MINOR_THIRTEENTH.symbol, &MINOR_THIRTEENTH);
        table.insert("min13", &MINOR_THIRTEENTH);
        for (alias, symbol) in aliases {
            if let Some(chord_type) = CHORD_TYPES.iter().find(|t| t.symbol == symbol) {
                table.insert(alias, chord_type);
            }
        }
        table
    };
}

// --------------------------------------------------------------------------------------------------

/// A resolved chord symbol: tonic name plus chord type.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordInfo {
    tonic: String,
    chord_type: &'static ChordType,
}

impl ChordInfo {
    /// Resolve a chord symbol such as `Bbm7` or `F#dim`. The tonic must start with an upper case
    /// note letter. Returns `None` for unknown suffixes or tonics, including symbols with
    /// parenthesized extensions such as `Cmaj7(9)`.
    pub fn get(symbol: &str) -> Option<Self> {
        let symbol = symbol.trim();
        if !symbol.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        let tonic_len = symbol
            .char_indices()
            .skip(1)
            .find(|(_, c)| !matches!(c, '#' | 'b' | '♯' | '♭'))
            .map(|(index, _)| index)
            .unwrap_or(symbol.len());
        let (tonic, suffix) = symbol.split_at(tonic_len);
        NoteName::try_from(tonic).ok()?;
        let chord_type = ChordType::get(suffix)?;
        Some(Self {
            tonic: tonic.to_string(),
            chord_type,
        })
    }

    /// Tonic as spelled in the symbol.
    pub fn tonic(&self) -> &str {
        &self.tonic
    }

    /// The chord's type.
    pub fn chord_type(&self) -> &'static ChordType {
        self.chord_type
    }

    /// Pitch classes of the chord, root first, in interval order.
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        let Some(root) = PitchClass::from_name(&self.tonic) else {
            return vec![];
        };
        self.chord_type
            .intervals
            .iter()
            .map(|interval| root.transposed(*interval as i32))
            .collect()
    }
}

// --------------------------------------------------------------------------------------------------

/// Harmonic function family of a pad's chord, derived from its diatonic triad and seventh.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChordKind {
    #[display("major")]
    Major,
    #[display("minor")]
    Minor,
    #[display("dominant")]
    Dominant,
    #[display("half-diminished")]
    HalfDiminished,
    #[display("diminished")]
    Diminished,
    #[display("augmented")]
    Augmented,
}

impl ChordKind {
    /// Classify by the seventh chord's type name first, falling back to the triad's quality.
    pub fn resolve(triad: Option<&ChordInfo>, seventh: Option<&ChordInfo>) -> Self {
        let seventh_type = seventh.map(|info| info.chord_type().name).unwrap_or("");
        if seventh_type.contains("dominant") {
            return Self::Dominant;
        }
        if seventh_type.contains("half-diminished") {
            return Self::HalfDiminished;
        }
        if seventh_type.contains("diminished") {
            return Self::Diminished;
        }
        if seventh_type.contains("augmented") {
            return Self::Augmented;
        }
        if seventh_type.contains("minor") {
            return Self::Minor;
        }
        if seventh_type.contains("major") {
            return Self::Major;
        }
        match triad.map(|info| info.chord_type().quality) {
            Some(ChordQuality::Diminished) => Self::Diminished,
            Some(ChordQuality::Augmented) => Self::Augmented,
            Some(ChordQuality::Minor) => Self::Minor,
            _ => Self::Major,
        }
    }
}

// --------------------------------------------------------------------------------------------------
