//! Enharmonic spelling: flat or sharp pitch class names, chosen by key context.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{note::Note, pitch::PitchClass, scale::ScaleType};

// -------------------------------------------------------------------------------------------------

/// Pitch class names, preferring flats.
pub const PC_FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];
/// Pitch class names, preferring sharps.
pub const PC_SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_KEYS_MAJOR: [&str; 7] = ["F", "Bb", "Eb", "Ab", "Db", "Gb", "Cb"];
const FLAT_KEYS_MINOR: [&str; 7] = ["D", "G", "C", "F", "Bb", "Eb", "Ab"];

lazy_static! {
    static ref SYMBOL_ROOT: Regex = Regex::new(r"^([A-G](?:#{1,2}|[bB]{1,2})?)(.*)$")
        .expect("invalid chord symbol root regex");
}

/// Decide whether a key is traditionally written with flats.
///
/// Roots spelled with a flat prefer flats, roots spelled with a sharp prefer sharps. Natural roots
/// look up the set of flat keys for the scale type. An empty root prefers flats.
pub fn prefer_flats_for_key(root: &str, scale_type: ScaleType) -> bool {
    if root.is_empty() || root.contains('b') {
        return true;
    }
    if root.contains('#') {
        return false;
    }
    match scale_type {
        ScaleType::Major => FLAT_KEYS_MAJOR.contains(&root),
        ScaleType::Minor => FLAT_KEYS_MINOR.contains(&root),
    }
}

// -------------------------------------------------------------------------------------------------

#[derive(Debug, Default)]
struct SpellingCache {
    by_pitch_class: HashMap<(PitchClass, bool), &'static str>,
    by_name: HashMap<(String, bool), String>,
}

/// Maps pitch classes and note names to canonical flat or sharp spellings.
///
/// Lookups are memoized for the lifetime of the speller. Clones share the same memo, so a single
/// speller can be handed to any number of threads. Entries are never evicted: the mapping is
/// static, so a recomputed entry always equals the cached one.
#[derive(Debug, Clone, Default)]
pub struct Speller {
    cache: Arc<RwLock<SpellingCache>>,
}

impl Speller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical name of a pitch class.
    pub fn spell(&self, pitch_class: PitchClass, prefer_flats: bool) -> &'static str {
        let key = (pitch_class, prefer_flats);
        if let Ok(cache) = self.cache.read() {
            if let Some(name) = cache.by_pitch_class.get(&key) {
                return name;
            }
        }
        let table = if prefer_flats {
            &PC_FLAT_NAMES
        } else {
            &PC_SHARP_NAMES
        };
        let name = table[pitch_class.value() as usize];
        if let Ok(mut cache) = self.cache.write() {
            cache.by_pitch_class.insert(key, name);
        }
        name
    }

    /// Canonical spelling of a pitch class name, e.g. `A#` -> `Bb` when preferring flats.
    /// Names which can't be parsed are returned unchanged.
    pub fn canonicalize(&self, name: &str, prefer_flats: bool) -> String {
        let key = (name.to_string(), prefer_flats);
        if let Ok(cache) = self.cache.read() {
            if let Some(name) = cache.by_name.get(&key) {
                return name.clone();
            }
        }
        let Some(pitch_class) = PitchClass::from_name(name) else {
            return name.to_string();
        };
        let canonical = self.spell(pitch_class, prefer_flats).to_string();
        if let Ok(mut cache) = self.cache.write() {
            cache.by_name.insert(key, canonical.clone());
        }
        canonical
    }

    /// Re-spell the root of a chord symbol, keeping the rest: `A#m7` -> `Bbm7`.
    /// Symbols without a recognizable root are returned unchanged.
    pub fn normalize_chord_symbol(&self, symbol: &str, prefer_flats: bool) -> String {
        match SYMBOL_ROOT.captures(symbol) {
            Some(captures) => {
                let root = self.canonicalize(&captures[1], prefer_flats);
                format!("{}{}", root, &captures[2])
            }
            None => symbol.to_string(),
        }
    }

    /// Re-spell the pitch class part of tagged notes: `A#4` -> `Bb4`.
    /// Untagged or unparseable notes are passed through unchanged.
    pub fn display_notes(&self, notes: &[Note], prefer_flats: bool) -> Vec<Note> {
        notes
            .iter()
            .map(|note| match (note.octave(), note.pitch_class()) {
                (Some(octave), Some(pitch_class)) => {
                    Note::new(self.spell(pitch_class, prefer_flats), octave)
                }
                _ => note.clone(),
            })
            .collect()
    }

    /// Number of memoized entries.
    pub fn cached_entries(&self) -> usize {
        self.cache
            .read()
            .map(|cache| cache.by_pitch_class.len() + cache.by_name.len())
            .unwrap_or(0)
    }
}

// --------------------------------------------------------------------------------------------------
