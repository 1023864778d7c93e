//! The chordpilot prelude.
//!
//! The purpose of this module is to alleviate imports of common chordpilot types:
//!
//! ```
//! # #![allow(unused_imports)]
//! use chordpilot::prelude::*;
//! ```

pub use super::{
    // pad settings
    pad::{clamp_octave, inversion_index, PAD_COUNT},
    // note and voicing helpers
    note::notes_from,
    spelling::prefer_flats_for_key,
    symbol::prettify_chord_symbol,
    voicing::{apply_inversion, apply_voicing_pattern, assign_octaves, rotate},
    // all public basic types
    ChordContext,
    ChordEngine,
    ChordInfo,
    ChordKind,
    ChordVoicing,
    Inversion,
    Key,
    Note,
    PadBank,
    PadChordMetadata,
    PadConfig,
    PadMode,
    PitchClass,
    PitchClassStack,
    RawPad,
    ScaleType,
    Speller,
    VoicingPattern,
};
