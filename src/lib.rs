//! Music theory core of a chord pad controller.
//!
//! Turns compact declarative pad settings (key and scale degree or a free root, chord voicing,
//! inversion and octave) into the pitch classes of a chord, a human readable chord symbol, and
//! concrete ascending notes with octaves, optionally rearranged by a voicing pattern.
//!
//! ```
//! use chordpilot::prelude::*;
//!
//! let engine = ChordEngine::new();
//! let pad = PadConfig::scale("C", ScaleType::Major, "V").with_voicing("7");
//! assert_eq!(engine.chord_display(&pad), "G7");
//! assert_eq!(engine.chord_notes(&pad), notes_from(&["G", "B", "D", "F"]));
//! ```

pub mod pitch;
pub use pitch::{Interval, NoteName, PitchClass};

pub mod note;
pub use note::Note;

pub mod chord;
pub use chord::{ChordInfo, ChordKind, ChordType};

pub mod scale;
pub use scale::{Key, ScaleType};

pub mod spelling;
pub use spelling::Speller;

pub mod pad;
pub use pad::{ChordVoicing, Inversion, PadBank, PadConfig, PadMode, RawPad};

pub mod context;
pub use context::ChordContext;

pub mod stack;
pub use stack::PitchClassStack;

pub mod symbol;

pub mod voicing;
pub use voicing::{VoicingOp, VoicingPattern};

pub mod engine;
pub use engine::{ChordEngine, PadChordMetadata};

pub mod prelude;
