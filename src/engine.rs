//! The chord engine: one entry point to compute everything a pad plays and displays.

use crate::{
    chord::{ChordInfo, ChordKind},
    context::{build_context, ChordContext},
    note::{notes_from, Note},
    pad::PadConfig,
    scale::ScaleType,
    spelling::{prefer_flats_for_key, Speller},
    stack::{build_stack, PitchClassStack},
    symbol::format_chord_symbol,
    voicing::{apply_inversion, apply_voicing_pattern, assign_octaves, rotate, VoicingPattern},
};

// -------------------------------------------------------------------------------------------------

/// Summary of a pad's chord, as shown next to the pad.
#[derive(Debug, Clone, PartialEq)]
pub struct PadChordMetadata {
    pub kind: ChordKind,
    pub triad_symbol: String,
    pub seventh_symbol: String,
    pub base_note_count: usize,
    pub full_note_count: usize,
    pub prefer_flats: bool,
}

// -------------------------------------------------------------------------------------------------

/// Computes chord symbols and notes of pads.
///
/// The engine owns a [`Speller`], whose memo is shared by all clones of the engine, so engines
/// are cheap to clone and can be used from any thread. All operations are total: unassigned or
/// unresolvable pads produce empty results.
#[derive(Debug, Clone, Default)]
pub struct ChordEngine {
    speller: Speller,
}

impl ChordEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine which shares the given speller.
    pub fn with_speller(speller: Speller) -> Self {
        Self { speller }
    }

    pub fn speller(&self) -> &Speller {
        &self.speller
    }

    /// Harmonic context of a pad, `None` for unassigned pads.
    pub fn context(&self, pad: &PadConfig) -> Option<ChordContext> {
        build_context(pad, &self.speller)
    }

    /// Pitch class stack of a context.
    pub fn stack(&self, context: &ChordContext) -> PitchClassStack {
        build_stack(context, &self.speller)
    }

    fn context_and_stack(&self, pad: &PadConfig) -> Option<(ChordContext, PitchClassStack)> {
        let context = self.context(pad)?;
        let stack = self.stack(&context);
        Some((context, stack))
    }

    /// Display symbol of a pad's chord, or an empty string for unassigned pads.
    pub fn chord_display(&self, pad: &PadConfig) -> String {
        self.context_and_stack(pad)
            .map(|(context, stack)| format_chord_symbol(&context, &stack, &self.speller))
            .unwrap_or_default()
    }

    /// Pitch class names of a pad's chord: base chord tones followed by tensions.
    pub fn chord_notes(&self, pad: &PadConfig) -> Vec<Note> {
        match self.context_and_stack(pad) {
            Some((_, stack)) if !stack.is_empty() => notes_from(&stack.names()),
            _ => vec![],
        }
    }

    /// Pitch class names of a pad's base chord tones, without tensions.
    pub fn base_chord_notes(&self, pad: &PadConfig) -> Vec<Note> {
        match self.context_and_stack(pad) {
            Some((_, stack)) => notes_from(&stack.base_names),
            None => vec![],
        }
    }

    /// Pitch class names in played order: the base chord tones rotated by the inversion,
    /// followed by tensions.
    pub fn ordered_chord_pcs(&self, pad: &PadConfig) -> Vec<Note> {
        let Some((context, stack)) = self.context_and_stack(pad) else {
            return vec![];
        };
        ordered_names(&stack, context.inversion.index())
    }

    /// Notes with octaves of a pad's chord, in the pad's octave and inversion.
    pub fn voicing_notes(&self, pad: &PadConfig) -> Vec<Note> {
        let Some((context, stack)) = self.context_and_stack(pad) else {
            return vec![];
        };
        if stack.is_empty() {
            return vec![];
        }
        let notes = assign_octaves(&ordered_names(&stack, 0), context.octave);
        apply_inversion(&notes, context.inversion.index())
    }

    /// [`Self::voicing_notes`] with a voicing pattern applied.
    pub fn voiced_notes(&self, pad: &PadConfig, pattern: VoicingPattern) -> Vec<Note> {
        apply_voicing_pattern(&self.voicing_notes(pad), pattern)
    }

    /// Re-spell notes with octaves consistently with the pad's key.
    pub fn display_notes(&self, notes: &[Note], pad: &PadConfig) -> Vec<Note> {
        let prefer_flats = prefer_flats_for_key(pad.key_root(), pad.key_scale_type());
        self.speller.display_notes(notes, prefer_flats)
    }

    /// Chord kind, diatonic symbols and note counts of a pad, `None` for unassigned pads.
    pub fn chord_metadata(&self, pad: &PadConfig) -> Option<PadChordMetadata> {
        let (context, stack) = self.context_and_stack(pad)?;
        let triad = ChordInfo::get(&context.triad_symbol);
        let seventh = ChordInfo::get(&context.seventh_symbol);
        let full_note_count = if stack.is_empty() {
            0
        } else {
            stack.base_names.len() + stack.tension_names.len()
        };
        Some(PadChordMetadata {
            kind: ChordKind::resolve(triad.as_ref(), seventh.as_ref()),
            base_note_count: stack.base_nums.len(),
            full_note_count,
            prefer_flats: context.prefer_flats,
            triad_symbol: context.triad_symbol,
            seventh_symbol: context.seventh_symbol,
        })
    }

    /// Index of a degree token within the scale type's vocabulary.
    pub fn degree_index(&self, degree: &str, scale_type: ScaleType) -> Option<usize> {
        scale_type.degree_index(degree)
    }
}

fn ordered_names(stack: &PitchClassStack, inversion: usize) -> Vec<Note> {
    if stack.is_empty() {
        return vec![];
    }
    let rotation = inversion % stack.base_names.len();
    let mut names = notes_from(&rotate(&stack.base_names, rotation as i64));
    names.extend(notes_from(&stack.tension_names));
    names
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::pad::{PadBank, RawPad};

    use pretty_assertions::assert_eq;

    #[test]
    fn unassigned_pads() {
        let engine = ChordEngine::new();
        let pad = PadConfig::default();
        assert!(engine.context(&pad).is_none());
        assert_eq!(engine.chord_display(&pad), "");
        assert!(engine.chord_notes(&pad).is_empty());
        assert!(engine.base_chord_notes(&pad).is_empty());
        assert!(engine.ordered_chord_pcs(&pad).is_empty());
        assert!(engine.voicing_notes(&pad).is_empty());
        assert!(engine.voiced_notes(&pad, VoicingPattern::Open).is_empty());
        assert!(engine.chord_metadata(&pad).is_none());
    }

    #[test]
    fn dominant_seventh() {
        let engine = ChordEngine::new();
        let pad = PadConfig::scale("C", ScaleType::Major, "V").with_voicing("7");
        assert_eq!(engine.chord_display(&pad), "G7");
        assert_eq!(engine.chord_notes(&pad), notes_from(&["G", "B", "D", "F"]));
        assert_eq!(
            engine.voicing_notes(&pad),
            notes_from(&["G4", "B4", "D5", "F5"])
        );
        let metadata = engine.chord_metadata(&pad).unwrap();
        assert_eq!(metadata.kind, ChordKind::Dominant);
        assert_eq!(metadata.triad_symbol, "G");
        assert_eq!(metadata.seventh_symbol, "G7");
        assert_eq!(metadata.base_note_count, 4);
        assert_eq!(metadata.full_note_count, 4);
        assert!(!metadata.prefer_flats);
    }

    #[test]
    fn suspended_free_chord() {
        let engine = ChordEngine::new();
        let pad = PadConfig::free("F", ScaleType::Minor).with_voicing("sus4");
        assert_eq!(engine.chord_display(&pad), "Fsus4");
        assert_eq!(engine.chord_notes(&pad), notes_from(&["F", "Bb", "C"]));
        assert_eq!(engine.chord_metadata(&pad).unwrap().kind, ChordKind::Minor);
    }

    #[test]
    fn suspended_scale_chord() {
        let engine = ChordEngine::new();
        // suspended from the key root, not the degree root
        let pad = PadConfig::scale("C", ScaleType::Major, "V").with_voicing("sus4");
        assert_eq!(engine.chord_display(&pad), "Csus4");
        assert_eq!(engine.chord_notes(&pad), notes_from(&["C", "F", "G"]));
        assert_eq!(engine.voicing_notes(&pad), notes_from(&["C4", "F4", "G4"]));
        let pad = PadConfig::scale("F", ScaleType::Major, "ii").with_voicing("sus2");
        assert_eq!(engine.chord_display(&pad), "Fsus2");
        assert_eq!(engine.chord_notes(&pad), notes_from(&["F", "G", "C"]));
    }

    #[test]
    fn thirteenth() {
        let engine = ChordEngine::new();
        let pad = PadConfig::scale("F", ScaleType::Major, "V")
            .with_voicing("13")
            .with_octave(3);
        assert_eq!(engine.chord_display(&pad), "C 13");
        assert_eq!(engine.base_chord_notes(&pad), notes_from(&["C", "E", "G", "Bb"]));
        assert_eq!(
            engine.chord_notes(&pad),
            notes_from(&["C", "E", "G", "Bb", "D", "F", "A"])
        );
        assert_eq!(
            engine.voicing_notes(&pad),
            notes_from(&["C3", "E3", "G3", "Bb3", "D4", "F4", "A4"])
        );
        let metadata = engine.chord_metadata(&pad).unwrap();
        assert_eq!(metadata.base_note_count, 4);
        assert_eq!(metadata.full_note_count, 7);
    }

    #[test]
    fn inversions() {
        let engine = ChordEngine::new();
        let pad = PadConfig::free("C", ScaleType::Major).with_inversion(1);
        assert_eq!(engine.chord_display(&pad), "C/E");
        assert_eq!(engine.ordered_chord_pcs(&pad), notes_from(&["E", "G", "C"]));
        assert_eq!(engine.voicing_notes(&pad), notes_from(&["E4", "G4", "C5"]));

        let pad = PadConfig::free("C", ScaleType::Major)
            .with_voicing("9")
            .with_inversion(2);
        assert_eq!(
            engine.ordered_chord_pcs(&pad),
            notes_from(&["G", "B", "C", "E", "D"])
        );
        // the full inversion count applies to the voiced notes, tensions included
        let root_position = engine.voicing_notes(&pad.clone().with_inversion(0));
        assert_eq!(root_position, notes_from(&["C4", "E4", "G4", "B4", "D5"]));
        assert_eq!(
            engine.voicing_notes(&pad),
            notes_from(&["G4", "B4", "D5", "C5", "E5"])
        );
    }

    #[test]
    fn inversion_by_chord_size_raises_all() {
        let engine = ChordEngine::new();
        let pad = PadConfig::scale("D", ScaleType::Minor, "iv").with_voicing("7");
        let notes = engine.voicing_notes(&pad);
        let inverted = engine.voicing_notes(&pad.clone().with_inversion(notes.len()));
        let mut expected = notes
            .iter()
            .map(|note| note.midi().unwrap() + 12)
            .collect::<Vec<_>>();
        let mut actual = inverted
            .iter()
            .map(|note| note.midi().unwrap())
            .collect::<Vec<_>>();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
    }

    #[test]
    fn voicing_patterns() {
        let engine = ChordEngine::new();
        let pad = PadConfig::free("C", ScaleType::Major)
            .with_voicing("7")
            .with_octave(3);
        assert_eq!(
            engine.voiced_notes(&pad, VoicingPattern::Close),
            engine.voicing_notes(&pad)
        );
        assert_eq!(
            engine.voiced_notes(&pad, VoicingPattern::Drop2),
            notes_from(&["C3", "E3", "G2", "B3"])
        );
        assert_eq!(
            engine.voiced_notes(&pad, VoicingPattern::Open),
            notes_from(&["C3", "G4", "E3", "B4"])
        );
    }

    #[test]
    fn display_spelling() {
        let engine = ChordEngine::new();
        let pad = PadConfig::free("Eb", ScaleType::Major);
        assert_eq!(
            engine.display_notes(&notes_from(&["D#4", "G4", "A#4", "??"]), &pad),
            notes_from(&["Eb4", "G4", "Bb4", "??"])
        );
        let pad = PadConfig::scale("E", ScaleType::Major, "I");
        assert_eq!(
            engine.display_notes(&notes_from(&["Ab3"]), &pad),
            notes_from(&["G#3"])
        );
    }

    #[test]
    fn metadata_kinds() {
        let engine = ChordEngine::new();
        let kind = |degree: &str| {
            engine
                .chord_metadata(&PadConfig::scale("C", ScaleType::Major, degree))
                .map(|metadata| metadata.kind)
        };
        assert_eq!(kind("I"), Some(ChordKind::Major));
        assert_eq!(kind("ii"), Some(ChordKind::Minor));
        assert_eq!(kind("V"), Some(ChordKind::Dominant));
        assert_eq!(kind("vii°"), Some(ChordKind::HalfDiminished));
        assert_eq!(engine.degree_index("vii°", ScaleType::Major), Some(6));
        assert_eq!(engine.degree_index("vii°", ScaleType::Minor), None);
    }

    #[test]
    fn pad_bank_chords() -> anyhow::Result<()> {
        let engine = ChordEngine::new();
        let mut bank = PadBank::new();
        bank.set_pad(
            0,
            RawPad {
                mode: Some("scale".to_string()),
                scale: Some("G".to_string()),
                degree: Some("vi".to_string()),
                voicing_scale: Some("7".to_string()),
                ..RawPad::default()
            },
        )?;
        let symbols = bank
            .pads()
            .iter()
            .map(|pad| engine.chord_display(pad))
            .collect::<Vec<_>>();
        assert_eq!(symbols[0], "Em7");
        assert!(symbols[1..].iter().all(|symbol| symbol.is_empty()));
        Ok(())
    }

    #[test]
    fn shared_speller() {
        let engine = ChordEngine::new();
        let clone = engine.clone();
        std::thread::scope(|scope| {
            for root in ["C", "Db", "E", "F#"] {
                let engine = clone.clone();
                scope.spawn(move || {
                    let pad = PadConfig::free(root, ScaleType::Major).with_voicing("13");
                    assert_eq!(engine.chord_notes(&pad).len(), 7);
                });
            }
        });
        assert!(engine.speller().cached_entries() > 0);
    }
}
