//! Resolves a pad's settings into the concrete harmonic context of its chord.

use crate::{
    pad::{ChordVoicing, Inversion, PadConfig, PadMode},
    pitch::PitchClass,
    scale::{Key, ScaleType},
    spelling::{prefer_flats_for_key, Speller},
};

// -------------------------------------------------------------------------------------------------

/// The resolved harmonic context of a pad's chord. Built fresh for every query.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordContext {
    /// Key root for scale pads, chord root for free pads. Canonically spelled.
    pub root: String,
    pub scale_type: ScaleType,
    pub voicing: ChordVoicing,
    pub inversion: Inversion,
    pub octave: i32,
    /// Spelling preference of the pad's key, used for every name derived from this context.
    pub prefer_flats: bool,
    pub triad_symbol: String,
    pub seventh_symbol: String,
}

/// Build the chord context of a pad. Returns `None` for unassigned pads.
pub fn build_context(pad: &PadConfig, speller: &Speller) -> Option<ChordContext> {
    if !pad.is_assigned() {
        return None;
    }
    let scale_type = pad.key_scale_type();
    let raw_root = pad.key_root();
    let root = speller.canonicalize(raw_root, prefer_flats_for_key(raw_root, scale_type));
    let prefer_flats = prefer_flats_for_key(&root, scale_type);
    let root_pitch_class = PitchClass::from_name(&root);
    if root_pitch_class.is_none() {
        log::warn!("Can't parse root '{}' of {} pad", raw_root, pad.mode);
    }

    let (voicing, inversion, octave) = match pad.mode {
        PadMode::Free => (
            pad.voicing_free.clone(),
            pad.inversion_free,
            pad.octave_free,
        ),
        _ => (
            pad.voicing_scale.clone(),
            pad.inversion_scale,
            pad.octave_scale,
        ),
    };

    let (triad_symbol, seventh_symbol) = match pad.mode {
        PadMode::Free => match scale_type {
            ScaleType::Major => (root.clone(), format!("{}maj7", root)),
            ScaleType::Minor => (format!("{}m", root), format!("{}m7", root)),
        },
        _ => {
            let degree_index = scale_type.degree_index(&pad.degree).unwrap_or_else(|| {
                log::debug!(
                    "Unknown {} degree '{}', using '{}'",
                    scale_type,
                    pad.degree,
                    scale_type.degrees()[0]
                );
                0
            });
            match root_pitch_class {
                Some(tonic) => {
                    let key = Key::new(tonic, scale_type);
                    (
                        speller.normalize_chord_symbol(
                            &key.triad_symbol(degree_index, speller, prefer_flats),
                            prefer_flats,
                        ),
                        speller.normalize_chord_symbol(
                            &key.seventh_symbol(degree_index, speller, prefer_flats),
                            prefer_flats,
                        ),
                    )
                }
                None => {
                    // symbols which never resolve to a chord
                    let degree = scale_type.degrees()[degree_index].to_string();
                    (degree.clone(), degree)
                }
            }
        }
    };

    Some(ChordContext {
        root,
        scale_type,
        voicing,
        inversion,
        octave,
        prefer_flats,
        triad_symbol,
        seventh_symbol,
    })
}

// -------------------------------------------------------------------------------------------------
