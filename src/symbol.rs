//! Human readable chord symbols for pads, e.g. `Cmaj9`, `G 13/B` or `B°`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    context::ChordContext, pad::ChordVoicing, pitch::PitchClass, spelling::Speller,
    stack::PitchClassStack,
};

// -------------------------------------------------------------------------------------------------

lazy_static! {
    static ref PRETTIFY_RULES: Vec<(Regex, &'static str)> = {
        const ROOT: &str = r"([A-G](?:#{1,2}|b{1,2})?)";
        [
            (r"(?i)dim([^a-z]|$)".to_string(), "°${1}"),
            (r"(?i)m7b5".to_string(), "ø7"),
            (r"(?i)maj7\((9|11|13)\)".to_string(), "maj${1}"),
            (format!(r"(?i){}m7\((9|11|13)\)", ROOT), "${1}m${2}"),
            (format!(r"(?i){}7\(9\)", ROOT), "${1}9"),
            (format!(r"(?i){}7\((11|13)\)", ROOT), "${1} ${2}"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| {
            let regex = Regex::new(&pattern).expect("invalid chord symbol rewrite rule");
            (regex, replacement)
        })
        .collect()
    };
}

/// Rewrite a chord symbol into its idiomatic display form:
/// `Bdim` -> `B°`, `Bm7b5` -> `Bø7`, `Cmaj7(9)` -> `Cmaj9`, `Dm7(11)` -> `Dm11`, `G7(9)` -> `G9`
/// and `G7(13)` -> `G 13`.
pub fn prettify_chord_symbol(symbol: &str) -> String {
    let mut symbol = symbol.to_string();
    for (regex, replacement) in PRETTIFY_RULES.iter() {
        symbol = regex.replace_all(&symbol, *replacement).into_owned();
    }
    symbol
}

// -------------------------------------------------------------------------------------------------

/// Unprettified chord label of a context's voicing.
fn voicing_label(context: &ChordContext) -> String {
    let triad = &context.triad_symbol;
    let seventh = &context.seventh_symbol;
    let voicing = context.voicing.name();
    match &context.voicing {
        ChordVoicing::Sus2 | ChordVoicing::Sus4 => format!("{}{}", context.root, voicing),
        ChordVoicing::Add2 | ChordVoicing::Add9 => format!("{}({})", triad, voicing),
        ChordVoicing::Sixth => format!("{}6", triad),
        ChordVoicing::Seventh => {
            if !seventh.is_empty() {
                seventh.clone()
            } else {
                format!("{}7", triad)
            }
        }
        ChordVoicing::Ninth | ChordVoicing::Eleventh | ChordVoicing::Thirteenth => {
            if !seventh.is_empty() {
                format!("{}({})", seventh, voicing)
            } else if !triad.is_empty() {
                format!("{}{}", triad, voicing)
            } else {
                format!("{}{}", context.root, voicing)
            }
        }
        ChordVoicing::Triad | ChordVoicing::Other(_) => triad.clone(),
    }
}

/// Display symbol of a chord: the voicing's prettified label, plus a `/bass` suffix for
/// inversions.
pub fn format_chord_symbol(
    context: &ChordContext,
    stack: &PitchClassStack,
    speller: &Speller,
) -> String {
    let mut label = prettify_chord_symbol(&voicing_label(context));
    let inversion = context.inversion.index();
    if inversion > 0 && !stack.base_names.is_empty() {
        let bass = &stack.base_names[inversion % stack.base_names.len()];
        let bass = match PitchClass::from_name(bass) {
            Some(pitch_class) => speller.spell(pitch_class, context.prefer_flats).to_string(),
            None => bass.clone(),
        };
        let suffix = format!("/{}", bass);
        if !label.ends_with(&suffix) {
            label.push_str(&suffix);
        }
    }
    label
}

// -------------------------------------------------------------------------------------------------
