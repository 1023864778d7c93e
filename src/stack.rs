//! Pitch class stacks: the chord tones and tensions a chord context sounds.

use crate::{
    chord::ChordInfo,
    context::ChordContext,
    pad::ChordVoicing,
    pitch::{Interval, PitchClass},
    spelling::Speller,
};

// -------------------------------------------------------------------------------------------------

/// Deduplicated pitch classes of a chord: base chord tones, root first, followed by tensions
/// which never repeat a base pitch class.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PitchClassStack {
    pub base_nums: Vec<PitchClass>,
    pub base_names: Vec<String>,
    pub tension_names: Vec<String>,
    pub root_num: Option<PitchClass>,
    pub root_name: Option<String>,
    /// The chord symbol the base tones got resolved from, if any.
    pub symbol: String,
}

impl PitchClassStack {
    /// Test if there's anything to sound.
    pub fn is_empty(&self) -> bool {
        self.base_nums.is_empty()
    }

    /// Base names followed by tension names.
    pub fn names(&self) -> Vec<String> {
        self.base_names
            .iter()
            .chain(self.tension_names.iter())
            .cloned()
            .collect()
    }
}

// -------------------------------------------------------------------------------------------------

/// Best guess for a chord symbol which directly resolves the voicing's base chord tones.
pub fn voicing_symbol_guess(context: &ChordContext) -> String {
    let triad = &context.triad_symbol;
    let seventh = &context.seventh_symbol;
    let voicing = context.voicing.name();
    match &context.voicing {
        ChordVoicing::Sus2 | ChordVoicing::Sus4 => format!("{}{}", context.root, voicing),
        ChordVoicing::Seventh => {
            if !seventh.is_empty() {
                seventh.clone()
            } else if !triad.is_empty() {
                format!("{}7", triad)
            } else {
                String::new()
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
        _ => triad.clone(),
    }
}

/// Resolve the first candidate symbol with known chord tones: the voicing's guess, then the
/// seventh, then the triad symbol.
fn resolve_base_chord(context: &ChordContext) -> Option<(String, ChordInfo)> {
    let candidates: [&dyn Fn() -> String; 3] = [
        &|| voicing_symbol_guess(context),
        &|| context.seventh_symbol.clone(),
        &|| context.triad_symbol.clone(),
    ];
    let mut tried = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let symbol = candidate();
        if symbol.is_empty() || tried.contains(&symbol) {
            continue;
        }
        if let Some(info) = ChordInfo::get(&symbol) {
            if !info.pitch_classes().is_empty() {
                return Some((symbol, info));
            }
        }
        tried.push(symbol);
    }
    log::debug!(
        "No chord symbol resolved for {} voicing: tried {:?}",
        context.voicing,
        tried
    );
    None
}

/// Remove duplicates, keeping the first occurrence.
fn dedup_pitch_classes<I: IntoIterator<Item = PitchClass>>(pitch_classes: I) -> Vec<PitchClass> {
    let mut result = Vec::new();
    for pitch_class in pitch_classes {
        if !result.contains(&pitch_class) {
            result.push(pitch_class);
        }
    }
    result
}

/// Build the pitch class stack of a chord context.
///
/// Falls back to a root only stack when no chord symbol resolves, and returns an empty stack when
/// the root can't be parsed either.
pub fn build_stack(context: &ChordContext, speller: &Speller) -> PitchClassStack {
    let resolved = resolve_base_chord(context);

    let root_name = resolved
        .as_ref()
        .map(|(_, info)| info.tonic().to_string())
        .unwrap_or_else(|| context.root.clone());
    let root_num = PitchClass::from_name(&root_name);
    let root_name = root_num.map(|root| speller.spell(root, context.prefer_flats).to_string());

    let (symbol, mut base_nums) = match resolved {
        Some((symbol, info)) => (symbol, dedup_pitch_classes(info.pitch_classes())),
        None => (String::new(), vec![]),
    };
    if base_nums.is_empty() {
        base_nums.extend(root_num);
    }

    if let Some(root) = root_num {
        match context.voicing {
            ChordVoicing::Sus2 => {
                base_nums = dedup_pitch_classes([
                    root,
                    Interval::MajorSecond.above(root),
                    Interval::PerfectFifth.above(root),
                ]);
            }
            ChordVoicing::Sus4 => {
                base_nums = dedup_pitch_classes([
                    root,
                    Interval::PerfectFourth.above(root),
                    Interval::PerfectFifth.above(root),
                ]);
            }
            ChordVoicing::Add2 => {
                let second = Interval::MajorSecond.above(root);
                let rest = base_nums
                    .iter()
                    .copied()
                    .filter(|pc| *pc != root && *pc != second);
                base_nums = [root, second].into_iter().chain(rest).collect();
            }
            _ => (),
        }
    }

    let base_names = base_nums
        .iter()
        .map(|pc| speller.spell(*pc, context.prefer_flats).to_string())
        .collect::<Vec<_>>();

    let mut tension_names = Vec::new();
    if let Some(root) = root_num {
        let mut used = base_nums.clone();
        for interval in context.voicing.tension_intervals() {
            let tension = interval.above(root);
            if used.contains(&tension) {
                continue;
            }
            used.push(tension);
            tension_names.push(speller.spell(tension, context.prefer_flats).to_string());
        }
    }

    PitchClassStack {
        base_nums,
        base_names,
        tension_names,
        root_num,
        root_name,
        symbol,
    }
}

// -------------------------------------------------------------------------------------------------
