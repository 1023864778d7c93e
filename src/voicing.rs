//! Octave assignment, inversions and voicing patterns for note sequences.

use std::fmt::Display;

use crate::note::Note;

// -------------------------------------------------------------------------------------------------

/// Give pitch classes octaves, so that the resulting notes strictly ascend.
///
/// Untagged notes start at the current octave, which initially is `base_octave`, and are raised
/// until they sound above the previous note. Tagged notes keep their octave unless they would not
/// ascend. The current octave only follows untagged notes. Notes which can't be parsed are passed
/// through unchanged and don't take part in the ordering.
pub fn assign_octaves(pitch_classes: &[Note], base_octave: i32) -> Vec<Note> {
    let mut last_midi = i32::MIN;
    let mut current_octave = base_octave;
    let mut result = Vec::with_capacity(pitch_classes.len());
    for note in pitch_classes {
        let tagged = note.has_octave();
        let mut candidate = if tagged {
            note.clone()
        } else {
            note.with_octave(current_octave)
        };
        let Some(mut midi) = candidate.midi() else {
            result.push(note.clone());
            continue;
        };
        while midi <= last_midi {
            let raised = candidate.transposed_octaves(1);
            match raised.midi() {
                Some(raised_midi) => {
                    candidate = raised;
                    midi = raised_midi;
                }
                None => break,
            }
        }
        if !tagged {
            current_octave = candidate.octave().unwrap_or(current_octave);
        }
        last_midi = midi;
        result.push(candidate);
    }
    result
}

/// Invert a chord `count` times: each time the lowest sounding note is removed, raised by an
/// octave and appended. Notes without a valid pitch only move when nothing else can.
pub fn apply_inversion(notes: &[Note], count: usize) -> Vec<Note> {
    let mut notes = notes.to_vec();
    if notes.is_empty() {
        return notes;
    }
    for _ in 0..count {
        let lowest = notes
            .iter()
            .enumerate()
            .filter_map(|(index, note)| note.midi().map(|midi| (index, midi)))
            .min_by_key(|(_, midi)| *midi)
            .map(|(index, _)| index)
            .unwrap_or(0);
        let note = notes.remove(lowest);
        notes.push(note.transposed_octaves(1));
    }
    notes
}

/// Rotate a list to the left by `steps`. Negative steps rotate to the right.
pub fn rotate<T: Clone>(items: &[T], steps: i64) -> Vec<T> {
    if items.is_empty() {
        return vec![];
    }
    let offset = steps.rem_euclid(items.len() as i64) as usize;
    items[offset..]
        .iter()
        .chain(items[..offset].iter())
        .cloned()
        .collect()
}

// -------------------------------------------------------------------------------------------------

/// A single note list operation of a voicing pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum VoicingOp {
    /// Rearrange notes by an index list, computed from the number of notes.
    Reorder(fn(usize) -> Vec<usize>),
    /// Move the notes at the given positions up by octaves.
    RaiseByOctaves { indices: Vec<usize>, steps: i32 },
    /// Move the notes at the given positions down by octaves.
    LowerByOctaves { indices: Vec<usize>, steps: i32 },
    /// Raise notes at odd positions, but only if all notes share a single octave.
    RaiseOddsIfSingleOctave { steps: i32 },
    /// Lower the n-th highest note by an octave.
    DropNthHighest(usize),
    /// Alternate between the lowest octave and the octave above by position.
    AlternateOctaves,
}

impl VoicingOp {
    pub fn apply(&self, notes: Vec<Note>) -> Vec<Note> {
        match self {
            Self::Reorder(indices) => reorder(&notes, &indices(notes.len())),
            Self::RaiseByOctaves { indices, steps } => move_octaves(&notes, indices, *steps),
            Self::LowerByOctaves { indices, steps } => move_octaves(&notes, indices, -*steps),
            Self::RaiseOddsIfSingleOctave { steps } => {
                let mut octaves = notes.iter().filter_map(|n| n.octave()).collect::<Vec<_>>();
                octaves.sort();
                octaves.dedup();
                if octaves.len() <= 1 {
                    let odds = (1..notes.len()).step_by(2).collect::<Vec<_>>();
                    move_octaves(&notes, &odds, *steps)
                } else {
                    notes
                }
            }
            Self::DropNthHighest(n) => drop_nth_highest(&notes, *n),
            Self::AlternateOctaves => alternate_octaves(&notes),
        }
    }
}

/// Rearrange notes by the given positions. Positions out of range are skipped.
pub fn reorder(notes: &[Note], indices: &[usize]) -> Vec<Note> {
    indices
        .iter()
        .filter_map(|index| notes.get(*index))
        .cloned()
        .collect()
}

/// Move the notes at the given positions by `steps` octaves. Untagged notes stay as they are.
pub fn move_octaves(notes: &[Note], indices: &[usize], steps: i32) -> Vec<Note> {
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            if indices.contains(&index) {
                note.transposed_octaves(steps)
            } else {
                note.clone()
            }
        })
        .collect()
}

/// Sort notes by pitch and lower the `n`-th highest one by an octave. Notes without a valid pitch
/// sort first. Lists with less than `n` notes are returned unchanged.
pub fn drop_nth_highest(notes: &[Note], n: usize) -> Vec<Note> {
    if n == 0 || notes.len() < n {
        return notes.to_vec();
    }
    let mut sorted = notes.to_vec();
    sorted.sort_by_key(|note| note.midi());
    let index = sorted.len() - n;
    sorted[index] = sorted[index].transposed_octaves(-1);
    sorted
}

/// Place notes alternately in the lowest octave of the list and the octave above it.
/// Untagged notes, and lists without any tagged note, are left unchanged.
pub fn alternate_octaves(notes: &[Note]) -> Vec<Note> {
    if notes.len() < 2 {
        return notes.to_vec();
    }
    let Some(min_octave) = notes.iter().filter_map(|n| n.octave()).min() else {
        return notes.to_vec();
    };
    notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            match (note.octave(), min_octave.checked_add((index % 2) as i32)) {
                (Some(_), Some(octave)) => note.with_octave(octave),
                _ => note.clone(),
            }
        })
        .collect()
}

fn evens_then_odds(len: usize) -> Vec<usize> {
    (0..len).step_by(2).chain((1..len).step_by(2)).collect()
}

// -------------------------------------------------------------------------------------------------

/// Named voicing pattern, applied after octaves and inversions got assigned.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VoicingPattern {
    #[default]
    Close,
    Open,
    Drop2,
    Drop3,
    Spread,
}

impl VoicingPattern {
    pub const ALL: [VoicingPattern; 5] = [
        Self::Close,
        Self::Open,
        Self::Drop2,
        Self::Drop3,
        Self::Spread,
    ];

    /// The pattern's operations, in order.
    pub fn ops(&self) -> Vec<VoicingOp> {
        match self {
            Self::Close => vec![],
            Self::Open => vec![
                VoicingOp::Reorder(evens_then_odds),
                VoicingOp::RaiseOddsIfSingleOctave { steps: 1 },
            ],
            Self::Drop2 => vec![VoicingOp::DropNthHighest(2)],
            Self::Drop3 => vec![VoicingOp::DropNthHighest(3)],
            Self::Spread => vec![VoicingOp::AlternateOctaves],
        }
    }
}

impl From<&str> for VoicingPattern {
    /// Unknown pattern names fall back to a close voicing.
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "close" => Self::Close,
            "open" => Self::Open,
            "drop2" => Self::Drop2,
            "drop3" => Self::Drop3,
            "spread" => Self::Spread,
            _ => {
                log::debug!("Unknown voicing pattern '{}', using close voicing", s);
                Self::Close
            }
        }
    }
}

impl Display for VoicingPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Close => "close",
            Self::Open => "open",
            Self::Drop2 => "drop2",
            Self::Drop3 => "drop3",
            Self::Spread => "spread",
        };
        write!(f, "{}", name)
    }
}

/// Run a list of voicing operations over notes.
pub fn apply_voicing_ops(notes: &[Note], ops: &[VoicingOp]) -> Vec<Note> {
    if notes.is_empty() {
        return vec![];
    }
    ops.iter().fold(notes.to_vec(), |acc, op| op.apply(acc))
}

/// Apply a named voicing pattern to notes.
pub fn apply_voicing_pattern(notes: &[Note], pattern: VoicingPattern) -> Vec<Note> {
    apply_voicing_ops(notes, &pattern.ops())
}

// -------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::note::notes_from;

    use pretty_assertions::assert_eq;

    fn midis(notes: &[Note]) -> Vec<Option<i32>> {
        notes.iter().map(|n| n.midi()).collect()
    }

    #[test]
    fn octaves() {
        assert_eq!(
            assign_octaves(&notes_from(&["C", "E", "G"]), 4),
            notes_from(&["C4", "E4", "G4"])
        );
        assert_eq!(
            assign_octaves(&notes_from(&["G", "B", "D", "F"]), 3),
            notes_from(&["G3", "B3", "D4", "F4"])
        );
        assert_eq!(
            assign_octaves(&notes_from(&["C", "E", "G", "D", "F", "A"]), 4),
            notes_from(&["C4", "E4", "G4", "D5", "F5", "A5"])
        );
        // tagged notes keep their octave when ascending, and don't move the current octave
        assert_eq!(
            assign_octaves(&notes_from(&["C", "E6", "G"]), 4),
            notes_from(&["C4", "E6", "G6"])
        );
        assert_eq!(
            assign_octaves(&notes_from(&["C5", "E3", "G"]), 4),
            notes_from(&["C5", "E5", "G5"])
        );
        // malformed tokens pass
        assert_eq!(
            assign_octaves(&notes_from(&["C", "??", "E"]), 4),
            notes_from(&["C4", "??", "E4"])
        );
        assert!(assign_octaves(&[], 4).is_empty());
    }

    #[test]
    fn octaves_ascend() {
        let names = ["Bb", "D", "F", "Ab", "C", "Eb", "G", "B", "Db"];
        for base_octave in 2..=6 {
            let notes = assign_octaves(&notes_from(&names), base_octave);
            assert_eq!(notes.len(), names.len());
            let midis = midis(&notes);
            assert!(midis.windows(2).all(|w| w[0] < w[1]), "{:?}", notes);
        }
    }

    #[test]
    fn inversions() {
        let chord = notes_from(&["C4", "E4", "G4"]);
        assert_eq!(apply_inversion(&chord, 0), chord);
        assert_eq!(apply_inversion(&chord, 1), notes_from(&["E4", "G4", "C5"]));
        assert_eq!(apply_inversion(&chord, 2), notes_from(&["G4", "C5", "E5"]));
        assert_eq!(apply_inversion(&chord, 3), notes_from(&["C5", "E5", "G5"]));
        // targets the lowest sounding note, not the first one
        assert_eq!(
            apply_inversion(&notes_from(&["E4", "C4", "G4"]), 1),
            notes_from(&["E4", "G4", "C5"])
        );
        // untagged notes are kept
        assert_eq!(
            apply_inversion(&notes_from(&["C4", "X", "G4"]), 2),
            notes_from(&["X", "C5", "G5"])
        );
        assert!(apply_inversion(&[], 3).is_empty());
    }

    #[test]
    fn extreme_octaves() {
        let huge = "C2147483647";
        assert_eq!(
            assign_octaves(&notes_from(&["C", huge, "E"]), 4),
            notes_from(&["C4", huge, "E4"])
        );
        assert_eq!(apply_inversion(&notes_from(&[huge]), 1), notes_from(&[huge]));
        assert_eq!(
            apply_inversion(&notes_from(&["C4", huge]), 1),
            notes_from(&[huge, "C5"])
        );
        assert_eq!(
            alternate_octaves(&notes_from(&[huge, huge])),
            notes_from(&[huge, huge])
        );
        for pattern in VoicingPattern::ALL {
            let voiced = apply_voicing_pattern(&notes_from(&[huge]), pattern);
            assert_eq!(voiced, notes_from(&[huge]));
        }
    }

    #[test]
    fn rotations() {
        assert_eq!(rotate(&[1, 2, 3], 1), vec![2, 3, 1]);
        assert_eq!(rotate(&[1, 2, 3], 4), vec![2, 3, 1]);
        assert_eq!(rotate(&[1, 2, 3], -1), vec![3, 1, 2]);
        assert_eq!(rotate(&[1, 2, 3], 0), vec![1, 2, 3]);
        assert_eq!(rotate::<i32>(&[], 2), Vec::<i32>::new());
    }

    #[test]
    fn ops() {
        let chord = notes_from(&["C4", "E4", "G4", "B4"]);
        assert_eq!(reorder(&chord, &[3, 0, 7]), notes_from(&["B4", "C4"]));
        assert_eq!(
            move_octaves(&chord, &[0, 2], -1),
            notes_from(&["C3", "E4", "G3", "B4"])
        );
        assert_eq!(
            VoicingOp::LowerByOctaves {
                indices: vec![1],
                steps: 2
            }
            .apply(chord.clone()),
            notes_from(&["C4", "E2", "G4", "B4"])
        );
        assert_eq!(
            VoicingOp::RaiseByOctaves {
                indices: vec![3],
                steps: 1
            }
            .apply(chord.clone()),
            notes_from(&["C4", "E4", "G4", "B5"])
        );
        assert_eq!(
            VoicingOp::RaiseOddsIfSingleOctave { steps: 1 }
                .apply(notes_from(&["C4", "E5", "G4"])),
            notes_from(&["C4", "E5", "G4"])
        );
        assert_eq!(
            drop_nth_highest(&notes_from(&["G3", "C3", "E3"]), 3),
            notes_from(&["C2", "E3", "G3"])
        );
        assert_eq!(
            alternate_octaves(&notes_from(&["C", "E"])),
            notes_from(&["C", "E"])
        );
    }

    #[test]
    fn patterns() {
        let chord = notes_from(&["C4", "E4", "G4", "B4"]);
        assert_eq!(apply_voicing_pattern(&chord, VoicingPattern::Close), chord);
        assert_eq!(
            apply_voicing_pattern(&chord, VoicingPattern::Open),
            notes_from(&["C4", "G5", "E4", "B5"])
        );
        // only raised when the input sits in a single octave
        assert_eq!(
            apply_voicing_pattern(&notes_from(&["C4", "E4", "G4", "C5"]), VoicingPattern::Open),
            notes_from(&["C4", "G4", "E4", "C5"])
        );
        assert_eq!(
            apply_voicing_pattern(&notes_from(&["C3", "E3", "G3"]), VoicingPattern::Drop2),
            notes_from(&["C3", "E2", "G3"])
        );
        assert_eq!(
            apply_voicing_pattern(&chord, VoicingPattern::Drop3),
            notes_from(&["C4", "E3", "G4", "B4"])
        );
        assert_eq!(
            apply_voicing_pattern(&notes_from(&["C4"]), VoicingPattern::Drop2),
            notes_from(&["C4"])
        );
        assert_eq!(
            apply_voicing_pattern(&notes_from(&["E4", "G4", "C5"]), VoicingPattern::Spread),
            notes_from(&["E4", "G5", "C4"])
        );
        for pattern in VoicingPattern::ALL {
            assert!(apply_voicing_pattern(&[], pattern).is_empty());
        }
    }

    #[test]
    fn pattern_names() {
        assert_eq!(VoicingPattern::from("drop2"), VoicingPattern::Drop2);
        assert_eq!(VoicingPattern::from("Spread"), VoicingPattern::Spread);
        assert_eq!(VoicingPattern::from("cluster"), VoicingPattern::Close);
        for pattern in VoicingPattern::ALL {
            assert_eq!(VoicingPattern::from(pattern.to_string().as_str()), pattern);
        }
    }
}
