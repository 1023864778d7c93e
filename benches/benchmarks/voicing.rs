use std::hint::black_box;

use criterion::{criterion_group, Criterion};

use chordpilot::prelude::*;

// ---------------------------------------------------------------------------------------------

fn create_pads() -> Vec<PadConfig> {
    let voicings = ["triad", "sus2", "add2", "6", "7", "9", "11", "13"];
    let mut pads = Vec::new();
    for (index, degree) in ["I", "ii", "iii", "IV", "V", "vi", "vii°"].iter().enumerate() {
        pads.push(
            PadConfig::scale("Eb", ScaleType::Major, degree)
                .with_voicing(voicings[index % voicings.len()])
                .with_inversion(index % 4),
        );
    }
    pads.push(PadConfig::free("F#", ScaleType::Minor).with_voicing("sus4"));
    pads.push(PadConfig::free("A", ScaleType::Major).with_voicing("13"));
    pads
}

// ---------------------------------------------------------------------------------------------

pub fn chord_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");
    let engine = ChordEngine::new();
    let pads = create_pads();
    group.bench_function("Chord Display", |b| {
        b.iter(|| {
            for pad in &pads {
                black_box(engine.chord_display(pad));
            }
        })
    });
    group.finish();
}

pub fn voiced_notes(c: &mut Criterion) {
    let mut group = c.benchmark_group("Engine");
    let engine = ChordEngine::new();
    let pads = create_pads();
    group.bench_function("Voiced Notes", |b| {
        b.iter(|| {
            for pad in &pads {
                for pattern in VoicingPattern::ALL {
                    black_box(engine.voiced_notes(pad, pattern));
                }
            }
        })
    });
    group.finish();
}

pub fn patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("Voicing");
    let notes = assign_octaves(&notes_from(&["C", "E", "G", "Bb", "D", "F", "A"]), 3);
    group.bench_function("Inversions", |b| {
        b.iter(|| black_box(apply_inversion(&notes, 5)))
    });
    group.bench_function("Patterns", |b| {
        b.iter(|| {
            for pattern in VoicingPattern::ALL {
                black_box(apply_voicing_pattern(&notes, pattern));
            }
        })
    });
    group.finish();
}

// ---------------------------------------------------------------------------------------------

criterion_group! {
    name = engine;
    config = Criterion::default();
    targets = chord_display, voiced_notes
}

criterion_group! {
    name = voicing;
    config = Criterion::default();
    targets = patterns
}
