use simplelog::*;

use chordpilot::prelude::*;

fn main() -> anyhow::Result<()> {
    // init logging
    TermLogger::init(
        log::STATIC_MAX_LEVEL,
        ConfigBuilder::default().build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap_or_else(|err| {
        log::error!("init_logger error: {:?}", err);
    });

    let raw_pad = |degree: &str, voicing: &str, inversion: &str| RawPad {
        mode: Some("scale".to_string()),
        scale: Some("Bb".to_string()),
        degree: Some(degree.to_string()),
        voicing_scale: Some(voicing.to_string()),
        inversion_scale: Some(inversion.to_string()),
        octave_scale: Some(3.0),
        ..RawPad::default()
    };

    // a ii-V-I in Bb major, some colors and two free chords
    let mut bank = PadBank::new();
    bank.set_pad(0, raw_pad("ii", "9", "root"))?;
    bank.set_pad(1, raw_pad("V", "13", "1st"))?;
    bank.set_pad(2, raw_pad("I", "7", "root"))?;
    bank.set_pad(3, raw_pad("vi", "add2", "root"))?;
    bank.set_pad(4, raw_pad("vii°", "7", "2nd"))?;
    bank.set_pad(
        5,
        RawPad {
            mode: Some("free".to_string()),
            free_root: Some("F#".to_string()),
            scale_type_free: Some("minor".to_string()),
            voicing_free: Some("sus4".to_string()),
            ..RawPad::default()
        },
    )?;
    bank.set_pad(
        6,
        RawPad {
            mode: Some("free".to_string()),
            free_root: Some("Eb".to_string()),
            voicing_free: Some("6".to_string()),
            octave_free: Some(9.0),
            ..RawPad::default()
        },
    )?;

    let engine = ChordEngine::new();
    for (index, pad) in bank.pads().iter().enumerate() {
        let Some(metadata) = engine.chord_metadata(pad) else {
            println!("{:>2}: ---", index);
            continue;
        };
        println!(
            "{:>2}: {:<10} {:<16} {}",
            index,
            engine.chord_display(pad),
            metadata.kind.to_string(),
            engine
                .chord_notes(pad)
                .iter()
                .map(|note| note.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        for pattern in VoicingPattern::ALL {
            let notes = engine.display_notes(&engine.voiced_notes(pad, pattern), pad);
            println!(
                "      {:<7} {}",
                pattern.to_string(),
                notes
                    .iter()
                    .map(|note| note.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );
        }
    }
    Ok(())
}
