//! Pad configurations: the declarative chord settings of a single controller pad.

use std::fmt::Display;

use derive_more::{From, Into};

use crate::{pitch::Interval, scale::ScaleType};

// -------------------------------------------------------------------------------------------------

/// Number of pads in a [`PadBank`].
pub const PAD_COUNT: usize = 10;

/// Lowest octave a pad may play in.
pub const MIN_OCTAVE: i32 = 2;
/// Highest octave a pad may play in.
pub const MAX_OCTAVE: i32 = 6;
/// Octave used when no valid octave is given.
pub const DEFAULT_OCTAVE: i32 = 4;

/// Round and clamp an octave into `[MIN_OCTAVE, MAX_OCTAVE]`. Non finite values fall back to
/// [`DEFAULT_OCTAVE`].
pub fn clamp_octave(octave: f64) -> i32 {
    if !octave.is_finite() {
        return DEFAULT_OCTAVE;
    }
    (octave.round() as i32).clamp(MIN_OCTAVE, MAX_OCTAVE)
}

// -------------------------------------------------------------------------------------------------

/// Which field group of a pad is active.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PadMode {
    /// The pad plays nothing.
    #[default]
    Unassigned,
    /// Root is derived from a key and a scale degree.
    Scale,
    /// Root is given directly.
    Free,
}

impl PadMode {
    /// Lenient conversion used when sanitizing stored pads: anything unknown is scale mode.
    pub fn from_loose(s: &str) -> Self {
        match s {
            "free" => Self::Free,
            "unassigned" => Self::Unassigned,
            _ => Self::Scale,
        }
    }
}

impl Display for PadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unassigned => write!(f, "unassigned"),
            Self::Scale => write!(f, "scale"),
            Self::Free => write!(f, "free"),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Chord voicing type of a pad: which chord tones and tensions it plays.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum ChordVoicing {
    #[default]
    Triad,
    Sus2,
    Sus4,
    Add2,
    Add9,
    Sixth,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
    /// Unknown voicing names are kept, and behave like a triad.
    Other(String),
}

impl ChordVoicing {
    /// The voicing's name as used in chord symbols: `sus4`, `add9`, `6`, `13`...
    pub fn name(&self) -> &str {
        match self {
            Self::Triad => "triad",
            Self::Sus2 => "sus2",
            Self::Sus4 => "sus4",
            Self::Add2 => "add2",
            Self::Add9 => "add9",
            Self::Sixth => "6",
            Self::Seventh => "7",
            Self::Ninth => "9",
            Self::Eleventh => "11",
            Self::Thirteenth => "13",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Upper structure tones added above the base chord, in order.
    pub fn tension_intervals(&self) -> &'static [Interval] {
        match self {
            Self::Add9 | Self::Ninth => &[Interval::MajorNinth],
            Self::Sixth => &[Interval::MajorSixth],
            Self::Eleventh => &[Interval::MajorNinth, Interval::PerfectEleventh],
            Self::Thirteenth => &[
                Interval::MajorNinth,
                Interval::PerfectEleventh,
                Interval::MajorThirteenth,
            ],
            _ => &[],
        }
    }
}

impl From<&str> for ChordVoicing {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "triad" => Self::Triad,
            "sus2" => Self::Sus2,
            "sus4" => Self::Sus4,
            "add2" => Self::Add2,
            "add9" => Self::Add9,
            "6" => Self::Sixth,
            "7" => Self::Seventh,
            "9" => Self::Ninth,
            "11" => Self::Eleventh,
            "13" => Self::Thirteenth,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl Display for ChordVoicing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -------------------------------------------------------------------------------------------------

/// Chord inversion: how many times the lowest sounding note is moved up an octave.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, From, Into)]
pub struct Inversion(usize);

impl Inversion {
    pub fn index(&self) -> usize {
        self.0
    }

    /// Test if this is the root position.
    pub fn is_root(&self) -> bool {
        self.0 == 0
    }
}

impl From<&str> for Inversion {
    /// Parse an inversion label: `root` is 0, otherwise the first number in the label counts,
    /// e.g. `1st` or `inversion 2`. Labels without a number are root position.
    fn from(label: &str) -> Self {
        if label == "root" {
            return Self(0);
        }
        let digits = label
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect::<String>();
        Self(digits.parse().unwrap_or(0))
    }
}

impl Display for Inversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "root"),
            1 => write!(f, "1st"),
            2 => write!(f, "2nd"),
            3 => write!(f, "3rd"),
            n => write!(f, "{}th", n),
        }
    }
}

/// Index of an inversion label, see [`Inversion`].
pub fn inversion_index(label: &str) -> usize {
    Inversion::from(label).index()
}

// -------------------------------------------------------------------------------------------------

/// Settings of a single pad. Only the field group selected by `mode` is used.
#[derive(Debug, Clone, PartialEq)]
pub struct PadConfig {
    pub mode: PadMode,
    /// A pad explicitly marked unassigned plays nothing, whatever its mode is.
    pub assigned: bool,
    // scale mode
    pub scale: String,
    pub scale_type_scale: ScaleType,
    pub degree: String,
    pub voicing_scale: ChordVoicing,
    pub inversion_scale: Inversion,
    pub octave_scale: i32,
    // free mode
    pub free_root: String,
    pub scale_type_free: ScaleType,
    pub voicing_free: ChordVoicing,
    pub inversion_free: Inversion,
    pub octave_free: i32,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            mode: PadMode::Unassigned,
            assigned: false,
            scale: "C".to_string(),
            scale_type_scale: ScaleType::Major,
            degree: "I".to_string(),
            voicing_scale: ChordVoicing::Triad,
            inversion_scale: Inversion::default(),
            octave_scale: DEFAULT_OCTAVE,
            free_root: "C".to_string(),
            scale_type_free: ScaleType::Major,
            voicing_free: ChordVoicing::Triad,
            inversion_free: Inversion::default(),
            octave_free: DEFAULT_OCTAVE,
        }
    }
}

impl PadConfig {
    /// A scale mode pad playing the given degree of a key.
    pub fn scale(root: &str, scale_type: ScaleType, degree: &str) -> Self {
        Self {
            mode: PadMode::Scale,
            assigned: true,
            scale: root.to_string(),
            scale_type_scale: scale_type,
            degree: degree.to_string(),
            ..Self::default()
        }
    }

    /// A free mode pad playing a chord on the given root.
    pub fn free(root: &str, scale_type: ScaleType) -> Self {
        Self {
            mode: PadMode::Free,
            assigned: true,
            free_root: root.to_string(),
            scale_type_free: scale_type,
            ..Self::default()
        }
    }

    /// Set the active group's voicing.
    #[must_use]
    pub fn with_voicing<V: Into<ChordVoicing>>(mut self, voicing: V) -> Self {
        match self.mode {
            PadMode::Free => self.voicing_free = voicing.into(),
            _ => self.voicing_scale = voicing.into(),
        }
        self
    }

    /// Set the active group's inversion.
    #[must_use]
    pub fn with_inversion(mut self, inversion: usize) -> Self {
        match self.mode {
            PadMode::Free => self.inversion_free = Inversion(inversion),
            _ => self.inversion_scale = Inversion(inversion),
        }
        self
    }

    /// Set the active group's octave, clamped into the valid octave range.
    #[must_use]
    pub fn with_octave(mut self, octave: i32) -> Self {
        let octave = octave.clamp(MIN_OCTAVE, MAX_OCTAVE);
        match self.mode {
            PadMode::Free => self.octave_free = octave,
            _ => self.octave_scale = octave,
        }
        self
    }

    /// Test if the pad should produce a chord at all.
    pub fn is_assigned(&self) -> bool {
        self.assigned && self.mode != PadMode::Unassigned
    }

    /// Root name of the active group: the key for scale pads, the chord root for free pads.
    pub fn key_root(&self) -> &str {
        match self.mode {
            PadMode::Free => &self.free_root,
            _ => &self.scale,
        }
    }

    /// Scale type of the active group.
    pub fn key_scale_type(&self) -> ScaleType {
        match self.mode {
            PadMode::Free => self.scale_type_free,
            _ => self.scale_type_scale,
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Loosely typed pad settings as they arrive from a settings store. Missing or invalid fields are
/// replaced by defaults when converting into a [`PadConfig`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawPad {
    pub mode: Option<String>,
    pub assigned: Option<bool>,
    pub scale: Option<String>,
    pub scale_type_scale: Option<String>,
    pub degree: Option<String>,
    pub voicing_scale: Option<String>,
    pub inversion_scale: Option<String>,
    pub octave_scale: Option<f64>,
    pub free_root: Option<String>,
    pub scale_type_free: Option<String>,
    pub voicing_free: Option<String>,
    pub inversion_free: Option<String>,
    pub octave_free: Option<f64>,
}

impl From<RawPad> for PadConfig {
    fn from(raw: RawPad) -> Self {
        let defaults = PadConfig::default();
        let mode = raw
            .mode
            .as_deref()
            .map(PadMode::from_loose)
            .unwrap_or(PadMode::Scale);
        let assigned = raw.assigned.unwrap_or(mode != PadMode::Unassigned);
        let octave = |value: Option<f64>| value.map(clamp_octave).unwrap_or(DEFAULT_OCTAVE);
        let scale_type = |value: Option<String>| {
            value
                .as_deref()
                .map(ScaleType::from_loose)
                .unwrap_or_default()
        };
        Self {
            mode,
            assigned,
            scale: raw.scale.unwrap_or(defaults.scale),
            scale_type_scale: scale_type(raw.scale_type_scale),
            degree: raw.degree.unwrap_or(defaults.degree),
            voicing_scale: raw
                .voicing_scale
                .as_deref()
                .map(ChordVoicing::from)
                .unwrap_or(defaults.voicing_scale),
            inversion_scale: raw
                .inversion_scale
                .as_deref()
                .map(Inversion::from)
                .unwrap_or(defaults.inversion_scale),
            octave_scale: octave(raw.octave_scale),
            free_root: raw.free_root.unwrap_or(defaults.free_root),
            scale_type_free: scale_type(raw.scale_type_free),
            voicing_free: raw
                .voicing_free
                .as_deref()
                .map(ChordVoicing::from)
                .unwrap_or(defaults.voicing_free),
            inversion_free: raw
                .inversion_free
                .as_deref()
                .map(Inversion::from)
                .unwrap_or(defaults.inversion_free),
            octave_free: octave(raw.octave_free),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A fixed size set of [`PAD_COUNT`] pads.
#[derive(Debug, Clone, PartialEq)]
pub struct PadBank {
    pads: Vec<PadConfig>,
}

impl Default for PadBank {
    fn default() -> Self {
        Self {
            pads: vec![PadConfig::default(); PAD_COUNT],
        }
    }
}

impl PadBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bank from stored pads. Missing entries become default pads, superfluous ones are
    /// ignored.
    pub fn from_raw<I: IntoIterator<Item = Option<RawPad>>>(raw_pads: I) -> Self {
        let mut pads = raw_pads
            .into_iter()
            .take(PAD_COUNT)
            .map(|raw| raw.map(PadConfig::from).unwrap_or_default())
            .collect::<Vec<_>>();
        pads.resize(PAD_COUNT, PadConfig::default());
        Self { pads }
    }

    /// All pads.
    pub fn pads(&self) -> &[PadConfig] {
        &self.pads
    }

    /// Access a single pad.
    pub fn pad(&self, index: usize) -> Option<&PadConfig> {
        self.pads.get(index)
    }

    /// Sanitize and store the given pad settings.
    pub fn set_pad(&mut self, index: usize, raw: RawPad) -> anyhow::Result<()> {
        let pad = self.pad_mut(index)?;
        *pad = PadConfig::from(raw);
        Ok(())
    }

    /// Reset a pad to the default, unassigned state.
    pub fn reset_pad(&mut self, index: usize) -> anyhow::Result<()> {
        let pad = self.pad_mut(index)?;
        *pad = PadConfig::default();
        Ok(())
    }

    fn pad_mut(&mut self, index: usize) -> anyhow::Result<&mut PadConfig> {
        self.pads.get_mut(index).ok_or_else(|| {
            anyhow::anyhow!("pad index {} out of range [0..{}]", index, PAD_COUNT - 1)
        })
    }
}

// -------------------------------------------------------------------------------------------------
