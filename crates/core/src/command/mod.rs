//! Text command interpreter.
//!
//! [`parse`] is total: anything it does not recognise becomes a
//! [`AnimationKind::Solid`] intent, so a bad command still produces a
//! deterministic picture instead of an error.

use std::fmt;

use crate::topology::{Color, LED_COUNT};

/// The closed family of animations the board can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    Shimmer,
    Pulse,
    Bounce,
    Cycle,
    Arms,
    Spin,
    Solid,
}

/// What a color-aware animation should light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Band(Color),
    /// Every LED at once.
    All,
    /// Nothing; the display stays blank.
    Clear,
    /// A single LED derived from an unrecognised command.
    Led(u8),
}

/// A parsed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub kind: AnimationKind,
    pub color: Option<Target>,
    /// Selects the `2` flavour of `arms`, `bounce` and `<color>spin`.
    pub variant: bool,
}

impl Intent {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            color: None,
            variant: false,
        }
    }

    pub fn with_variant(kind: AnimationKind) -> Self {
        Self {
            variant: true,
            ..Self::new(kind)
        }
    }

    pub fn spin(color: Color, variant: bool) -> Self {
        Self {
            kind: AnimationKind::Spin,
            color: Some(Target::Band(color)),
            variant,
        }
    }

    pub fn solid(target: Target) -> Self {
        Self {
            kind: AnimationKind::Solid,
            color: Some(target),
            variant: false,
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.variant { "2" } else { "" };
        match (self.kind, self.color) {
            (AnimationKind::Spin, Some(Target::Band(color))) => write!(f, "{color}spin{suffix}"),
            (AnimationKind::Solid, Some(Target::Band(color))) => write!(f, "{color}"),
            (AnimationKind::Solid, Some(Target::All)) => f.write_str("all"),
            (AnimationKind::Solid, Some(Target::Clear)) => f.write_str("clear"),
            (AnimationKind::Solid, Some(Target::Led(led))) => write!(f, "led {led}"),
            (kind, _) => write!(f, "{}{suffix}", kind_name(kind)),
        }
    }
}

fn kind_name(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::Shimmer => "shimmer",
        AnimationKind::Pulse => "pulse",
        AnimationKind::Bounce => "bounce",
        AnimationKind::Cycle => "cycle",
        AnimationKind::Arms => "arms",
        AnimationKind::Spin => "spin",
        AnimationKind::Solid => "solid",
    }
}

/// Keyword animations: `(description, intent)`. The keyword is everything
/// before the first `:`.
static KEYWORDS: [(&str, Intent); 7] = [
    (
        "shimmer: turn random LEDs to random brightnesses",
        Intent { kind: AnimationKind::Shimmer, color: None, variant: false },
    ),
    (
        "pulse: pulse all LEDs up and down",
        Intent { kind: AnimationKind::Pulse, color: None, variant: false },
    ),
    (
        "bounce: bounce a single LED up and down all arms",
        Intent { kind: AnimationKind::Bounce, color: None, variant: false },
    ),
    (
        "bounce2: bounce a single LED each arm in turn",
        Intent { kind: AnimationKind::Bounce, color: None, variant: true },
    ),
    (
        "cycle: turn all LEDs on and then off in bands",
        Intent { kind: AnimationKind::Cycle, color: None, variant: false },
    ),
    (
        "arms: light each arm in turn and then turn off each arm",
        Intent { kind: AnimationKind::Arms, color: None, variant: false },
    ),
    (
        "arms2: light each arm in turn by itself",
        Intent { kind: AnimationKind::Arms, color: None, variant: true },
    ),
];

const COLOR_FORMS: [&str; 3] = [
    "<color>spin: spin through the LEDs of the specified color",
    "<color>spin2: spin through the LEDs of the specified color, one at a time",
    "<color>: turn the specified color LED on",
];

/// Human readable listing of every command form, in display order.
pub fn catalog() -> impl Iterator<Item = &'static str> {
    KEYWORDS
        .iter()
        .map(|(description, _)| *description)
        .chain(COLOR_FORMS)
}

/// Parses one raw command token.
pub fn parse(raw: &str) -> Intent {
    if let Some(intent) = keyword(raw) {
        return intent;
    }

    for (suffix, variant) in [("spin2", true), ("spin", false)] {
        if let Some(color) = raw.strip_suffix(suffix).and_then(Color::from_name) {
            return Intent::spin(color, variant);
        }
    }

    Intent::solid(solid_target(raw))
}

fn keyword(raw: &str) -> Option<Intent> {
    KEYWORDS.iter().find_map(|(description, intent)| {
        description
            .strip_prefix(raw)
            .filter(|rest| rest.starts_with(':'))
            .map(|_| *intent)
    })
}

fn solid_target(raw: &str) -> Target {
    match raw {
        "clear" => Target::Clear,
        "all" => Target::All,
        _ => match Color::from_name(raw) {
            Some(color) => Target::Band(color),
            None => Target::Led(fallback_led(raw)),
        },
    }
}

const FALLBACK_MODULUS: usize = LED_COUNT - 1;

/// LED lit for an unrecognised command: the byte length modulo 17.
pub fn fallback_led(raw: &str) -> u8 {
    (raw.len() % FALLBACK_MODULUS) as u8
}
