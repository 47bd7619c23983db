//! Frame generators.
//!
//! Every animation is an infinite state machine: [`Animation::setup`] runs
//! once when the session starts, then [`Animation::advance`] is called once
//! per tick until the session is cancelled. Each `advance` stages a frame and
//! commits it with at least one [`Device::apply`].

use crate::{
    command::{AnimationKind, Intent, Target},
    device::{Device, DeviceError},
};

mod bounce;
mod cycle;
mod pulse;
mod shimmer;
mod solid;
mod sweep;

pub use bounce::Bounce;
pub use cycle::Cycle;
pub use pulse::Pulse;
pub use shimmer::Shimmer;
pub use solid::Solid;
pub use sweep::{Arms, Spin};

/// Brightness used by the on/off style animations.
const ON_LEVEL: u8 = 4;

fn toggle(level: u8) -> u8 {
    if level == ON_LEVEL {
        0
    } else {
        ON_LEVEL
    }
}

/// The closed set of animations, dispatched by `match`.
#[derive(Debug)]
pub enum Animation {
    Spin(Spin),
    Arms(Arms),
    Cycle(Cycle),
    Pulse(Pulse),
    Bounce(Bounce),
    Shimmer(Shimmer),
    Solid(Solid),
}

impl Animation {
    /// Builds the animation described by `intent`.
    ///
    /// A spin without a color band cannot be drawn; it degrades to a solid
    /// picture of whatever target the intent carries.
    pub fn from_intent(intent: &Intent) -> Self {
        match intent.kind {
            AnimationKind::Spin => match intent.color {
                Some(Target::Band(color)) => Self::Spin(Spin::new(color, intent.variant)),
                other => Self::Solid(Solid::new(other.unwrap_or(Target::Clear))),
            },
            AnimationKind::Arms => Self::Arms(Arms::new(intent.variant)),
            AnimationKind::Cycle => Self::Cycle(Cycle::new()),
            AnimationKind::Pulse => Self::Pulse(Pulse::new()),
            AnimationKind::Bounce => Self::Bounce(Bounce::new(intent.variant)),
            AnimationKind::Shimmer => Self::Shimmer(Shimmer::new()),
            AnimationKind::Solid => Self::Solid(Solid::new(intent.color.unwrap_or(Target::Clear))),
        }
    }

    pub fn kind(&self) -> AnimationKind {
        match self {
            Self::Spin(_) => AnimationKind::Spin,
            Self::Arms(_) => AnimationKind::Arms,
            Self::Cycle(_) => AnimationKind::Cycle,
            Self::Pulse(_) => AnimationKind::Pulse,
            Self::Bounce(_) => AnimationKind::Bounce,
            Self::Shimmer(_) => AnimationKind::Shimmer,
            Self::Solid(_) => AnimationKind::Solid,
        }
    }

    /// One-time drawing done before the first tick.
    pub fn setup<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        match self {
            Self::Shimmer(shimmer) => shimmer.setup(device),
            Self::Solid(solid) => solid.setup(device),
            _ => Ok(()),
        }
    }

    /// Draws the next frame.
    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        match self {
            Self::Spin(spin) => spin.advance(device),
            Self::Arms(arms) => arms.advance(device),
            Self::Cycle(cycle) => cycle.advance(device),
            Self::Pulse(pulse) => pulse.advance(device),
            Self::Bounce(bounce) => bounce.advance(device),
            Self::Shimmer(shimmer) => shimmer.advance(device),
            Self::Solid(solid) => solid.advance(device),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::parse, topology::Color};

    #[test]
    fn builds_every_kind_from_parsed_commands() {
        for (raw, kind) in [
            ("shimmer", AnimationKind::Shimmer),
            ("pulse", AnimationKind::Pulse),
            ("bounce2", AnimationKind::Bounce),
            ("cycle", AnimationKind::Cycle),
            ("arms", AnimationKind::Arms),
            ("whitespin2", AnimationKind::Spin),
            ("yellow", AnimationKind::Solid),
            ("gibberish", AnimationKind::Solid),
        ] {
            assert_eq!(Animation::from_intent(&parse(raw)).kind(), kind, "{raw}");
        }
    }

    #[test]
    fn colorless_spin_degrades_to_solid() {
        let intent = Intent::new(AnimationKind::Spin);
        assert_eq!(Animation::from_intent(&intent).kind(), AnimationKind::Solid);

        let intent = Intent {
            color: Some(Target::All),
            ..Intent::spin(Color::Red, false)
        };
        assert_eq!(Animation::from_intent(&intent).kind(), AnimationKind::Solid);
    }

    #[test]
    fn toggles_between_off_and_on() {
        assert_eq!(toggle(ON_LEVEL), 0);
        assert_eq!(toggle(0), ON_LEVEL);
    }
}
