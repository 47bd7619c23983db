//! Device capability consumed by the animations.
//!
//! Animations only ever talk to the board through [`Device`]: brightness
//! setters stage changes in a pending frame and [`Device::apply`] commits
//! that frame to the hardware. The low-level driver lives outside this crate;
//! [`MemoryDevice`] and [`ConsoleDevice`] are the in-tree implementations.

use std::fmt;

use crate::topology::{arm_leds, Color, LED_COUNT, MAX_BRIGHTNESS};

mod console;
mod memory;

pub use console::ConsoleDevice;
pub use memory::{Journal, MemoryDevice, HISTORY_LIMIT};

/// Failure reported by a device implementation.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("device unavailable: {0}")]
    Unavailable(String),
    #[error("device write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("device rejected the frame: {0}")]
    Rejected(String),
}

/// Writable LED board.
///
/// The handle is owned by exactly one animation task at a time, so the
/// trait takes `&mut self` and needs no interior locking.
pub trait Device: Send + 'static {
    /// Stages a brightness for a single LED. Out-of-range ids are ignored.
    fn set_led(&mut self, led: u8, brightness: u8);

    /// Commits the staged frame.
    fn apply(&mut self) -> Result<(), DeviceError>;

    fn set_all(&mut self, brightness: u8) {
        for led in 0..LED_COUNT as u8 {
            self.set_led(led, brightness);
        }
    }

    /// Stages a brightness for the three LEDs of one color band.
    fn set_band(&mut self, color: Color, brightness: u8) {
        for led in color.leds() {
            self.set_led(led, brightness);
        }
    }

    /// Stages a brightness for the six LEDs of one arm.
    fn set_arm(&mut self, arm: usize, brightness: u8) {
        if let Some(leds) = arm_leds(arm) {
            for led in leds {
                self.set_led(led, brightness);
            }
        }
    }

    /// Turns every LED off and commits the result.
    fn blank(&mut self) -> Result<(), DeviceError> {
        self.set_all(0);
        self.apply()
    }
}

/// Brightness buffer for the whole board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    levels: [u8; LED_COUNT],
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets one LED, clamping to [`MAX_BRIGHTNESS`]. Returns `false` when the
    /// id is not on the board.
    pub fn set(&mut self, led: u8, brightness: u8) -> bool {
        match self.levels.get_mut(led as usize) {
            Some(level) => {
                *level = brightness.min(MAX_BRIGHTNESS);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, led: u8) -> Option<u8> {
        self.levels.get(led as usize).copied()
    }

    pub fn levels(&self) -> &[u8; LED_COUNT] {
        &self.levels
    }

    pub fn is_dark(&self) -> bool {
        self.levels.iter().all(|&level| level == 0)
    }

    /// Ids of all LEDs with a non-zero brightness, ascending.
    pub fn lit(&self) -> Vec<u8> {
        (0..LED_COUNT as u8)
            .filter(|&led| self.levels[led as usize] > 0)
            .collect()
    }
}

/// Renders the frame arm by arm, each arm listed from the center outwards.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arm in 0..crate::topology::ARM_COUNT {
            if arm > 0 {
                f.write_str(" | ")?;
            }
            let Some(leds) = arm_leds(arm) else { continue };
            for (i, led) in leds.iter().enumerate() {
                if i > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:2}", self.levels[*led as usize])?;
            }
        }
        Ok(())
    }
}
