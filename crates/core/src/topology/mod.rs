//! Static layout of the board: eighteen LEDs on three arms, one LED of each
//! of the six color bands per arm.

use std::{fmt, str::FromStr};

/// Number of addressable LEDs on the board.
pub const LED_COUNT: usize = 18;

/// Number of arms (tentacles). Every color band has exactly one LED per arm.
pub const ARM_COUNT: usize = 3;

/// Highest brightness level accepted by the device.
pub const MAX_BRIGHTNESS: u8 = 31;

/// One of the six color bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

/// Radial traversal order, from the center of the board outwards.
pub const RADIAL_ORDER: [Color; 6] = [
    Color::White,
    Color::Blue,
    Color::Green,
    Color::Yellow,
    Color::Orange,
    Color::Red,
];

impl Color {
    /// LED ids of this band, indexed by arm.
    pub const fn leds(self) -> [u8; ARM_COUNT] {
        match self {
            Color::White => [12, 9, 10],
            Color::Blue => [14, 4, 11],
            Color::Green => [3, 5, 13],
            Color::Yellow => [2, 8, 15],
            Color::Orange => [1, 7, 16],
            Color::Red => [0, 6, 17],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
            Color::Red => "red",
        }
    }

    /// Looks a band up by its lowercase name.
    pub fn from_name(name: &str) -> Option<Self> {
        RADIAL_ORDER.into_iter().find(|color| color.name() == name)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("unknown color `{s}`"))
    }
}

/// LED ids of one arm, ordered radially. Returns `None` for an arm index
/// outside `0..ARM_COUNT`.
pub fn arm_leds(arm: usize) -> Option<[u8; 6]> {
    if arm >= ARM_COUNT {
        return None;
    }
    Some(RADIAL_ORDER.map(|color| color.leds()[arm]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_led_belongs_to_exactly_one_band_and_arm() {
        let mut seen = [0u8; LED_COUNT];
        for color in RADIAL_ORDER {
            for led in color.leds() {
                seen[led as usize] += 1;
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn arms_follow_radial_order() {
        assert_eq!(arm_leds(0), Some([12, 14, 3, 2, 1, 0]));
        assert_eq!(arm_leds(2), Some([10, 11, 13, 15, 16, 17]));
        assert_eq!(arm_leds(3), None);
    }

    #[test]
    fn parses_names() {
        assert_eq!("orange".parse::<Color>(), Ok(Color::Orange));
        assert!("purple".parse::<Color>().is_err());
    }
}
