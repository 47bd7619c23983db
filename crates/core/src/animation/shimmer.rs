use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    device::{Device, DeviceError},
    topology::LED_COUNT,
};

const FLOOR: u8 = 2;
const CEILING: u8 = 10;

/// Random flicker: every tick one random LED takes a random level in
/// `FLOOR..CEILING`. Nothing is ever blanked, so changes accumulate.
#[derive(Debug)]
pub struct Shimmer {
    rng: StdRng,
}

impl Default for Shimmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Shimmer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic flicker for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn setup<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        device.set_all(FLOOR);
        device.apply()
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        let led = self.rng.gen_range(0..LED_COUNT as u8);
        let level = self.rng.gen_range(FLOOR..CEILING);
        device.set_led(led, level);
        device.apply()
    }
}
