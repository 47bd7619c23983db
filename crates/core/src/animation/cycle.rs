use super::{toggle, ON_LEVEL};
use crate::{
    device::{Device, DeviceError},
    topology::RADIAL_ORDER,
};

/// Fills the bands one by one from the center outwards, then empties them
/// in the same order.
#[derive(Debug)]
pub struct Cycle {
    index: usize,
    level: u8,
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Cycle {
    pub fn new() -> Self {
        Self {
            index: 0,
            level: ON_LEVEL,
        }
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        if self.index == RADIAL_ORDER.len() {
            self.index = 0;
            self.level = toggle(self.level);
        }

        device.set_band(RADIAL_ORDER[self.index], self.level);
        let applied = device.apply();

        self.index += 1;
        applied
    }
}
