use super::ON_LEVEL;
use crate::{
    device::{Device, DeviceError},
    topology::{ARM_COUNT, RADIAL_ORDER},
};

const LAST: usize = RADIAL_ORDER.len() - 1;

/// Ping-pongs a lit band between the center and the tips of the arms.
///
/// In single-arm mode only one arm's LED of the band is lit, and the arm
/// moves on each time the band returns to the center.
#[derive(Debug)]
pub struct Bounce {
    index: usize,
    outward: bool,
    arm: usize,
    single_arm: bool,
}

impl Bounce {
    pub fn new(single_arm: bool) -> Self {
        Self {
            index: 0,
            outward: true,
            arm: 0,
            single_arm,
        }
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        if self.index == LAST {
            self.outward = false;
        }
        if self.index == 0 {
            self.outward = true;
            if self.single_arm {
                self.arm = (self.arm + 1) % ARM_COUNT;
            }
        }

        let blanked = device.blank();
        for (arm, led) in RADIAL_ORDER[self.index].leds().into_iter().enumerate() {
            if !self.single_arm || arm == self.arm {
                device.set_led(led, ON_LEVEL);
            }
        }
        let applied = device.apply();

        if self.outward {
            self.index += 1;
        } else {
            self.index -= 1;
        }
        blanked.and(applied)
    }
}
