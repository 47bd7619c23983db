use super::{toggle, ON_LEVEL};
use crate::{
    device::{Device, DeviceError},
    topology::{Color, ARM_COUNT},
};

/// Walks the three arm slots in order.
///
/// The plain flavour flips between on and off every time it wraps, so the
/// slots light up one by one and then go dark one by one. The reset flavour
/// keeps a constant level and blanks the board before each step instead.
#[derive(Debug)]
struct Sweep {
    slot: usize,
    level: u8,
    reset: bool,
}

impl Sweep {
    fn new(reset: bool) -> Self {
        Self {
            slot: 0,
            level: ON_LEVEL,
            reset,
        }
    }

    fn step<D: Device>(
        &mut self,
        device: &mut D,
        draw: impl FnOnce(&mut D, usize, u8),
    ) -> Result<(), DeviceError> {
        if self.slot == ARM_COUNT {
            self.slot = 0;
            if !self.reset {
                self.level = toggle(self.level);
            }
        }

        let blanked = if self.reset { device.blank() } else { Ok(()) };
        draw(device, self.slot, self.level);
        let applied = device.apply();

        self.slot += 1;
        blanked.and(applied)
    }
}

/// Spins through the three LEDs of one color band.
#[derive(Debug)]
pub struct Spin {
    leds: [u8; ARM_COUNT],
    sweep: Sweep,
}

impl Spin {
    pub fn new(color: Color, reset: bool) -> Self {
        Self {
            leds: color.leds(),
            sweep: Sweep::new(reset),
        }
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        let leds = self.leds;
        self.sweep
            .step(device, |device, slot, level| device.set_led(leds[slot], level))
    }
}

/// Lights the arms in turn.
#[derive(Debug)]
pub struct Arms {
    sweep: Sweep,
}

impl Arms {
    pub fn new(reset: bool) -> Self {
        Self {
            sweep: Sweep::new(reset),
        }
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        self.sweep
            .step(device, |device, arm, level| device.set_arm(arm, level))
    }
}
