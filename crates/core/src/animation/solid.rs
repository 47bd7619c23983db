use crate::{
    command::Target,
    device::{Device, DeviceError},
};

const LEVEL: u8 = 8;

/// Static picture drawn once at setup. Ticks never touch the device.
#[derive(Debug)]
pub struct Solid {
    target: Target,
}

impl Solid {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    pub fn target(&self) -> Target {
        self.target
    }

    pub fn setup<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        match self.target {
            Target::Band(color) => device.set_band(color, LEVEL),
            Target::All => device.set_all(LEVEL),
            Target::Clear => {}
            Target::Led(led) => device.set_led(led, LEVEL),
        }
        device.apply()
    }

    pub fn advance<D: Device>(&mut self, _device: &mut D) -> Result<(), DeviceError> {
        Ok(())
    }
}
