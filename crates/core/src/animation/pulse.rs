use crate::device::{Device, DeviceError};

const FLOOR: u8 = 2;
const CEILING: u8 = 30;
const STEP: u8 = 2;

/// Breathes every LED between [`FLOOR`] and [`CEILING`].
#[derive(Debug)]
pub struct Pulse {
    level: u8,
    brightening: bool,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pulse {
    pub fn new() -> Self {
        Self {
            level: FLOOR,
            brightening: true,
        }
    }

    pub fn advance<D: Device>(&mut self, device: &mut D) -> Result<(), DeviceError> {
        if self.level >= CEILING {
            self.brightening = false;
        }
        if self.level <= FLOOR {
            self.brightening = true;
        }

        device.set_all(self.level);
        let applied = device.apply();

        if self.brightening {
            self.level += STEP;
        } else {
            self.level -= STEP;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::MemoryDevice;

    #[test]
    fn breathes_between_floor_and_ceiling() {
        let mut device = MemoryDevice::new();
        let journal = device.journal();
        let mut pulse = Pulse::new();

        for _ in 0..60 {
            pulse.advance(&mut device).unwrap();
        }

        let levels: Vec<u8> = journal
            .frames()
            .iter()
            .map(|frame| {
                let level = frame.levels()[0];
                assert!(frame.levels().iter().all(|&l| l == level));
                level
            })
            .collect();

        let up: Vec<u8> = (1..=15).map(|i| i * 2).collect();
        let down: Vec<u8> = (1..=14).rev().map(|i| i * 2).collect();
        assert_eq!(&levels[..15], up.as_slice());
        assert_eq!(&levels[15..29], down.as_slice());
        // the floor is shared between the way down and the next way up
        assert_eq!(&levels[29..43], &up[1..]);
        assert!(levels.iter().all(|&l| (FLOOR..=CEILING).contains(&l)));
    }
}
