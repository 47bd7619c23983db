use std::io::{self, Write};

use super::{Device, DeviceError, Frame};

/// Text-mode stand-in for the board: every committed frame is written to the
/// wrapped writer as one line, arms separated by `|`.
#[derive(Debug)]
pub struct ConsoleDevice<W> {
    pending: Frame,
    out: W,
}

impl ConsoleDevice<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleDevice<W> {
    pub fn new(out: W) -> Self {
        Self {
            pending: Frame::new(),
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> Device for ConsoleDevice<W> {
    fn set_led(&mut self, led: u8, brightness: u8) {
        self.pending.set(led, brightness);
    }

    fn apply(&mut self) -> Result<(), DeviceError> {
        writeln!(self.out, "{}", self.pending)?;
        self.out.flush()?;
        Ok(())
    }
}
