//! Core library for the PiGlow animator.
//!
//! Raw text commands are parsed into [`Intent`]s by the [`command`]
//! interpreter. The [`Dispatcher`] owns the [`Device`] and runs one
//! [`Animation`] at a time as its own tokio task, stopping the previous one
//! before the board is blanked and the next one starts.

pub mod animation;
pub mod command;
pub mod config;
pub mod device;
pub mod dispatcher;
pub mod error;
pub mod source;
pub mod topology;

pub use animation::Animation;
pub use command::{parse, AnimationKind, Intent, Target};
pub use config::{AppConfig, PacingConfig, QueueConfig};
pub use device::{ConsoleDevice, Device, DeviceError, Frame, Journal, MemoryDevice};
pub use dispatcher::Dispatcher;
pub use error::{AnimatorError, Result};
pub use source::{CommandSource, QueuePoller};
pub use topology::{Color, ARM_COUNT, LED_COUNT, RADIAL_ORDER};
