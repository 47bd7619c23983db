//! Command dispatcher.
//!
//! The dispatcher owns the single device handle. It lends the handle to at
//! most one animation task at a time and only gets it back once that task
//! has stopped, so two animations can never write to the board concurrently.

use std::mem;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    animation::Animation,
    command::{self, Intent},
    config::PacingConfig,
    device::Device,
    AnimatorError, Result,
};

mod session;

use session::Session;

enum State<D> {
    /// No animation is running; the dispatcher holds the device.
    Idle(D),
    /// An animation task holds the device.
    Running(Session<D>),
    /// The device was not returned by a failed session.
    Vacant,
}

/// Serial command loop driving one device.
pub struct Dispatcher<D> {
    pacing: PacingConfig,
    state: State<D>,
}

impl<D: Device> Dispatcher<D> {
    /// Blanks the device and takes ownership of it. A device that cannot be
    /// blanked is unusable, so the failure is returned as
    /// [`AnimatorError::DeviceInit`].
    pub fn new(mut device: D, pacing: PacingConfig) -> Result<Self> {
        device.blank().map_err(AnimatorError::DeviceInit)?;
        Ok(Self {
            pacing,
            state: State::Idle(device),
        })
    }

    /// Intent of the animation currently running, if any.
    pub fn active_intent(&self) -> Option<&Intent> {
        match &self.state {
            State::Running(session) => Some(session.intent()),
            _ => None,
        }
    }

    /// Stops the running animation, blanks the board and starts the animation
    /// described by `raw`.
    ///
    /// Unrecognised commands are not errors; see [`command::parse`].
    pub async fn dispatch(&mut self, raw: &str) -> Result<Intent> {
        let mut device = self.reclaim().await?;

        if let Err(error) = device.blank() {
            warn!(%error, "couldn't blank the device before the next animation");
        }

        let intent = command::parse(raw);
        info!(command = raw, %intent, "starting animation");

        let animation = Animation::from_intent(&intent);
        let interval = self.pacing.interval(animation.kind());
        self.state = State::Running(Session::start(intent, animation, device, interval));
        Ok(intent)
    }

    /// Dispatches commands in arrival order until the channel closes. The
    /// last animation keeps running afterwards.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<String>) -> Result<()> {
        while let Some(raw) = commands.recv().await {
            self.dispatch(&raw).await?;
        }
        debug!("command channel closed");
        Ok(())
    }

    /// Stops the running animation, leaves the board dark and returns the
    /// device.
    pub async fn shutdown(mut self) -> Result<D> {
        let mut device = self.reclaim().await?;
        device.blank().map_err(AnimatorError::DeviceApply)?;
        info!("dispatcher shut down");
        Ok(device)
    }

    /// Takes the device back, waiting for the running session to stop first.
    ///
    /// Cancel-safe: the session stays recorded until its task has returned
    /// the device.
    async fn reclaim(&mut self) -> Result<D> {
        if let State::Running(session) = &mut self.state {
            let stopped = session.stop().await;
            self.state = State::Vacant;
            return stopped;
        }

        match mem::replace(&mut self.state, State::Vacant) {
            State::Idle(device) => Ok(device),
            _ => Err(AnimatorError::DeviceLost),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            atomic::{AtomicBool, Ordering},
            Arc,
        },
        time::Duration,
    };

    use tokio::time::sleep;

    use super::*;
    use crate::{
        command::{AnimationKind, Target},
        device::{DeviceError, Journal, MemoryDevice},
        topology::Color,
    };

    fn dispatcher() -> (Dispatcher<MemoryDevice>, Journal) {
        let device = MemoryDevice::new();
        let journal = device.journal();
        let dispatcher = Dispatcher::new(device, PacingConfig::default()).unwrap();
        (dispatcher, journal)
    }

    #[tokio::test(start_paused = true)]
    async fn starts_from_a_blank_board() {
        let (dispatcher, journal) = dispatcher();
        assert_eq!(journal.apply_count(), 1);
        assert!(journal.last_frame().unwrap().is_dark());
        assert!(dispatcher.active_intent().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_initial_blank_is_fatal() {
        let device = MemoryDevice::new();
        device.journal().set_failing(true);

        let result = Dispatcher::new(device, PacingConfig::default());
        assert!(matches!(result, Err(AnimatorError::DeviceInit(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn blanks_once_between_consecutive_commands() {
        let (mut dispatcher, journal) = dispatcher();

        dispatcher.dispatch("cycle").await.unwrap();
        sleep(Duration::from_millis(250)).await;
        let before_red = journal.apply_count();
        assert_eq!(before_red, 2 + 3);

        dispatcher.dispatch("red").await.unwrap();
        // only the blank has been committed so far
        assert_eq!(journal.apply_count(), before_red + 1);
        assert!(journal.last_frame().unwrap().is_dark());

        sleep(Duration::from_millis(500)).await;
        assert_eq!(journal.apply_count(), before_red + 2);
        let red = journal.last_frame().unwrap();
        assert_eq!(red.lit(), vec![0, 6, 17]);
        assert!(red.lit().iter().all(|&led| red.get(led) == Some(8)));

        // solid keeps the board untouched until the next command
        sleep(Duration::from_secs(2)).await;
        assert_eq!(journal.apply_count(), before_red + 2);

        dispatcher.dispatch("arms").await.unwrap();
        assert!(journal.last_frame().unwrap().is_dark());
        assert_eq!(journal.apply_count(), before_red + 3);

        sleep(Duration::from_millis(50)).await;
        assert_eq!(journal.last_frame().unwrap().lit().len(), 6);
        assert_eq!(
            dispatcher.active_intent(),
            Some(&Intent::new(AnimationKind::Arms))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn preempted_animation_never_writes_again() {
        let (mut dispatcher, journal) = dispatcher();

        dispatcher.dispatch("pulse").await.unwrap();
        sleep(Duration::from_millis(1_000)).await;
        dispatcher.dispatch("bluespin2").await.unwrap();
        let blank = journal.frames().len() - 1;
        sleep(Duration::from_millis(1_000)).await;

        let frames = journal.frames();
        assert!(frames[blank].is_dark());
        // pulse lights every LED, the reset spin never more than one
        assert!(frames[blank..].iter().all(|frame| frame.lit().len() <= 1));
        assert!(frames.len() > blank + 10);
    }

    #[tokio::test(start_paused = true)]
    async fn shimmer_is_stopped_before_the_next_setup() {
        let (mut dispatcher, journal) = dispatcher();

        dispatcher.dispatch("shimmer").await.unwrap();
        sleep(Duration::from_millis(95)).await;
        dispatcher.dispatch("all").await.unwrap();
        sleep(Duration::from_millis(500)).await;

        let frames = journal.frames();
        let all = frames.last().unwrap();
        assert_eq!(all.lit().len(), 18);
        assert!(all.levels().iter().all(|&level| level == 8));
        assert!(frames[frames.len() - 2].is_dark());
    }

    #[tokio::test(start_paused = true)]
    async fn runs_commands_from_a_channel_in_order() {
        let (mut dispatcher, journal) = dispatcher();
        let (tx, rx) = mpsc::channel(4);

        for command in ["cycle", "red", "greenspin"] {
            tx.send(command.to_string()).await.unwrap();
        }
        drop(tx);

        dispatcher.run(rx).await.unwrap();
        assert_eq!(
            dispatcher.active_intent(),
            Some(&Intent::spin(Color::Green, false))
        );

        sleep(Duration::from_millis(250)).await;
        assert_eq!(journal.last_frame().unwrap().lit(), vec![3, 5, 13]);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_commands_light_a_fallback_led() {
        let (mut dispatcher, journal) = dispatcher();

        let intent = dispatcher.dispatch("xyz-unknown").await.unwrap();
        assert_eq!(intent, Intent::solid(Target::Led(11)));

        sleep(Duration::from_millis(10)).await;
        assert_eq!(journal.last_frame().unwrap().lit(), vec![11]);
    }

    #[tokio::test(start_paused = true)]
    async fn apply_failures_while_animating_are_tolerated() {
        let (mut dispatcher, journal) = dispatcher();

        dispatcher.dispatch("cycle").await.unwrap();
        journal.set_failing(true);
        sleep(Duration::from_millis(550)).await;
        let committed = journal.apply_count();
        assert!(journal.attempts() > committed);

        journal.set_failing(false);
        sleep(Duration::from_millis(300)).await;
        assert!(journal.apply_count() > committed);

        dispatcher.dispatch("pulse").await.unwrap();
        assert_eq!(
            dispatcher.active_intent(),
            Some(&Intent::new(AnimationKind::Pulse))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_returns_a_dark_device() {
        let (mut dispatcher, journal) = dispatcher();

        dispatcher.dispatch("bounce2").await.unwrap();
        sleep(Duration::from_millis(330)).await;
        let device = dispatcher.shutdown().await.unwrap();

        let count = journal.apply_count();
        sleep(Duration::from_secs(1)).await;
        assert_eq!(journal.apply_count(), count);
        assert!(journal.last_frame().unwrap().is_dark());
        assert_eq!(device.journal().apply_count(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_dispatch_keeps_the_session() {
        let (mut dispatcher, _journal) = dispatcher();

        dispatcher.dispatch("pulse").await.unwrap();
        // poll the dispatch future once and drop it while it waits
        tokio::select! {
            biased;
            _ = dispatcher.dispatch("cycle") => panic!("dispatch should not finish synchronously"),
            () = std::future::ready(()) => {}
        }
        assert!(dispatcher.active_intent().is_some());

        dispatcher.dispatch("cycle").await.unwrap();
        assert_eq!(
            dispatcher.active_intent(),
            Some(&Intent::new(AnimationKind::Cycle))
        );
    }

    /// Panics on apply once armed.
    struct Tripwire(Arc<AtomicBool>);

    impl Device for Tripwire {
        fn set_led(&mut self, _led: u8, _brightness: u8) {}

        fn apply(&mut self) -> std::result::Result<(), DeviceError> {
            if self.0.load(Ordering::SeqCst) {
                panic!("device tripped");
            }
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_session_loses_the_device() {
        let armed = Arc::new(AtomicBool::new(false));
        let mut dispatcher =
            Dispatcher::new(Tripwire(armed.clone()), PacingConfig::default()).unwrap();

        dispatcher.dispatch("cycle").await.unwrap();
        armed.store(true, Ordering::SeqCst);
        sleep(Duration::from_millis(150)).await;

        let err = dispatcher.dispatch("red").await.unwrap_err();
        assert!(matches!(err, AnimatorError::SessionAborted(_)));
        let err = dispatcher.dispatch("red").await.unwrap_err();
        assert!(matches!(err, AnimatorError::DeviceLost));
    }
}
