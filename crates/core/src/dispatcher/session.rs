use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{animation::Animation, command::Intent, device::Device, Result};

/// One running animation task.
///
/// The task owns the device for as long as it runs and hands it back through
/// its [`JoinHandle`], so joining the task doubles as the cancellation
/// acknowledgment.
#[derive(Debug)]
pub(crate) struct Session<D> {
    intent: Intent,
    token: CancellationToken,
    handle: JoinHandle<D>,
}

impl<D: Device> Session<D> {
    pub(crate) fn start(intent: Intent, animation: Animation, device: D, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let handle = tokio::spawn(drive(animation, device, interval, token.clone()));
        debug!(%intent, ?interval, "animation session started");
        Self {
            intent,
            token,
            handle,
        }
    }

    pub(crate) fn intent(&self) -> &Intent {
        &self.intent
    }

    /// Cancels the task and waits for it to return the device.
    ///
    /// Dropping the returned future before it resolves leaves the session
    /// intact; calling `stop` again resumes the wait.
    pub(crate) async fn stop(&mut self) -> Result<D> {
        self.token.cancel();
        let device = (&mut self.handle).await?;
        debug!(intent = %self.intent, "animation session acknowledged cancellation");
        Ok(device)
    }
}

/// Tick loop of one animation. Cancellation is observed between ticks, never
/// in the middle of a frame.
async fn drive<D: Device>(
    mut animation: Animation,
    mut device: D,
    interval: Duration,
    token: CancellationToken,
) -> D {
    let kind = animation.kind();
    if token.is_cancelled() {
        return device;
    }
    if let Err(error) = animation.setup(&mut device) {
        warn!(?kind, %error, "animation setup could not be applied");
    }

    while !token.is_cancelled() {
        if let Err(error) = animation.advance(&mut device) {
            warn!(?kind, %error, "animation frame could not be applied");
        }

        tokio::select! {
            () = token.cancelled() => break,
            () = tokio::time::sleep(interval) => {}
        }
    }

    device
}
