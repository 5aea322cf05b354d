use tokio_util::sync::CancellationToken;

/// Handle for the single controls-hide delay of one session.
///
/// Re-arming cancels the previous delay task and bumps the epoch; an
/// expiry that reports a stale epoch belongs to a cancelled delay and
/// must be ignored. At most one delay is armed at a time, so no state is
/// ever derived from overlapping timers.
pub(crate) struct ControlsTimer {
    epoch: u64,
    armed: Option<CancellationToken>,
}

impl ControlsTimer {
    pub(crate) fn new() -> Self {
        Self {
            epoch: 0,
            armed: None,
        }
    }

    /// Cancel any armed delay and hand out the epoch + token for the
    /// next one. Tokens are children of the session token, so session
    /// cancellation kills an armed delay too.
    pub(crate) fn arm(&mut self, session: &CancellationToken) -> (u64, CancellationToken) {
        self.disarm();
        self.epoch += 1;
        let token = session.child_token();
        self.armed = Some(token.clone());
        (self.epoch, token)
    }

    /// Cancel the armed delay, if any.
    pub(crate) fn disarm(&mut self) {
        if let Some(token) = self.armed.take() {
            token.cancel();
        }
    }

    /// `true` while `expiry_epoch` names the currently armed delay.
    pub(crate) fn is_current(&self, expiry_epoch: u64) -> bool {
        self.armed.is_some() && self.epoch == expiry_epoch
    }
}
