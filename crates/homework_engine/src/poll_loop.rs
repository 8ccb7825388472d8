use std::collections::VecDeque;
use std::time::Duration;

use bot_logging::{bot_critical, bot_debug, bot_error};
use homework_core::{update, ClassifiedError, Effect, Msg, PollState, Severity};

use crate::{Messenger, Notifier, Pacer, StatusSource};

/// Fixed wait between iterations; doubles as the retry backoff.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Continue,
    Abort(ClassifiedError),
}

/// Drives poll -> validate -> detect -> translate -> notify, then sleeps.
pub struct PollLoop<S, M, P> {
    source: S,
    notifier: Notifier<M>,
    pacer: P,
    state: PollState,
}

impl<S, M, P> PollLoop<S, M, P>
where
    S: StatusSource,
    M: Messenger,
    P: Pacer,
{
    pub fn new(source: S, notifier: Notifier<M>, pacer: P, state: PollState) -> Self {
        Self {
            source,
            notifier,
            pacer,
            state,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Runs until a fatal failure, which is returned. The pacer runs once after
    /// every non-fatal iteration, whatever stage failed.
    pub async fn run(&mut self) -> ClassifiedError {
        loop {
            if let Control::Abort(err) = self.run_iteration().await {
                return err;
            }
            self.pacer.pause(RETRY_INTERVAL).await;
        }
    }

    /// One poll cycle without the trailing pause.
    pub async fn run_iteration(&mut self) -> Control {
        let polled = self.source.poll(self.state.last_poll_timestamp()).await;
        let mut inbox = VecDeque::from([Msg::Polled(polled)]);

        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                match effect {
                    Effect::Notify { text, observed } => {
                        let msg = match self.notifier.notify(&text, self.state.last_sent()).await
                        {
                            Ok(outcome) => Msg::Notified { outcome, observed },
                            Err(err) => Msg::NotifyFailed(err),
                        };
                        inbox.push_back(msg);
                    }
                    Effect::Unchanged { name, updated_at } => match updated_at {
                        Some(at) => bot_debug!(
                            "Status unchanged for submission \"{}\" (updated {})",
                            name,
                            at.to_rfc3339()
                        ),
                        None => bot_debug!("Status unchanged for submission \"{}\"", name),
                    },
                    Effect::Report(classified) => report(&classified),
                    Effect::Abort(classified) => {
                        bot_critical!("Stopping bot: {}", classified);
                        return Control::Abort(classified);
                    }
                }
            }
        }

        Control::Continue
    }
}

fn report(classified: &ClassifiedError) {
    match classified.severity() {
        Severity::Debug => bot_debug!("Program failure: {}", classified),
        Severity::Error => bot_error!("Program failure: {}", classified),
        Severity::Critical => bot_critical!("Program failure: {}", classified),
    }
}
