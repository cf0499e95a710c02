use super::{Workbench, MAX_MESSAGE_DRAIN_PER_TICK};
use crate::kernel::Action;
use std::sync::mpsc;
use std::time::Instant;

impl Workbench {
    /// Drives the core from the shell's event loop: applies finished work,
    /// then fires due debounce timers. Returns whether anything changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut changed = self.poll_messages();
        changed |= self.dispatch_kernel(Action::Tick { now });
        changed
    }

    fn poll_messages(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGE_DRAIN_PER_TICK {
            match self.rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("message channel disconnected");
                    break;
                }
            }
        }
        changed
    }
}
