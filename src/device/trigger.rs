use std::io::BufRead;
use std::thread;

use crate::model::layout::DebouncePolicy;

/// Binary user input read by polling (pressed / not pressed).
pub trait Trigger {
    fn is_pressed(&mut self) -> bool;
}

/// Reports pressed on the first poll; for unattended runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct Immediate;

impl Trigger for Immediate {
    fn is_pressed(&mut self) -> bool {
        true
    }
}

/// Treats a line on the reader (Enter on a terminal) as a button press.
///
/// The read blocks, so each poll lasts until a line or EOF arrives. EOF
/// counts as pressed so a closed stdin never stalls a run.
pub struct LineTrigger<R> {
    reader: R,
}

impl<R: BufRead> LineTrigger<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Trigger for LineTrigger<R> {
    fn is_pressed(&mut self) -> bool {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(error = %err, "trigger input unreadable; treating as pressed");
                true
            }
        }
    }
}

/// Polls `trigger` until it reports pressed, then holds off for the debounce
/// window. Returns the number of polls spent waiting.
pub fn wait_for_trigger<T: Trigger + ?Sized>(trigger: &mut T, policy: &DebouncePolicy) -> u64 {
    let mut polls = 0u64;
    loop {
        polls += 1;
        if trigger.is_pressed() {
            break;
        }
        thread::sleep(policy.poll_interval);
    }
    tracing::debug!(polls, debounce_ms = policy.debounce.as_millis() as u64, "trigger detected");
    thread::sleep(policy.debounce);
    polls
}
