//! Calibration Command Queue
//!
//! ## Overview
//!
//! The calibration request arrives from the transport (a BLE write callback on
//! the reference hardware) at an arbitrary moment. Applying it directly from
//! that context could interleave with a half-finished tick, so the request is
//! queued instead and the control loop drains the queue at the start of each
//! pass:
//!
//! ```text
//! Transport callback                 Control loop
//!        ↓                                ↓
//!  CommandSender ──→ spsc ring ──→ CommandReceiver ──→ PostureEngine::poll
//!        ↓                                ↓
//!   Never blocks                    Drained between ticks
//! ```
//!
//! The ring is `heapless::spsc::Queue`: lock-free, statically sized, and
//! safe to split between an interrupt or callback context and the main loop.
//!
//! ```rust
//! use posture_core::command::{Command, CommandQueue, CommandSource};
//!
//! let mut queue: CommandQueue<4> = CommandQueue::new();
//! let (mut tx, mut rx) = queue.split();
//!
//! tx.request_calibration().unwrap();
//! assert_eq!(rx.next_command(), Some(Command::Calibrate));
//! assert_eq!(rx.next_command(), None);
//! ```

use heapless::spsc::{Consumer, Producer, Queue};

use crate::constants::COMMAND_QUEUE_CAPACITY;
use crate::errors::{PostureError, PostureResult};

/// External input to the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Capture the current angles as the new zero reference
    Calibrate,
}

/// Anything the engine can pull commands from
pub trait CommandSource {
    /// Next pending command, if any. Must not block.
    fn next_command(&mut self) -> Option<Command>;
}

/// Source that never yields a command
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCommands;

impl CommandSource for NoCommands {
    fn next_command(&mut self) -> Option<Command> {
        None
    }
}

/// Statically sized command ring
///
/// Holds `N - 1` commands.
pub struct CommandQueue<const N: usize = COMMAND_QUEUE_CAPACITY> {
    inner: Queue<Command, N>,
}

impl<const N: usize> CommandQueue<N> {
    /// Empty queue
    pub const fn new() -> Self {
        Self { inner: Queue::new() }
    }

    /// Split into the transport half and the control-loop half
    pub fn split(&mut self) -> (CommandSender<'_, N>, CommandReceiver<'_, N>) {
        let (producer, consumer) = self.inner.split();
        (CommandSender { producer, dropped: 0 }, CommandReceiver { consumer })
    }
}

impl<const N: usize> Default for CommandQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half, owned by the transport
pub struct CommandSender<'a, const N: usize> {
    producer: Producer<'a, Command, N>,
    dropped: u32,
}

impl<'a, const N: usize> CommandSender<'a, N> {
    /// Queue a command without blocking
    pub fn send(&mut self, command: Command) -> PostureResult<()> {
        self.producer.enqueue(command).map_err(|_| {
            self.dropped = self.dropped.saturating_add(1);
            log_warn!("Command queue full, dropping {:?}", command);
            PostureError::QueueFull
        })
    }

    /// Queue a [`Command::Calibrate`]
    pub fn request_calibration(&mut self) -> PostureResult<()> {
        self.send(Command::Calibrate)
    }

    /// Commands rejected because the ring was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

/// Consumer half, owned by the control loop
pub struct CommandReceiver<'a, const N: usize> {
    consumer: Consumer<'a, Command, N>,
}

impl<'a, const N: usize> CommandReceiver<'a, N> {
    /// Commands waiting
    pub fn len(&self) -> usize {
        self.consumer.len()
    }

    /// No command waiting
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, const N: usize> CommandSource for CommandReceiver<'a, N> {
    fn next_command(&mut self) -> Option<Command> {
        self.consumer.dequeue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_order() {
        let mut queue: CommandQueue<8> = CommandQueue::new();
        let (mut tx, mut rx) = queue.split();

        tx.request_calibration().unwrap();
        tx.request_calibration().unwrap();

        assert_eq!(rx.len(), 2);
        assert_eq!(rx.next_command(), Some(Command::Calibrate));
        assert_eq!(rx.next_command(), Some(Command::Calibrate));
        assert!(rx.is_empty());
    }

    #[test]
    fn full_queue_reports_and_counts() {
        let mut queue: CommandQueue<4> = CommandQueue::new();
        let (mut tx, _rx) = queue.split();

        // Capacity is N - 1
        for _ in 0..3 {
            tx.request_calibration().unwrap();
        }

        assert_eq!(tx.request_calibration(), Err(PostureError::QueueFull));
        assert_eq!(tx.dropped(), 1);
    }

    #[test]
    fn default_capacity_holds_three() {
        let mut queue: CommandQueue = CommandQueue::new();
        let (mut tx, _rx) = queue.split();

        for _ in 0..COMMAND_QUEUE_CAPACITY - 1 {
            tx.request_calibration().unwrap();
        }
        assert!(tx.request_calibration().is_err());
    }

    #[test]
    fn no_commands_is_empty() {
        assert_eq!(NoCommands.next_command(), None);
    }
}
