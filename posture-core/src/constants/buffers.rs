//! Buffer Sizes
//!
//! Fixed capacities for the statically allocated queues.

/// Slots in the calibration command queue.
///
/// `heapless::spsc::Queue` keeps one slot free, so this holds three
/// pending commands. Calibration is idempotent, so more would only repeat work.
pub const COMMAND_QUEUE_CAPACITY: usize = 4;
