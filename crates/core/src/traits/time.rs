//! Time abstraction for the autonomous run timer.
//!
//! The host owns the tick cadence, so the core never sleeps or schedules;
//! it only needs to measure how long the current autonomous run has been
//! active. `TimeSource` abstracts over the platform clock so that logic can
//! be tested on the host with a controllable [`MockTime`].

use core::cell::Cell;

/// Monotonic time source.
///
/// Implementations report microseconds since an arbitrary epoch (typically
/// system start). The core only ever compares readings against a reference
/// captured earlier in the same process, so the epoch does not matter.
pub trait TimeSource {
    /// Returns current time in microseconds since the epoch.
    fn now_us(&self) -> u64;

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction so a reference from the "future" reads
    /// as zero elapsed rather than wrapping.
    fn elapsed_us_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }

    /// Returns elapsed time in seconds since a reference point.
    fn elapsed_seconds_since(&self, reference_us: u64) -> f32 {
        self.elapsed_us_since(reference_us) as f32 / 1_000_000.0
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source with controllable time advancement.
///
/// Lets tests step the clock explicitly, so timer-gated behavior (the
/// elapsed-time autonomous stop policy) is deterministic.
///
/// # Example
///
/// ```
/// use trailcart_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let start = time.now_us();
/// time.advance(4_500_000); // 4.5 s
/// assert!((time.elapsed_seconds_since(start) - 4.5).abs() < 1e-6);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
