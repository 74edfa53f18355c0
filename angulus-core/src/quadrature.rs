//! Quadrature position tracking
//!
//! Converts A/B channel edges into a signed pulse count that wraps within one
//! revolution. Every edge of both channels is counted (4x decoding), so one
//! encoder line produces four counts.
//!
//! The tracker is a plain state object: the platform decides when an edge
//! happened and which levels the two channels had at that moment, and hands
//! both to [`QuadratureTracker::on_edge`]. This keeps the decode table
//! testable without hardware.
//!
//! # Concurrency
//!
//! `on_edge` runs from the edge interrupt path and `read_position` from the
//! foreground loop. The count is a single atomic word; the update is one
//! read-modify-write, which `portable-atomic` lowers to an interrupt-free
//! critical section on cores without compare-and-swap (RP2040/ARMv6-M).

use portable_atomic::{AtomicI32, Ordering};

use crate::config::EncoderResolution;

/// Encoder channel that produced an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel A
    A,
    /// Channel B
    B,
}

/// Levels of both channels sampled when an edge was dispatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSample {
    /// Channel A level (true = high)
    pub a: bool,
    /// Channel B level (true = high)
    pub b: bool,
}

impl ChannelSample {
    /// Create a sample from raw levels
    pub const fn new(a: bool, b: bool) -> Self {
        Self { a, b }
    }
}

/// Rotation sense of a single count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Count up
    Forward,
    /// Count down
    Backward,
}

impl Direction {
    /// Signed count change for this direction
    pub const fn delta(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Decode the direction of one edge
///
/// | trigger | levels   | direction |
/// |---------|----------|-----------|
/// | A       | `a == b` | Forward   |
/// | A       | `a != b` | Backward  |
/// | B       | `a != b` | Forward   |
/// | B       | `a == b` | Backward  |
///
/// Swapping either row pair inverts the sense of rotation.
pub const fn decode(channel: Channel, sample: ChannelSample) -> Direction {
    let forward = match channel {
        Channel::A => sample.a == sample.b,
        Channel::B => sample.a != sample.b,
    };
    if forward {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// Fold a count back into `[-counts/2, counts/2)`
///
/// Single-step correction: valid for inputs at most one revolution outside
/// the range, which always holds when the count moves by one per edge.
pub const fn wrap_position(position: i32, counts_per_rev: i32) -> i32 {
    let half = counts_per_rev / 2;
    if position < -half {
        position + counts_per_rev
    } else if position >= half {
        position - counts_per_rev
    } else {
        position
    }
}

/// Interrupt-safe wrapped pulse counter
///
/// Meant to live in a `static` for the lifetime of the firmware:
///
/// ```
/// use angulus_core::config::RESOLUTION;
/// use angulus_core::quadrature::{Channel, ChannelSample, QuadratureTracker};
///
/// static TRACKER: QuadratureTracker = QuadratureTracker::new(RESOLUTION);
///
/// TRACKER.on_edge(Channel::B, ChannelSample::new(false, true));
/// assert_eq!(TRACKER.read_position(), 1);
/// ```
pub struct QuadratureTracker {
    position: AtomicI32,
    resolution: EncoderResolution,
}

impl QuadratureTracker {
    /// Create a tracker at position 0
    pub const fn new(resolution: EncoderResolution) -> Self {
        Self {
            position: AtomicI32::new(0),
            resolution,
        }
    }

    /// Apply one edge
    ///
    /// `sample` must hold the instantaneous levels of both channels, read
    /// after the edge on `channel` occurred.
    pub fn on_edge(&self, channel: Channel, sample: ChannelSample) {
        let delta = decode(channel, sample).delta();
        let counts = self.resolution.counts_per_rev();

        // The closure never returns None, so the update cannot fail.
        let _ = self
            .position
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |position| {
                Some(wrap_position(position + delta, counts))
            });
    }

    /// Current wrapped count in `[-P/2, P/2)`
    ///
    /// Read once per rendered frame; two reads may observe different values.
    pub fn read_position(&self) -> i32 {
        self.position.load(Ordering::Acquire)
    }

    /// Resolution the count wraps at
    pub const fn resolution(&self) -> EncoderResolution {
        self.resolution
    }
}
