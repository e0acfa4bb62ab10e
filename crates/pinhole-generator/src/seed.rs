//! Numeric seeds fed to the base-62 encoder.

use crate::clock::{Clock, SystemClock};
use std::sync::atomic::{AtomicU64, Ordering};

/// A source of numeric seeds for short code generation.
///
/// Seeds only need to change between calls; uniqueness against storage is
/// checked by the caller.
pub trait SeedSource: Send + Sync + 'static {
    fn next_seed(&self) -> u64;
}

/// Seeds taken from the wall clock at nanosecond resolution.
///
/// Two calls never return the same seed within one instance: when the
/// clock has not moved (or moved backwards) since the last call, the
/// previous seed plus one is used instead.
#[derive(Debug)]
pub struct ClockSeed<C = SystemClock> {
    clock: C,
    last: AtomicU64,
}

impl ClockSeed<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for ClockSeed<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ClockSeed<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    fn clock_nanos(&self) -> u64 {
        let nanos = self.clock.now().as_nanosecond();
        u64::try_from(nanos.max(0)).unwrap_or(u64::MAX)
    }
}

impl<C: Clock + 'static> SeedSource for ClockSeed<C> {
    fn next_seed(&self) -> u64 {
        let now = self.clock_nanos();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.wrapping_add(1)))
            })
            // the closure always returns Some
            .unwrap_or_else(|last| last);
        now.max(previous.wrapping_add(1))
    }
}

/// Seeds from an in-process counter.
///
/// The counter never repeats within one instance. It is not persisted: for
/// several processes sharing a store, or a restart against a persistent
/// store, each run needs an offset past every value already issued.
#[derive(Debug)]
pub struct SequenceSeed {
    counter: AtomicU64,
}

impl Clone for SequenceSeed {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
        }
    }
}

impl SequenceSeed {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a counter starting from a specific value.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
        }
    }
}

impl Default for SequenceSeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedSource for SequenceSeed {
    fn next_seed(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}
