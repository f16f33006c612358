// Licensed under the Apache-2.0 license

//! Cooperative delay primitives
//!
//! A [`Delay`] suspends the calling task for at least the requested duration
//! and lets other tasks (including whichever context delivers command
//! completions) run in the meantime.

use crate::error::{OsalError, OsalResult};
use core::time::Duration;

/// Suspend the calling task for a bounded amount of time.
pub trait Delay {
    fn delay(&self, duration: Duration) -> OsalResult<()>;
}

impl<D: Delay + ?Sized> Delay for &D {
    fn delay(&self, duration: Duration) -> OsalResult<()> {
        (**self).delay(duration)
    }
}

/// Delay backed by `std::thread::sleep`.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

#[cfg(feature = "std")]
impl Delay for StdDelay {
    fn delay(&self, duration: Duration) -> OsalResult<()> {
        sleep(duration)
    }
}

/// Delay for tick driven schedulers.
///
/// The requested duration is converted to scheduler ticks, rounding up, and
/// handed to the scheduler's own delay call. A zero duration still yields
/// for one tick so that a polling loop can never turn into a busy spin.
pub struct TickDelay<F>
where
    F: Fn(u32) -> OsalResult<()>,
{
    tick_period: Duration,
    delay_ticks: F,
}

impl<F> TickDelay<F>
where
    F: Fn(u32) -> OsalResult<()>,
{
    pub fn new(tick_period: Duration, delay_ticks: F) -> OsalResult<Self> {
        if tick_period.is_zero() {
            return Err(OsalError::InvalidParameter);
        }
        Ok(Self {
            tick_period,
            delay_ticks,
        })
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Number of ticks the scheduler is asked to wait for `duration`.
    pub fn ticks_for(&self, duration: Duration) -> u32 {
        let period = self.tick_period.as_nanos();
        let ticks = duration.as_nanos().div_ceil(period).max(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

impl<F> Delay for TickDelay<F>
where
    F: Fn(u32) -> OsalResult<()>,
{
    fn delay(&self, duration: Duration) -> OsalResult<()> {
        (self.delay_ticks)(self.ticks_for(duration))
    }
}

/// Sleep for specified duration
#[cfg(feature = "std")]
pub fn sleep(duration: Duration) -> OsalResult<()> {
    std::thread::sleep(duration);
    Ok(())
}
