//! Read-only view of the external day/night clock.
//!
//! The wall-clock timer itself lives outside the simulation and advances in
//! real time regardless of tick rate. The spawner reads it once per tick
//! through [`TimeSource`] and must tolerate it changing between ticks; no
//! synchronization is assumed.

/// Half of the 12-hour clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCycle {
    Am,
    Pm,
}

impl DayCycle {
    pub fn flip(self) -> Self {
        match self {
            DayCycle::Am => DayCycle::Pm,
            DayCycle::Pm => DayCycle::Am,
        }
    }
}

/// The clock interface the simulation consumes
pub trait TimeSource {
    /// Current hour on a 12-hour clock
    fn hours(&self) -> i32;
    /// Which half of the day the hour belongs to
    fn day_cycle(&self) -> DayCycle;
}

/// A plain sampled time value; doubles as the test clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: i32,
    pub cycle: DayCycle,
}

impl TimeOfDay {
    pub fn new(hours: i32, cycle: DayCycle) -> Self {
        Self { hours, cycle }
    }

    /// Sample an external source into a stable per-tick value
    pub fn sample(source: &impl TimeSource) -> Self {
        Self {
            hours: source.hours(),
            cycle: source.day_cycle(),
        }
    }

    /// Daytime runs from 6 AM through 6 PM; everything else is night
    pub fn is_day(&self) -> bool {
        (self.hours <= 6 && self.cycle == DayCycle::Pm)
            || (self.hours >= 6 && self.cycle == DayCycle::Am)
    }
}

impl TimeSource for TimeOfDay {
    fn hours(&self) -> i32 {
        self.hours
    }

    fn day_cycle(&self) -> DayCycle {
        self.cycle
    }
}
