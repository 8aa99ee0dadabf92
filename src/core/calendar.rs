//! Calendar system for the simulation clock
//!
//! One tick is one simulated hour. Hours roll into days, days into years.

use serde::{Deserialize, Serialize};

use crate::simulation::events::SimulationEvent;

pub const HOURS_PER_DAY: u32 = 24;
pub const DAYS_PER_YEAR: u32 = 365;

/// Snapshot of the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationTime {
    pub year: u32,
    /// 0..365
    pub day: u32,
    /// 0..24
    pub hour: u32,
    /// Hours elapsed since the start
    pub total_hours: u64,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            year: 1,
            day: 0,
            hour: 0,
            total_hours: 0,
        }
    }
}

/// Discrete hour/day/year clock driving the tick cadence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeKeeper {
    time: SimulationTime,
}

impl TimeKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one hour and emit the new time state
    pub fn tick(&mut self, events: &mut Vec<SimulationEvent>) {
        self.advance();
        events.push(SimulationEvent::TimeUpdate(self.time));
    }

    pub fn advance(&mut self) {
        self.time.total_hours += 1;
        self.time.hour += 1;

        if self.time.hour >= HOURS_PER_DAY {
            self.time.hour = 0;
            self.time.day += 1;
        }

        if self.time.day >= DAYS_PER_YEAR {
            self.time.day = 0;
            self.time.year += 1;
        }
    }

    pub fn time(&self) -> SimulationTime {
        self.time
    }

    pub fn total_hours(&self) -> u64 {
        self.time.total_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_year_one() {
        let keeper = TimeKeeper::new();
        assert_eq!(
            keeper.time(),
            SimulationTime { year: 1, day: 0, hour: 0, total_hours: 0 }
        );
    }

    #[test]
    fn test_hour_rolls_into_day() {
        let mut keeper = TimeKeeper::new();
        for _ in 0..23 {
            keeper.advance();
        }
        assert_eq!(keeper.time().hour, 23);
        assert_eq!(keeper.time().day, 0);

        keeper.advance();
        assert_eq!(keeper.time().hour, 0);
        assert_eq!(keeper.time().day, 1);
    }

    #[test]
    fn test_one_year_of_ticks() {
        let mut keeper = TimeKeeper::new();
        for _ in 0..8760 {
            keeper.advance();
        }
        let time = keeper.time();
        assert_eq!(time.year, 2);
        assert_eq!(time.day, 0);
        assert_eq!(time.hour, 0);
        assert_eq!(time.total_hours, 8760);
    }

    #[test]
    fn test_tick_emits_time_update() {
        let mut keeper = TimeKeeper::new();
        let mut events = Vec::new();
        keeper.tick(&mut events);

        assert_eq!(events.len(), 1);
        match &events[0] {
            SimulationEvent::TimeUpdate(time) => assert_eq!(time.total_hours, 1),
            other => panic!("unexpected event {:?}", other),
        }
    }
}
