//! Supply/demand bookkeeping for resources and labor

use serde::{Deserialize, Serialize};

/// A supply/demand pair tracked per resource or labor kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commodity {
    pub supply: u32,
    pub demand: u32,
}

impl Commodity {
    pub fn new(supply: u32, demand: u32) -> Self {
        Self { supply, demand }
    }

    pub fn with_demand(demand: u32) -> Self {
        Self { supply: 0, demand }
    }

    /// Units still missing before supply meets demand
    pub fn shortfall(&self) -> u32 {
        self.demand.saturating_sub(self.supply)
    }

    pub fn is_satisfied(&self) -> bool {
        self.supply >= self.demand
    }

    /// Add up to the shortfall, returns amount actually added
    pub fn receive(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.shortfall());
        self.supply += accepted;
        accepted
    }

    /// Ratio of supply to demand, 1.0 when nothing is demanded
    pub fn fulfillment(&self) -> f64 {
        if self.demand == 0 {
            1.0
        } else {
            self.supply as f64 / self.demand as f64
        }
    }
}

/// One slice of a district population
///
/// Invariant: `busy <= current <= capacity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSegment {
    pub capacity: u32,
    pub current: u32,
    pub busy: u32,
}

impl PopulationSegment {
    pub fn full(capacity: u32) -> Self {
        Self {
            capacity,
            current: capacity,
            busy: 0,
        }
    }

    /// Residents not committed to any flux
    pub fn available(&self) -> u32 {
        self.current.saturating_sub(self.busy)
    }

    /// Commit up to `amount` residents, returns amount committed
    pub fn commit(&mut self, amount: u32) -> u32 {
        let committed = amount.min(self.available());
        self.busy += committed;
        committed
    }

    /// Change capacity, clamping `current` and `busy` to keep the invariant
    pub fn set_capacity(&mut self, capacity: u32) {
        self.capacity = capacity;
        self.current = self.current.min(capacity);
        self.busy = self.busy.min(self.current);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    pub total: PopulationSegment,
    pub workers: PopulationSegment,
    pub inactive: PopulationSegment,
}

impl Population {
    /// Fully settled population; half of it (rounded down) of working age
    pub fn settled(capacity: u32) -> Self {
        let workers = capacity / 2;
        Self {
            total: PopulationSegment::full(capacity),
            workers: PopulationSegment::full(workers),
            inactive: PopulationSegment::full(capacity - workers),
        }
    }

    /// Resize the total capacity, splitting it between workers and inactive
    pub fn resize(&mut self, capacity: u32) {
        let workers = capacity / 2;
        self.total.set_capacity(capacity);
        self.workers.set_capacity(workers);
        self.inactive.set_capacity(capacity - workers);
    }
}
