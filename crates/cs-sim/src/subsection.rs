//! One processing lane: a FIFO waiting line feeding a pool of booths.

use std::collections::VecDeque;

use cs_core::{Category, Tick};
use cs_schedule::ServerSpec;

use crate::{Passenger, ServerPool};

// ── AssignmentAgent ───────────────────────────────────────────────────────────

/// Holds passengers who have not yet been placed in a booth queue.
///
/// Assignment is greedy and strictly FIFO: the head is placed as long as any
/// booth has room, and nothing behind the head ever overtakes it.
#[derive(Clone, Debug, Default)]
pub struct AssignmentAgent {
    waiting: VecDeque<Passenger>,
}

impl AssignmentAgent {
    pub(crate) fn push(&mut self, passenger: Passenger) {
        self.waiting.push_back(passenger);
    }

    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    /// Move passengers into booth queues until the line is empty or the
    /// pool is full.  Returns how many were placed.
    pub fn assign(&mut self, now: Tick, pool: &mut ServerPool) -> usize {
        let mut placed = 0;
        while !self.waiting.is_empty() {
            let Some(index) = pool.select() else { break };
            let Some(mut p) = self.waiting.pop_front() else { break };
            p.enqueue_tick = Some(now);
            pool.enqueue(index, p);
            placed += 1;
        }
        placed
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = Passenger> + '_ {
        self.waiting.drain(..)
    }
}

// ── Subsection ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Subsection {
    category:   Category,
    assignment: AssignmentAgent,
    pool:       ServerPool,
}

impl Subsection {
    pub fn new(category: Category, servers: &[ServerSpec], max_queue: usize) -> Self {
        Self {
            category,
            assignment: AssignmentAgent::default(),
            pool:       ServerPool::new(servers, max_queue),
        }
    }

    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn pool(&self) -> &ServerPool {
        &self.pool
    }

    pub(crate) fn pool_mut(&mut self) -> &mut ServerPool {
        &mut self.pool
    }

    pub fn waiting(&self) -> &AssignmentAgent {
        &self.assignment
    }

    pub(crate) fn admit(&mut self, passenger: Passenger) {
        self.assignment.push(passenger);
    }

    /// Assignment then service for one tick.
    pub(crate) fn step(&mut self, now: Tick, done: &mut Vec<Passenger>) {
        self.assignment.assign(now, &mut self.pool);
        self.pool.serve(now, done);
    }

    /// Passengers who never started service, line first then booth queues.
    pub(crate) fn drain_unstarted(&mut self) -> Vec<Passenger> {
        let mut out: Vec<Passenger> = self.assignment.drain().collect();
        out.extend(self.pool.drain_waiting());
        out
    }
}
