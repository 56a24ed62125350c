//! `ServiceAgent` — one staffed booth and its queue.
//!
//! # State machine
//!
//! ```text
//!            queue non-empty && online
//!   Idle ───────────────────────────────▶ Serving
//!    ▲                                      │
//!    └──────── now == completion_tick ──────┘
//! ```
//!
//! Completion is checked first in [`ServiceAgent::serve`], so a booth that
//! finishes a passenger can start the next one on the same tick.  Going
//! offline never interrupts service in progress; it only stops the booth from
//! taking new queue entries and from starting the next passenger.

use std::collections::VecDeque;

use cs_core::{ServerId, Tick};
use cs_schedule::ServerSpec;

use crate::Passenger;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Serving,
}

#[derive(Clone, Debug)]
pub struct ServiceAgent {
    spec:       ServerSpec,
    online:     bool,
    queue:      VecDeque<Passenger>,
    in_service: Option<(Passenger, Tick)>,
}

impl ServiceAgent {
    pub fn new(spec: ServerSpec) -> Self {
        Self {
            spec,
            online:     false,
            queue:      VecDeque::new(),
            in_service: None,
        }
    }

    #[inline]
    pub fn id(&self) -> ServerId {
        self.spec.id
    }

    #[inline]
    pub fn spec(&self) -> &ServerSpec {
        &self.spec
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.online
    }

    #[inline]
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    #[inline]
    pub fn state(&self) -> ServerState {
        if self.in_service.is_some() { ServerState::Serving } else { ServerState::Idle }
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Can this booth accept one more passenger into its queue?
    #[inline]
    pub fn has_space(&self, max_queue: usize) -> bool {
        self.online && self.queue.len() < max_queue
    }

    /// Append to the back of the queue.  Callers check [`has_space`] first.
    ///
    /// [`has_space`]: ServiceAgent::has_space
    pub(crate) fn enqueue(&mut self, passenger: Passenger) {
        self.queue.push_back(passenger);
    }

    /// The passenger being served and their completion tick.
    pub fn in_service(&self) -> Option<(&Passenger, Tick)> {
        self.in_service.as_ref().map(|(p, t)| (p, *t))
    }

    /// Advance the state machine by one tick.
    ///
    /// Returns the passenger whose service completed at `now`, if any.
    pub fn serve(&mut self, now: Tick) -> Option<Passenger> {
        let completed = if self.in_service.as_ref().is_some_and(|&(_, done)| done == now) {
            self.in_service.take().map(|(mut p, _)| {
                p.finish();
                p
            })
        } else {
            None
        };

        if self.in_service.is_none() && self.online {
            if let Some(mut next) = self.queue.pop_front() {
                let done = next.begin_service(now);
                self.in_service = Some((next, done));
            }
        }

        completed
    }

    /// Remove every passenger who has not started service, in queue order.
    pub(crate) fn drain_waiting(&mut self) -> impl Iterator<Item = Passenger> + '_ {
        self.queue.drain(..)
    }
}
