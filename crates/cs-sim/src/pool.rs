//! `ServerPool` — the booths of one subsection.

use cs_core::Tick;
use cs_schedule::{ScheduleProvider, ServerSpec};

use crate::{Passenger, ServerState, ServiceAgent};

#[derive(Clone, Debug)]
pub struct ServerPool {
    servers:   Vec<ServiceAgent>,
    max_queue: usize,
}

impl ServerPool {
    /// `specs` must be ordered by `ServerId`; `Roster::servers_in` is.
    pub fn new(specs: &[ServerSpec], max_queue: usize) -> Self {
        Self {
            servers: specs.iter().copied().map(ServiceAgent::new).collect(),
            max_queue,
        }
    }

    pub fn servers(&self) -> &[ServiceAgent] {
        &self.servers
    }

    /// Index of the booth that should receive the next passenger: online,
    /// queue below the cap, shortest queue, lowest id on ties.  `None` means
    /// no space anywhere.
    pub fn select(&self) -> Option<usize> {
        self.servers
            .iter()
            .enumerate()
            .filter(|(_, s)| s.has_space(self.max_queue))
            .min_by_key(|&(i, s)| (s.queue_len(), i))
            .map(|(i, _)| i)
    }

    pub(crate) fn enqueue(&mut self, index: usize, passenger: Passenger) {
        self.servers[index].enqueue(passenger);
    }

    /// Refresh every booth's on/off flag for `hour`.
    pub fn update_status<P: ScheduleProvider + ?Sized>(&mut self, schedule: &P, hour: u32) {
        for s in &mut self.servers {
            let online = schedule.is_online(s.spec(), hour);
            s.set_online(online);
        }
    }

    /// Run every booth's state machine, appending completions to `done`.
    pub(crate) fn serve(&mut self, now: Tick, done: &mut Vec<Passenger>) {
        done.extend(self.servers.iter_mut().filter_map(|s| s.serve(now)));
    }

    /// Number of online booths.
    pub fn online_count(&self) -> u32 {
        self.servers.iter().filter(|s| s.is_online()).count() as u32
    }

    /// Fraction of online booths currently serving; 0 with none online.
    pub fn utilization(&self) -> f64 {
        let online = self.online_count();
        if online == 0 {
            return 0.0;
        }
        let busy = self
            .servers
            .iter()
            .filter(|s| s.is_online() && s.state() == ServerState::Serving)
            .count();
        busy as f64 / online as f64
    }

    pub(crate) fn drain_waiting(&mut self) -> Vec<Passenger> {
        self.servers.iter_mut().flat_map(|s| s.drain_waiting()).collect()
    }
}
