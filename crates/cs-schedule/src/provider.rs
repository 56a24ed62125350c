//! The `ScheduleProvider` seam between staffing data and the tick loop.

use crate::roster::ServerSpec;

/// Answers "is this booth staffed during this hour?".
///
/// # Contract
///
/// - Must be a pure, non-blocking lookup: it is called for every server on
///   every tick.
/// - Servers the provider knows nothing about are offline.
pub trait ScheduleProvider {
    fn is_online(&self, server: &ServerSpec, hour: u32) -> bool;
}

impl<P: ScheduleProvider + ?Sized> ScheduleProvider for &P {
    #[inline]
    fn is_online(&self, server: &ServerSpec, hour: u32) -> bool {
        (**self).is_online(server, hour)
    }
}

/// Every server online at every hour.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl ScheduleProvider for AlwaysOnline {
    #[inline]
    fn is_online(&self, _server: &ServerSpec, _hour: u32) -> bool {
        true
    }
}
