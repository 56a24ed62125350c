use cs_core::{Category, CoreError, PassengerId, ServerId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("hour windows do not tile the day: {0}")]
    WindowCoverage(String),

    #[error("hour {0} is outside the 24-hour day")]
    HourOutOfRange(u32),

    #[error("no subsection configured for category {0}")]
    UnknownSubsection(Category),

    #[error("server {0} listed more than once")]
    DuplicateServer(ServerId),

    #[error("passenger {0} listed more than once in the manifest")]
    DuplicatePassenger(PassengerId),

    #[error("{category} staffing maximum {max} exceeds the {available} servers on the roster")]
    Capacity {
        category:  Category,
        max:       u32,
        available: u32,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
