use cs_core::{Category, CoreError, PassengerId};
use cs_schedule::ScheduleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("passenger {passenger} has category {category} but no subsection serves it")]
    UnroutableCategory {
        passenger: PassengerId,
        category:  Category,
    },

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type SimResult<T> = Result<T, SimError>;
