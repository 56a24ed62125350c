use cs_schedule::ScheduleError;
use cs_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("optimizer configuration error: {0}")]
    Config(String),

    #[error("simulation failed: {0}")]
    Sim(#[from] SimError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type OptimizeResult<T> = Result<T, OptimizeError>;
