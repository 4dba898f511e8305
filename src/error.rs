use thiserror::Error;

pub type BoidsResult<T> = Result<T, BoidsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoidsError {
    #[error("division by zero")]
    DivideByZero,

    #[error("unit vector of a zero-magnitude vector is undefined")]
    UndefinedDirection,

    #[error("insufficient agents: need {need}, have {have}")]
    InsufficientAgents { need: usize, have: usize },

    #[error("agent index {index} out of range for snapshot of {len}")]
    AgentOutOfRange { index: usize, len: usize },

    #[error("invalid boundary on {axis} axis: min {min} > max {max}")]
    InvalidBoundary { axis: char, min: f64, max: f64 },

    #[error("invalid obstacle: {0}")]
    InvalidObstacle(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for BoidsError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
