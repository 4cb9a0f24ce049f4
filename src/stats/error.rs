//! Statistics engine errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// Window bounds are inverted or the period kind is unknown
    #[error("Malformed window: {0}")]
    MalformedWindow(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
