use thiserror::Error;

pub mod champion;
pub mod league;
pub mod matches;
pub mod spectator;
pub mod summoner;

#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Invalid type for field: {0}")]
    InvalidType(String),
    #[error("Malformed JSON: {0}")]
    Malformed(#[from] json::Error),
}
