pub mod champion;
pub mod credential;
pub mod game;
pub mod ids;
pub mod partial;
pub mod region;
pub mod riot;
pub mod summoner;
