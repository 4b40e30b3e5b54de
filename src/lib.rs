pub mod config;
pub mod graphql;
pub mod model;
pub mod server;
pub mod service;
