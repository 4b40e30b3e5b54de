#[cfg(test)]
pub mod fake;
pub mod parsing;
pub mod riot_api_client;
