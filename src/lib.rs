pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
pub mod messaging;
pub mod models;
pub mod server;
pub mod storage;
#[cfg(test)]
pub mod test_helpers;
