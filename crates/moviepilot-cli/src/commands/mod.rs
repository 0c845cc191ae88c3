pub mod config;
pub mod login;
pub mod progress;
pub mod search;
pub mod subscribe;

#[cfg(test)]
pub mod stub;
