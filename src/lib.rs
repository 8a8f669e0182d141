//! owobot — watches an account and reposts everything it says, but owo.

pub mod bot;
pub mod config;
pub mod error;
pub mod logging;
pub mod owo;
pub mod platform;
pub mod thread;
