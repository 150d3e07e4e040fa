//! # passkeeper-cli
//!
//! Terminal front-end for PassKeeper. Collects credentials, screens empty
//! input and reports the store's answer.

pub mod adapter;
pub mod config;

pub use adapter::{Feedback, LoginForm};
