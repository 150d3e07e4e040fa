//! User records held by the credential store

mod types;

pub use types::*;
