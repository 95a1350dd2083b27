//! Domain models shared by the store, the workflows and the API crate.

pub mod auth;
pub mod support;
