//! Request-independent service logic used by the handlers.

pub mod auth;
