//! # support_core
//!
//! Core domain logic for the support intake API: credentials, the customer
//! directory, the message ledger and the AI enrichment client.

pub mod auth;
pub mod customers;
pub mod enrichment;
pub mod intake;
pub mod ledger;
pub mod migrate;
pub mod models;
pub mod store;
pub mod uuid;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
