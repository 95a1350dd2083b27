//! API server configuration.

use std::path::PathBuf;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "0.0.0.0:3000").
    pub bind_addr: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Directory holding the built web frontend, served for non-API paths.
    pub public_dir: Option<PathBuf>,
}
