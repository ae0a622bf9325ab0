//! Build identification captured by `build.rs`

use serde::{Deserialize, Serialize};
use std::fmt;

/// Version and build metadata of the running binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    pub version: String,
    pub git_hash: String,
    pub built_at: String,
    pub profile: String,
}

impl BuildInfo {
    /// Metadata compiled into this build
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_hash: env!("GIT_HASH").to_string(),
            built_at: env!("BUILD_TIMESTAMP").to_string(),
            profile: env!("BUILD_PROFILE").to_string(),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "v{} [{}] built {} ({})",
            self.version, self.git_hash, self.built_at, self.profile
        )
    }
}
