//! # neurostat core
//!
//! Population-level spike statistics for extracellular recordings.
//!
//! - **Cross-correlograms**: binned lag histograms for every ordered pair of
//!   clusters, computed by an incremental shift-scan instead of enumerating
//!   all spike pairs
//! - **Cluster indexing**: dense remapping of arbitrary spike-sorter labels
//! - **Population counts**: per-cluster spike counts inside event windows
//!
//! ## Quick Start
//!
//! ```rust
//! use neurostat_core::prelude::*;
//!
//! let spike_times = [0.100, 0.101, 0.103, 0.250];
//! let spike_clusters = [2, 7, 2, 7];
//!
//! let ccg = compute_cross_correlograms(&spike_times, &spike_clusters, 0.001, 0.01)?;
//! assert_eq!(ccg.clusters(), &[2, 7]);
//! assert_eq!(ccg.at_lag(0, 1, 1), Some(1));
//! # Ok::<(), neurostat_core::NeuroError>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialize/deserialize configuration types
//! - `parallel`: Split the correlogram scan across rayon workers

#![deny(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub use crate::{
    correlogram::{compute_cross_correlograms, CorrelogramConfig, Correlograms, CountTensor},
    error::{NeuroError, Result},
    index::ClusterIndex,
    population::{spike_counts_in_bins, SpikeCounts},
    spike::{ClusterId, SpikeSlice},
};

pub mod correlogram;
pub mod error;
pub mod index;
pub mod population;
pub mod spike;

/// Common imports for neurostat users
pub mod prelude {
    pub use crate::{
        correlogram::{
            compute_cross_correlograms, BinningParams, CorrelogramConfig, Correlograms,
            CountTensor,
        },
        error::{NeuroError, Result},
        index::ClusterIndex,
        population::{spike_counts_in_bins, SpikeCounts},
        spike::{ClusterId, SpikeSlice},
    };
}

/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
pub const BUILD_INFO: BuildInfo = BuildInfo {
    version: VERSION,
    git_hash: option_env!("GIT_HASH"),
    features: &[
        #[cfg(feature = "serde")]
        "serde",
        #[cfg(feature = "parallel")]
        "parallel",
    ],
};

/// Build information structure
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version string
    pub version: &'static str,
    /// Git commit hash
    pub git_hash: Option<&'static str>,
    /// Enabled features
    pub features: &'static [&'static str],
}

impl BuildInfo {
    /// Get a formatted build string
    pub fn build_string(&self) -> String {
        format!(
            "neurostat-core v{} ({}) with features: [{}]",
            self.version,
            self.git_hash.unwrap_or("unknown"),
            self.features.join(", ")
        )
    }
}

/// Initialize logging with an `info` default, overridable through `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs the logger.
pub fn init() -> Result<()> {
    init_with_config(InitConfig {
        log_level: None,
        enable_logging: true,
        print_build_info: true,
    })
}

/// Initialize the library with custom configuration.
///
/// With `enable_logging`, the build banner is only logged by the call that
/// actually installs the logger.
pub fn init_with_config(config: InitConfig) -> Result<()> {
    let fresh = !config.enable_logging || install_logger(config.log_level);

    if config.print_build_info && fresh {
        log::info!("{}", BUILD_INFO.build_string());
    }

    Ok(())
}

/// Install env_logger; false if a logger was already set
fn install_logger(log_level: Option<&'static str>) -> bool {
    let env = env_logger::Env::default().default_filter_or(log_level.unwrap_or("info"));
    env_logger::Builder::from_env(env).try_init().is_ok()
}

/// Configuration for library initialization
#[derive(Debug, Default)]
pub struct InitConfig {
    /// Log level used when `RUST_LOG` is unset (e.g., "debug", "info", "warn")
    pub log_level: Option<&'static str>,
    /// Whether to install the env_logger backend
    pub enable_logging: bool,
    /// Whether to log build information
    pub print_build_info: bool,
}
