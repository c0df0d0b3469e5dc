pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod leagues;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::RunConfig;

pub use adapters::LocalStorage;
pub use core::{etl::EtlEngine, pipeline::SchedulePipeline};
pub use domain::ports::{Pipeline, RunSummary, Storage};
pub use utils::error::{EtlError, Result};
