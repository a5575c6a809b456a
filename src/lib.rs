pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::CliConfig;
pub use core::engine::{Engine, Phases};
pub use core::pipeline::JushoPipeline;
pub use domain::ports::Pipeline;
pub use utils::error::{JushoError, Result};
