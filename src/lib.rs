pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{FileStorage, HttpSubmissionApi};
pub use config::AppConfig;
pub use core::{
    flatten::flatten_forest,
    form::{FormController, SubmitOutcome},
    sector_tree::{build_forest, OrphanPolicy},
    session::SessionStore,
};
pub use utils::error::{FormError, Result};
