pub mod check;
mod command_result;
pub mod init;
pub mod keys;
pub mod merge;

use std::env;

use anyhow::{Context, Result};

pub use command_result::*;

use super::args::CommonArgs;
use crate::project::{Project, ProjectOverrides};

/// Load the project around the working directory, applying CLI overrides.
pub fn load_project(common: &CommonArgs) -> Result<Project> {
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let overrides = ProjectOverrides {
        locales_root: common.locales_root.clone(),
        reference_locale: common.reference_locale.clone(),
    };
    Project::load(&cwd, &overrides)
}
