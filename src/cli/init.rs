use std::path::Path;

use crate::error::{ArError, Result};
use crate::settings::{save_settings, Settings};

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ArError::Settings(format!(
            "{} already exists\nRun `arledger init --force` to overwrite it.",
            path.display()
        )));
    }
    save_settings(path, &Settings::default())?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}
