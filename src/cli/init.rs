use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_exists, shellexpand_path};
use crate::storage::{FileStore, KeyValueStore, EXPENSES_KEY};
use crate::store::ExpenseStore;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_file_exists() {
        // First run: offer the default, accept anything typed instead.
        println!("Data directory [{}]: ", settings.data_dir);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;

    let files = FileStore::new(&resolved);
    if files.get(EXPENSES_KEY)?.is_none() {
        ExpenseStore::load(files)?.save()?;
        tracing::info!(dir = %resolved.display(), "created empty expense store");
    }

    println!("Initialized penny at {}", resolved.display());
    Ok(())
}
