use crate::error::Result;
use crate::fmt::money;
use crate::settings::{get_data_dir, load_settings, settings_path};
use crate::storage::{FileStore, EXPENSES_KEY};
use crate::store::ExpenseStore;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let files = FileStore::new(get_data_dir());
    let store_path = files.path_for(EXPENSES_KEY);

    println!("Settings:    {}", settings_path().display());
    println!("Data dir:    {}", get_data_dir().display());
    println!("Store:       {}", store_path.display());
    println!("Date format: {}", settings.date_format);

    if store_path.exists() {
        let store = ExpenseStore::load(files)?;
        println!();
        println!("Expenses:    {}", store.len());
        println!("Total:       {}", money(store.total()));
    } else {
        println!();
        println!("No expenses stored yet. Run `penny init` or add one.");
    }

    Ok(())
}
