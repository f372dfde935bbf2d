use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::{PennyError, Result};
use crate::fmt::{money, today};
use crate::form::{ExpenseForm, SubmitOutcome};
use crate::models::Expense;
use crate::settings::{get_data_dir, load_settings};
use crate::storage::{FileStore, KeyValueStore};
use crate::store::ExpenseStore;

fn open_store() -> Result<ExpenseStore<FileStore>> {
    ExpenseStore::load(FileStore::new(get_data_dir()))
}

pub fn add(name: &str, description: &str, amount: &str) -> Result<()> {
    let settings = load_settings();
    let mut store = open_store()?;
    let mut form = ExpenseForm::default();
    form.name = name.to_string();
    form.description = description.to_string();
    form.amount = amount.to_string();
    match form.submit(&mut store, &today(&settings.date_format)?)? {
        SubmitOutcome::Added(id) => {
            tracing::info!(id, "expense added");
            let amount = store.get(id).map_or(0.0, |e| e.amount);
            println!("Added expense {id}: {name} ({})", money(amount));
        }
        SubmitOutcome::Updated(_) | SubmitOutcome::Incomplete => {
            println!("{}", "Name, description and amount are all required.".yellow());
        }
    }
    Ok(())
}

pub fn edit(
    id: u64,
    name: Option<&str>,
    description: Option<&str>,
    amount: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let mut store = open_store()?;
    let mut form = begin_edit_by_id(&store, id)?;
    if let Some(v) = name {
        form.name = v.to_string();
    }
    if let Some(v) = description {
        form.description = v.to_string();
    }
    if let Some(v) = amount {
        form.amount = v.to_string();
    }

    match form.submit(&mut store, &today(&settings.date_format)?)? {
        SubmitOutcome::Updated(id) => {
            tracing::info!(id, "expense updated");
            println!("Updated expense {id}");
        }
        SubmitOutcome::Added(_) | SubmitOutcome::Incomplete => {
            println!("{}", "Name, description and amount cannot be empty.".yellow());
        }
    }
    Ok(())
}

fn begin_edit_by_id<S: KeyValueStore>(store: &ExpenseStore<S>, id: u64) -> Result<ExpenseForm> {
    let expense = store.get(id).ok_or(PennyError::ExpenseNotFound(id))?;
    let mut form = ExpenseForm::default();
    form.begin_edit(expense);
    Ok(form)
}

pub fn delete(id: u64) -> Result<()> {
    let mut store = open_store()?;
    let name = store
        .get(id)
        .map(|e| e.name.clone())
        .ok_or(PennyError::ExpenseNotFound(id))?;
    store.remove(id)?;
    tracing::info!(id, "expense deleted");
    println!("Deleted expense {id}: {name}");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = open_store()?;
    println!("Expenses\n{}", expense_table(store.expenses()));
    Ok(())
}

pub fn total() -> Result<()> {
    let store = open_store()?;
    println!("{}", money(store.total()));
    Ok(())
}

pub(crate) fn expense_table(expenses: &[Expense]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Description", "Amount", "Date"]);
    for e in expenses {
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.name),
            Cell::new(&e.description),
            Cell::new(money(e.amount)).set_alignment(CellAlignment::Right),
            Cell::new(&e.date),
        ]);
    }
    table.add_row(vec![
        Cell::new(""),
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(money(crate::store::total(expenses))).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn sample() -> Vec<Expense> {
        vec![
            Expense {
                id: 1,
                name: "Lunch".into(),
                description: "Tacos".into(),
                amount: 10.0,
                date: "10/16/2026".into(),
            },
            Expense {
                id: 2,
                name: "Books".into(),
                description: "Used".into(),
                amount: 20.5,
                date: "10/16/2026".into(),
            },
        ]
    }

    #[test]
    fn test_table_has_rows_and_total() {
        colored::control::set_override(false);
        let rendered = expense_table(&sample()).to_string();
        assert!(rendered.contains("Lunch"));
        assert!(rendered.contains("$20.50"));
        assert!(rendered.contains("Total"));
        assert!(rendered.contains("$30.50"));
    }

    #[test]
    fn test_empty_table_total_is_zero() {
        colored::control::set_override(false);
        let rendered = expense_table(&[]).to_string();
        assert!(rendered.contains("$0.00"));
    }

    #[test]
    fn test_begin_edit_by_id() {
        let mut store = ExpenseStore::load(MemoryStore::default()).unwrap();
        for e in sample() {
            store.add(e).unwrap();
        }
        let form = begin_edit_by_id(&store, 2).unwrap();
        assert_eq!(form.editing_id(), Some(2));
        assert_eq!(form.amount, "20.5");
        assert!(matches!(
            begin_edit_by_id(&store, 9),
            Err(PennyError::ExpenseNotFound(9))
        ));
    }
}
