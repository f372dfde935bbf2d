use crate::error::{PennyError, Result};
use crate::models::Expense;
use crate::storage::KeyValueStore;
use crate::store::ExpenseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(u64),
    Updated(u64),
    /// A required field was empty; nothing changed.
    Incomplete,
}

/// Text state behind the add/edit form.
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    pub name: String,
    pub description: String,
    pub amount: String,
    editing_id: Option<u64>,
}

impl ExpenseForm {
    pub fn editing_id(&self) -> Option<u64> {
        self.editing_id
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Expense"
        } else {
            "Add New Expense"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Expense"
        } else {
            "Add Expense"
        }
    }

    /// Load an expense into the fields and switch to edit mode.
    pub fn begin_edit(&mut self, expense: &Expense) {
        self.name = expense.name.clone();
        self.description = expense.description.clone();
        self.amount = expense.amount.to_string();
        self.editing_id = Some(expense.id);
    }

    pub fn cancel_edit(&mut self) {
        self.editing_id = None;
        self.clear();
    }

    fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
        self.amount.clear();
    }

    /// Create or update an expense from the current fields.
    ///
    /// Empty fields make this a silent no-op. An amount that is not a finite
    /// number is refused with [`PennyError::InvalidAmount`] and the fields are
    /// kept. Editing keeps the record's original `date`; `today` only stamps
    /// new records.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut ExpenseStore<S>,
        today: &str,
    ) -> Result<SubmitOutcome> {
        if self.name.is_empty() || self.description.is_empty() || self.amount.is_empty() {
            return Ok(SubmitOutcome::Incomplete);
        }
        let amount = parse_amount(&self.amount)?;

        let outcome = match self.editing_id {
            None => {
                let id = store.next_id()?;
                store.add(Expense {
                    id,
                    name: self.name.clone(),
                    description: self.description.clone(),
                    amount,
                    date: today.to_string(),
                })?;
                SubmitOutcome::Added(id)
            }
            Some(id) => {
                let date = store
                    .get(id)
                    .map(|e| e.date.clone())
                    .ok_or(PennyError::ExpenseNotFound(id))?;
                store.update(
                    id,
                    Expense {
                        id,
                        name: self.name.clone(),
                        description: self.description.clone(),
                        amount,
                        date,
                    },
                )?;
                self.editing_id = None;
                SubmitOutcome::Updated(id)
            }
        };

        self.clear();
        Ok(outcome)
    }
}

pub fn parse_amount(text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PennyError::InvalidAmount(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fmt::money;
    use crate::storage::MemoryStore;

    const TODAY: &str = "10/16/2026";

    fn empty_store() -> ExpenseStore<MemoryStore> {
        ExpenseStore::load(MemoryStore::default()).unwrap()
    }

    fn fill(form: &mut ExpenseForm, name: &str, description: &str, amount: &str) {
        form.name = name.to_string();
        form.description = description.to_string();
        form.amount = amount.to_string();
    }

    #[test]
    fn test_add_coffee() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Coffee", "Morning", "3.5");

        let outcome = form.submit(&mut store, TODAY).unwrap();
        let SubmitOutcome::Added(id) = outcome else {
            panic!("expected Added, got {outcome:?}");
        };
        assert_eq!(store.len(), 1);
        let e = store.get(id).unwrap();
        assert_eq!(e.amount, 3.5);
        assert_eq!(e.date, TODAY);
        assert_eq!(money(store.total()), "$3.50");

        assert!(form.name.is_empty());
        assert!(form.description.is_empty());
        assert!(form.amount.is_empty());
    }

    #[test]
    fn test_two_adds_total() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Lunch", "Tacos", "10");
        form.submit(&mut store, TODAY).unwrap();
        fill(&mut form, "Books", "Used", "20.5");
        form.submit(&mut store, TODAY).unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(store.expenses()[0].id, store.expenses()[1].id);
        assert_eq!(money(store.total()), "$30.50");
    }

    #[test]
    fn test_edit_first_amount() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Lunch", "Tacos", "10");
        form.submit(&mut store, TODAY).unwrap();
        fill(&mut form, "Books", "Used", "20.5");
        form.submit(&mut store, TODAY).unwrap();

        let first = store.expenses()[0].clone();
        form.begin_edit(&first);
        assert_eq!(form.amount, "10");
        assert_eq!(form.submit_label(), "Update Expense");
        form.amount = "15".to_string();

        let outcome = form.submit(&mut store, "10/20/2026").unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated(first.id));
        assert_eq!(store.len(), 2);
        assert_eq!(store.expenses()[0].amount, 15.0);
        assert_eq!(store.expenses()[0].date, TODAY);
        assert_eq!(money(store.total()), "$35.50");
        assert!(!form.is_editing());
        assert_eq!(form.submit_label(), "Add Expense");
    }

    #[test]
    fn test_empty_description_is_noop() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Coffee", "", "3.5");

        let outcome = form.submit(&mut store, TODAY).unwrap();
        assert_eq!(outcome, SubmitOutcome::Incomplete);
        assert!(store.is_empty());
        assert_eq!(form.name, "Coffee");
        assert_eq!(form.amount, "3.5");
    }

    #[test]
    fn test_empty_name_is_noop() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "", "Morning", "3.5");

        assert_eq!(form.submit(&mut store, TODAY).unwrap(), SubmitOutcome::Incomplete);
        assert!(store.is_empty());
        assert_eq!(form.description, "Morning");
        assert_eq!(form.amount, "3.5");
    }

    #[test]
    fn test_empty_amount_is_noop() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Coffee", "Morning", "");

        assert_eq!(form.submit(&mut store, TODAY).unwrap(), SubmitOutcome::Incomplete);
        assert!(store.is_empty());
        assert_eq!(form.name, "Coffee");
        assert_eq!(form.description, "Morning");
    }

    #[test]
    fn test_bad_amount_keeps_fields() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Coffee", "Morning", "three");

        let err = form.submit(&mut store, TODAY).unwrap_err();
        assert!(matches!(err, PennyError::InvalidAmount(_)));
        assert!(store.is_empty());
        assert_eq!(form.amount, "three");
    }

    #[test]
    fn test_edit_of_vanished_record_errors() {
        let mut store = empty_store();
        let mut form = ExpenseForm::default();
        fill(&mut form, "Coffee", "Morning", "3");
        let SubmitOutcome::Added(id) = form.submit(&mut store, TODAY).unwrap() else {
            panic!("expected Added");
        };
        let expense = store.get(id).unwrap().clone();
        form.begin_edit(&expense);
        store.remove(id).unwrap();

        let err = form.submit(&mut store, TODAY).unwrap_err();
        assert!(matches!(err, PennyError::ExpenseNotFound(i) if i == id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_cancel_edit_returns_to_add_mode() {
        let mut form = ExpenseForm::default();
        form.begin_edit(&Expense {
            id: 9,
            name: "Gym".into(),
            description: "Monthly".into(),
            amount: 42.0,
            date: TODAY.into(),
        });
        assert_eq!(form.editing_id(), Some(9));
        assert_eq!(form.title(), "Edit Expense");
        form.cancel_edit();
        assert_eq!(form.editing_id(), None);
        assert_eq!(form.title(), "Add New Expense");
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 12.25 ").unwrap(), 12.25);
        assert_eq!(parse_amount("-3").unwrap(), -3.0);
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("").is_err());
    }
}
