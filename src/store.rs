use crate::error::{PennyError, Result};
use crate::models::Expense;
use crate::storage::{KeyValueStore, EXPENSES_KEY};

/// Hands out expense ids: millisecond timestamps, bumped so every id is
/// strictly greater than the last one issued or observed.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn next(&mut self) -> Result<u64> {
        let now = chrono::Utc::now().timestamp_millis().max(0) as u64;
        self.next_at(now)
    }

    fn next_at(&mut self, now_ms: u64) -> Result<u64> {
        let bumped = self
            .last
            .checked_add(1)
            .ok_or(PennyError::IdsExhausted(self.last))?;
        self.last = now_ms.max(bumped);
        Ok(self.last)
    }

    /// Record an id that already exists so later ids never collide with it.
    pub fn observe(&mut self, id: u64) {
        self.last = self.last.max(id);
    }
}

/// Sum of all amounts. Recomputed on every call.
pub fn total(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// In-memory expense list, flushed to a [`KeyValueStore`] after every change.
pub struct ExpenseStore<S: KeyValueStore> {
    storage: S,
    expenses: Vec<Expense>,
    ids: IdGenerator,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    /// Read the persisted list. A missing or unparsable entry gives an empty list.
    pub fn load(storage: S) -> Result<Self> {
        let expenses = match storage.get(EXPENSES_KEY)? {
            None => {
                tracing::debug!("no stored expenses, starting empty");
                Vec::new()
            }
            Some(raw) => match serde_json::from_str::<Vec<Expense>>(&raw) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(error = %e, "stored expenses are unreadable, starting empty");
                    Vec::new()
                }
            },
        };
        tracing::debug!(count = expenses.len(), "loaded expenses");

        let mut ids = IdGenerator::default();
        for e in &expenses {
            ids.observe(e.id);
        }
        Ok(Self {
            storage,
            expenses,
            ids,
        })
    }

    pub fn save(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.expenses)?;
        self.storage.set(EXPENSES_KEY, &json)?;
        tracing::debug!(count = self.expenses.len(), "saved expenses");
        Ok(())
    }

    pub fn next_id(&mut self) -> Result<u64> {
        self.ids.next()
    }

    pub fn add(&mut self, expense: Expense) -> Result<()> {
        if self.get(expense.id).is_some() {
            return Err(PennyError::DuplicateId(expense.id));
        }
        self.ids.observe(expense.id);
        self.expenses.push(expense);
        self.save()
    }

    /// Replace the expense with `id` by `expense`. Returns whether one matched.
    pub fn update(&mut self, id: u64, expense: Expense) -> Result<bool> {
        let matched = match self.expenses.iter_mut().find(|e| e.id == id) {
            Some(slot) => {
                *slot = Expense { id, ..expense };
                true
            }
            None => false,
        };
        self.save()?;
        Ok(matched)
    }

    /// Delete the expense with `id`. Returns whether one matched.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let matched = self.expenses.len() != before;
        self.save()?;
        Ok(matched)
    }

    pub fn get(&self, id: u64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> f64 {
        total(&self.expenses)
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
