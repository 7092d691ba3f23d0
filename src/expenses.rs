// 💸 Expense Handler - CRUD over expenses.json
//
// Every operation: read_all() -> linear scan by id -> mutate -> write_all()

use crate::error::{Result, TrackerError};
use crate::ids::IdScheme;
use crate::model::{Expense, ExpenseFields, ExpenseSummary};
use crate::store::{position_by_id, DocumentStore};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ExpenseHandler {
    store: DocumentStore<Expense>,
    ids: IdScheme,
}

impl ExpenseHandler {
    pub fn new(path: impl Into<PathBuf>, ids: IdScheme) -> Self {
        ExpenseHandler {
            store: DocumentStore::new(path),
            ids,
        }
    }

    pub fn store(&self) -> &DocumentStore<Expense> {
        &self.store
    }

    /// Full sequence in insertion order
    pub fn list(&self) -> Result<Vec<Expense>> {
        self.store.read_all()
    }

    pub fn summary(&self) -> Result<ExpenseSummary> {
        Ok(ExpenseSummary::from_expenses(&self.list()?))
    }

    pub fn create(&self, fields: ExpenseFields) -> Result<Expense> {
        fields.validate()?;
        let mut expenses = self.store.read_all()?;

        let id = self
            .ids
            .next_id(|candidate| position_by_id(&expenses, candidate).is_some());
        let expense = Expense::from_fields(id, fields);

        expenses.push(expense.clone());
        self.store.write_all(&expenses)?;

        info!(id = %expense.id, amount = expense.amount, "created expense");
        Ok(expense)
    }

    pub fn update(&self, id: &str, fields: ExpenseFields) -> Result<Expense> {
        fields.validate()?;
        let mut expenses = self.store.read_all()?;

        let index = position_by_id(&expenses, id).ok_or_else(|| not_found(id))?;
        expenses[index].apply(fields);
        self.store.write_all(&expenses)?;

        info!(id = %id, "updated expense");
        Ok(expenses[index].clone())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let mut expenses = self.store.read_all()?;

        let index = position_by_id(&expenses, id).ok_or_else(|| not_found(id))?;
        expenses.remove(index);

        self.store.write_all(&expenses)?;
        info!(id = %id, "deleted expense");
        Ok(())
    }
}

fn not_found(id: &str) -> TrackerError {
    TrackerError::NotFound {
        kind: "Expense",
        id: id.to_string(),
    }
}
