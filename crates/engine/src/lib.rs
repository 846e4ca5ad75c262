//! Expense/income records kept in a single JSON document.
//!
//! Every operation loads the document fresh from disk. Mutations run the whole
//! load → modify → save cycle under one writer lock, so two concurrent writers
//! cannot overwrite each other's changes.
use std::path::PathBuf;

use chrono::NaiveDate;
use tokio::sync::Mutex;

pub use aggregate::{PeriodTotals, format_currency, period_totals, sum};
pub use error::EngineError;
pub use money::Amount;
pub use record::{NewRecord, Record, RecordKind, RecordPatch, parse_date};
pub use store::{Document, Store};
pub use validation::ValidationPolicy;

mod aggregate;
mod error;
mod money;
mod record;
pub mod repository;
mod store;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;

/// Records of one category and their total.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryTotal {
    pub records: Vec<Record>,
    pub total: Amount,
}

/// Totals over a date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sum of the records in range, restricted to the requested kind if any.
    pub total: Amount,
    pub totals: PeriodTotals,
}

#[derive(Debug)]
pub struct Engine {
    store: Store,
    track_type: bool,
    validation: ValidationPolicy,
    writer: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Runs `f` over the freshly loaded document and saves the result.
    ///
    /// Nothing is written when `f` fails.
    async fn mutate<T, F>(&self, f: F) -> ResultEngine<T>
    where
        F: FnOnce(&mut Document) -> ResultEngine<T>,
    {
        let _guard = self.writer.lock().await;
        let mut document = self.store.load().await?;
        let value = f(&mut document)?;
        self.store.save(&document).await?;
        Ok(value)
    }

    pub async fn records(&self) -> ResultEngine<Vec<Record>> {
        Ok(self.store.load().await?.expenses)
    }

    pub async fn record(&self, id: u64) -> ResultEngine<Record> {
        let document = self.store.load().await?;
        repository::find_by_id(&document.expenses, id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Only the `details` field of a record.
    pub async fn details(&self, id: u64) -> ResultEngine<serde_json::Value> {
        self.record(id).await.map(|record| record.details)
    }

    pub async fn create(&self, input: NewRecord) -> ResultEngine<Record> {
        self.mutate(|document| {
            let id = repository::next_id(document);
            let record = self.validation.build(id, input, self.track_type)?;
            repository::insert(document, record.clone());
            Ok(record)
        })
        .await
    }

    /// Merges `patch` into record `id` and returns the merged record.
    pub async fn update(&self, id: u64, mut patch: RecordPatch) -> ResultEngine<Record> {
        if !self.track_type {
            patch.kind = None;
        }
        self.mutate(|document| {
            let index = repository::find_index_by_id(&document.expenses, id)
                .ok_or_else(|| not_found(id))?;
            repository::replace_at(&mut document.expenses, index, patch)
                .cloned()
                .ok_or_else(|| not_found(id))
        })
        .await
    }

    /// Removes record `id` and returns it.
    pub async fn delete(&self, id: u64) -> ResultEngine<Record> {
        self.mutate(|document| {
            let index = repository::find_index_by_id(&document.expenses, id)
                .ok_or_else(|| not_found(id))?;
            repository::remove_at(&mut document.expenses, index).ok_or_else(|| not_found(id))
        })
        .await
    }

    /// Records of `category` and their sum. An unknown category is not found.
    pub async fn category_total(&self, category: &str) -> ResultEngine<CategoryTotal> {
        let document = self.store.load().await?;
        let records = repository::filter_by_category(&document.expenses, category);
        if records.is_empty() {
            return Err(EngineError::NotFound(format!("category {category:?}")));
        }

        Ok(CategoryTotal {
            total: sum(records.iter().copied())?,
            records: records.into_iter().cloned().collect(),
        })
    }

    /// Totals of the records dated in `[start, end]`.
    ///
    /// An empty range is not an error: every total is zero.
    pub async fn period_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: Option<RecordKind>,
    ) -> ResultEngine<PeriodSummary> {
        let document = self.store.load().await?;
        let records = repository::filter_by_date_range(&document.expenses, start, end, kind);

        Ok(PeriodSummary {
            start,
            end,
            total: sum(records)?,
            totals: period_totals(&document.expenses, start, end)?,
        })
    }
}

fn not_found(id: u64) -> EngineError {
    EngineError::NotFound(format!("expense {id}"))
}

#[derive(Default)]
pub struct EngineBuilder {
    path: Option<PathBuf>,
    track_type: bool,
    validation: ValidationPolicy,
}

impl EngineBuilder {
    /// Path of the backing document.
    pub fn path(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.path = Some(path.into());
        self
    }

    /// Track income/expense `type` on records.
    pub fn track_type(mut self, track_type: bool) -> EngineBuilder {
        self.track_type = track_type;
        self
    }

    pub fn validation(mut self, validation: ValidationPolicy) -> EngineBuilder {
        self.validation = validation;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        let path = self
            .path
            .ok_or_else(|| EngineError::Validation("store path is required".to_string()))?;

        Ok(Engine {
            store: Store::new(path),
            track_type: self.track_type,
            validation: self.validation,
            writer: Mutex::new(()),
        })
    }
}
