//! In-memory operations over a loaded [`Document`]. Nothing here touches disk.
use chrono::NaiveDate;

use crate::{
    record::{Record, RecordKind, RecordPatch},
    store::Document,
};

pub fn find_by_id(records: &[Record], id: u64) -> Option<&Record> {
    records.iter().find(|record| record.id == id)
}

pub fn find_index_by_id(records: &[Record], id: u64) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

/// Id for the next inserted record. Ids of deleted records are not reused.
pub fn next_id(document: &Document) -> u64 {
    let max_id = document.expenses.iter().map(|r| r.id).max().unwrap_or(0);
    document.last_id.max(max_id) + 1
}

pub fn filter_by_category<'a>(records: &'a [Record], category: &str) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| record.category == category)
        .collect()
}

/// Records dated within `[start, end]`, optionally of one kind.
///
/// Records without a date never match.
pub fn filter_by_date_range(
    records: &[Record],
    start: NaiveDate,
    end: NaiveDate,
    kind: Option<RecordKind>,
) -> Vec<&Record> {
    records
        .iter()
        .filter(|record| record.date.is_some_and(|date| start <= date && date <= end))
        .filter(|record| kind.is_none_or(|kind| record.effective_kind() == kind))
        .collect()
}

pub fn insert(document: &mut Document, record: Record) {
    document.last_id = document.last_id.max(record.id);
    document.expenses.push(record);
}

/// Merges `patch` into the record at `index`, returning the merged record.
///
/// Returns `None` when `index` is out of bounds.
pub fn replace_at(records: &mut [Record], index: usize, patch: RecordPatch) -> Option<&Record> {
    let record = records.get_mut(index)?;
    record.apply(patch);
    Some(record)
}

pub fn remove_at(records: &mut Vec<Record>, index: usize) -> Option<Record> {
    (index < records.len()).then(|| records.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Amount;

    fn record(id: u64, category: &str, date: &str, kind: Option<RecordKind>) -> Record {
        Record {
            id,
            title: format!("record {id}"),
            date: Some(crate::parse_date(date).unwrap()),
            kind,
            amount: Amount::from_major(id as i64 * 10),
            category: category.to_string(),
            details: serde_json::Value::Null,
        }
    }

    fn document() -> Document {
        Document {
            last_id: 4,
            expenses: vec![
                record(1, "food", "2024-01-01", None),
                record(2, "drink", "2024-01-05", Some(RecordKind::Income)),
                record(3, "food", "2024-01-10", Some(RecordKind::Expense)),
                record(4, "Food", "2024-02-01", None),
            ],
        }
    }

    fn ids(records: &[&Record]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    fn date(raw: &str) -> NaiveDate {
        crate::parse_date(raw).unwrap()
    }

    #[test]
    fn find_first_match() {
        let document = document();
        assert_eq!(find_by_id(&document.expenses, 3).map(|r| r.id), Some(3));
        assert_eq!(find_by_id(&document.expenses, 42), None);
        assert_eq!(find_index_by_id(&document.expenses, 2), Some(1));
        assert_eq!(find_index_by_id(&document.expenses, 42), None);
    }

    #[test]
    fn next_id_on_empty_document_is_one() {
        assert_eq!(next_id(&Document::default()), 1);
    }

    #[test]
    fn next_id_is_not_reused_after_delete() {
        let mut document = document();
        assert_eq!(next_id(&document), 5);

        let index = find_index_by_id(&document.expenses, 4).unwrap();
        remove_at(&mut document.expenses, index).unwrap();
        assert_eq!(next_id(&document), 5);

        let id = next_id(&document);
        insert(&mut document, record(id, "misc", "2024-03-01", None));
        assert_eq!(document.expenses.last().map(|r| r.id), Some(5));
        assert_eq!(next_id(&document), 6);
    }

    #[test]
    fn category_is_exact_and_ordered() {
        let document = document();
        assert_eq!(ids(&filter_by_category(&document.expenses, "food")), vec![1, 3]);
        assert!(filter_by_category(&document.expenses, "rent").is_empty());
    }

    #[test]
    fn date_range_is_inclusive() {
        let document = document();
        let found = filter_by_date_range(
            &document.expenses,
            date("2024-01-01"),
            date("2024-01-10"),
            None,
        );
        assert_eq!(ids(&found), vec![1, 2, 3]);

        let reversed = filter_by_date_range(
            &document.expenses,
            date("2024-01-10"),
            date("2024-01-01"),
            None,
        );
        assert!(reversed.is_empty());
    }

    #[test]
    fn date_range_by_kind_treats_missing_kind_as_expense() {
        let document = document();
        let start = date("2024-01-01");
        let end = date("2024-12-31");

        let expenses = filter_by_date_range(&document.expenses, start, end, Some(RecordKind::Expense));
        assert_eq!(ids(&expenses), vec![1, 3, 4]);

        let incomes = filter_by_date_range(&document.expenses, start, end, Some(RecordKind::Income));
        assert_eq!(ids(&incomes), vec![2]);
    }

    #[test]
    fn undated_records_never_match() {
        let mut document = document();
        document.expenses[0].date = None;
        let found = filter_by_date_range(
            &document.expenses,
            date("2000-01-01"),
            date("2100-01-01"),
            None,
        );
        assert_eq!(ids(&found), vec![2, 3, 4]);
    }

    #[test]
    fn replace_merges_patch() {
        let mut document = document();
        let merged = replace_at(
            &mut document.expenses,
            0,
            RecordPatch {
                amount: Some(Amount::from_major(500)),
                ..Default::default()
            },
        )
        .unwrap()
        .clone();

        assert_eq!(merged.amount, Amount::from_major(500));
        assert_eq!(merged.title, "record 1");
        assert_eq!(merged.category, "food");
        assert!(replace_at(&mut document.expenses, 99, RecordPatch::default()).is_none());
    }

    #[test]
    fn remove_shifts_following_records() {
        let mut document = document();
        let removed = remove_at(&mut document.expenses, 1).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(
            document.expenses.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
        assert!(remove_at(&mut document.expenses, 3).is_none());
    }
}
