//! Rules deciding whether a [`NewRecord`] can become a [`Record`].
use serde::Deserialize;

use crate::{
    Amount, EngineError, ResultEngine,
    record::{NewRecord, Record, RecordKind, parse_date},
};

/// How strictly create input is checked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Every field is required on its own; blank text is rejected.
    #[default]
    Strict,
    /// Only an input where every field is absent or empty is rejected.
    AnyField,
}

impl ValidationPolicy {
    /// Turns `input` into a record with the given `id`.
    ///
    /// `require_kind` is set when the engine tracks income/expense kinds.
    pub(crate) fn build(self, id: u64, input: NewRecord, require_kind: bool) -> ResultEngine<Record> {
        match self {
            Self::Strict => strict(id, input, require_kind),
            Self::AnyField => any_field(id, input, require_kind),
        }
    }
}

fn missing(field: &str) -> EngineError {
    EngineError::Validation(format!("required field {field} is missing"))
}

fn required_text(value: Option<String>, field: &str) -> ResultEngine<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing(field)),
    }
}

fn kind(value: Option<RecordKind>, require_kind: bool) -> ResultEngine<Option<RecordKind>> {
    if !require_kind {
        return Ok(None);
    }
    value.map(Some).ok_or_else(|| missing("type"))
}

fn strict(id: u64, input: NewRecord, require_kind: bool) -> ResultEngine<Record> {
    let title = required_text(input.title, "title")?;
    let date = parse_date(&required_text(input.date, "date")?)?;
    let amount = input.amount.ok_or_else(|| missing("amount"))?;
    let category = required_text(input.category, "category")?;
    let details = match input.details {
        Some(serde_json::Value::Null) | None => return Err(missing("details")),
        Some(details) => details,
    };

    Ok(Record {
        id,
        title,
        date: Some(date),
        kind: kind(input.kind, require_kind)?,
        amount,
        category,
        details,
    })
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|text| text.trim().is_empty())
}

fn any_field(id: u64, input: NewRecord, require_kind: bool) -> ResultEngine<Record> {
    let details_blank = match &input.details {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    };
    let amount_blank = input.amount.is_none_or(Amount::is_zero);

    if is_blank(&input.title)
        && is_blank(&input.date)
        && amount_blank
        && is_blank(&input.category)
        && details_blank
    {
        return Err(EngineError::Validation(
            "required fields are missing".to_string(),
        ));
    }

    let date = match input.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_date(raw)?),
        _ => None,
    };

    Ok(Record {
        id,
        title: input.title.unwrap_or_default(),
        date,
        kind: kind(input.kind, require_kind)?,
        amount: input.amount.unwrap_or_default(),
        category: input.category.unwrap_or_default(),
        details: input.details.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tea() -> NewRecord {
        NewRecord {
            title: Some("tea".to_string()),
            date: Some("2024-01-02".to_string()),
            kind: None,
            amount: Some(Amount::from_major(50)),
            category: Some("drink".to_string()),
            details: Some(json!("x")),
        }
    }

    #[test]
    fn strict_accepts_complete_input() {
        let record = ValidationPolicy::Strict.build(2, tea(), false).unwrap();
        assert_eq!(record.id, 2);
        assert_eq!(record.title, "tea");
        assert_eq!(record.amount, Amount::from_major(50));
        assert_eq!(record.kind, None);
    }

    #[test]
    fn strict_rejects_each_missing_field() {
        let cases: [(&str, fn(&mut NewRecord)); 5] = [
            ("title", |r| r.title = Some("  ".to_string())),
            ("date", |r| r.date = None),
            ("amount", |r| r.amount = None),
            ("category", |r| r.category = None),
            ("details", |r| r.details = Some(serde_json::Value::Null)),
        ];

        for (field, mutate) in cases {
            let mut input = tea();
            mutate(&mut input);
            let err = ValidationPolicy::Strict.build(1, input, false).unwrap_err();
            assert_eq!(
                err,
                EngineError::Validation(format!("required field {field} is missing"))
            );
        }
    }

    #[test]
    fn strict_rejects_unparseable_date() {
        let input = NewRecord {
            date: Some("02/01/2024".to_string()),
            ..tea()
        };
        assert!(ValidationPolicy::Strict.build(1, input, false).is_err());
    }

    #[test]
    fn kind_required_only_when_tracked() {
        assert!(ValidationPolicy::Strict.build(1, tea(), true).is_err());

        let income = NewRecord {
            kind: Some(RecordKind::Income),
            ..tea()
        };
        let record = ValidationPolicy::Strict.build(1, income.clone(), true).unwrap();
        assert_eq!(record.kind, Some(RecordKind::Income));

        let record = ValidationPolicy::Strict.build(1, income, false).unwrap();
        assert_eq!(record.kind, None);
    }

    #[test]
    fn any_field_rejects_only_fully_empty_input() {
        let err = ValidationPolicy::AnyField
            .build(1, NewRecord::default(), false)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Validation("required fields are missing".to_string())
        );

        let title_only = NewRecord {
            title: Some("tea".to_string()),
            ..Default::default()
        };
        let record = ValidationPolicy::AnyField.build(1, title_only, false).unwrap();
        assert_eq!(record.title, "tea");
        assert_eq!(record.date, None);
        assert_eq!(record.amount, Amount::ZERO);
    }

    #[test]
    fn any_field_accepts_empty_title() {
        let input = NewRecord {
            title: Some(String::new()),
            ..tea()
        };
        let record = ValidationPolicy::AnyField.build(1, input, false).unwrap();
        assert_eq!(record.title, "");
    }
}
