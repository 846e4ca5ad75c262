//! Sums over filtered records and their currency rendering.
use chrono::NaiveDate;

use crate::{
    Amount, EngineError, ResultEngine,
    record::{Record, RecordKind},
    repository,
};

const CURRENCY_PREFIX: &str = "Rp. ";

fn overflow() -> EngineError {
    EngineError::Validation("total amount too large".to_string())
}

/// Sum of `amount` over `records`; zero when empty.
pub fn sum<'a>(records: impl IntoIterator<Item = &'a Record>) -> ResultEngine<Amount> {
    records
        .into_iter()
        .try_fold(Amount::ZERO, |total, record| total.checked_add(record.amount))
        .ok_or_else(overflow)
}

/// Renders an amount the way the Indonesian locale writes rupiah.
///
/// `.` groups thousands and `,` separates decimals; the fraction is printed
/// only when non-zero, without trailing zeros.
///
/// ```rust
/// use engine::{Amount, format_currency};
///
/// assert_eq!(format_currency(Amount::from_major(1_500)), "Rp. 1.500");
/// assert_eq!(format_currency(Amount::new(150_050)), "Rp. 1.500,5");
/// ```
pub fn format_currency(amount: Amount) -> String {
    let digits = amount.abs_major().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    match amount.abs_fraction() {
        0 => format!("{CURRENCY_PREFIX}{sign}{grouped}"),
        frac => {
            let frac = format!("{frac:02}");
            format!("{CURRENCY_PREFIX}{sign}{grouped},{}", frac.trim_end_matches('0'))
        }
    }
}

/// Income and expense totals over a period.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeriodTotals {
    pub income_total: Amount,
    pub expense_total: Amount,
    pub net: Amount,
}

/// Partitions the records dated in `[start, end]` by kind and sums each side.
///
/// Records without a kind count as expenses.
pub fn period_totals(
    records: &[Record],
    start: NaiveDate,
    end: NaiveDate,
) -> ResultEngine<PeriodTotals> {
    let (income_total, expense_total) = repository::filter_by_date_range(records, start, end, None)
        .into_iter()
        .try_fold((Amount::ZERO, Amount::ZERO), |(income, expense), record| {
            match record.effective_kind() {
                RecordKind::Income => Some((income.checked_add(record.amount)?, expense)),
                RecordKind::Expense => Some((income, expense.checked_add(record.amount)?)),
            }
        })
        .ok_or_else(overflow)?;

    Ok(PeriodTotals {
        income_total,
        expense_total,
        net: income_total.checked_sub(expense_total).ok_or_else(overflow)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_date;

    fn record(amount: i64, date: &str, kind: Option<RecordKind>) -> Record {
        Record {
            id: 0,
            title: String::new(),
            date: Some(parse_date(date).unwrap()),
            kind,
            amount: Amount::from_major(amount),
            category: "misc".to_string(),
            details: serde_json::Value::Null,
        }
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(sum(&[] as &[Record]).unwrap(), Amount::ZERO);
    }

    #[test]
    fn sum_adds_amounts() {
        let records = [
            record(100, "2024-01-01", None),
            record(50, "2024-01-02", Some(RecordKind::Income)),
        ];
        assert_eq!(sum(&records).unwrap(), Amount::from_major(150));
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency(Amount::ZERO), "Rp. 0");
        assert_eq!(format_currency(Amount::from_major(999)), "Rp. 999");
        assert_eq!(format_currency(Amount::from_major(1_000)), "Rp. 1.000");
        assert_eq!(format_currency(Amount::from_major(25_000)), "Rp. 25.000");
        assert_eq!(format_currency(Amount::from_major(1_234_567)), "Rp. 1.234.567");
        assert_eq!(format_currency(Amount::from_major(-250_000)), "Rp. -250.000");
    }

    #[test]
    fn currency_fraction() {
        assert_eq!(format_currency(Amount::new(150_050)), "Rp. 1.500,5");
        assert_eq!(format_currency(Amount::new(1_005)), "Rp. 10,05");
        assert_eq!(format_currency(Amount::new(-1)), "Rp. -0,01");
    }

    #[test]
    fn period_totals_split_by_kind() {
        let records = [
            record(5_000, "2024-01-01", Some(RecordKind::Income)),
            record(1_200, "2024-01-05", Some(RecordKind::Expense)),
            record(300, "2024-01-06", None),
            record(9_999, "2024-03-01", Some(RecordKind::Income)),
        ];
        let totals = period_totals(
            &records,
            parse_date("2024-01-01").unwrap(),
            parse_date("2024-01-31").unwrap(),
        )
        .unwrap();

        assert_eq!(totals.income_total, Amount::from_major(5_000));
        assert_eq!(totals.expense_total, Amount::from_major(1_500));
        assert_eq!(totals.net, Amount::from_major(3_500));
    }

    #[test]
    fn period_without_records_is_zero() {
        let records = [record(100, "2024-01-01", None)];
        let totals = period_totals(
            &records,
            parse_date("2025-01-01").unwrap(),
            parse_date("2025-12-31").unwrap(),
        )
        .unwrap();
        assert_eq!(totals, PeriodTotals::default());
        assert!(totals.net.is_zero());
    }

    fn huge(kind: Option<RecordKind>) -> Record {
        Record {
            amount: Amount::new(i64::MAX - 1),
            ..record(0, "2024-01-01", kind)
        }
    }

    #[test]
    fn sum_overflow_is_an_error() {
        let records = [huge(None), huge(None)];
        assert_eq!(
            sum(&records),
            Err(EngineError::Validation("total amount too large".to_string()))
        );
    }

    #[test]
    fn period_totals_overflow_is_an_error() {
        let day = parse_date("2024-01-01").unwrap();

        let same_side = [huge(Some(RecordKind::Income)), huge(Some(RecordKind::Income))];
        assert!(period_totals(&same_side, day, day).is_err());

        let mut negative_income = huge(Some(RecordKind::Income));
        negative_income.amount = Amount::new(i64::MIN + 1);
        let net_overflows = [negative_income, huge(Some(RecordKind::Expense))];
        assert!(period_totals(&net_overflows, day, day).is_err());
    }
}
