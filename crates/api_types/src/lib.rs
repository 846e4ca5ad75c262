use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub mod expense {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum ExpenseKind {
        Expense,
        Income,
    }

    /// Amount as a raw number or, in formatted views, as a currency string.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountView {
        Plain(Number),
        Formatted(String),
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: u64,
        pub title: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub date: Option<String>,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        pub kind: Option<ExpenseKind>,
        pub amount: AmountView,
        pub category: String,
        #[serde(default)]
        pub details: Value,
    }

    /// Request body for a new expense.
    ///
    /// Fields are optional at the wire level; the server decides which are
    /// required.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: Option<String>,
        pub date: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<ExpenseKind>,
        pub amount: Option<Number>,
        pub category: Option<String>,
        pub details: Option<Value>,
    }

    /// Request body for a partial update. Absent fields are left unchanged.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ExpenseUpdate {
        pub title: Option<String>,
        pub date: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<ExpenseKind>,
        pub amount: Option<Number>,
        pub category: Option<String>,
        pub details: Option<Value>,
    }

    /// Query string for list and single-record reads.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ViewQuery {
        /// Render amounts as currency strings.
        #[serde(default)]
        pub formatted: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub message: String,
        pub expenses: Vec<ExpenseView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseGet {
        pub expense: ExpenseView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseCreated {
        pub message: String,
        pub new_expense: ExpenseView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseDetails {
        pub details: Value,
    }
}

pub mod stats {
    use super::*;
    use crate::expense::{ExpenseKind, ExpenseView};

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CategoryTotal {
        pub category: String,
        pub filtered_expenses: Vec<ExpenseView>,
        pub total_expenses: Number,
        pub total_formatted: String,
    }

    /// Query string of the date range total.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DateRange {
        pub start: Option<String>,
        pub end: Option<String>,
        #[serde(rename = "type")]
        pub kind: Option<ExpenseKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PeriodTotal {
        pub start: String,
        pub end: String,
        pub total_expenses: Number,
        pub total_formatted: String,
        pub income_total: String,
        pub expense_total: String,
        pub net: String,
    }
}

/// Body of confirmations and of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}
