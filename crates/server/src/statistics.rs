//! Aggregate API endpoints

use api_types::stats::{CategoryTotal, DateRange, PeriodTotal};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use engine::{format_currency, parse_date};

use crate::{
    ServerError,
    expenses::{map_api_kind, view},
    server::ServerState,
};

/// Sum of the amounts of one category.
pub async fn by_category(
    State(state): State<ServerState>,
    category: Result<Path<String>, PathRejection>,
) -> Result<Json<CategoryTotal>, ServerError> {
    let Path(category) = category?;
    let result = state.engine.category_total(&category).await?;

    Ok(Json(CategoryTotal {
        category,
        total_expenses: result.total.to_json_number(),
        total_formatted: format_currency(result.total),
        filtered_expenses: result
            .records
            .into_iter()
            .map(|record| view(record, false))
            .collect(),
    }))
}

/// Totals over `start..=end`, optionally restricted to one `type`.
pub async fn by_date(
    State(state): State<ServerState>,
    query: Result<Query<DateRange>, QueryRejection>,
) -> Result<Json<PeriodTotal>, ServerError> {
    let Query(query) = query?;
    let (Some(start), Some(end)) = (query.start.as_deref(), query.end.as_deref()) else {
        return Err(ServerError::Generic(
            "start and end dates are required".to_string(),
        ));
    };
    let start = parse_date(start)?;
    let end = parse_date(end)?;

    let summary = state
        .engine
        .period_summary(start, end, query.kind.map(map_api_kind))
        .await?;

    Ok(Json(PeriodTotal {
        start: summary.start.format("%Y-%m-%d").to_string(),
        end: summary.end.format("%Y-%m-%d").to_string(),
        total_expenses: summary.total.to_json_number(),
        total_formatted: format_currency(summary.total),
        income_total: format_currency(summary.totals.income_total),
        expense_total: format_currency(summary.totals.expense_total),
        net: format_currency(summary.totals.net),
    }))
}
