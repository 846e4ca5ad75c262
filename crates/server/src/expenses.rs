//! Expenses API endpoints

use api_types::{
    Message,
    expense::{
        AmountView, ExpenseCreated, ExpenseDetails, ExpenseGet, ExpenseKind as ApiKind,
        ExpenseList, ExpenseNew, ExpenseUpdate, ExpenseView, ViewQuery,
    },
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use engine::{Amount, NewRecord, Record, RecordKind, RecordPatch, format_currency, parse_date};
use serde_json::Number;

use crate::{ServerError, server::ServerState};

pub(crate) fn map_kind(kind: RecordKind) -> ApiKind {
    match kind {
        RecordKind::Expense => ApiKind::Expense,
        RecordKind::Income => ApiKind::Income,
    }
}

pub(crate) fn map_api_kind(kind: ApiKind) -> RecordKind {
    match kind {
        ApiKind::Expense => RecordKind::Expense,
        ApiKind::Income => RecordKind::Income,
    }
}

fn map_amount(amount: Option<Number>) -> Result<Option<Amount>, ServerError> {
    amount
        .as_ref()
        .map(Amount::try_from)
        .transpose()
        .map_err(ServerError::from)
}

pub(crate) fn view(record: Record, formatted: bool) -> ExpenseView {
    let amount = if formatted {
        AmountView::Formatted(format_currency(record.amount))
    } else {
        AmountView::Plain(record.amount.to_json_number())
    };

    ExpenseView {
        id: record.id,
        title: record.title,
        date: record.date.map(|date| date.format("%Y-%m-%d").to_string()),
        kind: record.kind.map(map_kind),
        amount,
        category: record.category,
        details: record.details,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Json<ExpenseList>, ServerError> {
    let Query(query) = query?;
    let records = state.engine.records().await?;

    Ok(Json(ExpenseList {
        message: "Success getting all of the expenses list".to_string(),
        expenses: records
            .into_iter()
            .map(|record| view(record, query.formatted))
            .collect(),
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> Result<Json<ExpenseGet>, ServerError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let record = state.engine.record(id).await?;

    Ok(Json(ExpenseGet {
        expense: view(record, query.formatted),
    }))
}

pub async fn detail(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<ExpenseDetails>, ServerError> {
    let Path(id) = id?;
    let details = state.engine.details(id).await?;

    Ok(Json(ExpenseDetails { details }))
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let Json(payload) = payload?;

    let record = state
        .engine
        .create(NewRecord {
            title: payload.title,
            date: payload.date,
            kind: payload.kind.map(map_api_kind),
            amount: map_amount(payload.amount)?,
            category: payload.category,
            details: payload.details,
        })
        .await?;

    tracing::info!(id = record.id, category = %record.category, "expense created");

    Ok((
        StatusCode::CREATED,
        Json(ExpenseCreated {
            message: "Successfully added new expense".to_string(),
            new_expense: view(record, false),
        }),
    ))
}

pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
    payload: Result<Json<ExpenseUpdate>, JsonRejection>,
) -> Result<Json<Message>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let patch = RecordPatch {
        title: payload.title,
        date: payload.date.as_deref().map(parse_date).transpose()?,
        kind: payload.kind.map(map_api_kind),
        amount: map_amount(payload.amount)?,
        category: payload.category,
        details: payload.details,
    };
    state.engine.update(id, patch).await?;

    tracing::info!(id, "expense updated");

    Ok(Json(Message {
        message: "Update successful".to_string(),
    }))
}

pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Message>, ServerError> {
    let Path(id) = id?;
    state.engine.delete(id).await?;

    tracing::info!(id, "expense deleted");

    Ok(Json(Message {
        message: "Delete successful".to_string(),
    }))
}
