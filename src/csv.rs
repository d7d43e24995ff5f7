use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::{Action, Denomination, Product, Won};

/// Errors that can occur when reading an action script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open script: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized action '{action}'")]
    UnrecognizedAction { line: usize, action: String },

    #[error("line {line}: {action} missing value")]
    MissingValue { line: usize, action: String },

    #[error("line {line}: '{value}' is not an accepted denomination")]
    UnknownDenomination { line: usize, value: String },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    action: String,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    id: &'a str,
    name: &'a str,
    price: i64,
    stock: u32,
}

/// Read user actions from a csv script.
///
/// Rows look like `select,cola`, `cash,1000`, `card`, `take_item`,
/// `take_change`, `cancel` or `reset`.
pub fn read_actions(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Action, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<Action, CsvError> {
    let value = row.value.filter(|v| !v.is_empty());
    let require_value = |action: &str| {
        value.clone().ok_or_else(|| CsvError::MissingValue {
            line,
            action: action.to_string(),
        })
    };

    match row.action.as_str() {
        "select" => Ok(Action::SelectProduct(require_value("select")?)),
        "cash" => {
            let raw = require_value("cash")?;
            raw.parse::<i64>()
                .ok()
                .and_then(|v| Denomination::from_value(Won::new(v)))
                .map(|d| Action::InsertCash(*d))
                .ok_or(CsvError::UnknownDenomination { line, value: raw })
        }
        "card" => Ok(Action::PayByCard),
        "take_item" => Ok(Action::TakeItem),
        "take_change" => Ok(Action::TakeChange),
        "cancel" => Ok(Action::CancelOrder),
        "reset" => Ok(Action::ResetFromError),
        other => Err(CsvError::UnrecognizedAction {
            line,
            action: other.to_string(),
        }),
    }
}

/// Write the product inventory as csv.
pub fn write_products<'a, W: io::Write>(
    writer: W,
    products: impl IntoIterator<Item = &'a Product>,
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for product in products {
        writer.serialize(OutputRow {
            id: &product.id,
            name: &product.name,
            price: product.price.value(),
            stock: product.stock,
        })?;
    }

    writer.flush()?;
    Ok(())
}
