use quarry_core::{driver::QueryResult, Error, Result, Value};

/// One result row, keyed by column name in result order.
pub type Row = serde_json::Map<String, Value>;

/// Zips a result's column names with each of its value rows.
pub(crate) fn rows(result: QueryResult) -> Result<Vec<Row>> {
    let QueryResult {
        columns, values, ..
    } = result;

    values
        .into_iter()
        .enumerate()
        .map(|(i, values)| {
            if values.len() != columns.len() {
                return Err(Error::invalid_row(
                    i,
                    format!("{} values for {} columns", values.len(), columns.len()),
                ));
            }

            Ok(columns.iter().cloned().zip(values).collect())
        })
        .collect()
}
