use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::Table;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – flat columns of scalars, every cell rendered as text
/// * anything else      – delimited text with a header row (CSV)
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        _ => load_csv(path)?,
    };
    log::info!(
        "Loaded {} rows x {} columns from {}",
        table.n_rows(),
        table.n_columns(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per row. Records shorter than
/// the header are padded with empty cells; extra trailing cells are dropped.
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut overlong_rows = 0usize;

    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            overlong_rows += 1;
        }
        for (col_idx, column) in cells.iter_mut().enumerate() {
            column.push(record.get(col_idx).unwrap_or("").to_string());
        }
    }

    if overlong_rows > 0 {
        log::warn!(
            "{overlong_rows} row(s) in {} have more fields than the header; extra fields ignored",
            path.display()
        );
    }

    Ok(Table::from_columns(headers.into_iter().zip(cells).collect()))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per field.
///
/// Every column is cast to UTF-8 so that the result is as untyped as a CSV
/// table; nulls become empty cells. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];

    for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            context: "reading parquet record batch".to_string(),
            source,
        })?;

        for (col_idx, column) in cells.iter_mut().enumerate() {
            let text = arrow::compute::cast(batch.column(col_idx), &DataType::Utf8).map_err(
                |source| LoadError::Arrow {
                    context: format!("converting parquet column '{}'", names[col_idx]),
                    source,
                },
            )?;
            let text = text.as_string::<i32>();
            column.extend((0..text.len()).map(|row| {
                if text.is_null(row) {
                    String::new()
                } else {
                    text.value(row).to_string()
                }
            }));
        }
    }

    Ok(Table::from_columns(names.into_iter().zip(cells).collect()))
}
