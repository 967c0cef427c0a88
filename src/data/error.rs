use std::path::PathBuf;

use thiserror::Error;

/// Maximum number of actual column names quoted in a [`LoadError::MissingColumn`].
pub const COLUMN_PREVIEW: usize = 20;

/// Failures of the load → resolve pipeline. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "could not find file: {}\nPut your CSV at this path or change `data_path` in the layout config.",
        .path.display()
    )]
    FileNotFound { path: PathBuf },

    #[error(
        "none of the candidates for '{field}' found in columns: {aliases:?}\nAvailable columns: {available:?}"
    )]
    MissingColumn {
        field: String,
        aliases: Vec<String>,
        /// At most [`COLUMN_PREVIEW`] names, in file order.
        available: Vec<String>,
    },

    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("reading parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("{context}: {source}")]
    Arrow {
        context: String,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
