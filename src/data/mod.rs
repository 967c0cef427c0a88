/// Data layer: loading, column resolution and numeric coercion.
///
/// Architecture:
/// ```text
///  .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (text cells)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ resolve   │  alias list → column, text → Option<f64>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Series   │  (x, y) per channel, handed to the figure builder
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod resolve;
