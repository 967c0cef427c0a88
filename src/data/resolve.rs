use crate::config::ChannelConfig;

use super::error::{COLUMN_PREVIEW, LoadError};
use super::model::{Series, Table};

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Return the first alias that names a column of `table`, with its cells.
///
/// Aliases are tried in order, so earlier spellings win when a file
/// happens to contain several.
pub fn resolve_column<'t>(
    table: &'t Table,
    field: &str,
    aliases: &[String],
) -> Result<(&'t str, &'t [String]), LoadError> {
    for alias in aliases {
        if let Some(idx) = table.column_index(alias) {
            let (name, cells) = table.column_at(idx);
            log::debug!("{field}: using column '{name}'");
            return Ok((name, cells));
        }
    }
    Err(LoadError::MissingColumn {
        field: field.to_string(),
        aliases: aliases.to_vec(),
        available: table
            .column_names()
            .iter()
            .take(COLUMN_PREVIEW)
            .cloned()
            .collect(),
    })
}

// ---------------------------------------------------------------------------
// Numeric coercion
// ---------------------------------------------------------------------------

/// Parse every cell as a number. Empty, unparseable and non-finite cells
/// (`"NaN"`, `"inf"`) become `None`; nothing here is an error.
pub fn coerce_numeric(cells: &[String]) -> Vec<Option<f64>> {
    cells
        .iter()
        .map(|cell| {
            cell.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
        })
        .collect()
}

/// A channel's resolved columns, coerced to numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChannel {
    pub id: u32,
    pub time_column: String,
    pub signal_column: String,
    pub series: Series,
}

/// Resolve and coerce both columns of one channel.
pub fn resolve_channel(
    table: &Table,
    channel: &ChannelConfig,
) -> Result<ResolvedChannel, LoadError> {
    let (time_column, time) =
        resolve_column(table, &channel.time_field(), &channel.time_aliases)?;
    let (signal_column, signal) =
        resolve_column(table, &channel.signal_field(), &channel.signal_aliases)?;

    let series = Series::new(coerce_numeric(time), coerce_numeric(signal));
    if series.is_empty() {
        log::warn!("Channel {}: table has no data rows", channel.id);
    }
    let dropped = series.len() - series.points().count();
    if dropped > 0 {
        log::info!(
            "Channel {}: {dropped} of {} rows have a missing time or signal value",
            channel.id,
            series.len()
        );
    }

    Ok(ResolvedChannel {
        id: channel.id,
        time_column: time_column.to_string(),
        signal_column: signal_column.to_string(),
        series,
    })
}
