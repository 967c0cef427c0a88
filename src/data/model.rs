// ---------------------------------------------------------------------------
// Table – the loaded file, untyped
// ---------------------------------------------------------------------------

/// A loaded table: ordered column names and raw text cells.
///
/// Stored column-major. Every column has exactly `n_rows` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    cells: Vec<Vec<String>>,
    n_rows: usize,
}

impl Table {
    /// Build a table from `(name, cells)` pairs. Short columns are padded
    /// with empty cells so that all columns share the longest length.
    pub fn from_columns(columns: Vec<(String, Vec<String>)>) -> Self {
        let n_rows = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
        let (names, mut cells): (Vec<String>, Vec<Vec<String>>) = columns.into_iter().unzip();
        for col in &mut cells {
            col.resize(n_rows, String::new());
        }
        Table {
            columns: names,
            cells,
            n_rows,
        }
    }

    /// Column names in file order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Position of the named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of the named column, or `None` if absent.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.column_index(name).map(|i| self.cells[i].as_slice())
    }

    /// Name and cells of the column at `idx`.
    pub fn column_at(&self, idx: usize) -> (&str, &[String]) {
        (self.columns[idx].as_str(), self.cells[idx].as_slice())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

// ---------------------------------------------------------------------------
// Series – one coerced (time, signal) pair
// ---------------------------------------------------------------------------

/// A numeric (x, y) pair of columns. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
}

impl Series {
    pub fn new(x: Vec<Option<f64>>, y: Vec<Option<f64>>) -> Self {
        Series { x, y }
    }

    /// Number of rows (the longer of the two columns).
    pub fn len(&self) -> usize {
        self.x.len().max(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rows where both coordinates are present, paired by row index.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter_map(|(x, y)| Some([(*x)?, (*y)?]))
    }

    /// Contiguous runs of present points. A missing x or y ends the run,
    /// so lines are never bridged across gaps.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for i in 0..self.len() {
            let x = self.x.get(i).copied().flatten();
            let y = self.y.get(i).copied().flatten();
            match (x, y) {
                (Some(x), Some(y)) => current.push([x, y]),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// `(min, max)` of the present x values.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        extent(self.points().map(|[x, _]| x))
    }

    /// `(min, max)` of y over points whose x lies in `[x_min, x_max]`.
    pub fn y_extent_within(&self, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
        extent(
            self.points()
                .filter(|[x, _]| *x >= x_min && *x <= x_max)
                .map(|[_, y]| y),
        )
    }
}

/// Min and max of an iterator of finite values.
pub fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn table_pads_short_columns() {
        let table = Table::from_columns(vec![
            ("a".into(), cells(&["1", "2", "3"])),
            ("b".into(), cells(&["4"])),
        ]);
        assert_eq!(table.n_rows(), 3);
        assert_eq!(table.column("b").unwrap(), &cells(&["4", "", ""])[..]);
        assert!(table.column("c").is_none());
    }

    #[test]
    fn segments_break_at_missing_points() {
        let series = Series::new(
            vec![Some(0.0), Some(1.0), Some(2.0), None, Some(4.0)],
            vec![Some(1.0), None, Some(3.0), Some(4.0), Some(5.0)],
        );
        let segs = series.segments();
        assert_eq!(segs, vec![vec![[0.0, 1.0]], vec![[2.0, 3.0]], vec![[4.0, 5.0]]]);
        assert_eq!(series.points().count(), 3);
    }

    #[test]
    fn mismatched_lengths_pair_by_row() {
        let series = Series::new(vec![Some(0.0), Some(1.0), Some(2.0)], vec![Some(5.0)]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.segments(), vec![vec![[0.0, 5.0]]]);
    }

    #[test]
    fn series_without_rows_is_empty() {
        assert!(Series::new(Vec::new(), Vec::new()).is_empty());
        assert!(!Series::new(vec![None], Vec::new()).is_empty());
    }

    #[test]
    fn y_extent_follows_window() {
        let series = Series::new(
            vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)],
            vec![Some(10.0), Some(-2.0), Some(7.0), Some(100.0)],
        );
        assert_eq!(series.x_extent(), Some((0.0, 3.0)));
        assert_eq!(series.y_extent_within(0.5, 2.5), Some((-2.0, 7.0)));
        assert_eq!(series.y_extent_within(10.0, 20.0), None);
    }
}
