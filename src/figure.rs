use std::path::Path;

use eframe::egui::Color32;

use crate::color::{generate_palette, parse_color};
use crate::config::{ConfigError, EmgConfig, LegendPosition, RangePreset};
use crate::data::loader::load_table;
use crate::data::model::{Series, Table, extent};
use crate::data::resolve::{ResolvedChannel, resolve_channel};

// ---------------------------------------------------------------------------
// Figure model – what the viewer draws, independent of egui
// ---------------------------------------------------------------------------

/// One plotted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub color: Color32,
    pub series: Series,
    /// Gap-free runs of `series`, drawn as separate line pieces.
    pub segments: Vec<Vec<[f64; 2]>>,
}

impl Trace {
    pub fn new(name: String, color: Color32, series: Series) -> Self {
        let segments = series.segments();
        Trace {
            name,
            color,
            series,
            segments,
        }
    }
}

/// Time-axis settings of one subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxis {
    pub title: String,
    pub presets: Vec<RangePreset>,
    pub slider: bool,
}

/// One row of the figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Subplot {
    pub title: String,
    pub x_axis: TimeAxis,
    pub y_axis_title: String,
    pub traces: Vec<Trace>,
}

impl Subplot {
    /// Full x extent over all traces.
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        let bounds: Vec<(f64, f64)> = self
            .traces
            .iter()
            .filter_map(|t| t.series.x_extent())
            .collect();
        Some((
            extent(bounds.iter().map(|b| b.0))?.0,
            extent(bounds.iter().map(|b| b.1))?.1,
        ))
    }

    /// y extent over all traces, restricted to `[x_min, x_max]`.
    pub fn y_extent_within(&self, x_min: f64, x_max: f64) -> Option<(f64, f64)> {
        let bounds: Vec<(f64, f64)> = self
            .traces
            .iter()
            .filter_map(|t| t.series.y_extent_within(x_min, x_max))
            .collect();
        Some((
            extent(bounds.iter().map(|b| b.0))?.0,
            extent(bounds.iter().map(|b| b.1))?.1,
        ))
    }
}

/// The whole chart: a column of independently zoomable subplots.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub width: f32,
    pub height: f32,
    pub legend: LegendPosition,
    pub subplots: Vec<Subplot>,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Build the figure from an already loaded table.
///
/// Every configured channel is resolved first, in configuration order, so
/// a missing column is reported before any layout or colour problem.
pub fn build_figure(config: &EmgConfig, table: &Table) -> anyhow::Result<Figure> {
    config.validate()?;

    let resolved = config
        .channels
        .iter()
        .map(|channel| resolve_channel(table, channel))
        .collect::<Result<Vec<ResolvedChannel>, _>>()?;
    for r in &resolved {
        log::debug!("Channel {}: '{}' vs '{}'", r.id, r.time_column, r.signal_column);
    }

    let fallback = generate_palette(config.channels.len());
    let mut subplots = Vec::with_capacity(config.panels.len());
    for panel in &config.panels {
        let mut traces = Vec::with_capacity(panel.channels.len());
        for &id in &panel.channels {
            let idx = config
                .channels
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| ConfigError::UnknownChannel {
                    panel: panel.title.clone(),
                    channel: id,
                })?;
            let channel = &config.channels[idx];

            let color = match &channel.color {
                Some(name) => parse_color(name).ok_or_else(|| ConfigError::UnknownColor {
                    channel: id,
                    name: name.clone(),
                })?,
                None => fallback[idx],
            };

            traces.push(Trace::new(
                channel.trace_name(),
                color,
                resolved[idx].series.clone(),
            ));
        }

        subplots.push(Subplot {
            title: panel.title.clone(),
            x_axis: TimeAxis {
                title: config.x_axis_title.clone(),
                presets: config.range_presets.clone(),
                slider: config.range_slider,
            },
            y_axis_title: config.y_axis_title.clone(),
            traces,
        });
    }

    Ok(Figure {
        title: config.title.clone(),
        width: config.width,
        height: config.height,
        legend: config.legend,
        subplots,
    })
}

/// The whole pipeline: read file → resolve columns → coerce → build chart.
pub fn load_figure(config: &EmgConfig, path: &Path) -> anyhow::Result<Figure> {
    let table = load_table(path)?;
    build_figure(config, &table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::error::LoadError;

    const HEADER: &str = "X[s]_21,EMG21,X[s]_22,EMG22,X[s]_31,EMG31,X[s]_32,EMG32";

    fn write_csv(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("data.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn end_to_end_two_rows_two_traces() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!(
                "{HEADER}\n0.0,1,0.0,2,0.0,3,0.0,4\n0.1,1.5,0.1,2.5,0.1,3.5,0.1,4.5\n0.2,1,0.2,2,0.2,3,0.2,4\n"
            ),
        );

        let figure = load_figure(&EmgConfig::default(), &path).unwrap();
        assert_eq!(figure.title, "EMG Time Series (Interactive)");
        assert_eq!(figure.subplots.len(), 2);
        for subplot in &figure.subplots {
            assert_eq!(subplot.traces.len(), 2);
            assert_eq!(subplot.x_axis.title, "Time (s)");
            assert!(subplot.x_axis.slider);
            assert_eq!(subplot.x_axis.presets.len(), 4);
        }

        let top = &figure.subplots[0];
        assert_eq!(top.traces[0].name, "EMG21 (X21)");
        assert_eq!(top.traces[0].color, Color32::from_rgb(0, 0, 255));
        assert_eq!(top.traces[1].name, "EMG22 (X22)");
        assert_eq!(top.traces[1].color, Color32::from_rgb(255, 165, 0));

        let bottom = &figure.subplots[1];
        assert_eq!(bottom.traces[0].name, "EMG32 (X32)");
        assert_eq!(bottom.traces[1].name, "EMG31 (X31)");
        assert_eq!(bottom.traces[0].series.y, vec![Some(4.0), Some(4.5), Some(4.0)]);
    }

    #[test]
    fn non_numeric_signal_leaves_a_gap() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            &format!("{HEADER}\n0,1,0,2,0,3,0,4\n1,NaN,1,2,1,3,1,4\n2,1,2,abc,2,3,2,4\n"),
        );

        let figure = load_figure(&EmgConfig::default(), &path).unwrap();
        let emg21 = &figure.subplots[0].traces[0].series;
        assert_eq!(emg21.y, vec![Some(1.0), None, Some(1.0)]);
        assert_eq!(figure.subplots[0].traces[0].segments.len(), 2);
        let emg22 = &figure.subplots[0].traces[1].series;
        assert_eq!(emg22.y, vec![Some(2.0), Some(2.0), None]);
    }

    #[test]
    fn missing_column_is_reported_through_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "X[s]_21,EMG21\n0,1\n");

        let err = load_figure(&EmgConfig::default(), &path).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(matches!(load_err, LoadError::MissingColumn { field, .. } if field == "time-22"));
    }

    #[test]
    fn unknown_colour_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, &format!("{HEADER}\n0,1,0,2,0,3,0,4\n"));
        let mut config = EmgConfig::default();
        config.channels[0].color = Some("blurple".to_string());

        let err = load_figure(&config, &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownColor { channel: 21, .. })
        ));
    }

    #[test]
    fn channels_resolve_in_configuration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "X[s]_21,EMG21,X[s]_22,EMG22\n0,1,0,2\n");

        let err = load_figure(&EmgConfig::default(), &path).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(matches!(load_err, LoadError::MissingColumn { field, .. } if field == "time-31"));
    }

    #[test]
    fn missing_column_wins_over_bad_colour() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(&dir, "X[s]_21,EMG21\n0,1\n");
        let mut config = EmgConfig::default();
        config.channels[0].color = Some("blurple".to_string());

        let err = load_figure(&config, &path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingColumn { field, .. }) if field == "time-22"
        ));
    }

    #[test]
    fn subplot_extents_cover_all_traces() {
        let trace = |x: Vec<f64>, y: Vec<f64>| {
            Trace::new(
                String::new(),
                Color32::WHITE,
                Series::new(
                    x.into_iter().map(Some).collect(),
                    y.into_iter().map(Some).collect(),
                ),
            )
        };
        let subplot = Subplot {
            title: String::new(),
            x_axis: TimeAxis {
                title: String::new(),
                presets: Vec::new(),
                slider: true,
            },
            y_axis_title: String::new(),
            traces: vec![
                trace(vec![0.0, 1.0, 2.0], vec![5.0, 6.0, 7.0]),
                trace(vec![1.5, 4.0], vec![-1.0, 20.0]),
            ],
        };
        assert_eq!(subplot.x_extent(), Some((0.0, 4.0)));
        assert_eq!(subplot.y_extent_within(0.5, 2.0), Some((-1.0, 7.0)));
    }
}
