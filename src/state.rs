use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::{EmgConfig, RangePreset};
use crate::figure::{Figure, Subplot, load_figure};

// ---------------------------------------------------------------------------
// Per-subplot time-axis view
// ---------------------------------------------------------------------------

/// Visible x window of one subplot. Subplots never share a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisView {
    /// Full x extent of the data (`None` when the subplot has no points).
    pub full: Option<(f64, f64)>,
    /// Window currently shown by the plot.
    pub window: Option<(f64, f64)>,
    /// Window to push into the plot on the next frame.
    pub pending: Option<(f64, f64)>,
}

impl AxisView {
    pub fn for_subplot(subplot: &Subplot) -> Self {
        let full = subplot.x_extent();
        AxisView {
            full,
            window: full,
            pending: full,
        }
    }

    /// Jump to a preset button's window.
    pub fn apply_preset(&mut self, preset: &RangePreset) {
        if let Some(full) = self.full {
            self.set_window(preset_window(full, preset.seconds));
        }
    }

    /// Request a window (from the slider or a preset). Ends are reordered and
    /// clamped to the data extent.
    pub fn set_window(&mut self, window: (f64, f64)) {
        let Some(full) = self.full else {
            return;
        };
        let window = clamp_window(window, full);
        self.window = Some(window);
        self.pending = Some(window);
    }

    /// Record the window the plot actually shows after user drag/zoom.
    pub fn observe(&mut self, window: (f64, f64)) {
        self.window = Some(window);
    }
}

/// `seconds == None` shows everything; otherwise the last `seconds` of data,
/// never starting before the first sample.
pub fn preset_window(full: (f64, f64), seconds: Option<f64>) -> (f64, f64) {
    match seconds {
        Some(s) => ((full.1 - s).max(full.0), full.1),
        None => full,
    }
}

pub fn clamp_window(window: (f64, f64), full: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = if window.0 <= window.1 {
        window
    } else {
        (window.1, window.0)
    };
    (lo.clamp(full.0, full.1), hi.clamp(full.0, full.1))
}

/// y bounds for an x window with 5 % headroom; flat or empty data gets ±1.
pub fn padded_y_bounds(subplot: &Subplot, window: (f64, f64)) -> (f64, f64) {
    match subplot.y_extent_within(window.0, window.1) {
        Some((lo, hi)) if hi > lo => {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        }
        Some((v, _)) => (v - 1.0, v + 1.0),
        None => (-1.0, 1.0),
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Layout and column aliases used for every (re)load.
    pub config: EmgConfig,

    /// Figure built from the last successful load.
    pub figure: Option<Figure>,

    /// One view per subplot of `figure`.
    pub views: Vec<AxisView>,

    /// File the current figure was built from.
    pub source: Option<PathBuf>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: EmgConfig) -> Self {
        Self {
            config,
            figure: None,
            views: Vec::new(),
            source: None,
            status_message: None,
        }
    }

    /// Install a freshly built figure and reset every subplot to its full extent.
    pub fn set_figure(&mut self, figure: Figure, source: PathBuf) {
        self.views = figure.subplots.iter().map(AxisView::for_subplot).collect();
        self.figure = Some(figure);
        self.source = Some(source);
        self.status_message = None;
    }

    /// Run the pipeline on `path` with `config`. Config and figure are only
    /// replaced on success; on failure the current ones stay and the error
    /// goes to the status line.
    pub fn load_with(&mut self, config: EmgConfig, path: &Path) -> bool {
        let result = load_figure(&config, path)
            .with_context(|| format!("loading {}", path.display()));
        match result {
            Ok(figure) => {
                self.config = config;
                self.set_figure(figure, path.to_path_buf());
                true
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    /// Reload `path` with the current config.
    pub fn reload(&mut self, path: &Path) -> bool {
        self.load_with(self.config.clone(), path)
    }

    /// Apply the `preset_idx`-th preset button of subplot `subplot_idx`.
    pub fn apply_preset(&mut self, subplot_idx: usize, preset_idx: usize) {
        let Some(figure) = &self.figure else {
            return;
        };
        let Some(preset) = figure
            .subplots
            .get(subplot_idx)
            .and_then(|s| s.x_axis.presets.get(preset_idx))
        else {
            return;
        };
        if let Some(view) = self.views.get_mut(subplot_idx) {
            view.apply_preset(preset);
        }
    }
}
