use eframe::egui::{self, RichText, Ui};
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::config::LegendPosition;
use crate::figure::Subplot;
use crate::state::{AppState, AxisView, clamp_window, padded_y_bounds};

/// Height reserved per subplot for title, preset buttons and slider.
const SUBPLOT_CHROME: f32 = 90.0;

// ---------------------------------------------------------------------------
// Figure (central panel)
// ---------------------------------------------------------------------------

/// Render every subplot stacked vertically in the central panel.
pub fn figure_view(ui: &mut Ui, state: &mut AppState) {
    let figure = match &state.figure {
        Some(fig) => fig,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view EMG channels  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&figure.title);
    });

    let n = figure.subplots.len().max(1) as f32;
    let plot_height = (ui.available_height() / n - SUBPLOT_CHROME).max(80.0);
    let corner = legend_corner(figure.legend);

    for (idx, (subplot, view)) in figure
        .subplots
        .iter()
        .zip(state.views.iter_mut())
        .enumerate()
    {
        ui.group(|ui: &mut Ui| {
            subplot_view(ui, idx, subplot, view, corner, plot_height);
        });
    }
}

fn legend_corner(position: LegendPosition) -> Corner {
    match position {
        LegendPosition::LeftTop => Corner::LeftTop,
        LegendPosition::RightTop => Corner::RightTop,
        LegendPosition::LeftBottom => Corner::LeftBottom,
        LegendPosition::RightBottom => Corner::RightBottom,
    }
}

// ---------------------------------------------------------------------------
// One subplot: title, range selector, plot, range slider
// ---------------------------------------------------------------------------

fn subplot_view(
    ui: &mut Ui,
    idx: usize,
    subplot: &Subplot,
    view: &mut AxisView,
    corner: Corner,
    plot_height: f32,
) {
    ui.label(RichText::new(&subplot.title).strong());

    // ---- Range selector ----
    ui.horizontal(|ui: &mut Ui| {
        for preset in &subplot.x_axis.presets {
            if ui.small_button(&preset.label).clicked() {
                view.apply_preset(preset);
            }
        }
    });

    // ---- Plot ----
    let pending = view.pending.take();
    let pending_bounds = pending.map(|x| (x, padded_y_bounds(subplot, x)));

    let response = Plot::new(("emg_subplot", idx))
        .legend(Legend::default().position(corner))
        .x_axis_label(subplot.x_axis.title.as_str())
        .y_axis_label(subplot.y_axis_title.as_str())
        .height(plot_height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(((x0, x1), (y0, y1))) = pending_bounds {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([x0, y0], [x1, y1]));
            }

            for trace in &subplot.traces {
                for segment in &trace.segments {
                    let points: PlotPoints = segment.iter().copied().collect();
                    let line = Line::new(points)
                        .name(&trace.name)
                        .color(trace.color)
                        .width(1.5);
                    plot_ui.line(line);
                }
            }
        });

    let bounds = response.transform.bounds();
    if pending.is_none() {
        view.observe((bounds.min()[0], bounds.max()[0]));
    }

    // ---- Range slider ----
    if subplot.x_axis.slider {
        range_slider(ui, view);
    }
}

/// Two handles over the full time extent; moving either re-targets the plot.
fn range_slider(ui: &mut Ui, view: &mut AxisView) {
    let (Some(full), Some(window)) = (view.full, view.window) else {
        return;
    };
    let (mut from, mut to) = clamp_window(window, full);

    ui.horizontal(|ui: &mut Ui| {
        let width = (ui.available_width() / 2.0 - 60.0).max(60.0);
        ui.spacing_mut().slider_width = width;
        let from_changed = ui
            .add(egui::Slider::new(&mut from, full.0..=full.1).text("from"))
            .changed();
        let to_changed = ui
            .add(egui::Slider::new(&mut to, full.0..=full.1).text("to"))
            .changed();
        if from_changed || to_changed {
            view.set_window((from, to));
        }
    });
}
