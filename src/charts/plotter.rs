//! Chart Plotter Module
//! Interactive visualizations for the dashboard using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

use crate::stats::CrossTab;

/// Accent color for single-series charts
pub const ACCENT_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

/// Color for the n-th series of a multi-series chart.
pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Single line over years with point markers. Years missing from `series`
/// simply aren't on the line.
pub fn draw_year_line(ui: &mut egui::Ui, id: &str, series: &[(i32, u64)], height: f32) {
    let points: Vec<[f64; 2]> = series
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new(id.to_string())
        .height(height)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Number of Attacks")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from_iter(points.iter().copied()))
                    .color(ACCENT_COLOR)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from_iter(points.iter().copied()))
                    .radius(3.5)
                    .color(ACCENT_COLOR),
            );
        });
}

/// One line per category, legend enabled.
pub fn draw_trend_lines(
    ui: &mut egui::Ui,
    id: &str,
    series: &BTreeMap<String, Vec<(i32, u64)>>,
    height: f32,
) {
    Plot::new(id.to_string())
        .height(height)
        .allow_scroll(false)
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Number of Attacks")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            for (index, (name, points)) in series.iter().enumerate() {
                let color = series_color(index);
                let pts: Vec<[f64; 2]> = points
                    .iter()
                    .map(|&(year, count)| [year as f64, count as f64])
                    .collect();
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(pts.iter().copied()))
                        .color(color)
                        .width(2.0)
                        .name(name),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(pts.iter().copied()))
                        .radius(3.0)
                        .color(color)
                        .name(name),
                );
            }
        });
}

/// Horizontal count bars, largest at the top. An empty `counts` slice still
/// renders an (empty) plot.
pub fn draw_count_bars(
    ui: &mut egui::Ui,
    id: &str,
    counts: &[(String, u64)],
    color: Color32,
    x_label: &str,
    height: f32,
) {
    let n = counts.len();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            // Row 0 (the largest count) gets the highest y slot.
            Bar::new((n - 1 - i) as f64, *count as f64)
                .width(0.6)
                .name(label)
                .fill(color)
        })
        .collect();
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();

    Plot::new(id.to_string())
        .height(height)
        .allow_scroll(false)
        .x_axis_label(x_label.to_string())
        .y_axis_formatter(move |mark, _range| {
            let slot = mark.value.round();
            if (mark.value - slot).abs() > 0.05 || slot < 0.0 {
                return String::new();
            }
            let slot = slot as usize;
            if slot < labels.len() {
                labels[labels.len() - 1 - slot].clone()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}

/// Stacked proportion areas per category over years. `series` holds one
/// share row per category, aligned with `years`; shares per year sum to 1
/// where data exists. Drawn with a 50% guide line.
pub fn draw_stacked_area(
    ui: &mut egui::Ui,
    id: &str,
    years: &[i32],
    series: &[(String, Vec<f64>)],
    height: f32,
) {
    let mut cumulative = vec![0.0f64; years.len()];
    let mut layers: Vec<(String, Vec<[f64; 2]>)> = Vec::new();
    for (name, shares) in series {
        for (i, share) in shares.iter().enumerate() {
            cumulative[i] += *share;
        }
        let pts = years
            .iter()
            .enumerate()
            .map(|(i, &year)| [year as f64, cumulative[i]])
            .collect();
        layers.push((name.clone(), pts));
    }

    Plot::new(id.to_string())
        .height(height)
        .allow_scroll(false)
        .legend(Legend::default())
        .include_y(0.0)
        .include_y(1.0)
        .x_axis_label("Year")
        .y_axis_label("Proportion")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            // Top layer first so the lower fills paint over it.
            for (index, (name, pts)) in layers.iter().enumerate().rev() {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(pts.iter().copied()))
                        .color(series_color(index))
                        .width(1.5)
                        .fill(0.0)
                        .name(name),
                );
            }
            if let (Some(&first), Some(&last)) = (years.first(), years.last()) {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(
                        [[first as f64, 0.5], [last as f64, 0.5]].into_iter(),
                    ))
                    .color(Color32::GRAY)
                    .width(1.0)
                    .style(LineStyle::dashed_loose()),
                );
            }
        });
}

/// Annotated heatmap of a cross-tabulation, white-to-red by count, drawn
/// straight with the painter.
pub fn draw_heatmap(ui: &mut egui::Ui, crosstab: &CrossTab) {
    if crosstab.is_empty() {
        ui.label("No data available for heatmap with current filters.");
        return;
    }

    let rows = crosstab.row_labels.len();
    let cols = crosstab.col_labels.len();
    let left = 130.0f32;
    let top = 8.0f32;
    let bottom = 60.0f32;
    let cell_h = 28.0f32;
    let width = ui.available_width();
    let cell_w = ((width - left).max(80.0)) / cols as f32;

    let desired = egui::vec2(width, top + rows as f32 * cell_h + bottom);
    let (rect, _response) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let max = crosstab.max_count().max(1) as f32;
    let origin = rect.min + egui::vec2(left, top);
    let text_color = ui.visuals().text_color();

    for (ri, row) in crosstab.counts.iter().enumerate() {
        for (ci, &count) in row.iter().enumerate() {
            let t = count as f32 / max;
            let cell = egui::Rect::from_min_size(
                origin + egui::vec2(ci as f32 * cell_w, ri as f32 * cell_h),
                egui::vec2(cell_w - 1.0, cell_h - 1.0),
            );
            painter.rect_filled(cell, 2.0, heat_color(t));
            let annot_color = if t > 0.55 {
                Color32::WHITE
            } else {
                Color32::from_gray(40)
            };
            painter.text(
                cell.center(),
                egui::Align2::CENTER_CENTER,
                count.to_string(),
                egui::FontId::proportional(11.0),
                annot_color,
            );
        }
    }

    for (ri, label) in crosstab.row_labels.iter().enumerate() {
        painter.text(
            egui::pos2(rect.min.x + left - 6.0, origin.y + ri as f32 * cell_h + cell_h / 2.0),
            egui::Align2::RIGHT_CENTER,
            label,
            egui::FontId::proportional(11.0),
            text_color,
        );
    }
    for (ci, label) in crosstab.col_labels.iter().enumerate() {
        painter.text(
            egui::pos2(origin.x + ci as f32 * cell_w + cell_w / 2.0, origin.y + rows as f32 * cell_h + 6.0),
            egui::Align2::CENTER_TOP,
            truncate_label(label, 14),
            egui::FontId::proportional(10.0),
            text_color,
        );
    }
}

/// White at zero, saturated red at the maximum count.
fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    Color32::from_rgb(
        (255.0 - 35.0 * t) as u8,
        (244.0 - 200.0 * t) as u8,
        (239.0 - 210.0 * t) as u8,
    )
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let mut out: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
