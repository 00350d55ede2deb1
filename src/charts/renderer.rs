//! Static Chart Renderer
//! Draws the report charts with plotters into in-memory RGB buffers, then
//! encodes them to PNG files with the `image` crate.

use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeMap;
use std::path::Path;

use crate::stats::CrossTab;

pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 800;

/// Same series palette as the interactive charts.
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(231, 76, 60),  // Red
    RGBColor(46, 204, 113), // Green
    RGBColor(155, 89, 182), // Purple
    RGBColor(243, 156, 18), // Orange
    RGBColor(26, 188, 156), // Teal
    RGBColor(233, 30, 99),  // Pink
    RGBColor(0, 188, 212),  // Cyan
    RGBColor(255, 87, 34),  // Deep Orange
    RGBColor(121, 85, 72),  // Brown
    RGBColor(96, 125, 139), // Blue Grey
];

pub const ACCENT: RGBColor = RGBColor(52, 152, 219);

fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Encode a finished RGB buffer as a PNG on disk.
fn save_rgb(buffer: Vec<u8>, width: u32, height: u32, path: &Path) -> Result<()> {
    let img = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| anyhow!("chart buffer size mismatch"))?;
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Horizontal count bars, largest at the top. An empty slice still produces
/// a valid (blank) chart.
pub fn horizontal_bar_png(
    counts: &[(String, u64)],
    title: &str,
    x_desc: &str,
    y_desc: &str,
    path: &Path,
) -> Result<()> {
    let n = counts.len();
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let labels: Vec<String> = counts.iter().map(|(label, _)| label.clone()).collect();

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(240)
            .build_cartesian_2d(0u64..max + max / 10 + 1, (0usize..n.max(1)).into_segmented())?;

        let y_fmt = |seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(slot) if *slot < labels.len() => {
                labels[labels.len() - 1 - *slot].clone()
            }
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(n.max(1))
            .y_label_formatter(&y_fmt)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series(
            Histogram::horizontal(&chart)
                .style(ACCENT.filled())
                .margin(6)
                .data(counts.iter().enumerate().map(|(i, (_, c))| (n - 1 - i, *c))),
        )?;

        root.present()?;
    }
    save_rgb(buffer, CHART_WIDTH, CHART_HEIGHT, path)
}

/// Annotated heatmap of a cross-tabulation, white-to-red by count. The first
/// row label is drawn at the top, matching the tabular view of the data.
pub fn heatmap_png(
    crosstab: &CrossTab,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    path: &Path,
) -> Result<()> {
    let rows = crosstab.row_labels.len();
    let cols = crosstab.col_labels.len();
    let max = crosstab.max_count().max(1) as f64;

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(90)
            .y_label_area_size(150)
            .build_cartesian_2d(
                (0usize..cols.max(1)).into_segmented(),
                (0usize..rows.max(1)).into_segmented(),
            )?;

        let x_fmt = |seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(c) if *c < crosstab.col_labels.len() => {
                truncate_label(&crosstab.col_labels[*c], 16)
            }
            _ => String::new(),
        };
        let y_fmt = |seg: &SegmentValue<usize>| match seg {
            SegmentValue::CenterOf(r) if *r < crosstab.row_labels.len() => {
                // Row 0 at the top.
                crosstab.row_labels[crosstab.row_labels.len() - 1 - *r].clone()
            }
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(cols.max(1))
            .y_labels(rows.max(1))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series((0..rows).flat_map(|r| (0..cols).map(move |c| (r, c))).map(
            |(r, c)| {
                let t = crosstab.counts[r][c] as f64 / max;
                let slot = rows - 1 - r;
                Rectangle::new(
                    [
                        (SegmentValue::Exact(c), SegmentValue::Exact(slot)),
                        (SegmentValue::Exact(c + 1), SegmentValue::Exact(slot + 1)),
                    ],
                    heat_color(t).filled(),
                )
            },
        ))?;

        chart.draw_series((0..rows).flat_map(|r| (0..cols).map(move |c| (r, c))).map(
            |(r, c)| {
                let count = crosstab.counts[r][c];
                let t = count as f64 / max;
                let slot = rows - 1 - r;
                let color = if t > 0.55 { &WHITE } else { &BLACK };
                let style = TextStyle::from(("sans-serif", 15).into_font())
                    .color(color)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                Text::new(
                    count.to_string(),
                    (SegmentValue::CenterOf(c), SegmentValue::CenterOf(slot)),
                    style,
                )
            },
        ))?;

        root.present()?;
    }
    save_rgb(buffer, CHART_WIDTH, CHART_HEIGHT, path)
}

/// Single line of yearly counts with point markers. Missing years leave
/// gaps in the x positions, never interpolated points.
pub fn year_line_png(series: &[(i32, u64)], title: &str, path: &Path) -> Result<()> {
    let (x0, x1) = year_span(series.iter().map(|&(y, _)| y));
    let y_max = series.iter().map(|&(_, c)| c).max().unwrap_or(0);

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1 + 1, 0u64..y_max + y_max / 10 + 1)?;

        let x_fmt = |year: &i32| year.to_string();
        chart
            .configure_mesh()
            .x_label_formatter(&x_fmt)
            .x_desc("Year")
            .y_desc("Number of Attacks")
            .draw()?;

        chart.draw_series(LineSeries::new(
            series.iter().map(|&(y, c)| (y, c)),
            ACCENT.stroke_width(2),
        ))?;
        chart.draw_series(
            series
                .iter()
                .map(|&(y, c)| Circle::new((y, c), 4, ACCENT.filled())),
        )?;

        root.present()?;
    }
    save_rgb(buffer, CHART_WIDTH, CHART_HEIGHT, path)
}

/// One line per category with a legend, for the per-year trend views.
pub fn multi_line_png(
    series: &BTreeMap<String, Vec<(i32, u64)>>,
    title: &str,
    path: &Path,
) -> Result<()> {
    let (x0, x1) = year_span(series.values().flatten().map(|&(y, _)| y));
    let y_max = series
        .values()
        .flatten()
        .map(|&(_, c)| c)
        .max()
        .unwrap_or(0);

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x0..x1 + 1, 0u64..y_max + y_max / 10 + 1)?;

        let x_fmt = |year: &i32| year.to_string();
        chart
            .configure_mesh()
            .x_label_formatter(&x_fmt)
            .x_desc("Year")
            .y_desc("Number of Attacks")
            .draw()?;

        for (index, (name, points)) in series.iter().enumerate() {
            let color = series_color(index);
            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|&(y, c)| (y, c)),
                    color.stroke_width(2),
                ))?
                .label(name.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
            chart.draw_series(
                points
                    .iter()
                    .map(|&(y, c)| Circle::new((y, c), 4, color.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;

        root.present()?;
    }
    save_rgb(buffer, CHART_WIDTH, CHART_HEIGHT, path)
}

/// Horizontal grouped bars: one band per row category (ordered by total,
/// largest at the top), one colored bar per column category inside it.
pub fn grouped_bar_png(
    crosstab: &CrossTab,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    path: &Path,
) -> Result<()> {
    let rows = crosstab.row_labels.len();
    let cols = crosstab.col_labels.len();
    let max = crosstab.max_count();

    // Band order: descending row totals, the way a countplot orders it.
    let totals = crosstab.row_totals();
    let mut order: Vec<usize> = (0..rows).collect();
    order.sort_by(|&a, &b| {
        totals[b]
            .cmp(&totals[a])
            .then_with(|| crosstab.row_labels[a].cmp(&crosstab.row_labels[b]))
    });

    let mut buffer = vec![0u8; (CHART_WIDTH * CHART_HEIGHT * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(160)
            .build_cartesian_2d(0f64..(max + max / 10 + 1) as f64, 0f64..rows.max(1) as f64)?;

        let y_fmt = |y: &f64| {
            let tick = y.round();
            if (y - tick).abs() > 1e-6 || tick < 0.0 {
                return String::new();
            }
            let band = tick as usize;
            if band < rows {
                // Band [k, k+1) holds display position rows-1-k.
                crosstab.row_labels[order[rows - 1 - band]].clone()
            } else {
                String::new()
            }
        };
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(rows.max(1) + 1)
            .y_label_formatter(&y_fmt)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .draw()?;

        let bar_h = 0.8 / cols.max(1) as f64;
        for (j, col_label) in crosstab.col_labels.iter().enumerate() {
            let color = series_color(j);
            chart
                .draw_series((0..rows).map(|display| {
                    let row = order[display];
                    let band_bottom = (rows - 1 - display) as f64;
                    let y0 = band_bottom + 0.1 + j as f64 * bar_h;
                    let value = crosstab.counts[row][j] as f64;
                    Rectangle::new([(0.0, y0), (value, y0 + bar_h * 0.9)], color.filled())
                }))?
                .label(col_label.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()?;

        root.present()?;
    }
    save_rgb(buffer, CHART_WIDTH, CHART_HEIGHT, path)
}

fn year_span(years: impl Iterator<Item = i32>) -> (i32, i32) {
    let mut span: Option<(i32, i32)> = None;
    for year in years {
        span = Some(match span {
            Some((lo, hi)) => (lo.min(year), hi.max(year)),
            None => (year, year),
        });
    }
    span.unwrap_or((0, 1))
}

/// White at zero, saturated red at the maximum count.
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    RGBColor(
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
