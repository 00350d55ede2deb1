//! Tab Panels
//! The summary metric row and the three tabbed chart views.

use egui::{Color32, RichText};

use crate::charts::plotter;
use crate::gui::app::ChartSet;
use crate::stats::SummaryMetrics;

const CHART_HEIGHT: f32 = 300.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Trends,
    Attackers,
    Targets,
}

pub fn tab_bar(ui: &mut egui::Ui, active: &mut Tab) {
    ui.horizontal(|ui| {
        for (tab, label) in [
            (Tab::Trends, "📈 Trends over Time"),
            (Tab::Attackers, "🕵 The Attackers"),
            (Tab::Targets, "🎯 The Targets"),
        ] {
            if ui
                .selectable_label(*active == tab, RichText::new(label).size(14.0))
                .clicked()
            {
                *active = tab;
            }
        }
    });
}

/// Four metric cards above the tabs. The modal cards stay blank on an empty
/// view; the total shows zero.
pub fn metrics_row(ui: &mut egui::Ui, metrics: &SummaryMetrics) {
    ui.label(RichText::new("Key Metrics").size(16.0).strong());
    ui.add_space(4.0);
    ui.columns(4, |cols| {
        metric_card(&mut cols[0], "Total Attacks", Some(group_thousands(metrics.total)));
        metric_card(&mut cols[1], "Top Actor Type", metrics.top_actor_type.clone());
        metric_card(&mut cols[2], "Most Targeted Industry", metrics.top_industry.clone());
        metric_card(&mut cols[3], "Dominant Motive", metrics.top_motive.clone());
    });
}

fn metric_card(ui: &mut egui::Ui, title: &str, value: Option<String>) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(8.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
            match value {
                Some(v) => {
                    ui.label(RichText::new(v).size(20.0).strong());
                }
                None => {
                    // An empty view has no modal value; the card stays blank.
                    ui.add_space(24.0);
                }
            }
        });
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn show_trends(ui: &mut egui::Ui, charts: &ChartSet) {
    ui.label(
        RichText::new("Attack Volume and Motives Over Time")
            .size(16.0)
            .strong(),
    );
    ui.add_space(6.0);
    ui.columns(2, |cols| {
        cols[0].label(RichText::new("Total Attacks per Year").strong());
        plotter::draw_year_line(&mut cols[0], "yearly_trend", &charts.yearly, CHART_HEIGHT);

        cols[1].label(RichText::new("Evolution of Motives").strong());
        plotter::draw_trend_lines(&mut cols[1], "motive_trend", &charts.motive_trend, CHART_HEIGHT);
    });
}

pub fn show_attackers(ui: &mut egui::Ui, charts: &ChartSet) {
    ui.label(RichText::new("Actor Profiles & Behavior").size(16.0).strong());
    ui.add_space(6.0);
    ui.columns(2, |cols| {
        cols[0].label(RichText::new("Who is attacking?").strong());
        plotter::draw_count_bars(
            &mut cols[0],
            "actor_counts",
            &charts.actor_counts,
            plotter::ACCENT_COLOR,
            "Number of Attacks",
            CHART_HEIGHT,
        );
        insight_box(
            &mut cols[0],
            "Criminals are the noise (high volume, opportunistic). \
             Nation-states are the signal (low volume, highly targeted).",
        );

        cols[1].label(
            RichText::new("Deep Dive: Criminal Groups Shift (Exploitive vs Disruptive)").strong(),
        );
        match &charts.criminal_shift {
            Some(shift) => {
                plotter::draw_stacked_area(
                    &mut cols[1],
                    "criminal_shift",
                    &shift.years,
                    &shift.series,
                    CHART_HEIGHT,
                );
            }
            None => {
                cols[1].label("Insufficient data for Criminal analysis in selected range.");
            }
        }
    });
}

pub fn show_targets(ui: &mut egui::Ui, charts: &ChartSet) {
    ui.label(RichText::new("Industry Victimology").size(16.0).strong());
    ui.add_space(6.0);

    ui.label(RichText::new("Most Targeted Industries").strong());
    let top: Vec<(String, u64)> = charts.industry_counts.iter().take(10).cloned().collect();
    plotter::draw_count_bars(
        ui,
        "industry_counts",
        &top,
        plotter::ACCENT_COLOR,
        "Number of Attacks",
        CHART_HEIGHT + 20.0,
    );

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(8.0);

    ui.label(RichText::new("Heatmap: Actor Type vs. Industry").strong());
    plotter::draw_heatmap(ui, &charts.actor_industry);
}

fn insight_box(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(Color32::from_rgb(28, 50, 66))
        .rounding(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(format!("💡 Insight: {text}"))
                    .size(12.0)
                    .color(Color32::from_rgb(180, 215, 240)),
            );
        });
}
