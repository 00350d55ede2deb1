//! Sidebar Widget
//! Left side panel: dataset picker plus the filter controls that drive every
//! chart.

use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

use crate::data::records::EventRecord;
use crate::data::view::{self, FilterConfig, DEFAULT_INDUSTRIES};

/// Actions triggered by the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    BrowseCsv,
    Reload,
    FiltersChanged,
}

/// Left side filter panel.
pub struct Sidebar {
    pub csv_path: Option<PathBuf>,
    pub year_bounds: (i32, i32),
    pub year_from: i32,
    pub year_to: i32,
    pub actor_options: Vec<(String, bool)>,
    pub industry_options: Vec<(String, bool)>,
    pub status: String,
    pub controls_enabled: bool,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            csv_path: None,
            year_bounds: (0, 0),
            year_from: 0,
            year_to: 0,
            actor_options: Vec::new(),
            industry_options: Vec::new(),
            status: "Ready".to_string(),
            controls_enabled: false,
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the option lists after a dataset (re)load. The year sliders
    /// snap to the data's bounds, every actor type starts selected, and the
    /// industry list starts at the fixed default subset.
    pub fn update_dataset(&mut self, records: &[EventRecord]) {
        let (lo, hi) = view::year_bounds(records);
        self.year_bounds = (lo, hi);
        self.year_from = lo;
        self.year_to = hi;

        self.actor_options = view::distinct(records, |r| r.actor_type.as_deref())
            .into_iter()
            .map(|name| (name, true))
            .collect();
        self.industry_options = view::distinct(records, |r| r.industry.as_deref())
            .into_iter()
            .map(|name| {
                let on = DEFAULT_INDUSTRIES.contains(&name.as_str());
                (name, on)
            })
            .collect();
        self.controls_enabled = !records.is_empty();
    }

    /// Current selections as a filter over the cleaned dataset.
    pub fn filter(&self) -> FilterConfig {
        FilterConfig {
            year_range: (self.year_from, self.year_to),
            actor_types: self
                .actor_options
                .iter()
                .filter(|(_, on)| *on)
                .map(|(name, _)| name.clone())
                .collect(),
            industries: self
                .industry_options
                .iter()
                .filter(|(_, on)| *on)
                .map(|(name, _)| name.clone())
                .collect(),
        }
    }

    /// Draw the sidebar
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🛡 US Cyber Attacks")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("CISSM Cyber Events Database")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = SidebarAction::BrowseCsv;
                        }
                        ui.add_enabled_ui(self.csv_path.is_some(), |ui| {
                            if ui.button("⟳").on_hover_text("Reload the dataset").clicked() {
                                action = SidebarAction::Reload;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let mut changed = false;

        // ===== Year Range Section =====
        ui.label(RichText::new("📅 Year Range").size(14.0).strong());
        ui.add_space(5.0);

        let (lo, hi) = self.year_bounds;
        ui.add_enabled_ui(self.controls_enabled, |ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.year_from, lo..=hi).text("From"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut self.year_to, lo..=hi).text("To"))
                .changed();
        });
        if self.year_from > self.year_to {
            self.year_to = self.year_from;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Multi-Select Sections =====
        ui.label(RichText::new("🕵 Actor Type").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(self.controls_enabled, |ui| {
            changed |= Self::multi_select(ui, "actor_types", &mut self.actor_options);
        });

        ui.add_space(10.0);
        ui.label(RichText::new("🎯 Target Industry").size(14.0).strong());
        ui.add_space(5.0);
        ui.add_enabled_ui(self.controls_enabled, |ui| {
            changed |= Self::multi_select(ui, "industries", &mut self.industry_options);
        });

        if changed {
            action = SidebarAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.status.contains("Error") || self.status.contains("not found") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Checkbox list with Select All / Clear All, scrolling past ten-ish
    /// entries.
    fn multi_select(ui: &mut egui::Ui, id: &str, options: &mut [(String, bool)]) -> bool {
        let mut changed = false;
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id.to_string())
                    .max_height(140.0)
                    .show(ui, |ui| {
                        for (label, on) in options.iter_mut() {
                            changed |= ui.checkbox(on, label.as_str()).changed();
                        }
                    });
            });

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                options.iter_mut().for_each(|(_, on)| *on = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                options.iter_mut().for_each(|(_, on)| *on = false);
                changed = true;
            }
        });
        changed
    }
}
