//! Dashboard Application
//! Main window: sidebar filters on the left, metric row and tabbed chart
//! panels in the center. The CSV load runs on a worker thread; everything
//! else is a synchronous full recompute on each filter change.

use egui::{RichText, SidePanel};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::data::cleaner::{clean, CleaningConfig};
use crate::data::loader::{select_target_rows, DatasetLoader};
use crate::data::records::{EventRecord, DEFAULT_DATA_FILE, TARGET_COUNTRY};
use crate::data::DatasetCache;
use crate::gui::sidebar::{Sidebar, SidebarAction};
use crate::gui::views::{self, Tab};
use crate::stats::{self, CrossTab, SummaryMetrics};

/// Dataset loading result from the worker thread
enum LoadResult {
    Progress(String),
    Complete { records: Vec<EventRecord> },
    Error(String),
}

/// Aggregates backing the currently displayed charts. Recomputed in full on
/// every filter change - no incremental updates.
pub struct ChartSet {
    pub yearly: Vec<(i32, u64)>,
    pub motive_trend: BTreeMap<String, Vec<(i32, u64)>>,
    pub actor_counts: Vec<(String, u64)>,
    pub industry_counts: Vec<(String, u64)>,
    pub actor_industry: CrossTab,
    pub criminal_shift: Option<CriminalShift>,
}

impl ChartSet {
    /// Every chart aggregate, as a pure function of the cleaned dataset and
    /// the current filtered view. The UI event loop only decides when to
    /// call this.
    pub fn compute(cleaned: &[EventRecord], filtered: &[EventRecord]) -> ChartSet {
        ChartSet {
            yearly: stats::counts_by_year(filtered),
            motive_trend: stats::counts_by_year_and(filtered, |r| r.motive.as_deref()),
            actor_counts: stats::value_counts(filtered, |r| r.actor_type.as_deref()),
            industry_counts: stats::value_counts(filtered, |r| r.industry.as_deref()),
            actor_industry: CrossTab::compute(
                filtered,
                |r| r.actor_type.as_deref(),
                |r| r.industry.as_deref(),
            ),
            criminal_shift: CriminalShift::compute(cleaned),
        }
    }
}

/// Row-normalized year x event_type proportions for Criminal actors.
pub struct CriminalShift {
    pub years: Vec<i32>,
    pub series: Vec<(String, Vec<f64>)>,
}

/// Main application window.
pub struct DashboardApp {
    cache: DatasetCache,
    cleaning: CleaningConfig,
    sidebar: Sidebar,
    active_tab: Tab,
    metrics: SummaryMetrics,
    charts: Option<ChartSet>,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            cache: DatasetCache::new(),
            cleaning: CleaningConfig::default(),
            sidebar: Sidebar::new(),
            active_tab: Tab::default(),
            metrics: SummaryMetrics::default(),
            charts: None,
            load_rx: None,
            is_loading: false,
        };

        let default = PathBuf::from(DEFAULT_DATA_FILE);
        if default.exists() {
            app.start_load(default);
        } else {
            app.sidebar.status =
                format!("{DEFAULT_DATA_FILE} not found - browse for a dataset");
        }
        app
    }

    /// Handle dataset file selection.
    fn handle_browse(&mut self) {
        if self.is_loading {
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_load(path);
        }
    }

    /// Explicit cache refresh: re-read the current file from disk.
    fn handle_reload(&mut self) {
        if self.is_loading {
            return;
        }
        self.cache.invalidate();
        if let Some(path) = self.sidebar.csv_path.clone() {
            self.start_load(path);
        }
    }

    /// Kick off load + clean on a worker thread so the UI keeps painting.
    fn start_load(&mut self, path: PathBuf) {
        self.sidebar.csv_path = Some(path.clone());
        self.sidebar.status = "Loading dataset...".to_string();
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let config = self.cleaning.clone();

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let mut loader = DatasetLoader::new();
            let result = loader
                .load_csv(&path)
                .and_then(|df| select_target_rows(df, TARGET_COUNTRY))
                .and_then(|us| EventRecord::from_dataframe(&us).map_err(Into::into));

            match result {
                Ok(records) => {
                    let _ = tx.send(LoadResult::Progress("Cleaning records...".to_string()));
                    let cleaned = clean(records, &config);
                    let _ = tx.send(LoadResult::Complete { records: cleaned });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.sidebar.status = status;
                    }
                    LoadResult::Complete { records } => {
                        self.sidebar.status =
                            format!("Loaded {} cleaned US events", records.len());
                        self.sidebar.update_dataset(&records);
                        if let Some(path) = self.sidebar.csv_path.clone() {
                            self.cache.store(path, records);
                        }
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.recompute();
                    }
                    LoadResult::Error(error) => {
                        self.sidebar.status = format!("Error: {error}");
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Recompute the filtered view, the metric row, and every chart
    /// aggregate from the cached dataset.
    fn recompute(&mut self) {
        let Some(records) = self.cache.records() else {
            self.metrics = SummaryMetrics::default();
            self.charts = None;
            return;
        };

        let filtered = self.sidebar.filter().apply(records);
        self.metrics = stats::summarize(&filtered);
        self.charts = Some(ChartSet::compute(records, &filtered));
    }
}

impl CriminalShift {
    /// The business-model-shift panel reads the cleaned dataset, not the
    /// filtered view: Criminal actors from 2017 on, event-type proportions
    /// per year.
    fn compute(records: &[EventRecord]) -> Option<CriminalShift> {
        let criminal: Vec<EventRecord> = records
            .iter()
            .filter(|r| {
                r.actor_type.as_deref() == Some("Criminal")
                    && r.year.is_some_and(|y| y >= 2017)
            })
            .cloned()
            .collect();

        let by_event = stats::counts_by_year_and(&criminal, |r| r.event_type.as_deref());
        let years: BTreeSet<i32> = by_event
            .values()
            .flat_map(|pts| pts.iter().map(|&(y, _)| y))
            .collect();
        if years.is_empty() {
            return None;
        }
        let years: Vec<i32> = years.into_iter().collect();
        let index: HashMap<i32, usize> =
            years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

        let mut totals = vec![0u64; years.len()];
        let counts: Vec<(String, Vec<u64>)> = by_event
            .into_iter()
            .map(|(name, pts)| {
                let mut row = vec![0u64; years.len()];
                for (year, count) in pts {
                    if let Some(&i) = index.get(&year) {
                        row[i] = count;
                        totals[i] += count;
                    }
                }
                (name, row)
            })
            .collect();

        let series = counts
            .into_iter()
            .map(|(name, row)| {
                let shares = row
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| {
                        if totals[i] == 0 {
                            0.0
                        } else {
                            c as f64 / totals[i] as f64
                        }
                    })
                    .collect();
                (name, shares)
            })
            .collect();

        Some(CriminalShift { years, series })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, actor_type: &str, industry: &str, event_type: &str) -> EventRecord {
        EventRecord {
            year: Some(year),
            actor_type: Some(actor_type.to_string()),
            industry: Some(industry.to_string()),
            event_type: Some(event_type.to_string()),
            motive: Some("Financial".to_string()),
            ..EventRecord::default()
        }
    }

    #[test]
    fn chart_set_is_a_pure_function_of_its_inputs() {
        let cleaned = vec![
            record(2018, "Criminal", "Health Care", "Exploitive"),
            record(2018, "Criminal", "Health Care", "Disruptive"),
            record(2020, "Nation-State", "Public Admin", "Exploitive"),
        ];
        let filtered = vec![cleaned[2].clone()];

        let charts = ChartSet::compute(&cleaned, &filtered);
        assert_eq!(charts.yearly, vec![(2020, 1)]);
        assert_eq!(
            charts.actor_counts,
            vec![("Nation-State".to_string(), 1)]
        );
        // The deep-dive panel ignores the filter and reads the cleaned data.
        let shift = charts.criminal_shift.unwrap();
        assert_eq!(shift.years, vec![2018]);
        let per_year_total: f64 = shift.series.iter().map(|(_, s)| s[0]).sum();
        assert!((per_year_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn criminal_shift_needs_criminal_rows_after_2016() {
        let cleaned = vec![
            record(2015, "Criminal", "Health Care", "Exploitive"),
            record(2020, "Nation-State", "Public Admin", "Exploitive"),
        ];
        assert!(CriminalShift::compute(&cleaned).is_none());
    }

    #[test]
    fn empty_inputs_yield_empty_charts() {
        let charts = ChartSet::compute(&[], &[]);
        assert!(charts.yearly.is_empty());
        assert!(charts.actor_counts.is_empty());
        assert!(charts.actor_industry.is_empty());
        assert!(charts.criminal_shift.is_none());
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Keep painting while the worker runs.
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - filters
        SidePanel::left("sidebar")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.sidebar.show(ui);
                    match action {
                        SidebarAction::BrowseCsv => self.handle_browse(),
                        SidebarAction::Reload => self.handle_reload(),
                        SidebarAction::FiltersChanged => self.recompute(),
                        SidebarAction::None => {}
                    }
                });
            });

        // Central panel - metrics and tabs
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                views::metrics_row(ui, &self.metrics);
                ui.add_space(6.0);
                ui.separator();
                views::tab_bar(ui, &mut self.active_tab);
                ui.add_space(8.0);

                match &self.charts {
                    Some(charts) => match self.active_tab {
                        Tab::Trends => views::show_trends(ui, charts),
                        Tab::Attackers => views::show_attackers(ui, charts),
                        Tab::Targets => views::show_targets(ui, charts),
                    },
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label(RichText::new("No Data").size(20.0));
                        });
                    }
                }
            });
        });
    }
}
