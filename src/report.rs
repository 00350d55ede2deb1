//! Static Report Module
//! Renders the exploratory chart sequence to numbered PNG files, in the
//! order the analysis walks through them.

use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::charts::renderer;
use crate::data::records::EventRecord;
use crate::stats::{self, CrossTab};

type ChartJob = (
    &'static str,
    Box<dyn Fn(&Path) -> Result<()> + Send + Sync>,
);

/// Render every report chart under `out_dir`, returning the written paths in
/// sequence order. Charts are rendered in parallel; the numbered file names
/// keep the sequence stable.
pub fn generate_report(records: &[EventRecord], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let industry_counts = stats::value_counts(records, |r| r.industry.as_deref());
    let actor_industry = CrossTab::compute(
        records,
        |r| r.actor_type.as_deref(),
        |r| r.industry.as_deref(),
    );
    let motive_trend = stats::counts_by_year_and(records, |r| r.motive.as_deref());
    let actor_event = CrossTab::compute(
        records,
        |r| r.actor_type.as_deref(),
        |r| r.event_type.as_deref(),
    );
    let yearly = stats::counts_by_year(records);
    let actor_counts = stats::value_counts(records, |r| r.actor_type.as_deref());
    let actor_trend = stats::counts_by_year_and(records, |r| r.actor_type.as_deref());

    let jobs: Vec<ChartJob> = vec![
        (
            "01_attacks_by_industry.png",
            Box::new(move |p: &Path| {
                renderer::horizontal_bar_png(
                    &industry_counts,
                    "Number of Cyber Attacks on each Industry",
                    "Number of Attacks",
                    "Industry",
                    p,
                )
            }),
        ),
        (
            "02_actor_vs_industry_heatmap.png",
            Box::new(move |p: &Path| {
                renderer::heatmap_png(
                    &actor_industry,
                    "Actor Type vs. Target Industry",
                    "Industry",
                    "Actor Type",
                    p,
                )
            }),
        ),
        (
            "03_motive_trends.png",
            Box::new(move |p: &Path| {
                renderer::multi_line_png(
                    &motive_trend,
                    "The Yearly Number of Attacks Based on Motives",
                    p,
                )
            }),
        ),
        (
            "04_actor_vs_event_type.png",
            Box::new(move |p: &Path| {
                renderer::grouped_bar_png(
                    &actor_event,
                    "Actor Type vs. Event Type",
                    "Number of Attacks",
                    "Actor Type",
                    p,
                )
            }),
        ),
        (
            "05_attacks_per_year.png",
            Box::new(move |p: &Path| {
                renderer::year_line_png(
                    &yearly,
                    "Number of Reported Attacks Over the Years",
                    p,
                )
            }),
        ),
        (
            "06_attacks_per_actor_type.png",
            Box::new(move |p: &Path| {
                renderer::horizontal_bar_png(
                    &actor_counts,
                    "Number of Recorded Attacks per each Actor Type",
                    "Number of Recorded Attacks",
                    "Actor Type",
                    p,
                )
            }),
        ),
        (
            "07_actor_type_trends.png",
            Box::new(move |p: &Path| {
                renderer::multi_line_png(
                    &actor_trend,
                    "Timeline of Attacks Based on Actor Type",
                    p,
                )
            }),
        ),
    ];

    let mut outputs = jobs
        .par_iter()
        .map(|(name, draw)| {
            let path = out_dir.join(name);
            draw(&path)?;
            log::info!("rendered {}", path.display());
            Ok(path)
        })
        .collect::<Result<Vec<PathBuf>>>()?;
    outputs.sort();
    Ok(outputs)
}
