//! Spreadsheet loading, grouping and charting.
//!
//! The `analyze` drill is a straight line:
//!
//! ```text
//! load_table ──> group_means(key, [value, weight]) ──┬──> BarChart (value by key)
//!                                                    └──> HistogramChart (weight, value)
//! ```
//!
//! Both charts are written as SVG files into the output directory and the bar
//! chart is also returned as text for the terminal.

pub mod chart;
pub mod histogram;
pub mod io;
pub mod summary;

pub use chart::{BarChart, Chart, HistogramChart};
pub use io::{load_table, range_to_dataframe};
pub use summary::{group_means, numeric_column, numeric_values, preview, text_values};

use crate::error::{Result, ResultExt as _};
use std::path::{Path, PathBuf};

pub const BAR_CHART_FILE: &str = "mortality_by_country.svg";
pub const HISTOGRAM_FILE: &str = "population_vs_mortality.svg";

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Column to group by.
    pub key: String,
    /// Column plotted per group in the bar chart.
    pub value: String,
    /// Second column, plotted next to `value` in the histogram.
    pub weight: String,
    /// Directory receiving the SVG files.
    pub out_dir: PathBuf,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            key: "Country".to_owned(),
            value: "MortalityRate".to_owned(),
            weight: "Population".to_owned(),
            out_dir: PathBuf::from("."),
        }
    }
}

pub struct AnalysisReport {
    pub groups: usize,
    pub bar_chart: BarChart,
    pub histogram: Option<HistogramChart>,
    pub written: Vec<PathBuf>,
}

pub fn run_analysis(path: &Path, options: &AnalysisOptions) -> Result<AnalysisReport> {
    let df = load_table(path)?;
    let grouped = group_means(
        &df,
        &options.key,
        &[options.value.as_str(), options.weight.as_str()],
    )?;

    let labels = text_values(&grouped, &options.key)?;
    let values = numeric_column(&grouped, &options.value)?;
    let weights = numeric_column(&grouped, &options.weight)?;

    let bar_chart = BarChart {
        title: format!("{} By {}", options.value, options.key),
        x_label: options.key.clone(),
        y_label: options.value.clone(),
        bars: labels
            .into_iter()
            .zip((&values).into_iter().map(|v| v.unwrap_or(f64::NAN)))
            .collect(),
    };

    let histogram = HistogramChart::from_series(
        format!("{} vs. {}", options.weight, options.value),
        options.weight.clone(),
        options.value.clone(),
        &[weights, values],
    );

    std::fs::create_dir_all(&options.out_dir).with_context(|| {
        format!("Failed to create output directory {}", options.out_dir.display())
    })?;
    let mut written = Vec::new();

    let bar_path = options.out_dir.join(BAR_CHART_FILE);
    bar_chart.save_svg(&bar_path)?;
    written.push(bar_path);

    if let Some(hist) = &histogram {
        let hist_path = options.out_dir.join(HISTOGRAM_FILE);
        hist.save_svg(&hist_path)?;
        written.push(hist_path);
    } else {
        tracing::warn!("no numeric values to plot, skipping histogram");
    }

    Ok(AnalysisReport {
        groups: grouped.height(),
        bar_chart,
        histogram,
        written,
    })
}
