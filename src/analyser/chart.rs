//! Bar charts and histograms, rendered as SVG documents or plain text.

use super::histogram::Bins;
use crate::error::{Result, ResultExt as _};
use crate::utils::fmt_num;
use polars::prelude::{Float64Chunked, NewChunkedArray as _};
use std::fmt::Write as _;
use std::path::Path;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 120.0;
const Y_TICKS: usize = 5;
const PALETTE: [&str; 4] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728"];

pub trait Chart {
    fn title(&self) -> &str;

    fn to_svg(&self) -> String;

    /// Terminal rendering; the longest bar is `width` characters.
    fn to_text(&self, width: usize) -> String;

    fn save_svg(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_svg())
            .with_context(|| format!("Failed to write chart {}", path.display()))?;
        tracing::info!(path = %path.display(), title = self.title(), "chart written");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
}

#[derive(Clone, Debug)]
pub struct HistogramSeries {
    pub name: String,
    pub counts: Vec<usize>,
}

/// One or more series counted over the same bins.
#[derive(Clone, Debug)]
pub struct HistogramChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bins: Bins,
    pub series: Vec<HistogramSeries>,
}

impl HistogramChart {
    /// One series per column, named after it. Bins are chosen over all
    /// series combined. `None` if no series has a finite value.
    pub fn from_series(
        title: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        series: &[Float64Chunked],
    ) -> Option<Self> {
        let combined =
            Float64Chunked::from_iter_options("combined".into(), series.iter().flatten());
        let bins = Bins::for_values(&combined)?;
        let series = series
            .iter()
            .map(|values| HistogramSeries {
                name: values.name().to_string(),
                counts: bins.tally(values),
            })
            .collect();
        Some(Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            bins,
            series,
        })
    }

    fn max_count(&self) -> usize {
        self.series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

impl Chart for BarChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn to_svg(&self) -> String {
        let max = self
            .bars
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let mut svg = Canvas::new(&self.title, &self.x_label, &self.y_label, max);

        let slot = svg.plot_width() / self.bars.len().max(1) as f64;
        for (i, (label, value)) in self.bars.iter().enumerate() {
            let x = MARGIN_LEFT + i as f64 * slot;
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            svg.bar(x + slot * 0.1, slot * 0.8, value, PALETTE[0]);
            svg.category_label(x + slot / 2.0, label);
        }
        svg.finish()
    }

    fn to_text(&self, width: usize) -> String {
        let max = self
            .bars
            .iter()
            .map(|(_, v)| *v)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        let label_width = self.bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

        let mut out = format!("{}\n", self.title);
        for (label, value) in &self.bars {
            let len = scaled(*value, max, width);
            let _ = writeln!(
                out,
                "{label:<label_width$} | {} {}",
                "#".repeat(len),
                fmt_num(*value)
            );
        }
        let _ = writeln!(out, "({} by {})", self.y_label, self.x_label);
        out
    }
}

impl Chart for HistogramChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn to_svg(&self) -> String {
        let mut svg = Canvas::new(
            &self.title,
            &self.x_label,
            &self.y_label,
            self.max_count() as f64,
        );

        let slot = svg.plot_width() / self.bins.count as f64;
        let sub = slot * 0.9 / self.series.len().max(1) as f64;
        let label_every = self.bins.count.div_ceil(25).max(1);

        for idx in 0..self.bins.count {
            let x = MARGIN_LEFT + idx as f64 * slot;
            for (s, series) in self.series.iter().enumerate() {
                let count = series.counts.get(idx).copied().unwrap_or(0);
                svg.bar(
                    x + slot * 0.05 + s as f64 * sub,
                    sub,
                    count as f64,
                    PALETTE[s % PALETTE.len()],
                );
            }
            if idx % label_every == 0 {
                svg.category_label(x, &fmt_num(self.bins.lower(idx)));
            }
        }

        for (s, series) in self.series.iter().enumerate() {
            svg.legend_entry(s, &series.name, PALETTE[s % PALETTE.len()]);
        }
        svg.finish()
    }

    fn to_text(&self, width: usize) -> String {
        let max = self.max_count() as f64;
        let mut out = format!("{}\n", self.title);
        for series in &self.series {
            let _ = writeln!(out, "{}:", series.name);
            for (idx, count) in series.counts.iter().enumerate() {
                let lo = fmt_num(self.bins.lower(idx));
                let hi = fmt_num(self.bins.lower(idx + 1));
                let _ = writeln!(
                    out,
                    "  [{lo}, {hi}) | {} {count}",
                    "#".repeat(scaled(*count as f64, max, width))
                );
            }
        }
        out
    }
}

fn scaled(value: f64, max: f64, width: usize) -> usize {
    if !value.is_finite() || value <= 0.0 || max <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// SVG document with a title, axes and a linear y scale from 0 to `y_max`.
struct Canvas {
    buf: String,
    y_max: f64,
}

impl Canvas {
    fn new(title: &str, x_label: &str, y_label: &str, y_max: f64) -> Self {
        let y_max = if y_max > 0.0 && y_max.is_finite() { y_max } else { 1.0 };
        let mut buf = String::new();
        let _ = writeln!(
            buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        );
        let _ = writeln!(buf, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            buf,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="18">{}</text>"#,
            WIDTH / 2.0,
            MARGIN_TOP / 2.0 + 6.0,
            escape(title)
        );
        let _ = writeln!(
            buf,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="13">{}</text>"#,
            MARGIN_LEFT + (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / 2.0,
            HEIGHT - 12.0,
            escape(x_label)
        );
        let _ = writeln!(
            buf,
            r#"<text x="18" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 18 {y})">{}</text>"#,
            escape(y_label),
            y = MARGIN_TOP + (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / 2.0,
        );

        let mut canvas = Self { buf, y_max };
        canvas.axes();
        canvas
    }

    fn plot_width(&self) -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn baseline(&self) -> f64 {
        HEIGHT - MARGIN_BOTTOM
    }

    fn axes(&mut self) {
        let baseline = self.baseline();
        let _ = writeln!(
            self.buf,
            r##"<line x1="{MARGIN_LEFT}" y1="{baseline}" x2="{}" y2="{baseline}" stroke="#333"/>"##,
            WIDTH - MARGIN_RIGHT
        );
        let _ = writeln!(
            self.buf,
            r##"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{baseline}" stroke="#333"/>"##
        );
        for tick in 0..=Y_TICKS {
            let value = self.y_max * tick as f64 / Y_TICKS as f64;
            let y = baseline - self.plot_height() * tick as f64 / Y_TICKS as f64;
            let _ = writeln!(
                self.buf,
                r#"<text x="{}" y="{}" text-anchor="end" font-size="11">{}</text>"#,
                MARGIN_LEFT - 6.0,
                y + 4.0,
                fmt_num(value)
            );
        }
    }

    fn bar(&mut self, x: f64, width: f64, value: f64, fill: &str) {
        let height = self.plot_height() * (value / self.y_max).clamp(0.0, 1.0);
        let _ = writeln!(
            self.buf,
            r#"<rect x="{x:.2}" y="{:.2}" width="{width:.2}" height="{height:.2}" fill="{fill}"/>"#,
            self.baseline() - height
        );
    }

    fn category_label(&mut self, x: f64, label: &str) {
        let y = self.baseline() + 14.0;
        let _ = writeln!(
            self.buf,
            r#"<text x="{x:.2}" y="{y}" text-anchor="end" font-size="11" transform="rotate(-45 {x:.2} {y})">{}</text>"#,
            escape(label)
        );
    }

    fn legend_entry(&mut self, idx: usize, name: &str, fill: &str) {
        let x = WIDTH - MARGIN_RIGHT - 160.0;
        let y = MARGIN_TOP + idx as f64 * 18.0;
        let _ = writeln!(
            self.buf,
            r#"<rect x="{x}" y="{y}" width="12" height="12" fill="{fill}"/><text x="{}" y="{}" font-size="12">{}</text>"#,
            x + 18.0,
            y + 10.0,
            escape(name)
        );
    }

    fn finish(mut self) -> String {
        self.buf.push_str("</svg>\n");
        self.buf
    }
}
