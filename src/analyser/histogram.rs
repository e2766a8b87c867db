use polars::prelude::*;

/// Equal-width bins starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bins {
    pub start: f64,
    pub width: f64,
    pub count: usize,
}

impl Bins {
    /// Picks bins for `values` (nulls and non-finite values are ignored).
    ///
    /// Width follows Freedman-Diaconis (`2 * IQR / cbrt(n)`), falling back to
    /// `range / sqrt(n)` when the IQR is zero, and the bin count is clamped to
    /// 5..=50. A single distinct value gets 20 unit-wide bins with the value in
    /// bin 10. Returns `None` when there is nothing to bin.
    pub fn for_values(values: &Float64Chunked) -> Option<Self> {
        let finite = finite_values(values);
        let min = finite.min()?;
        let max = finite.max()?;

        if (max - min).abs() < f64::EPSILON {
            let width = 1.0;
            return Some(Self {
                start: min - 10.0 * width,
                width,
                count: 20,
            });
        }

        let q1 = finite.quantile(0.25, QuantileMethod::Linear).unwrap_or(None);
        let q3 = finite.quantile(0.75, QuantileMethod::Linear).unwrap_or(None);

        let n = finite.len() as f64;
        let iqr = q3.unwrap_or(max) - q1.unwrap_or(min);
        let h = if iqr > 0.0 {
            2.0 * iqr / n.cbrt()
        } else {
            (max - min) / n.sqrt()
        };

        let count = (((max - min) / h).ceil() as usize).clamp(5, 50);
        Some(Self {
            start: min,
            width: (max - min) / count as f64,
            count,
        })
    }

    pub fn end(&self) -> f64 {
        self.start + self.width * self.count as f64
    }

    /// Lower edge of bin `idx`.
    pub fn lower(&self, idx: usize) -> f64 {
        self.start + idx as f64 * self.width
    }

    /// Counts `values` per bin. The upper edge of the last bin is inclusive;
    /// values outside the bins, nulls and non-finite values are dropped.
    pub fn tally(&self, values: &Float64Chunked) -> Vec<usize> {
        let mut counts = vec![0; self.count];
        for v in values.into_iter().flatten().filter(|v| v.is_finite()) {
            if v < self.start {
                continue;
            }
            let idx = ((v - self.start) / self.width).floor() as usize;
            if idx < self.count {
                counts[idx] += 1;
            } else if (v - self.end()).abs() < self.width * 1e-9 {
                counts[self.count - 1] += 1;
            }
        }
        counts
    }
}

fn finite_values(values: &Float64Chunked) -> Float64Chunked {
    Float64Chunked::from_iter_values(
        values.name().clone(),
        values.into_iter().flatten().filter(|v| v.is_finite()),
    )
}
