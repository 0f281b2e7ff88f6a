//! Text histogram of ratings over the fixed 0–10 range.

use std::fmt::Write as _;

use moviedb_core::constants::MAX_RATING;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Buckets `ratings` into `bins` equal slices of `0..=10`. The last bucket
    /// is closed so a perfect 10 lands in it; out-of-range values are clamped.
    ///
    /// `bins` must be non-zero.
    #[must_use]
    pub fn from_ratings(ratings: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let width = MAX_RATING / bins as f64;
        let mut counts = vec![0_usize; bins];
        for rating in ratings.iter().filter(|r| r.is_finite()) {
            let idx = (rating.clamp(0.0, MAX_RATING) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: i as f64 * width,
                upper: (i + 1) as f64 * width,
                count,
            })
            .collect();
        Self { bins }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Renders one line per bucket with bars scaled to `max_width` characters.
    #[must_use]
    pub fn render(&self, max_width: usize) -> String {
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        let mut out = String::new();
        for bin in &self.bins {
            let bar_len = if peak == 0 { 0 } else { (bin.count * max_width).div_ceil(peak) };
            let _ = writeln!(
                out,
                "{:>5.1} - {:>4.1} | {:<width$} {}",
                bin.lower,
                bin.upper,
                "#".repeat(bar_len),
                bin.count,
                width = max_width,
            );
        }
        out
    }
}
