//! Simulation report generation.

use super::config::SimConfig;
use super::runner::BatchResult;
use super::strategy::Strategy;
use serde::Serialize;

/// One fixed-width histogram bin, `[start, start + width)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: u64,
    pub center: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bin_width: u64,
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bins from 0 up to the bin holding the largest outcome.
    pub fn from_outcomes(outcomes: &[u64], bin_width: u64) -> Self {
        let bin_width = bin_width.max(1);
        let Some(&max) = outcomes.iter().max() else {
            return Self {
                bin_width,
                bins: Vec::new(),
            };
        };

        let num_bins = (max / bin_width + 1) as usize;
        let mut counts = vec![0u32; num_bins];
        for &packs in outcomes {
            counts[(packs / bin_width) as usize] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let start = i as u64 * bin_width;
                HistogramBin {
                    start,
                    center: start as f64 + bin_width as f64 / 2.0,
                    count,
                }
            })
            .collect();

        Self { bin_width, bins }
    }

    pub fn peak(&self) -> Option<&HistogramBin> {
        self.bins.iter().max_by_key(|b| b.count)
    }
}

/// Average pack count at which a collection finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionPace {
    pub collection: String,
    pub avg_packs: f64,
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub strategy: Option<Strategy>,
    pub num_runs: u32,
    pub runs_failed: u32,

    // Outcome statistics
    pub avg_packs: f64,
    pub min_packs: u64,
    pub max_packs: u64,
    pub median_packs: u64,
    pub estimated_cost: Option<f64>,

    // Currency strategy
    pub avg_purchases: f64,
    pub avg_cards_missing: f64,

    pub collection_pace: Vec<CollectionPace>,
    pub histogram: Histogram,
}

impl SimReport {
    /// Report over bare outcomes.
    pub fn from_outcomes(outcomes: &[u64], bin_width: u64, pack_cost: Option<f64>) -> Self {
        let num_runs = outcomes.len() as u32;
        let avg_packs = if outcomes.is_empty() {
            0.0
        } else {
            outcomes.iter().sum::<u64>() as f64 / outcomes.len() as f64
        };
        let median_packs = {
            let mut sorted = outcomes.to_vec();
            sorted.sort_unstable();
            sorted.get(sorted.len() / 2).copied().unwrap_or(0)
        };

        Self {
            strategy: None,
            num_runs,
            runs_failed: 0,
            avg_packs,
            min_packs: outcomes.iter().min().copied().unwrap_or(0),
            max_packs: outcomes.iter().max().copied().unwrap_or(0),
            median_packs,
            estimated_cost: pack_cost.map(|cost| cost * avg_packs),
            avg_purchases: 0.0,
            avg_cards_missing: 0.0,
            collection_pace: Vec::new(),
            histogram: Histogram::from_outcomes(outcomes, bin_width),
        }
    }

    /// Report over a full batch, including per-run details.
    pub fn from_batch(batch: &BatchResult, config: &SimConfig) -> Self {
        let mut report = Self::from_outcomes(&batch.outcomes(), config.bin_width, config.pack_cost);
        report.strategy = Some(batch.strategy);
        report.num_runs = batch.num_runs;
        report.runs_failed = batch.failures.len() as u32;

        let completed = batch.records.len().max(1) as f64;
        report.avg_purchases =
            batch.records.iter().map(|r| r.purchases.len() as f64).sum::<f64>() / completed;
        report.avg_cards_missing =
            batch.records.iter().map(|r| r.cards_missing as f64).sum::<f64>() / completed;

        let mut pace: Vec<(String, u64, u32)> = Vec::new();
        for record in &batch.records {
            for event in &record.completions {
                match pace.iter_mut().find(|(name, _, _)| *name == event.collection) {
                    Some((_, total, count)) => {
                        *total += event.packs_opened;
                        *count += 1;
                    }
                    None => pace.push((event.collection.clone(), event.packs_opened, 1)),
                }
            }
        }
        report.collection_pace = pace
            .into_iter()
            .map(|(collection, total, count)| CollectionPace {
                collection,
                avg_packs: total as f64 / count as f64,
            })
            .collect();

        report
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                 PACK COMPLETION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        if let Some(strategy) = self.strategy {
            report.push_str(&format!("Strategy: {}\n", strategy));
        }
        report.push_str(&format!(
            "Runs: {} total, {} failed\n\n",
            self.num_runs, self.runs_failed
        ));

        report.push_str("── PACKS TO COMPLETE ────────────────────────────────────────────\n");
        report.push_str(&format!("  Average:  {:.1}\n", self.avg_packs));
        report.push_str(&format!("  Median:   {}\n", self.median_packs));
        report.push_str(&format!("  Min:      {}\n", self.min_packs));
        report.push_str(&format!("  Max:      {}\n", self.max_packs));
        if let Some(cost) = self.estimated_cost {
            report.push_str(&format!("  Est Cost: ${:.2}\n", cost));
        }
        report.push('\n');

        if !self.collection_pace.is_empty() {
            report.push_str("── COLLECTIONS ──────────────────────────────────────────────────\n");
            for pace in &self.collection_pace {
                report.push_str(&format!(
                    "  {:<12} done after {:.0} packs on average\n",
                    pace.collection, pace.avg_packs
                ));
            }
            if self.strategy == Some(Strategy::CurrencyAssisted) {
                report.push_str(&format!("  Avg Purchases:     {:.2}\n", self.avg_purchases));
                report.push_str(&format!("  Avg Cards Missing: {:.2}\n", self.avg_cards_missing));
            }
            report.push('\n');
        }

        report.push_str("── DISTRIBUTION ─────────────────────────────────────────────────\n");
        let peak = self.histogram.peak().map_or(0, |b| b.count).max(1);
        for bin in &self.histogram.bins {
            let bar_len = (bin.count as f64 / peak as f64 * 40.0).round() as usize;
            let bar: String = "█".repeat(bar_len);
            report.push_str(&format!(
                "  {:>6}-{:<6} {:>5} {}\n",
                bin.start,
                bin.start + self.histogram.bin_width - 1,
                bin.count,
                bar
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
