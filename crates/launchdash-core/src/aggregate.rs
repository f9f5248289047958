//! Group-by and value-count summaries over the launch table.

use serde::Serialize;

use crate::record::LaunchRecord;
use crate::table::LaunchTable;

/// Success count per launch site, over successful launches only.
///
/// Sites appear in the order they first appear among successful rows. A site
/// with no successes is absent, matching a sum over a pre-filtered frame.
pub fn success_counts_by_site(table: &LaunchTable) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for record in table.successes() {
        let class = u64::from(record.outcome.class_value());
        match counts.iter_mut().find(|(site, _)| *site == record.launch_site) {
            Some((_, total)) => *total += class,
            None => counts.push((record.launch_site.clone(), class)),
        }
    }
    counts
}

/// Occurrences of each `class` value among `records`.
///
/// Ordered by count descending; ties keep first-appearance order.
pub fn outcome_counts<'a, I>(records: I) -> Vec<(u8, u64)>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    let mut counts: Vec<(u8, u64)> = Vec::new();
    for record in records {
        let class = record.outcome.class_value();
        match counts.iter_mut().find(|(c, _)| *c == class) {
            Some((_, n)) => *n += 1,
            None => counts.push((class, 1)),
        }
    }
    // Stable sort keeps first-appearance order for equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Per-site launch statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    /// Launch site name.
    pub site: String,
    /// Launches from this site.
    pub launches: u64,
    /// Successful launches from this site.
    pub successes: u64,
    /// `successes / launches`.
    pub success_rate: f64,
}

/// Whole-dataset statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Total launches.
    pub records: u64,
    /// Successful launches.
    pub successes: u64,
    /// Failed launches.
    pub failures: u64,
    /// Smallest payload mass (kg).
    pub payload_min: f64,
    /// Largest payload mass (kg).
    pub payload_max: f64,
    /// Per-site breakdown, in site order.
    pub sites: Vec<SiteSummary>,
}

impl DatasetSummary {
    /// Summarize a table.
    pub fn from_table(table: &LaunchTable) -> Self {
        let sites = table
            .unique_sites()
            .iter()
            .map(|site| {
                let (launches, successes) = table
                    .records()
                    .iter()
                    .filter(|r| r.launch_site == *site)
                    .fold((0u64, 0u64), |(n, s), r| {
                        (n + 1, s + u64::from(r.outcome.is_success()))
                    });
                SiteSummary {
                    site: site.clone(),
                    launches,
                    successes,
                    success_rate: ratio(successes, launches),
                }
            })
            .collect();

        let successes = table.successes().len() as u64;
        let records = table.len() as u64;
        Self {
            records,
            successes,
            failures: records - successes,
            payload_min: table.payload_min(),
            payload_max: table.payload_max(),
            sites,
        }
    }

    /// Overall success rate.
    pub fn success_rate(&self) -> f64 {
        ratio(self.successes, self.records)
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
