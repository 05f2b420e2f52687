use wandering_core::StatsSummary;

/// Computes total, extremes and mean of the provided round records.
///
/// An empty slice produces an all-zero summary.
#[must_use]
pub fn summarize(records: &[u32]) -> StatsSummary {
    let (Some(&min), Some(&max)) = (records.iter().min(), records.iter().max()) else {
        return StatsSummary::default();
    };

    let total: u64 = records.iter().copied().map(u64::from).sum();
    let rounds = records.len();

    StatsSummary {
        total,
        min,
        max,
        average: total as f64 / rounds as f64,
        rounds,
    }
}
