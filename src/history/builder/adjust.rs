use crate::history::wire::Events;

/// Split events as `(ts, numerator / denominator)`, sorted by timestamp.
pub(crate) fn split_ratios(events: Option<&Events>) -> Vec<(i64, f64)> {
    let Some(splits) = events.and_then(|ev| ev.splits.as_ref()) else {
        return Vec::new();
    };

    let mut out: Vec<(i64, f64)> = splits
        .iter()
        .map(|(k, s)| {
            let ts = k.parse::<i64>().unwrap_or(s.date.unwrap_or(0));
            let (num, den) = match (s.numerator, s.denominator) {
                (Some(n), Some(d)) => (n, d),
                _ => s.split_ratio.as_deref().map_or((1, 1), parse_ratio),
            };
            let ratio = if den == 0 {
                1.0
            } else {
                num as f64 / den as f64
            };
            (ts, ratio)
        })
        .collect();
    out.sort_by_key(|(ts, _)| *ts);
    out
}

/// Parses `"4:1"` or `"4/1"`; unparsable halves default to 1.
fn parse_ratio(r: &str) -> (u64, u64) {
    let mut it = r.split([':', '/']);
    let n = it.next().and_then(|x| x.trim().parse().ok()).unwrap_or(1);
    let d = it.next().and_then(|x| x.trim().parse().ok()).unwrap_or(1);
    (n, d)
}

/// Product of all split ratios strictly after each bar.
pub(crate) fn cumulative_split_after(ts: &[i64], split_events: &[(i64, f64)]) -> Vec<f64> {
    let mut out = vec![1.0; ts.len()];
    if split_events.is_empty() || ts.is_empty() {
        return out;
    }

    let mut sp_idx = split_events.len();
    let mut running: f64 = 1.0;

    for i in (0..ts.len()).rev() {
        while sp_idx > 0 && split_events[sp_idx - 1].0 > ts[i] {
            sp_idx -= 1;
            running *= split_events[sp_idx].1;
        }
        out[i] = running;
    }
    out
}

/// Multiplier that turns raw OHLC into adjusted OHLC for one bar.
///
/// Uses the provider's adjusted close when available, otherwise falls back to
/// undoing later splits.
pub(crate) fn price_factor_for_row(
    adjclose_i: Option<f64>,
    close_i: Option<f64>,
    cum_split_after_i: f64,
) -> f64 {
    match (adjclose_i, close_i) {
        (Some(adj), Some(c)) if c != 0.0 => adj / c,
        _ => 1.0 / cum_split_after_i.max(1e-12),
    }
}
