use chrono::NaiveDate;

use crate::core::PriceRow;
use crate::history::wire::QuoteBlock;

use super::adjust::price_factor_for_row;
use super::dates::ExchangeCalendar;

pub(crate) struct AssembleOpts {
    pub(crate) auto_adjust: bool,
    pub(crate) keepna: bool,
    /// Half-open date window; bars dated outside it are dropped.
    pub(crate) window: (NaiveDate, NaiveDate),
}

fn at(v: &[Option<f64>], i: usize) -> Option<f64> {
    v.get(i).copied().flatten()
}

pub(crate) fn assemble_rows(
    ts: &[i64],
    q: &QuoteBlock,
    adj: &[Option<f64>],
    calendar: ExchangeCalendar,
    cum_split_after: &[f64],
    opts: &AssembleOpts,
) -> Vec<PriceRow> {
    let (start, end) = opts.window;
    let mut out = Vec::with_capacity(ts.len());

    for (i, &t) in ts.iter().enumerate() {
        let Some(date) = calendar.date_of(t) else {
            continue;
        };
        if date < start || date >= end {
            continue;
        }

        let mut open = at(&q.open, i);
        let mut high = at(&q.high, i);
        let mut low = at(&q.low, i);
        let mut close = at(&q.close, i);
        let adj_close = at(adj, i);
        let mut volume = q.volume.get(i).copied().flatten();

        let complete = open.is_some() && high.is_some() && low.is_some() && close.is_some();
        if !complete && !opts.keepna {
            continue;
        }

        if opts.auto_adjust {
            let split_after = cum_split_after.get(i).copied().unwrap_or(1.0);
            let pf = price_factor_for_row(adj_close, close, split_after);
            for v in [&mut open, &mut high, &mut low, &mut close]
                .into_iter()
                .flatten()
            {
                *v *= pf;
            }
            volume = volume.map(|v| {
                let v_adj = v as f64 * split_after;
                if v_adj.is_finite() {
                    v_adj.round() as u64
                } else {
                    v
                }
            });
        }

        out.push(PriceRow {
            date,
            open: open.unwrap_or(f64::NAN),
            high: high.unwrap_or(f64::NAN),
            low: low.unwrap_or(f64::NAN),
            close: close.unwrap_or(f64::NAN),
            adj_close: adj_close.unwrap_or(f64::NAN),
            volume,
        });
    }

    out
}
