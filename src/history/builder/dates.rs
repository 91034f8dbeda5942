use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::history::wire::MetaNode;

/// Maps epoch seconds onto the exchange's calendar.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ExchangeCalendar {
    Named(Tz),
    Offset(FixedOffset),
    Utc,
}

impl ExchangeCalendar {
    /// Prefers the IANA zone name, then the numeric GMT offset, then UTC.
    pub(crate) fn from_meta(meta: Option<&MetaNode>) -> Self {
        let Some(m) = meta else {
            return Self::Utc;
        };
        let named = m
            .exchange_timezone_name
            .as_deref()
            .into_iter()
            .chain(m.timezone.as_deref())
            .find_map(|name| name.parse::<Tz>().ok());
        if let Some(tz) = named {
            return Self::Named(tz);
        }
        m.gmtoffset
            .and_then(|off| i32::try_from(off).ok())
            .and_then(FixedOffset::east_opt)
            .map_or(Self::Utc, Self::Offset)
    }

    pub(crate) fn date_of(self, ts: i64) -> Option<NaiveDate> {
        let utc = Utc.timestamp_opt(ts, 0).single()?;
        Some(match self {
            Self::Named(tz) => utc.with_timezone(&tz).date_naive(),
            Self::Offset(off) => utc.with_timezone(&off).date_naive(),
            Self::Utc => utc.date_naive(),
        })
    }
}

/// Midnight UTC of `date`, in epoch seconds.
pub(crate) fn day_start_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

/// `period1`/`period2` for the `[start, end)` window, one day wider on each side.
///
/// Exchanges east of UTC stamp their session open on the previous UTC day, so an
/// unpadded `period1` would cut off the first local date. Rows are trimmed back to
/// the window after assembly.
pub(crate) fn request_period(start: NaiveDate, end: NaiveDate) -> (i64, i64) {
    let before = start.pred_opt().unwrap_or(start);
    let after = end.succ_opt().unwrap_or(end);
    (day_start_utc(before), day_start_utc(after))
}
