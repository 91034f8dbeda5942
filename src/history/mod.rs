//! Daily price history from the Yahoo chart endpoint.

mod builder;
pub(crate) mod wire;

pub use builder::HistoryBuilder;

use chrono::NaiveDate;

use crate::core::{SeriesFuture, SeriesSource, YfClient};

impl SeriesSource for YfClient {
    fn fetch_series<'a>(
        &'a self,
        ticker: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> SeriesFuture<'a> {
        Box::pin(async move {
            HistoryBuilder::new(self, ticker)
                .between_dates(start, end)
                .fetch()
                .await
        })
    }
}
