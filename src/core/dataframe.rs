use polars::prelude::*;

use crate::core::TimeSeriesTable;

impl TimeSeriesTable {
    /// Converts the table into a Polars `DataFrame` with the same columns as the CSV output.
    ///
    /// `Date` is a proper `Date` column; missing prices stay `NaN`, missing volume is null.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let rows = self.rows();
        let dates: Vec<chrono::NaiveDate> = rows.iter().map(|r| r.date).collect();
        let col_f64 = |name: &str, f: fn(&crate::core::PriceRow) -> f64| {
            Column::new(name.into(), rows.iter().map(f).collect::<Vec<f64>>())
        };
        let volume: Vec<Option<u64>> = rows.iter().map(|r| r.volume).collect();

        DataFrame::new(vec![
            Column::new("Date".into(), dates),
            col_f64("Open", |r| r.open),
            col_f64("High", |r| r.high),
            col_f64("Low", |r| r.low),
            col_f64("Close", |r| r.close),
            col_f64("Adj Close", |r| r.adj_close),
            Column::new("Volume".into(), volume),
        ])
    }
}
