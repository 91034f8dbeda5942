//! CSV persistence for [`TimeSeriesTable`].
//!
//! Layout: header row `Date,Open,High,Low,Close,Adj Close,Volume`, one line per
//! trading day, no row-index column. Missing values are empty cells.

use std::fs;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{FetchError, PriceRow, TimeSeriesTable};

#[derive(Serialize, Deserialize)]
struct CsvRecord {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Adj Close")]
    adj_close: Option<f64>,
    #[serde(rename = "Volume")]
    volume: Option<u64>,
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

impl From<&PriceRow> for CsvRecord {
    fn from(r: &PriceRow) -> Self {
        Self {
            date: r.date,
            open: finite(r.open),
            high: finite(r.high),
            low: finite(r.low),
            close: finite(r.close),
            adj_close: finite(r.adj_close),
            volume: r.volume,
        }
    }
}

impl From<CsvRecord> for PriceRow {
    fn from(r: CsvRecord) -> Self {
        Self {
            date: r.date,
            open: r.open.unwrap_or(f64::NAN),
            high: r.high.unwrap_or(f64::NAN),
            low: r.low.unwrap_or(f64::NAN),
            close: r.close.unwrap_or(f64::NAN),
            adj_close: r.adj_close.unwrap_or(f64::NAN),
            volume: r.volume,
        }
    }
}

impl TimeSeriesTable {
    /// Serializes the table as CSV into any writer.
    pub fn to_csv_writer<W: io::Write>(&self, w: W) -> Result<(), FetchError> {
        let mut wtr = csv::Writer::from_writer(w);
        // An empty table still gets its header line.
        if self.is_empty() {
            wtr.write_record(Self::COLUMNS)?;
        }
        for row in self.rows() {
            wtr.serialize(CsvRecord::from(row))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Serializes the table to a CSV string.
    pub fn to_csv_string(&self) -> Result<String, FetchError> {
        let mut buf = Vec::new();
        self.to_csv_writer(&mut buf)?;
        String::from_utf8(buf).map_err(|e| FetchError::Data(format!("non UTF-8 CSV output: {e}")))
    }

    /// Writes the table to `path`, creating all missing parent directories and
    /// replacing any existing file.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), FetchError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| FetchError::io(parent, e))?;
        }
        let file = fs::File::create(path).map_err(|e| FetchError::io(path, e))?;
        self.to_csv_writer(io::BufWriter::new(file))
    }

    /// Parses CSV produced by [`TimeSeriesTable::to_csv_writer`].
    pub fn from_csv_reader<R: io::Read>(
        ticker: impl Into<String>,
        r: R,
    ) -> Result<Self, FetchError> {
        let mut rdr = csv::Reader::from_reader(r);
        let headers = rdr.headers()?.clone();
        if headers.iter().ne(Self::COLUMNS) {
            return Err(FetchError::Data(format!(
                "unexpected CSV header: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }
        let rows = rdr
            .deserialize::<CsvRecord>()
            .map(|rec| rec.map(PriceRow::from))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ticker, rows))
    }

    /// Reads a table previously written with [`TimeSeriesTable::write_csv`].
    pub fn read_csv(path: impl AsRef<Path>, ticker: impl Into<String>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| FetchError::io(path, e))?;
        Self::from_csv_reader(ticker, io::BufReader::new(file))
    }
}
