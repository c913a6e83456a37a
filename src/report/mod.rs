// src/report/mod.rs
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;

use crate::edgar::models::FilingReference;
use crate::extractors::{ParsedFiling, TransactionRecord};
use crate::utils::error::ReportError;

// Column order of the output file; also used for header-only output.
const CSV_HEADERS: [&str; 10] = [
    "FetchedUTC", "Insider", "Role", "Company", "Ticker",
    "Shares", "Price", "ValueUSD", "SEC_HTML", "SEC_XML",
];

/// One output row: filing identity joined with a single acquisition
/// transaction. Never mutated after construction; `value_usd` is always
/// derived from this row's own shares and price.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    #[serde(rename = "FetchedUTC")]
    pub fetched_utc: String,
    #[serde(rename = "Insider")]
    pub insider: String,
    #[serde(rename = "Role")]
    pub role: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Shares")]
    pub shares: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "ValueUSD")]
    pub value_usd: f64,
    #[serde(rename = "SEC_HTML")]
    pub index_url: String,
    #[serde(rename = "SEC_XML")]
    pub document_url: String,
}

/// Builds one row per surviving transaction of a filing. The fetch
/// timestamp is read once per filing, so all of a filing's rows carry the
/// same minute-precision UTC stamp.
pub fn build_rows(
    filing: &ParsedFiling,
    transactions: &[TransactionRecord],
    reference: &FilingReference,
) -> Vec<ReportRow> {
    let fetched_utc = Utc::now().format("%Y-%m-%d %H:%M").to_string();

    transactions
        .iter()
        .map(|tx| ReportRow {
            fetched_utc: fetched_utc.clone(),
            insider: filing.owner.clone(),
            role: filing.role.clone(),
            company: filing.issuer.clone(),
            ticker: filing.ticker.clone(),
            shares: tx.shares,
            price: tx.price,
            value_usd: round_to_cents(tx.shares * tx.price),
            index_url: reference.index_url.clone(),
            document_url: reference.document_url.clone(),
        })
        .collect()
}

/// Sorts rows by transaction value, largest first.
pub fn sort_rows(rows: &mut [ReportRow]) {
    rows.sort_by(|a, b| b.value_usd.total_cmp(&a.value_usd));
}

/// Writes the rows as CSV, creating or overwriting the file. An empty row
/// slice produces a header-only file.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<(), ReportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Default output filename, stamped with the current UTC date.
pub fn default_output_path() -> PathBuf {
    PathBuf::from(format!("form4_buys_{}.csv", Utc::now().format("%Y-%m-%d")))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filing() -> ParsedFiling {
        ParsedFiling {
            issuer: "Example Corp".to_string(),
            ticker: "EXM".to_string(),
            owner: "Doe Jane".to_string(),
            role: "Director".to_string(),
        }
    }

    fn sample_reference() -> FilingReference {
        FilingReference::from_document_url("https://www.sec.gov/Archives/form4.xml")
    }

    fn tx(shares: f64, price: f64) -> TransactionRecord {
        TransactionRecord {
            code: "A".to_string(),
            shares,
            price,
        }
    }

    #[test]
    fn test_value_is_shares_times_price_rounded_to_cents() {
        let rows = build_rows(
            &sample_filing(),
            &[tx(100.0, 12.50), tx(3.0, 0.333)],
            &sample_reference(),
        );
        assert_eq!(rows[0].value_usd, 1250.0);
        assert_eq!(rows[1].value_usd, 1.0); // 0.999 rounds up
    }

    #[test]
    fn test_rows_of_one_filing_share_a_timestamp() {
        let rows = build_rows(
            &sample_filing(),
            &[tx(1.0, 1.0), tx(2.0, 2.0)],
            &sample_reference(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fetched_utc, rows[1].fetched_utc);
        // Minute precision: "YYYY-MM-DD HH:MM"
        assert_eq!(rows[0].fetched_utc.len(), 16);
    }

    #[test]
    fn test_sort_rows_is_descending_by_value() {
        let filing = sample_filing();
        let reference = sample_reference();
        let mut rows = build_rows(
            &filing,
            &[tx(10.0, 1.0), tx(1000.0, 2.0), tx(50.0, 3.0)],
            &reference,
        );
        sort_rows(&mut rows);

        let values: Vec<f64> = rows.iter().map(|r| r.value_usd).collect();
        assert_eq!(values, vec![2000.0, 150.0, 10.0]);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_write_csv_emits_header_and_rows() {
        let path = std::env::temp_dir().join(format!("form4_rows_{}.csv", std::process::id()));
        let rows = build_rows(&sample_filing(), &[tx(100.0, 12.50)], &sample_reference());

        write_csv(&path, &rows).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "FetchedUTC,Insider,Role,Company,Ticker,Shares,Price,ValueUSD,SEC_HTML,SEC_XML"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("Doe Jane"));
        assert!(row.contains("1250"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_write_csv_empty_rows_is_header_only() {
        let path = std::env::temp_dir().join(format!("form4_empty_{}.csv", std::process::id()));

        write_csv(&path, &[]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_default_output_path_is_date_stamped() {
        let name = default_output_path().display().to_string();
        assert!(name.starts_with("form4_buys_"));
        assert!(name.ends_with(".csv"));
    }
}
