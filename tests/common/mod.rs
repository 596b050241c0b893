use std::fs::File;
use std::io::Error;
use std::path::{Path, PathBuf};

pub const SESSION_HEADER: [&str; 8] = [
    "action",
    "item",
    "quantity",
    "position",
    "currency",
    "card_number",
    "expiry",
    "cvv",
];

pub const VALID_CARD: [&str; 3] = ["1234567890123456", "12/27", "123"];

pub fn catalog_fixture() -> PathBuf {
    PathBuf::from("tests/fixtures/catalog.csv")
}

/// Writes a session script; short rows are padded with blank columns.
pub fn write_session(path: &Path, rows: &[&[&str]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(SESSION_HEADER)?;
    for row in rows {
        let mut record = vec![""; SESSION_HEADER.len()];
        record[..row.len()].copy_from_slice(row);
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn pay_now_row() -> Vec<&'static str> {
    let mut row = vec!["pay_now", "", "", "", ""];
    row.extend(VALID_CARD);
    row
}
