use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use crate::errors::CoreError;
use crate::models::transaction::Transaction;

/// Column order of the exported document.
pub const CSV_HEADER: [&str; 5] = ["id", "date", "category", "amount", "note"];

pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8";

/// A finished export, ready to hand to the host's download mechanism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: String,
    pub contents: String,
}

/// Host-side destination for exports (browser download, file on disk, ...).
pub trait ExportSink {
    fn deliver(&self, file: &ExportFile) -> Result<(), CoreError>;
}

/// Writes exports into a directory under their suggested file name.
#[cfg(not(target_arch = "wasm32"))]
pub struct DirectoryExportSink {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl DirectoryExportSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for DirectoryExportSink {
    fn deliver(&self, file: &ExportFile) -> Result<(), CoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(&file.file_name), &file.contents)?;
        Ok(())
    }
}

/// CSV export of the transaction collection.
///
/// Every field is wrapped in double quotes with embedded quotes doubled, so
/// notes containing commas, quotes or line breaks survive a round trip.
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// `spending_<YYYY-MM-DD>.csv`
    pub fn file_name(today: NaiveDate) -> String {
        format!("spending_{}.csv", today.format("%Y-%m-%d"))
    }

    /// Render the header plus one row per transaction.
    pub fn to_csv(&self, transactions: &[Transaction]) -> Result<String, CoreError> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        wtr.write_record(CSV_HEADER)?;
        for t in transactions {
            let date = t.date.format("%Y-%m-%d").to_string();
            let amount = t.amount.to_string();
            wtr.write_record([
                t.id.as_str(),
                date.as_str(),
                t.category.as_str(),
                amount.as_str(),
                t.note.as_deref().unwrap_or(""),
            ])?;
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| CoreError::Csv(format!("Failed to flush CSV writer: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| CoreError::Serialization(format!("CSV output is not UTF-8: {e}")))
    }

    /// Build the export file for `today`.
    pub fn export(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<ExportFile, CoreError> {
        Ok(ExportFile {
            file_name: Self::file_name(today),
            mime_type: CSV_MIME_TYPE.to_string(),
            contents: self.to_csv(transactions)?,
        })
    }

    /// Parse a document produced by [`to_csv`](Self::to_csv) back into transactions.
    /// An empty note column becomes `None`.
    pub fn parse_csv(&self, document: &str) -> Result<Vec<Transaction>, CoreError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(document.as_bytes());

        let headers = rdr.headers()?.clone();
        if headers.iter().ne(CSV_HEADER.iter().copied()) {
            return Err(CoreError::Csv(format!(
                "Unexpected header: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut transactions = Vec::new();
        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let field = |i: usize| record.get(i).unwrap_or("");
            let row = line + 2;

            let date = NaiveDate::parse_from_str(field(1), "%Y-%m-%d").map_err(|e| {
                CoreError::Csv(format!("Row {row}: invalid date '{}': {e}", field(1)))
            })?;
            let amount: f64 = field(3).parse().map_err(|e| {
                CoreError::Csv(format!("Row {row}: invalid amount '{}': {e}", field(3)))
            })?;
            let note = field(4);

            transactions.push(Transaction {
                id: field(0).to_string(),
                amount,
                category: field(2).to_string(),
                date,
                note: (!note.is_empty()).then(|| note.to_string()),
            });
        }

        Ok(transactions)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
