//! Delimited-text ingestion and prediction reports
//!
//! [`SampleTableReader`] deserializes rows straight into [`SampleRow`]. The
//! reader is strict about structure: a record with a different number of
//! fields than the header is a hard [`DnaclassError::Csv`] error, and
//! [`SampleTableReader::read_all`] returns no rows at all in that case.
//!
//! Gzip-compressed files (`.gz`) are decompressed transparently.
//!
//! # Examples
//!
//! ```
//! use dnaclass::io::SampleTableReader;
//!
//! let data = "Sample_ID,Sequence,Disease_Risk,GC_Content\n\
//!             S1,ATCGATCGAT,moderate risk,40.0\n\
//!             S2,GGGGCCCC,High,\n";
//!
//! let rows = SampleTableReader::new(data.as_bytes()).read_all()?;
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].gc_content, Some(40.0));
//! assert_eq!(rows[1].gc_content, None);
//! # Ok::<(), dnaclass::DnaclassError>(())
//! ```

use crate::dataset::SampleRow;
use crate::error::{DnaclassError, Result};
use crate::types::Sample;
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// Streaming reader of typed sample rows
pub struct SampleTableReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SampleTableReader<R> {
    /// Comma-delimited reader over any byte source
    pub fn new(reader: R) -> Self {
        Self::with_delimiter(reader, b',')
    }

    /// Reader with a custom single-byte delimiter (e.g. `b'\t'`)
    pub fn with_delimiter(reader: R, delimiter: u8) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(csv::Trim::All)
            .flexible(false)
            .from_reader(reader);
        Self { reader }
    }

    /// Header columns, in file order
    pub fn headers(&mut self) -> Result<Vec<String>> {
        Ok(self.reader.headers()?.iter().map(str::to_string).collect())
    }

    /// Read every row, failing as a whole on the first malformed record
    pub fn read_all(self) -> Result<Vec<SampleRow>> {
        let rows = self.collect::<Result<Vec<_>>>()?;
        tracing::debug!(rows = rows.len(), "read sample table");
        Ok(rows)
    }
}

impl SampleTableReader<Box<dyn Read>> {
    /// Open a file; paths ending in `.gz` are gzip-decompressed
    ///
    /// Tab-delimited files (`.tsv`, `.tsv.gz`) use a tab delimiter.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let file = File::open(path)?;
        let source: Box<dyn Read> = if name.ends_with(".gz") {
            Box::new(MultiGzDecoder::new(BufReader::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };

        let delimiter = if name.trim_end_matches(".gz").ends_with(".tsv") {
            b'\t'
        } else {
            b','
        };

        Ok(Self::with_delimiter(source, delimiter))
    }
}

impl<R: Read> Iterator for SampleTableReader<R> {
    type Item = Result<SampleRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader
            .deserialize::<SampleRow>()
            .next()
            .map(|row| row.map_err(DnaclassError::from))
    }
}

/// One line of a prediction report
#[derive(Debug, Serialize)]
struct PredictionRecord<'a> {
    #[serde(rename = "Sample_ID")]
    sample_id: &'a str,
    #[serde(rename = "Label")]
    label: &'a str,
    #[serde(rename = "Predicted")]
    predicted: Option<&'a str>,
    #[serde(rename = "Confidence")]
    confidence: Option<f64>,
    #[serde(rename = "Correct")]
    correct: Option<bool>,
}

/// Write a CSV report of labels and predictions
///
/// Samples without a prediction get empty `Predicted`, `Confidence` and
/// `Correct` cells.
pub fn write_predictions<W: Write>(samples: &[Sample], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for sample in samples {
        let prediction = sample.prediction.as_ref();
        writer.serialize(PredictionRecord {
            sample_id: &sample.id,
            label: sample.label.name(),
            predicted: prediction.map(|p| p.label.name()),
            confidence: prediction.map(|p| p.confidence),
            correct: sample.is_correctly_predicted(),
        })?;
    }

    writer.flush()?;
    Ok(())
}
