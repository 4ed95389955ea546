//! Dataset serialization used by `DiskSink`
//!
//! The output format follows the file extension.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use contracts::{AttributeKind, BoxError, Dataset, Value};

/// Writes a complete dataset to a path
///
/// A failed write may leave a partial file behind; cleaning up is the
/// writer's own business.
pub trait DatasetWriter: Send + Sync + fmt::Debug {
    fn write(&self, path: &Path, data: &Dataset) -> Result<(), BoxError>;
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Arff,
    Csv,
    Json,
    Bincode,
}

impl OutputFormat {
    /// Infer format from the path's extension, ARFF when unknown
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match ext.as_deref() {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            Some("bin") => Self::Bincode,
            _ => Self::Arff,
        }
    }
}

/// Default writer: picks the format from the extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatWriter;

impl DatasetWriter for FormatWriter {
    fn write(&self, path: &Path, data: &Dataset) -> Result<(), BoxError> {
        let mut out = BufWriter::new(File::create(path)?);
        match OutputFormat::from_path(path) {
            OutputFormat::Arff => write_arff(&mut out, data)?,
            OutputFormat::Csv => write_csv(&mut out, data)?,
            OutputFormat::Json => serde_json::to_writer_pretty(&mut out, data)?,
            OutputFormat::Bincode => bincode::serialize_into(&mut out, data)?,
        }
        out.flush()?;
        Ok(())
    }
}

fn write_arff<W: Write>(out: &mut W, data: &Dataset) -> std::io::Result<()> {
    writeln!(out, "@relation {}", quote_arff(data.relation()))?;
    writeln!(out)?;
    for attribute in data.attributes() {
        let kind = match &attribute.kind {
            AttributeKind::Numeric => "numeric".to_string(),
            AttributeKind::Text => "string".to_string(),
            AttributeKind::Nominal(labels) => format!(
                "{{{}}}",
                labels
                    .iter()
                    .map(|l| quote_arff(l))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        };
        writeln!(out, "@attribute {} {}", quote_arff(&attribute.name), kind)?;
    }
    writeln!(out)?;
    writeln!(out, "@data")?;
    for record in data.records() {
        let row: Vec<String> = record
            .values
            .iter()
            .map(|v| match v {
                Value::Number(n) => n.to_string(),
                Value::Label(l) => quote_arff(l),
                Value::Missing => "?".to_string(),
            })
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

fn write_csv<W: Write>(out: &mut W, data: &Dataset) -> std::io::Result<()> {
    let header: Vec<String> = data
        .attributes()
        .iter()
        .map(|a| quote_csv(&a.name))
        .collect();
    writeln!(out, "{}", header.join(","))?;
    for record in data.records() {
        let row: Vec<String> = record
            .values
            .iter()
            .map(|v| match v {
                Value::Number(n) => n.to_string(),
                Value::Label(l) => quote_csv(l),
                Value::Missing => "?".to_string(),
            })
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

fn quote_arff(s: &str) -> String {
    let special = s.is_empty()
        || s == "?"
        || s.chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | '\'' | '"' | '{' | '}' | '%' | '\\'));
    if !special {
        return s.to_string();
    }
    let escaped = s
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("'{escaped}'")
}

fn quote_csv(s: &str) -> String {
    if s.chars().any(|c| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
