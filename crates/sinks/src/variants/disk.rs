//! DiskSink - writes the dataset to a file
//!
//! With `-append-timestamp` every dump gets its own file name, so repeated
//! runs (cross-validation folds, say) do not overwrite each other.

use std::any::Any;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Local};
use contracts::{ContractError, Dataset, DumpError, OptionDescriptor, OptionList, Sink};
use tracing::{debug, error, instrument};

use crate::format::{DatasetWriter, FormatWriter};

/// chrono pattern of the file name timestamp
///
/// Minutes come before the 12-hour clock hour; existing file names depend on it.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%M%I%S_%3f";

const DEFAULT_OUTPUT: &str = ".";

/// Sink that saves each dataset to disk
///
/// The output file is held as UTF-8 so it always survives a trip through a
/// configuration string.
#[derive(Debug, Clone)]
pub struct DiskSink {
    output_file: String,
    append_timestamp: bool,
    writer: Arc<dyn DatasetWriter>,
}

impl DiskSink {
    pub const TYPE_NAME: &'static str = "Disk";

    /// Sink writing to `output_file` without timestamps
    pub fn new(output_file: impl Into<String>) -> Self {
        Self {
            output_file: output_file.into(),
            append_timestamp: false,
            writer: Arc::new(FormatWriter),
        }
    }

    /// Sink writing to a filesystem path
    ///
    /// # Errors
    /// `ConfigValidation` if the path is not valid UTF-8.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContractError> {
        Ok(Self::new(utf8_path(path.as_ref())?))
    }

    pub fn with_append_timestamp(mut self, append: bool) -> Self {
        self.append_timestamp = append;
        self
    }

    /// Replace the dataset writer
    pub fn with_writer(mut self, writer: Arc<dyn DatasetWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn output_file(&self) -> &Path {
        Path::new(&self.output_file)
    }

    pub fn set_output_file(&mut self, path: impl Into<String>) {
        self.output_file = path.into();
    }

    pub fn append_timestamp(&self) -> bool {
        self.append_timestamp
    }

    pub fn set_append_timestamp(&mut self, append: bool) {
        self.append_timestamp = append;
    }

    /// Path the next dump at `now` writes to
    pub fn target_path(&self, now: DateTime<Local>) -> PathBuf {
        if self.append_timestamp {
            timestamped_path(self.output_file(), &format_timestamp(now))
        } else {
            PathBuf::from(&self.output_file)
        }
    }
}

impl Default for DiskSink {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT)
    }
}

fn utf8_path(path: &Path) -> Result<&str, ContractError> {
    path.to_str().ok_or_else(|| {
        ContractError::config_validation(
            "output-file",
            format!("path is not valid UTF-8: {}", path.display()),
        )
    })
}

/// Render `now` with `TIMESTAMP_FORMAT`
pub fn format_timestamp(now: DateTime<Local>) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Splice `-<timestamp>` into a path
///
/// `dir/name.ext` becomes `dir/name-<timestamp>.ext`; a file name without a
/// dot gets the timestamp appended.
pub fn timestamped_path(base: &Path, timestamp: &str) -> PathBuf {
    let Some(name) = base.file_name() else {
        let mut appended = OsString::from(base.as_os_str());
        appended.push(format!("-{timestamp}"));
        return PathBuf::from(appended);
    };

    let mut spliced = OsString::new();
    match (base.file_stem(), base.extension()) {
        (Some(stem), Some(ext)) => {
            spliced.push(stem);
            spliced.push(format!("-{timestamp}."));
            spliced.push(ext);
        }
        // `.hidden` has no extension for `Path`, but its only dot still splits
        _ if name.as_encoded_bytes().starts_with(b".") => {
            spliced.push(format!("-{timestamp}"));
            spliced.push(name);
        }
        _ => {
            spliced.push(name);
            spliced.push(format!("-{timestamp}"));
        }
    }
    base.with_file_name(spliced)
}

impl Sink for DiskSink {
    fn type_name(&self) -> &str {
        Self::TYPE_NAME
    }

    fn global_info(&self) -> &str {
        "Saves the data to the specified file.\n\
         A timestamp can be appended to the file name so that dumping also works \
         within cross-validation (format: yyyyMMdd_mmhhss_SSS)."
    }

    fn list_options(&self) -> Vec<OptionDescriptor> {
        vec![
            OptionDescriptor {
                name: "output-file",
                synopsis: "-output-file <file>",
                description: "The file to save the data to. (default: .)",
                takes_value: true,
            },
            OptionDescriptor {
                name: "append-timestamp",
                synopsis: "-append-timestamp",
                description: "Whether to append a timestamp to the file name, \
                              e.g. 'output.arff' -> 'output-20190919_164637_234.arff'. \
                              (default: no)",
                takes_value: false,
            },
        ]
    }

    fn set_options(&mut self, options: &mut OptionList) -> Result<(), ContractError> {
        let output = options.take_value("output-file")?;
        self.output_file = match output {
            Some(path) if !path.is_empty() => path,
            _ => DEFAULT_OUTPUT.to_string(),
        };
        self.append_timestamp = options.take_flag("append-timestamp");
        options.ensure_consumed()
    }

    fn options(&self) -> Vec<String> {
        let mut result = vec!["-output-file".to_string(), self.output_file.clone()];
        if self.append_timestamp {
            result.push("-append-timestamp".to_string());
        }
        result
    }

    #[instrument(
        name = "disk_sink_dump",
        skip(self, data),
        fields(output = %self.output_file, records = data.len())
    )]
    fn dump(&mut self, data: &Dataset) -> Result<(), DumpError> {
        if self.output_file().is_dir() {
            debug!("Output is a directory, nothing written");
            return Ok(());
        }

        let path = self.target_path(Local::now());
        self.writer.write(&path, data).map_err(|e| {
            error!(path = %path.display(), error = %e, "Write failed");
            DumpError::new(Self::TYPE_NAME, e)
        })?;

        debug!(path = %path.display(), "Dataset written");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
