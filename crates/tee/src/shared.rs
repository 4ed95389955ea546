//! Shared tee logic
//!
//! Every decorator owns one `Tee`: the configured sink, the registry used to
//! rebuild it, and its counters. The decorators differ only in which host
//! operation triggers `dump`.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use config_loader::{join_options, split_options};
use contracts::{Configurable, ContractError, Dataset, HostKind, OptionList, Sink, StageConfig};
use sinks::{codec, SinkRegistry, SinkSpec};
use tracing::{debug, error, instrument};

use crate::metrics::TeeMetrics;

/// Option that carries the sink configuration
pub const DUMPER_OPTION: &str = "dumper";

/// Sink plus the bookkeeping around it
pub struct Tee {
    host_kind: HostKind,
    sink: Box<dyn Sink>,
    registry: Arc<SinkRegistry>,
    metrics: Arc<TeeMetrics>,
}

impl Tee {
    /// Tee with the default `Null` sink
    pub fn new(host_kind: HostKind, registry: Arc<SinkRegistry>) -> Self {
        let sink = registry.default_sink();
        Self {
            host_kind,
            sink,
            registry,
            metrics: Arc::new(TeeMetrics::new()),
        }
    }

    pub fn host_kind(&self) -> HostKind {
        self.host_kind
    }

    pub fn sink(&self) -> &dyn Sink {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> &mut dyn Sink {
        self.sink.as_mut()
    }

    /// Install a new sink, returning the old one
    pub fn replace_sink(&mut self, sink: Box<dyn Sink>) -> Box<dyn Sink> {
        debug!(
            host = self.host_kind.as_str(),
            old = %self.sink.type_name(),
            new = %sink.type_name(),
            "Sink replaced"
        );
        std::mem::replace(&mut self.sink, sink)
    }

    /// Spec of the current sink
    pub fn sink_spec(&self) -> SinkSpec {
        SinkSpec::of(self.sink.as_ref())
    }

    pub fn registry(&self) -> &Arc<SinkRegistry> {
        &self.registry
    }

    pub fn metrics(&self) -> &Arc<TeeMetrics> {
        &self.metrics
    }

    /// Install the sink a settings stage names
    ///
    /// # Errors
    /// `ConfigValidation` if the stage is for another host kind, otherwise any
    /// codec error.
    pub fn apply_stage(&mut self, stage: &StageConfig) -> Result<(), ContractError> {
        if stage.host != self.host_kind {
            return Err(ContractError::config_validation(
                "host",
                format!(
                    "stage '{}' is for {} hosts, not {}",
                    stage.name,
                    stage.host.as_str(),
                    self.host_kind.as_str()
                ),
            ));
        }
        let sink = codec::build_stage_sink(stage, &self.registry)?;
        self.replace_sink(sink);
        Ok(())
    }

    /// Hand `data` to the sink
    ///
    /// A failure is returned as `ContractError::Dump` carrying the sink's own
    /// error; the caller must not run the wrapped operation then.
    #[instrument(
        name = "tee_dump",
        skip(self, data),
        fields(host = self.host_kind.as_str(), sink = %self.sink.type_name(), records = data.len())
    )]
    pub fn dump(&mut self, data: &Dataset) -> Result<(), ContractError> {
        let start = Instant::now();
        let result = self.sink.dump(data);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let sink_type = self.sink.type_name().to_string();
        observability::record_dump_duration_ms(&sink_type, elapsed_ms);
        observability::record_dump(&sink_type, result.is_ok());

        match result {
            Ok(()) => {
                self.metrics.inc_dump_count();
                debug!(elapsed_ms, "Dump complete");
                Ok(())
            }
            Err(e) => {
                self.metrics.inc_failure_count();
                error!(error = %e, "Dump failed, host operation aborted");
                Err(e.into())
            }
        }
    }

    /// Count a primary operation handed to the wrapped component
    pub fn record_delegation(&self) {
        self.metrics.inc_delegation_count();
        observability::record_delegation(self.host_kind.as_str());
    }

    /// Own option tokens: `-dumper <sink spec>`
    pub fn options(&self) -> Vec<String> {
        vec![
            format!("-{DUMPER_OPTION}"),
            codec::to_config_string(self.sink.as_ref()),
        ]
    }

    /// Take `-dumper` from `options` and build its sink, `Null` when absent
    pub fn take_sink_option(
        &self,
        options: &mut OptionList,
    ) -> Result<Box<dyn Sink>, ContractError> {
        match options.take_value(DUMPER_OPTION)? {
            Some(raw) => codec::parse_sink_str(&raw, &self.registry),
            None => Ok(self.registry.default_sink()),
        }
    }

    /// Full configuration string: own tokens, then the wrapped component's
    pub fn configuration<C: Configurable + ?Sized>(&self, wrapped: &C) -> String {
        let mut tokens = self.options();
        tokens.extend(wrapped.options());
        join_options(&tokens)
    }

    /// Reconfigure from a full configuration string
    ///
    /// The sink options are taken first, the remainder goes to `wrapped`, and
    /// any token neither side consumed is rejected. The new sink is installed
    /// only when everything parsed.
    #[instrument(
        name = "tee_set_configuration",
        skip(self, wrapped),
        fields(host = self.host_kind.as_str())
    )]
    pub fn set_configuration<C: Configurable + ?Sized>(
        &mut self,
        raw: &str,
        wrapped: &mut C,
    ) -> Result<(), ContractError> {
        let mut options = OptionList::new(split_options(raw)?);
        let sink = self.take_sink_option(&mut options)?;
        wrapped.set_options(&mut options)?;
        options.ensure_consumed()?;
        self.replace_sink(sink);
        Ok(())
    }
}

impl fmt::Debug for Tee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tee")
            .field("host_kind", &self.host_kind)
            .field("sink", &self.sink)
            .field("metrics", &self.metrics.snapshot())
            .finish()
    }
}
