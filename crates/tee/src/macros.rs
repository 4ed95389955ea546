//! Decorator plumbing macro
//!
//! The three decorators share everything except the host trait they wrap.

/// Generate constructors, accessors, `Configurable` and `Graphable` for a
/// decorator struct `$decorator<H> { inner: H, tee: Tee }`.
///
/// # Usage
/// ```ignore
/// impl_tee_decorator!(
///     TrainableTee,           // Decorator name
///     Trainable,              // Host trait
///     HostKind::Trainable     // Host kind label
/// );
/// ```
macro_rules! impl_tee_decorator {
    (
        $decorator:ident,
        $host:ident,
        $host_kind:expr
    ) => {
        impl<H: $host> $decorator<H> {
            /// Wrap `inner` with a `Null` sink and the default registry
            pub fn new(inner: H) -> Self {
                Self::with_registry(
                    inner,
                    ::std::sync::Arc::new(::sinks::SinkRegistry::with_defaults()),
                )
            }

            /// Wrap `inner`, resolving sink types through `registry`
            pub fn with_registry(
                inner: H,
                registry: ::std::sync::Arc<::sinks::SinkRegistry>,
            ) -> Self {
                Self {
                    inner,
                    tee: $crate::shared::Tee::new($host_kind, registry),
                }
            }

            pub fn with_sink(mut self, sink: Box<dyn ::contracts::Sink>) -> Self {
                self.tee.replace_sink(sink);
                self
            }

            pub fn inner(&self) -> &H {
                &self.inner
            }

            pub fn inner_mut(&mut self) -> &mut H {
                &mut self.inner
            }

            pub fn into_inner(self) -> H {
                self.inner
            }

            pub fn sink(&self) -> &dyn ::contracts::Sink {
                self.tee.sink()
            }

            /// Install a new sink; the old one is returned, not merged
            pub fn set_sink(
                &mut self,
                sink: Box<dyn ::contracts::Sink>,
            ) -> Box<dyn ::contracts::Sink> {
                self.tee.replace_sink(sink)
            }

            pub fn sink_spec(&self) -> ::sinks::SinkSpec {
                self.tee.sink_spec()
            }

            pub fn metrics(&self) -> &::std::sync::Arc<$crate::metrics::TeeMetrics> {
                self.tee.metrics()
            }

            /// `-dumper <sink spec>` followed by the wrapped component's options
            pub fn configuration(&self) -> String {
                self.tee.configuration(&self.inner)
            }

            /// Reconfigure sink and wrapped component from one string
            ///
            /// # Errors
            /// Tokenizer, codec and wrapped-component errors, or
            /// `UnsupportedOption` for tokens nobody consumed.
            pub fn set_configuration(
                &mut self,
                raw: &str,
            ) -> Result<(), ::contracts::ContractError> {
                self.tee.set_configuration(raw, &mut self.inner)
            }

            /// Install the sink a settings stage names
            pub fn apply_stage(
                &mut self,
                stage: &::contracts::StageConfig,
            ) -> Result<(), ::contracts::ContractError> {
                self.tee.apply_stage(stage)
            }
        }

        impl<H: $host> ::contracts::Configurable for $decorator<H> {
            fn set_options(
                &mut self,
                options: &mut ::contracts::OptionList,
            ) -> Result<(), ::contracts::ContractError> {
                let sink = self.tee.take_sink_option(options)?;
                self.inner.set_options(options)?;
                self.tee.replace_sink(sink);
                Ok(())
            }

            fn options(&self) -> Vec<String> {
                let mut tokens = self.tee.options();
                tokens.extend(self.inner.options());
                tokens
            }
        }

        impl<H: $host> ::contracts::Graphable for $decorator<H> {
            fn graph_type(&self) -> ::contracts::GraphType {
                self.inner
                    .as_graphable()
                    .map_or(::contracts::GraphType::NotDrawable, |g| g.graph_type())
            }

            fn graph(&self) -> Result<String, ::contracts::ContractError> {
                match self.inner.as_graphable() {
                    Some(g) => g.graph(),
                    None => Err(::contracts::ContractError::unsupported_capability(
                        self.inner.name(),
                        "graph",
                    )),
                }
            }
        }
    };
}
