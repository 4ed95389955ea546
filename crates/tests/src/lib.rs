//! # Integration Tests
//!
//! Cross-crate scenarios: configuration strings through the tokenizer, codec and
//! registry into live sinks, and sinks driven by tee decorators around host
//! components.

#[cfg(test)]
mod contract_tests {
    use contracts::{ConfigVersion, GraphType, HostKind, StageConfig, TeeSettings};

    #[test]
    fn test_settings_defaults_and_stage_lookup() {
        let settings = TeeSettings {
            stages: vec![StageConfig {
                name: "train".to_string(),
                host: HostKind::Trainable,
                dumper: None,
            }],
            ..TeeSettings::default()
        };

        assert_eq!(settings.version, ConfigVersion::V1);
        assert_eq!(settings.stage("train").map(|s| s.host), Some(HostKind::Trainable));
        assert!(settings.stage("cluster").is_none());
        assert_eq!(HostKind::BatchTransformable.as_str(), "batch_transformable");
        assert_eq!(GraphType::default(), GraphType::NotDrawable);
    }
}

#[cfg(test)]
mod codec_tests {
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use config_loader::split_options;
    use contracts::{
        BatchTransformable, ContractError, Dataset, DumpError, OptionDescriptor, OptionList, Sink,
    };
    use sinks::{codec, DiskSink, MemorySink, NullSink, SinkFactory, SinkRegistry, SinkSpec};
    use tee::BatchTee;

    fn registry() -> SinkRegistry {
        SinkRegistry::with_defaults()
    }

    fn round_trip(spec: &SinkSpec, registry: &SinkRegistry) -> SinkSpec {
        let tokens = split_options(&codec::serialize(spec)).unwrap();
        codec::parse(&tokens, registry).unwrap()
    }

    /// Counts dumps and stops accepting data after `-limit` of them
    #[derive(Debug, Default)]
    struct LimitedSink {
        limit: Option<usize>,
        seen: Arc<AtomicUsize>,
    }

    impl Sink for LimitedSink {
        fn type_name(&self) -> &str {
            "Limited"
        }

        fn global_info(&self) -> &str {
            "Accepts a limited number of dumps."
        }

        fn list_options(&self) -> Vec<OptionDescriptor> {
            vec![OptionDescriptor {
                name: "limit",
                synopsis: "-limit <n>",
                description: "Maximum number of dumps.",
                takes_value: true,
            }]
        }

        fn set_options(&mut self, options: &mut OptionList) -> Result<(), ContractError> {
            self.limit = match options.take_value("limit")? {
                Some(n) => Some(n.parse().map_err(|_| {
                    ContractError::config_validation("limit", format!("not a number: {n}"))
                })?),
                None => None,
            };
            options.ensure_consumed()
        }

        fn options(&self) -> Vec<String> {
            self.limit
                .iter()
                .flat_map(|n| ["-limit".to_string(), n.to_string()])
                .collect()
        }

        fn dump(&mut self, _data: &Dataset) -> Result<(), DumpError> {
            let seen = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
            match self.limit {
                Some(limit) if seen > limit => Err(DumpError::new(
                    "Limited",
                    format!("limit of {limit} dumps reached"),
                )),
                _ => Ok(()),
            }
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    struct LimitedFactory;

    impl SinkFactory for LimitedFactory {
        fn type_name(&self) -> &str {
            "Limited"
        }

        fn new_instance(&self) -> Box<dyn Sink> {
            Box::new(LimitedSink::default())
        }
    }

    #[test]
    fn test_round_trip_every_variant() {
        let registry = registry();
        let specs = [
            SinkSpec::of(&NullSink::new()),
            SinkSpec::of(&MemorySink::new()),
            SinkSpec::of(&DiskSink::default()),
            SinkSpec::of(&DiskSink::new("out.arff")),
            SinkSpec::of(
                &DiskSink::new("/tmp/with space/out.arff").with_append_timestamp(true),
            ),
            SinkSpec::of(&DiskSink::new("quote\"and'apostrophe")),
        ];
        for spec in &specs {
            assert_eq!(&round_trip(spec, &registry), spec, "{spec}");
        }
    }

    #[test]
    fn test_round_trip_nested_in_decorator_configuration() {
        let registry = Arc::new(registry());
        let inner = DiskSink::new("/data/run 1/\"fold\".arff").with_append_timestamp(true);

        let mut filter =
            BatchTee::with_registry(BatchTee::pass_through(), Arc::clone(&registry))
                .with_sink(Box::new(MemorySink::new()));
        filter.inner_mut().set_sink(Box::new(inner.clone()));

        let rendered = filter.configuration();
        let tokens = split_options(&rendered).unwrap();
        assert_eq!(tokens[0], "-dumper");
        assert_eq!(tokens[1], "Memory");
        assert_eq!(tokens[2], "-dumper");

        // the nested spec survives as one token and parses back to the same sink
        let nested = codec::parse_str(&tokens[3], &registry).unwrap();
        assert_eq!(nested, SinkSpec::of(&inner));

        let mut copy = BatchTee::with_registry(BatchTee::pass_through(), registry);
        copy.set_configuration(&rendered).unwrap();
        assert_eq!(copy.configuration(), rendered);
        assert_eq!(copy.inner().sink_spec(), SinkSpec::of(&inner));
    }

    #[test]
    fn test_empty_configuration_is_inert_null() {
        let registry = registry();
        let spec = codec::parse_str("", &registry).unwrap();
        assert_eq!(spec.type_name(), "Null");

        let mut sink = spec.build(&registry).unwrap();
        assert!(sink.dump(&Dataset::empty("nothing")).is_ok());
        assert!(sink.options().is_empty());
    }

    #[test]
    fn test_unknown_type_and_unsupported_option() {
        let registry = registry();
        let err = codec::parse(&["Bogus".to_string()], &registry).unwrap_err();
        assert!(matches!(err, ContractError::UnknownSinkType { .. }));

        let tokens = vec!["Disk".to_string(), "-not-an-option".to_string()];
        let err = codec::parse(&tokens, &registry).unwrap_err();
        assert!(matches!(err, ContractError::UnsupportedOption { .. }));
    }

    #[test]
    fn test_registered_sink_behaves_like_builtin() {
        let mut registry = registry();
        registry.register(LimitedFactory).unwrap();
        let registry = Arc::new(registry);

        let spec = codec::parse_str("Limited -limit 1", &registry).unwrap();
        assert_eq!(round_trip(&spec, &registry), spec);

        let err = codec::parse_str("Limited -limit lots", &registry).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { .. }));

        let mut filter = BatchTee::with_registry(tee::PassThrough, registry);
        filter.set_configuration("-dumper \"Limited -limit 1\"").unwrap();

        let data = Dataset::empty("batch");
        assert!(filter.process(&data).is_ok());
        let err = filter.process(&data).unwrap_err();
        assert_eq!(err.as_dump().unwrap().sink_name, "Limited");
        assert_eq!(filter.metrics().snapshot().delegation_count, 1);
    }

    #[test]
    fn test_registered_name_unknown_elsewhere() {
        // registration is per registry value, not global
        let mut extended = registry();
        extended.register(LimitedFactory).unwrap();
        assert!(codec::parse_str("Limited", &extended).is_ok());

        let mut filter = BatchTee::pass_through();
        let err = filter.set_configuration("-dumper Limited").unwrap_err();
        assert!(matches!(err, ContractError::UnknownSinkType { .. }));
    }
}

#[cfg(test)]
mod sink_tests {
    use std::fs;
    use std::sync::{Arc, Mutex};

    use contracts::{Attribute, BoxError, Dataset, Record, Sink};
    use sinks::{DataChanged, DataListener, DiskSink, MemorySink};
    use tempfile::tempdir;

    fn dataset(relation: &str, values: &[f64]) -> Dataset {
        Dataset::new(
            relation,
            vec![Attribute::numeric("x")],
            values.iter().map(|v| Record::new(vec![(*v).into()])).collect(),
        )
    }

    fn is_timestamp(s: &str) -> bool {
        let digits = s.chars().filter(char::is_ascii_digit).count();
        digits >= 14 && s.chars().all(|c| c.is_ascii_digit() || c == '_')
    }

    #[test]
    fn test_memory_overwrite_and_ordered_notification() {
        let mut sink = MemorySink::new();
        let observer = sink.clone();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_listener = Arc::clone(&seen);
        let listener: Arc<dyn DataListener> =
            Arc::new(move |e: &DataChanged| -> Result<(), BoxError> {
                seen_by_listener
                    .lock()
                    .unwrap()
                    .push(e.data.relation().to_string());
                Ok(())
            });
        observer.add_listener(&listener);

        let a = dataset("A", &[1.0]);
        let b = dataset("B", &[2.0, 3.0]);
        sink.dump(&a).unwrap();
        sink.dump(&b).unwrap();

        let cached = observer.data().unwrap();
        assert_eq!(cached, b);
        assert!(cached.same_snapshot(&b));
        assert_eq!(*seen.lock().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_disk_timestamped_names() {
        let dir = tempdir().unwrap();
        let mut sink = DiskSink::from_path(dir.path().join("out.arff"))
            .unwrap()
            .with_append_timestamp(true);
        sink.dump(&dataset("first", &[1.0])).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        sink.dump(&dataset("second", &[2.0])).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 2);
        assert_ne!(names[0], names[1]);
        for name in &names {
            let stamp = name
                .strip_prefix("out-")
                .and_then(|rest| rest.strip_suffix(".arff"))
                .unwrap();
            assert!(is_timestamp(stamp), "{name}");
        }
    }

    #[test]
    fn test_disk_timestamp_without_extension() {
        let dir = tempdir().unwrap();
        let mut sink = DiskSink::from_path(dir.path().join("out"))
            .unwrap()
            .with_append_timestamp(true);
        sink.dump(&dataset("d", &[1.0])).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        let stamp = names[0].strip_prefix("out-").unwrap();
        assert!(is_timestamp(stamp), "{}", names[0]);
    }

    #[test]
    fn test_disk_directory_guard() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("existing.arff"), "keep").unwrap();

        let mut sink = DiskSink::from_path(dir.path()).unwrap();
        sink.dump(&dataset("d", &[1.0])).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("existing.arff")).unwrap(),
            "keep"
        );
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{
        Attribute, Clusterable, Configurable, ContractError, Dataset, HostKind, Record,
        Trainable,
    };
    use sinks::{MemorySink, SinkRegistry};
    use tee::{ClusterableTee, TrainableTee};
    use tempfile::tempdir;

    /// Model that only counts how often it was trained
    #[derive(Debug, Default)]
    struct CountingModel {
        trained: Arc<AtomicUsize>,
    }

    impl Configurable for CountingModel {}

    impl Trainable for CountingModel {
        fn name(&self) -> &str {
            "CountingModel"
        }

        fn train(&mut self, _data: &Dataset) -> Result<(), ContractError> {
            self.trained.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn distribution(&self, _record: &Record) -> Result<Vec<f64>, ContractError> {
            Ok(vec![1.0])
        }
    }

    /// Single-cluster model
    #[derive(Debug, Default)]
    struct OneCluster {
        built: Arc<AtomicUsize>,
    }

    impl Configurable for OneCluster {}

    impl Clusterable for OneCluster {
        fn name(&self) -> &str {
            "OneCluster"
        }

        fn build(&mut self, _data: &Dataset) -> Result<(), ContractError> {
            self.built.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn distribution(&self, _record: &Record) -> Result<Vec<f64>, ContractError> {
            Ok(vec![1.0])
        }

        fn number_of_clusters(&self) -> Result<usize, ContractError> {
            Ok(1)
        }
    }

    fn data() -> Dataset {
        Dataset::new(
            "train",
            vec![Attribute::numeric("x")],
            vec![Record::new(vec![1.0.into()])],
        )
    }

    #[test]
    fn test_fail_fast_keeps_cause_and_skips_model() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("no-such-dir").join("train.arff");
        let model = CountingModel::default();
        let trained = Arc::clone(&model.trained);

        let mut tee = TrainableTee::new(model);
        tee.set_configuration(&config_loader::join_options(&[
            "-dumper".to_string(),
            sinks::to_config_string(&sinks::DiskSink::from_path(&target).unwrap()),
        ]))
        .unwrap();

        let err = tee.train(&data()).unwrap_err();
        let dump = err.as_dump().unwrap();
        assert_eq!(dump.sink_name, "Disk");
        let io = dump.source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(trained.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_settings_file_drives_stages() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("clusters.csv");
        let settings_path = dir.path().join("tee.toml");
        let dumper = format!(
            "Disk -output-file {}",
            config_loader::quote(&out.display().to_string())
        );
        let content = format!(
            r#"
[[stages]]
name = "train-export"
host = "trainable"
dumper = "Memory"

[[stages]]
name = "cluster-export"
host = "clusterable"
dumper = {}
"#,
            toml_string(&dumper)
        );
        std::fs::write(&settings_path, content).unwrap();

        let settings = ConfigLoader::load_from_path(&settings_path).unwrap();
        let registry = Arc::new(SinkRegistry::with_defaults());

        let train_stage = settings.stage("train-export").unwrap();
        let mut trainer =
            TrainableTee::with_registry(CountingModel::default(), Arc::clone(&registry));
        trainer.apply_stage(train_stage).unwrap();
        trainer.train(&data()).unwrap();
        let memory = trainer.sink().as_any().downcast_ref::<MemorySink>().unwrap();
        assert_eq!(memory.data().unwrap().relation(), "train");

        let cluster_stage = settings.stage("cluster-export").unwrap();
        assert_eq!(cluster_stage.host, HostKind::Clusterable);
        let mut clusterer = ClusterableTee::with_registry(OneCluster::default(), registry);
        clusterer.apply_stage(cluster_stage).unwrap();
        clusterer.build(&data()).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "x\n1\n");
        assert_eq!(clusterer.inner().built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_settings_with_unknown_sink_fail_at_build() {
        let settings = ConfigLoader::load_from_str(
            r#"{"stages": [{"name": "s", "host": "batch_transformable", "dumper": "Bogus"}]}"#,
            ConfigFormat::Json,
        )
        .unwrap();
        let registry = SinkRegistry::with_defaults();
        let err = sinks::build_stage_sink(&settings.stages[0], &registry).unwrap_err();
        assert!(matches!(err, ContractError::UnknownSinkType { .. }));
    }

    fn toml_string(raw: &str) -> String {
        let escaped = raw.replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"{escaped}\"")
    }
}
