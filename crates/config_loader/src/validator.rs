//! Settings validation
//!
//! Rules:
//! - field constraints declared on the settings types (non-empty names)
//! - stage names unique
//! - `dumper` strings are well-quoted and start with a type name

use std::collections::HashSet;

use ::validator::Validate;
use contracts::{ContractError, TeeSettings};

use crate::tokenizer::split_options;

/// Validate TeeSettings
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(settings: &TeeSettings) -> Result<(), ContractError> {
    validate_fields(settings)?;
    validate_stage_names(settings)?;
    validate_dumpers(settings)?;
    Ok(())
}

fn validate_fields(settings: &TeeSettings) -> Result<(), ContractError> {
    settings
        .validate()
        .map_err(|e| ContractError::config_validation("stages", e.to_string()))
}

/// Stage names must be unique
fn validate_stage_names(settings: &TeeSettings) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for stage in &settings.stages {
        if !seen.insert(stage.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("stages[name={}]", stage.name),
                "duplicate stage name",
            ));
        }
    }
    Ok(())
}

/// Dumper strings must tokenize; the type name itself is resolved later
fn validate_dumpers(settings: &TeeSettings) -> Result<(), ContractError> {
    for stage in &settings.stages {
        let Some(dumper) = &stage.dumper else {
            continue;
        };
        let field = format!("stages[{}].dumper", stage.name);
        let tokens = split_options(dumper)
            .map_err(|e| ContractError::config_validation(&field, e.to_string()))?;
        if let Some(first) = tokens.first() {
            if first.is_empty() || first.starts_with('-') {
                return Err(ContractError::config_validation(
                    field,
                    format!("expected a sink type name, got '{first}'"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ConfigVersion, HostKind, StageConfig};

    fn stage(name: &str, dumper: Option<&str>) -> StageConfig {
        StageConfig {
            name: name.to_string(),
            host: HostKind::Trainable,
            dumper: dumper.map(str::to_string),
        }
    }

    fn settings(stages: Vec<StageConfig>) -> TeeSettings {
        TeeSettings {
            version: ConfigVersion::V1,
            stages,
        }
    }

    #[test]
    fn test_valid_settings() {
        let s = settings(vec![
            stage("a", Some("Disk -output-file \"x y.arff\"")),
            stage("b", None),
        ]);
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn test_empty_name() {
        let err = validate(&settings(vec![stage("", None)])).unwrap_err();
        assert!(matches!(err, ContractError::ConfigValidation { .. }));
        assert!(err.to_string().contains("stage name cannot be empty"));
    }

    #[test]
    fn test_duplicate_name() {
        let err = validate(&settings(vec![stage("a", None), stage("a", None)])).unwrap_err();
        assert!(err.to_string().contains("duplicate stage name"));
    }

    #[test]
    fn test_malformed_dumper() {
        let err = validate(&settings(vec![stage("a", Some("Disk \"oops"))])).unwrap_err();
        assert!(err.to_string().contains("stages[a].dumper"));
    }

    #[test]
    fn test_dumper_starting_with_option() {
        let err =
            validate(&settings(vec![stage("a", Some("-output-file x"))])).unwrap_err();
        assert!(err.to_string().contains("expected a sink type name"));
    }
}
