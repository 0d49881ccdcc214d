//! CLI command tests

use super::*;
use crate::cli::{ConfusionArgs, LocateArgs, MaxArgs, MetricArgs, OutputFormat};
use crate::metrics::ThresholdSpec;
use std::path::PathBuf;
use tempfile::TempDir;

/// Write a small binomial payload to `dir`
fn create_test_payload(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("metrics.json");
    let payload = r#"{
        "schema_type": "ModelMetricsBinomial",
        "nobs": 200,
        "MSE": 0.15,
        "RMSE": 0.387,
        "logloss": 0.45,
        "AUC": 0.86,
        "Gini": 0.72,
        "domain": ["no", "yes"],
        "thresholds_and_metric_scores": [
            {"threshold": 0.1, "tns": 70, "fps": 30, "fns": 10, "tps": 90, "tpr": 0.9, "f1": 0.82},
            {"threshold": 0.5, "tns": 90, "fps": 10, "fns": 30, "tps": 70, "tpr": 0.7, "f1": 0.78}
        ],
        "max_criteria_and_metric_scores": [
            {"metric": "max f1", "threshold": 0.1, "value": 0.82},
            {"metric": "max tpr", "threshold": 0.1, "value": 0.9}
        ]
    }"#;
    std::fs::write(&path, payload).unwrap();
    path
}

fn input(payload: PathBuf, format: OutputFormat) -> InputArgs {
    InputArgs { payload, config: None, format }
}

#[test]
fn test_metric_command() {
    let dir = TempDir::new().unwrap();
    let args = MetricArgs {
        name: "recall".to_string(),
        thresholds: ThresholdSpec::List(vec![0.5, 0.1]),
        error: false,
        input: input(create_test_payload(&dir), OutputFormat::Text),
    };
    assert!(metric::run_metric(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_metric_command_json_error() {
    let dir = TempDir::new().unwrap();
    let args = MetricArgs {
        name: "accuracy".to_string(),
        thresholds: ThresholdSpec::All,
        error: true,
        input: input(create_test_payload(&dir), OutputFormat::Json),
    };
    assert!(metric::run_metric(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_metric_command_unknown_metric() {
    let dir = TempDir::new().unwrap();
    let args = MetricArgs {
        name: "auc".to_string(),
        thresholds: ThresholdSpec::Max,
        error: false,
        input: input(create_test_payload(&dir), OutputFormat::Text),
    };
    let err = metric::run_metric(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("allowable metrics"));
}

#[test]
fn test_confusion_command() {
    let dir = TempDir::new().unwrap();
    let args = ConfusionArgs {
        metrics: vec!["f1".to_string()],
        thresholds: vec![0.5],
        input: input(create_test_payload(&dir), OutputFormat::Text),
    };
    assert!(confusion::run_confusion(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_confusion_command_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let args = ConfusionArgs {
        metrics: vec![],
        thresholds: vec![1.2],
        input: input(create_test_payload(&dir), OutputFormat::Json),
    };
    let err = confusion::run_confusion(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("1.2"));
}

#[test]
fn test_max_command() {
    let dir = TempDir::new().unwrap();
    let args = MaxArgs { name: "f1".to_string(), input: input(create_test_payload(&dir), OutputFormat::Json) };
    assert!(max::run_max(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_max_command_missing_criterion() {
    let dir = TempDir::new().unwrap();
    let args = MaxArgs { name: "f2".to_string(), input: input(create_test_payload(&dir), OutputFormat::Text) };
    assert!(max::run_max(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_locate_command() {
    let dir = TempDir::new().unwrap();
    let args = LocateArgs { threshold: 0.3, input: input(create_test_payload(&dir), OutputFormat::Text) };
    assert!(locate::run_locate(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_locate_command_out_of_range() {
    let dir = TempDir::new().unwrap();
    let args = LocateArgs { threshold: 1.5, input: input(create_test_payload(&dir), OutputFormat::Text) };
    assert!(locate::run_locate(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_missing_payload() {
    let args = MaxArgs {
        name: "f1".to_string(),
        input: input(PathBuf::from("/nonexistent/metrics.json"), OutputFormat::Text),
    };
    let err = max::run_max(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Payload error"));
}

#[test]
fn test_config_applied() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("query.yaml");
    std::fs::write(&config_path, "default_metric: tpr\nwarn_on_nearest: false\n").unwrap();

    let mut args_input = input(create_test_payload(&dir), OutputFormat::Text);
    args_input.config = Some(config_path);
    let metrics = load_binomial(&args_input).unwrap();
    let cms = metrics.thresholds().confusion_matrices(&[], &[]).unwrap();
    assert_eq!(cms.single().unwrap().header(), "max tpr @ threshold=0.1");
}

#[test]
fn test_bad_config_rejected() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("query.yaml");
    std::fs::write(&config_path, "default_metric: nope\n").unwrap();

    let mut args_input = input(create_test_payload(&dir), OutputFormat::Text);
    args_input.config = Some(config_path);
    let err = load_binomial(&args_input).unwrap_err();
    assert!(err.starts_with("Config error"));
}
