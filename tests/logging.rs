mod common;

use std::path::PathBuf;

use common::honolulu_cli;
use metcast::{
    cli::Cli,
    logging::{LogSink, file_subscriber, open_log_file, sink_for},
};
use tracing_subscriber::EnvFilter;

#[test]
fn interactive_runs_log_nowhere_without_a_file() {
    assert_eq!(sink_for(&honolulu_cli()), LogSink::Disabled);
}

#[test]
fn one_shot_runs_log_to_stderr() {
    let cli = Cli {
        one_shot: true,
        ..honolulu_cli()
    };
    assert_eq!(sink_for(&cli), LogSink::Stderr);
}

#[test]
fn explicit_log_file_wins() {
    let cli = Cli {
        one_shot: true,
        log_file: Some(PathBuf::from("/tmp/metcast.log")),
        ..honolulu_cli()
    };
    assert_eq!(sink_for(&cli), LogSink::File(PathBuf::from("/tmp/metcast.log")));
}

#[test]
fn file_subscriber_appends_filtered_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metcast.log");
    std::fs::write(&path, "earlier run\n").unwrap();

    let subscriber = file_subscriber(open_log_file(&path).unwrap(), EnvFilter::new("info"));
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!(place = "Honolulu", "weather updated");
        tracing::debug!("too chatty");
    });

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("earlier run\n"));
    assert!(contents.contains("weather updated"));
    assert!(contents.contains("place=\"Honolulu\""));
    assert!(!contents.contains("too chatty"));
    assert!(!contents.contains('\u{1b}'));
}

#[test]
fn missing_directory_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_log_file(&dir.path().join("nope").join("metcast.log")).unwrap_err();
    assert!(err.to_string().contains("opening log file"));
}
