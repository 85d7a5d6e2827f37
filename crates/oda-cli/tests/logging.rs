//! Tests for logging configuration.

use oda_cli::logging::{LogConfig, LogFormat};
use tracing::level_filters::LevelFilter;

#[test]
fn default_directives_keep_dependencies_at_warn() {
    let config = LogConfig::default().with_level(LevelFilter::DEBUG);
    insta::assert_snapshot!(
        config.directives(),
        @"warn,oda_cli=debug,oda_codes=debug,oda_model=debug,oda_schemas=debug,oda_transform=debug"
    );
}

#[test]
fn quiet_levels_apply_to_dependencies_too() {
    let config = LogConfig::default().with_level(LevelFilter::ERROR);
    assert!(config.directives().starts_with("error,"));
}

#[test]
fn builder_sets_format_and_file() {
    let config = LogConfig::default()
        .with_format(LogFormat::Json)
        .with_log_file(Some("oda.log".into()));
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.log_file.as_deref(), Some(std::path::Path::new("oda.log")));
    assert_eq!(config.level_filter, LevelFilter::WARN);
}
