//! Global subscriber installation, kept in its own test binary so the
//! subscriber never leaks into other tests.

use brrtpattern::logging::{init_logging_with_config, LogConfig, LogFormat};

#[test]
fn test_second_init_fails() {
    let config = LogConfig {
        log_level: "warn".into(),
        format: LogFormat::Json,
        target_filter: Some("brrtpattern=debug, not a directive ,".into()),
        ..LogConfig::default()
    };
    assert!(init_logging_with_config(&config).is_ok());
    // A second call must fail rather than replace the installed subscriber.
    assert!(init_logging_with_config(&config).is_err());
}
