//! Configuration validation tests
//!
//! Tests that verify configuration defaults, parsing and validation.

use snaproute_exporter::config::{CollectorConfig, Config, ServerConfig, SnapRouteConfig};

fn parse(toml: &str) -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .expect("Failed to build config")
        .try_deserialize()
        .expect("Failed to deserialize config")
}

#[test]
fn test_default_server_config() {
    // Given: ServerConfig defaults
    let config = ServerConfig::default();

    // Then: Bind to all interfaces on the usual collector port
    assert_eq!(config.addr, "0.0.0.0");
    assert_eq!(config.port, 9273);
}

#[test]
fn test_default_snaproute_config() {
    let config = SnapRouteConfig::default();
    assert_eq!(config.url, "http://localhost:8080/public/v1/");
    assert!(!config.is_barefoot);
    assert_eq!(config.max_pages, 64);
}

#[test]
fn test_default_collector_config() {
    let config = CollectorConfig::default();
    assert_eq!(config.interval_seconds, 10);
    assert!(!config.collect_ipv4_interfaces);
    assert!(!config.port_deltas);
}

#[test]
fn test_empty_document_uses_defaults() {
    // Given: An empty configuration document
    let config = parse("");

    // Then: Every section falls back to its defaults and validates
    assert_eq!(config.snaproute.url, "http://localhost:8080/public/v1/");
    assert_eq!(config.server.port, 9273);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    // Given: Only the URL and barefoot flag are set
    let config = parse(
        r#"
        [snaproute]
        url = "http://10.0.0.1:8080/public/v1/"
        is_barefoot = true
        "#,
    );

    // Then: The rest of the section keeps its defaults
    assert_eq!(config.snaproute.url, "http://10.0.0.1:8080/public/v1/");
    assert!(config.snaproute.is_barefoot);
    assert_eq!(config.snaproute.max_pages, 64);
}

#[test]
fn test_collector_options_parse() {
    let config = parse(
        r#"
        [collector]
        interval_seconds = 30
        collect_ipv4_interfaces = true
        port_deltas = true
        "#,
    );
    assert_eq!(config.collector.interval_seconds, 30);
    assert!(config.collector.collect_ipv4_interfaces);
    assert!(config.collector.port_deltas);
}

#[test]
fn test_empty_url_is_rejected() {
    // Given: A blank SnapRoute URL
    let mut config = parse("");
    config.snaproute.url = "   ".to_string();

    // When: Validating
    let err = config.validate().expect_err("blank url must fail");

    // Then: The message names the setting
    assert!(err.to_string().contains("snaproute.url"));
}

#[test]
fn test_zero_interval_is_rejected() {
    let mut config = parse("");
    config.collector.interval_seconds = 0;
    let err = config.validate().expect_err("zero interval must fail");
    assert!(err.to_string().contains("interval_seconds"));
}

#[test]
fn test_zero_page_cap_is_rejected() {
    let mut config = parse("");
    config.snaproute.max_pages = 0;
    let err = config.validate().expect_err("zero max_pages must fail");
    assert!(err.to_string().contains("max_pages"));
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    // Given: A path that does not exist
    let result = Config::load("config/does-not-exist");

    // Then: Loading still succeeds with defaults
    let config = result.expect("missing file is not an error");
    assert_eq!(config.collector.interval_seconds, 10);
}
