//! Property-based tests using proptest
//!
//! Tests that verify properties hold for arbitrary inputs.

use chrono::Utc;
use proptest::prelude::*;
use snaproute_exporter::collectors::{PortCounterHistory, PortCounters};
use snaproute_exporter::identity::{select_management_addrs, InterfaceAddr};
use snaproute_exporter::metrics::{sanitize, MetricsCollector};
use snaproute_exporter::sink::{Accumulator, FieldValue, Fields, Tags};
use snaproute_exporter::snaproute::types::{decode, PsuState};
use std::net::{IpAddr, Ipv4Addr};

fn create_test_metrics() -> MetricsCollector {
    MetricsCollector::new().expect("Failed to create metrics")
}

fn counters(v: i64) -> PortCounters {
    PortCounters {
        in_ucast_pkts: v,
        out_ucast_pkts: v,
        in_discards: v,
        out_discards: v,
        ether_pkts: v,
        ether_mc_pkts: v,
        ether_bcast_pkts: v,
    }
}

proptest! {
    #[test]
    fn test_any_tag_value_renders_without_panic(value in "\\PC*") {
        // Given: A metrics collector and an arbitrary tag value
        let metrics = create_test_metrics();
        let mut tags = Tags::new();
        tags.insert("port".to_string(), value);
        let mut fields = Fields::new();
        fields.insert("OperState".to_string(), FieldValue::from("UP"));

        // When: Adding a sample with it
        metrics.add_fields("ports", fields, tags, Utc::now());

        // Then: Rendering should not panic
        prop_assert!(metrics.render().is_ok());
    }

    #[test]
    fn test_sanitized_names_are_valid(raw in "\\PC*") {
        let name = sanitize(&raw);
        let mut chars = name.chars();
        let first = chars.next().expect("sanitize never returns empty");
        prop_assert!(first.is_ascii_alphabetic() || first == '_');
        prop_assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_any_counter_value_is_exposed(value in 0i64..i64::MAX) {
        // Given: A counter sample with an arbitrary non-negative value
        let metrics = create_test_metrics();
        let mut fields = Fields::new();
        fields.insert("IfInOctets".to_string(), FieldValue::Int(value));
        let mut tags = Tags::new();
        tags.insert("port".to_string(), "fpPort1".to_string());

        // When: Adding it
        metrics.add_counter("ports", fields, tags, Utc::now());

        // Then: The exposed counter equals the device value
        let output = metrics.render().expect("render");
        let expected = format!("snaproute_ports_IfInOctets{{port=\"fpPort1\"}} {}", value as u64);
        prop_assert!(output.contains(&expected));
    }

    #[test]
    fn test_deltas_are_never_negative(before in any::<i64>(), after in any::<i64>()) {
        let delta = counters(after).since(&counters(before));
        prop_assert!(delta.in_ucast_pkts >= 0);
        prop_assert!(delta.ether_bcast_pkts >= 0);
    }

    #[test]
    fn test_uncommitted_cycles_never_change_baseline(
        baseline in 0i64..1_000_000,
        noise in proptest::collection::vec(0i64..1_000_000, 0..5),
        current in 0i64..1_000_000,
    ) {
        // Given: A committed baseline
        let mut history = PortCounterHistory::new();
        history.begin_cycle();
        history.observe(1, counters(baseline));
        history.commit();

        // When: Any number of cycles stage values without committing
        for v in noise {
            history.begin_cycle();
            history.observe(1, counters(v));
        }

        // Then: The next delta is still measured from the baseline
        history.begin_cycle();
        let delta = history.observe(1, counters(current)).expect("baseline exists");
        prop_assert_eq!(delta.in_ucast_pkts, (current - baseline).max(0));
    }

    #[test]
    fn test_arbitrary_json_never_panics_decoder(body in proptest::collection::vec(any::<u8>(), 0..256)) {
        // Decoding either succeeds or reports an error; it never panics
        let _ = decode::<PsuState>("psu", &body);
    }

    #[test]
    fn test_non_management_interfaces_never_selected(
        name in "[a-z]{1,8}[0-9]?",
        octets in any::<[u8; 4]>(),
        prefix in 0u8..=32,
    ) {
        prop_assume!(name != "ma1" && name != "eth0");
        let addrs = vec![InterfaceAddr::new(name, IpAddr::V4(Ipv4Addr::from(octets)), prefix)];
        prop_assert_eq!(select_management_addrs(&addrs), (String::new(), String::new()));
    }
}
