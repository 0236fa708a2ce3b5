//! Prometheus Metrics
//!
//! [`MetricsCollector`] is the [`Accumulator`] the exporter hands to every
//! collection cycle. Samples are mapped onto a Prometheus registry:
//!
//! - **Families** are created on first sight and named
//!   `snaproute_<measurement>_<field>`, with invalid characters replaced by `_`
//!   (`psu` / `Volts in` → `snaproute_psu_Volts_in`).
//! - **Labels** are the sample's tags, names sanitized the same way
//!   (`mgmt-ip` → `mgmt_ip`).
//! - **Gauges and plain fields** with numeric or boolean values become gauges
//!   (`true` = 1).
//! - **Counters** become Prometheus counters tracking the device's absolute
//!   value; a value lower than the last one is treated as a device reset.
//! - **Text values** become info-style gauges with a `value` label set to the
//!   text and a constant value of 1. When the text changes, the old series is
//!   removed.
//!
//! Two samples may reach the same family name with different tag keys
//! (VLAN and port samples share the `ports` measurement). The later one is
//! registered under `<name>_by_<extra tag keys>`.
//!
//! The `status` / `ready` sample only ever reports a failed cycle. Its series
//! (`snaproute_status_ready`) is cleared by [`MetricsCollector::clear_not_ready`]
//! once a later cycle succeeds.
//!
//! Fixed metrics:
//! - `snaproute_up` - 1 if the last cycle succeeded
//! - `snaproute_last_cycle_timestamp_seconds` - end of the last cycle
//! - `snaproute_collection_errors_total` - failed cycles by error kind

use crate::sink::{Accumulator, FieldValue, Sample, SampleKind};
use prometheus::{
    Encoder, Gauge, GaugeVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

const NAMESPACE: &str = "snaproute";
const NOT_READY_FAMILY: &str = "snaproute_status_ready";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FamilyKind {
    Gauge,
    Counter,
    Info,
}

impl FamilyKind {
    fn suffix(self) -> &'static str {
        match self {
            FamilyKind::Gauge => "gauge",
            FamilyKind::Counter => "counter",
            FamilyKind::Info => "info",
        }
    }
}

enum FamilyVec {
    Gauge(GaugeVec),
    Counter(IntCounterVec),
    Info {
        vec: IntGaugeVec,
        current: HashMap<Vec<String>, String>,
    },
}

struct Family {
    kind: FamilyKind,
    labels: Vec<String>,
    vec: FamilyVec,
}

/// Prometheus-backed sample sink
#[derive(Clone)]
pub struct MetricsCollector {
    registry: Arc<Registry>,
    families: Arc<Mutex<HashMap<String, Family>>>,

    pub up: Arc<Gauge>,
    pub last_cycle_timestamp_seconds: Arc<Gauge>,
    pub collection_errors_total: Arc<IntCounterVec>,
}

impl MetricsCollector {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let up = Gauge::with_opts(
            Opts::new("up", "Whether the last SnapRoute collection cycle succeeded")
                .namespace(NAMESPACE),
        )?;

        let last_cycle_timestamp_seconds = Gauge::with_opts(
            Opts::new(
                "last_cycle_timestamp_seconds",
                "Unix time the last collection cycle ended",
            )
            .namespace(NAMESPACE),
        )?;

        let collection_errors_total = IntCounterVec::new(
            Opts::new(
                "collection_errors_total",
                "Collection cycles that ended with an error",
            )
            .namespace(NAMESPACE),
            &["kind"],
        )?;

        registry.register(Box::new(up.clone()))?;
        registry.register(Box::new(last_cycle_timestamp_seconds.clone()))?;
        registry.register(Box::new(collection_errors_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            families: Arc::new(Mutex::new(HashMap::new())),
            up: Arc::new(up),
            last_cycle_timestamp_seconds: Arc::new(last_cycle_timestamp_seconds),
            collection_errors_total: Arc::new(collection_errors_total),
        })
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Names of the families created from samples so far
    pub fn family_names(&self) -> Vec<String> {
        let families = match self.families.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut names: Vec<String> = families.keys().cloned().collect();
        names.sort();
        names
    }

    /// Drop every `status{ready=false}` series left by earlier failed cycles
    pub fn clear_not_ready(&self) {
        let families = match self.families.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(Family {
            vec: FamilyVec::Gauge(vec),
            ..
        }) = families.get(NOT_READY_FAMILY)
        {
            vec.reset();
        }
    }

    fn record(&self, sample: &Sample) {
        let label_names: Vec<String> = sample.tags.keys().map(|k| sanitize(k)).collect();
        let label_values: Vec<&str> = sample.tags.values().map(String::as_str).collect();

        let mut families = match self.families.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        for (field, value) in &sample.fields {
            let kind = match (value, sample.kind) {
                (FieldValue::Str(_), _) => FamilyKind::Info,
                (_, SampleKind::Counter) => FamilyKind::Counter,
                _ => FamilyKind::Gauge,
            };
            let base = format!(
                "{}_{}_{}",
                NAMESPACE,
                sanitize(&sample.measurement),
                sanitize(field)
            );
            let name = resolve_family_name(&families, base, kind, &label_names);

            if !families.contains_key(&name) {
                match self.register_family(&name, &sample.measurement, field, kind, &label_names) {
                    Ok(family) => {
                        debug!("Registered metric family {}", name);
                        families.insert(name.clone(), family);
                    }
                    Err(e) => {
                        warn!("Cannot register metric family {}: {}", name, e);
                        continue;
                    }
                }
            }

            if let Some(family) = families.get_mut(&name) {
                apply(family, &label_values, value);
            }
        }
    }

    fn register_family(
        &self,
        name: &str,
        measurement: &str,
        field: &str,
        kind: FamilyKind,
        label_names: &[String],
    ) -> anyhow::Result<Family> {
        let help = format!("SnapRoute {} {}", measurement, field);
        let labels: Vec<&str> = label_names.iter().map(String::as_str).collect();

        let vec = match kind {
            FamilyKind::Gauge => {
                let vec = GaugeVec::new(Opts::new(name, help), &labels)?;
                self.registry.register(Box::new(vec.clone()))?;
                FamilyVec::Gauge(vec)
            }
            FamilyKind::Counter => {
                let vec = IntCounterVec::new(Opts::new(name, help), &labels)?;
                self.registry.register(Box::new(vec.clone()))?;
                FamilyVec::Counter(vec)
            }
            FamilyKind::Info => {
                let mut info_labels = labels.clone();
                info_labels.push("value");
                let vec = IntGaugeVec::new(Opts::new(name, help), &info_labels)?;
                self.registry.register(Box::new(vec.clone()))?;
                FamilyVec::Info {
                    vec,
                    current: HashMap::new(),
                }
            }
        };

        Ok(Family {
            kind,
            labels: label_names.to_vec(),
            vec,
        })
    }
}

impl Accumulator for MetricsCollector {
    fn add(&self, sample: Sample) {
        self.record(&sample);
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create metrics collector")
    }
}

/// Pick the family name for a sample, moving to `<base>_by_<extra>` when the
/// base name is already taken by a family of another shape
fn resolve_family_name(
    families: &HashMap<String, Family>,
    base: String,
    kind: FamilyKind,
    labels: &[String],
) -> String {
    let Some(existing) = families.get(&base) else {
        return base;
    };
    if existing.kind == kind && existing.labels == labels {
        return base;
    }

    let extra: Vec<&str> = labels
        .iter()
        .filter(|l| !existing.labels.contains(l))
        .map(String::as_str)
        .collect();
    if extra.is_empty() {
        format!("{}_{}", base, kind.suffix())
    } else {
        format!("{}_by_{}", base, extra.join("_"))
    }
}

fn apply(family: &mut Family, label_values: &[&str], value: &FieldValue) {
    match (&mut family.vec, value) {
        (FamilyVec::Gauge(vec), v) => {
            if let Some(n) = v.as_f64() {
                vec.with_label_values(label_values).set(n);
            }
        }
        (FamilyVec::Counter(vec), v) => {
            let target = match v {
                FieldValue::Int(n) => (*n).max(0) as u64,
                FieldValue::Bool(b) => u64::from(*b),
                FieldValue::Str(_) => return,
            };
            let counter = vec.with_label_values(label_values);
            let current = counter.get();
            if target >= current {
                counter.inc_by(target - current);
            } else {
                // Device counter went backwards: start the series over
                counter.reset();
                counter.inc_by(target);
            }
        }
        (FamilyVec::Info { vec, current }, FieldValue::Str(text)) => {
            let key: Vec<String> = label_values.iter().map(|v| v.to_string()).collect();
            if let Some(previous) = current.get(&key) {
                if previous != text {
                    let mut old: Vec<&str> = label_values.to_vec();
                    old.push(previous.as_str());
                    let _ = vec.remove_label_values(old.as_slice());
                }
            }
            let mut values: Vec<&str> = label_values.to_vec();
            values.push(text.as_str());
            vec.with_label_values(values.as_slice()).set(1);
            current.insert(key, text.clone());
        }
        (FamilyVec::Info { .. }, _) => {}
    }
}

/// Make a string usable as a Prometheus metric or label name
pub fn sanitize(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.chars().next().map_or(true, |c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
