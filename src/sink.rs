//! Sample Sink Interface
//!
//! Collectors never talk to a metrics backend directly. Every value they
//! produce goes through an [`Accumulator`] as a `(measurement, fields, tags,
//! timestamp)` tuple, categorized as a plain field, a gauge or a counter.
//!
//! - [`MemorySink`] keeps samples in memory (tests, embedding)
//! - [`crate::metrics::MetricsCollector`] maps them onto a Prometheus registry

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

/// Ordered tag set attached to one sample
pub type Tags = BTreeMap<String, String>;

/// Field name to value map of one sample
pub type Fields = BTreeMap<String, FieldValue>;

/// How the consumer should treat the values of a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleKind {
    /// Plain value, usually textual state
    Field,
    /// Instantaneous reading that can go up or down
    Gauge,
    /// Monotonic device counter, reported as its absolute value
    Counter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl FieldValue {
    /// Numeric view used by backends that only store numbers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FieldValue::Str(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Str(value.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// One emitted sample
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub kind: SampleKind,
    pub measurement: String,
    pub fields: Fields,
    pub tags: Tags,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// Receiver of samples produced by a collection cycle.
///
/// `add` is the only required method; the three categorized entry points
/// forward to it.
pub trait Accumulator: Send + Sync {
    fn add(&self, sample: Sample);

    fn add_fields(&self, measurement: &str, fields: Fields, tags: Tags, timestamp: DateTime<Utc>) {
        self.add(Sample {
            kind: SampleKind::Field,
            measurement: measurement.to_string(),
            fields,
            tags,
            timestamp,
        });
    }

    fn add_gauge(&self, measurement: &str, fields: Fields, tags: Tags, timestamp: DateTime<Utc>) {
        self.add(Sample {
            kind: SampleKind::Gauge,
            measurement: measurement.to_string(),
            fields,
            tags,
            timestamp,
        });
    }

    fn add_counter(&self, measurement: &str, fields: Fields, tags: Tags, timestamp: DateTime<Utc>) {
        self.add(Sample {
            kind: SampleKind::Counter,
            measurement: measurement.to_string(),
            fields,
            tags,
            timestamp,
        });
    }
}

/// Sink that keeps every sample in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    samples: Mutex<Vec<Sample>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in emission order
    pub fn samples(&self) -> Vec<Sample> {
        self.samples
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn measurement(&self, name: &str) -> Vec<Sample> {
        self.samples()
            .into_iter()
            .filter(|s| s.measurement == name)
            .collect()
    }

    /// Drain the recorded samples
    pub fn take(&self) -> Vec<Sample> {
        match self.samples.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Accumulator for MemorySink {
    fn add(&self, sample: Sample) {
        match self.samples.lock() {
            Ok(mut guard) => guard.push(sample),
            Err(poisoned) => poisoned.into_inner().push(sample),
        }
    }
}
