pub mod client;
pub mod types;

pub use client::{FetchResult, HttpTransport, SnapRouteClient, Transport};
