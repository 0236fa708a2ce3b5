//! Shared fixtures: an in-memory device and a fixed host identity

#![allow(dead_code)]

use serde_json::{json, Value};
use snaproute_exporter::collectors::SnapRouteCollector;
use snaproute_exporter::error::TransportError;
use snaproute_exporter::identity::Identity;
use snaproute_exporter::snaproute::{SnapRouteClient, Transport};
use std::collections::HashMap;
use std::sync::Mutex;

pub const BASE_URL: &str = "http://switch1:8080/public/v1/";

enum Reply {
    Body(String),
    Refused,
    Panic,
}

/// Device stand-in answering fixed bodies per path
#[derive(Default)]
pub struct FakeDevice {
    routes: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<String>>,
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in domain answering with a small healthy document
    pub fn healthy() -> Self {
        Self::new()
            .json("state/platform", platform_doc())
            .json("state/psus", psus_doc())
            .json("state/sfps", list_doc(vec![json!({"SfpId": 1, "SfpPresent": "PRESENT"})]))
            .json(
                "state/coppstate",
                list_doc(vec![json!({"Protocol": "BGP", "PeakRate": 100, "GreenPackets": 7})]),
            )
            .json(
                "state/vlans",
                list_doc(vec![json!({"VlanId": 10, "Name": "vlan10", "OperState": "UP"})]),
            )
            .json("state/Ports", ports_doc(&[("fpPort1", 1, 100)]))
            .json("state/asicsummary", json!({"Object": {"NumPortsUp": 4, "NumVlans": 2}}))
            .json("state/SystemStatus", system_status_doc(true))
            .json(
                "state/routestat",
                json!({"Object": {"TotalRouteCount": 12, "V4RouteCount": 10, "V6RouteCount": 2}}),
            )
            .json(
                "state/bufferportstats",
                list_doc(vec![json!({"IntfRef": "fpPort1", "EgressPort": 3})]),
            )
            .json(
                "state/IPv4Intfs",
                list_doc(vec![json!({
                    "IntfRef": "fpPort1",
                    "IpAddr": "10.0.0.1/31",
                    "OperState": "UP"
                })]),
            )
    }

    pub fn json(self, path: &str, body: Value) -> Self {
        self.body(path, body.to_string())
    }

    pub fn body(self, path: &str, body: impl Into<String>) -> Self {
        self.set(path, Reply::Body(body.into()));
        self
    }

    pub fn refuse(self, path: &str) -> Self {
        self.set(path, Reply::Refused);
        self
    }

    pub fn panic_on(self, path: &str) -> Self {
        self.set(path, Reply::Panic);
        self
    }

    /// Change a reply between cycles
    pub fn replace_json(&self, path: &str, body: Value) {
        self.set(path, Reply::Body(body.to_string()));
    }

    /// Make a path unreachable between cycles
    pub fn replace_refuse(&self, path: &str) {
        self.set(path, Reply::Refused);
    }

    fn set(&self, path: &str, reply: Reply) {
        self.routes
            .lock()
            .unwrap()
            .insert(format!("{}{}", BASE_URL, path), reply);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requested(&self, path: &str) -> bool {
        let url = format!("{}{}", BASE_URL, path);
        self.requests().iter().any(|r| *r == url)
    }
}

impl Transport for FakeDevice {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        let reply = match self.routes.lock().unwrap().get(url) {
            Some(Reply::Body(body)) => Some(body.clone()),
            Some(Reply::Panic) => None,
            Some(Reply::Refused) | None => return Err(request_error()),
        };
        match reply {
            Some(body) => Ok(body.into_bytes()),
            None => panic!("device exploded on {}", url),
        }
    }
}

/// A genuine `reqwest` error produced without any network traffic
pub fn request_error() -> TransportError {
    let err = reqwest::Client::new()
        .get("http://")
        .build()
        .expect_err("a URL without a host cannot be requested");
    TransportError::Http(err)
}

pub fn test_identity() -> Identity {
    Identity {
        hostname: "switch1".to_string(),
        mgmt_ipv4: "10.1.1.5/24".to_string(),
        mgmt_ipv6: "2001:db8::5/64".to_string(),
    }
}

/// Collector over `device` with a fixed identity
pub fn collector(device: FakeDevice) -> SnapRouteCollector<FakeDevice> {
    SnapRouteCollector::new(SnapRouteClient::with_transport(BASE_URL, 8, device))
        .with_identity_resolver(|| Ok(test_identity()))
}

pub fn list_doc(objects: Vec<Value>) -> Value {
    let entries: Vec<Value> = objects
        .into_iter()
        .enumerate()
        .map(|(i, o)| json!({"ObjectId": format!("obj-{}", i), "Object": o}))
        .collect();
    json!({
        "MoreExist": false,
        "ObjCount": entries.len(),
        "CurrentMarker": 0,
        "NextMarker": 0,
        "Objects": entries,
    })
}

pub fn platform_doc() -> Value {
    json!({"Object": {"ProductName": "SR-X", "SerialNum": "S1"}})
}

pub fn psus_doc() -> Value {
    list_doc(vec![
        json!({"PsuId": 0, "AdminState": "UP", "Vin": 230, "Vout": 12, "Iin": 2, "Iout": 30}),
        json!({"PsuId": 1, "AdminState": "UP", "Vin": 231, "Vout": 12, "Iin": 1, "Iout": 28}),
    ])
}

/// `(IntfRef, IfIndex, IfInUcastPkts)` per port
pub fn ports_doc(ports: &[(&str, i64, i64)]) -> Value {
    list_doc(
        ports
            .iter()
            .map(|(name, index, in_ucast)| {
                json!({
                    "IntfRef": name,
                    "IfIndex": index,
                    "OperState": "UP",
                    "IfInUcastPkts": in_ucast,
                    "IfOutUcastPkts": in_ucast * 2,
                    "IfInOctets": in_ucast * 100,
                })
            })
            .collect(),
    )
}

pub fn system_status_doc(ready: bool) -> Value {
    json!({
        "Object": {
            "Name": "switch1",
            "Ready": ready,
            "Reason": if ready { "" } else { "daemons starting" },
            "UpTime": "1h2m",
            "FlexDaemons": [
                {"Name": "asicd", "Enable": true, "State": "up", "RestartCount": 0},
                {"Name": "bgpd", "Enable": true, "State": "up", "RestartCount": 2}
            ]
        }
    })
}
