//! SnapRoute REST API Type Definitions
//!
//! Rust definitions of the `/public/v1/state/...` documents served by a
//! FlexSwitch device. These types are used for deserializing the JSON bodies
//! returned over HTTP.
//!
//! # Design Notes
//!
//! - **Envelopes**: list-valued domains come wrapped in an [`Envelope`] carrying
//!   pagination markers; device-wide domains are a single [`Singleton`].
//! - **Zero values**: every struct uses `#[serde(default)]`, so an absent field
//!   decodes as empty string, `0` or `false`. A field that is present with the
//!   wrong JSON type still fails the whole document.
//! - **Integers**: all numbers are `i64`; packet and byte counters get large.
//! - **Unknown fields** are ignored.
//!
//! # Endpoints Covered
//!
//! - `state/platform` → [`Platform`]
//! - `state/psus` → [`PsuState`]
//! - `state/sfps` → [`SfpState`]
//! - `state/coppstate` → [`CoppState`]
//! - `state/vlans` → [`VlanState`]
//! - `state/Ports` → [`PortState`]
//! - `state/asicsummary` → [`AsicSummary`]
//! - `state/SystemStatus` → [`SystemStatus`]
//! - `state/routestat` → [`RouteStats`]
//! - `state/bufferportstats` → [`BufferPortStats`]
//! - `state/IPv4Intfs` → [`Ipv4IntfState`]
//! - `state/RouteStatsPerInterfaces` → [`RouteStatsPerInt`]
//! - `state/RouteStatsPerProtocols` → [`RouteStatsPerProto`]
//! - `state/ConfigLogs` → [`ConfigLog`]

use crate::error::DecodeError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode one response body for the named domain.
pub fn decode<T: DeserializeOwned>(domain: &'static str, body: &[u8]) -> Result<T, DecodeError> {
    serde_json::from_slice(body).map_err(|source| DecodeError { domain, source })
}

/// Treat an explicit JSON `null` like an absent value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paginated wrapper around list-valued domains
#[derive(Debug, Deserialize, Clone)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    #[serde(rename = "MoreExist")]
    pub more_exist: bool,
    #[serde(rename = "ObjCount")]
    pub obj_count: i64,
    #[serde(rename = "CurrentMarker")]
    pub current_marker: i64,
    #[serde(rename = "NextMarker")]
    pub next_marker: i64,
    #[serde(rename = "Objects", deserialize_with = "null_as_default")]
    pub objects: Vec<Entry<T>>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            more_exist: false,
            obj_count: 0,
            current_marker: 0,
            next_marker: 0,
            objects: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Entry<T> {
    #[serde(rename = "ObjectId")]
    pub object_id: String,
    #[serde(rename = "Object")]
    pub object: T,
}

/// Device-wide document carrying one object
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Singleton<T> {
    #[serde(rename = "ObjectId")]
    pub object_id: String,
    #[serde(rename = "Object")]
    pub object: T,
}

pub type Platform = Singleton<PlatformObject>;
pub type PsuState = Envelope<PsuObject>;
pub type SfpState = Envelope<SfpObject>;
pub type CoppState = Envelope<CoppObject>;
pub type VlanState = Envelope<VlanObject>;
pub type PortState = Envelope<PortObject>;
pub type AsicSummary = Singleton<AsicSummaryObject>;
pub type SystemStatus = Singleton<SystemStatusObject>;
pub type RouteStats = Singleton<RouteStatsObject>;
pub type BufferPortStats = Envelope<BufferPortStatObject>;
pub type Ipv4IntfState = Envelope<Ipv4IntfObject>;
pub type RouteStatsPerInt = Envelope<RouteStatsPerIntObject>;
pub type RouteStatsPerProto = Envelope<RouteStatsPerProtoObject>;
pub type ConfigLog = Envelope<ConfigLogObject>;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct PlatformObject {
    pub obj_name: String,
    pub product_name: String,
    pub serial_num: String,
    pub manufacturer: String,
    pub vendor: String,
    pub release: String,
    pub platform_name: String,
    pub version: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct PsuObject {
    pub psu_id: i64,
    pub admin_state: String,
    pub model_num: String,
    pub serial_num: String,
    pub vin: i64,
    pub vout: i64,
    pub iin: i64,
    pub iout: i64,
    pub pin: i64,
    pub pout: i64,
    pub fan: String,
    pub fan_id: i64,
    pub led_id: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct SfpObject {
    #[serde(rename = "SfpId")]
    pub sfp_id: i64,
    #[serde(rename = "SfpSpeed")]
    pub sfp_speed: String,
    #[serde(rename = "SfpLOS")]
    pub sfp_los: String,
    #[serde(rename = "SfpPresent")]
    pub sfp_present: String,
    #[serde(rename = "SfpType")]
    pub sfp_type: String,
    #[serde(rename = "SerialNum")]
    pub serial_num: String,
    #[serde(rename = "EEPROM")]
    pub eeprom: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct CoppObject {
    pub protocol: String,
    pub peak_rate: i64,
    pub burst_rate: i64,
    pub green_packets: i64,
    pub red_packets: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct VlanObject {
    pub vlan_id: i64,
    pub name: String,
    pub oper_state: String,
    pub if_index: i64,
    pub sys_internal_description: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct PortObject {
    #[serde(rename = "IntfRef")]
    pub intf_ref: String,
    #[serde(rename = "IfIndex")]
    pub if_index: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "OperState")]
    pub oper_state: String,
    #[serde(rename = "NumUpEvents")]
    pub num_up_events: i64,
    #[serde(rename = "LastUpEventTime")]
    pub last_up_event_time: String,
    #[serde(rename = "NumDownEvents")]
    pub num_down_events: i64,
    #[serde(rename = "LastDownEventTime")]
    pub last_down_event_time: String,
    #[serde(rename = "Pvid")]
    pub pvid: i64,
    #[serde(rename = "IfInOctets")]
    pub if_in_octets: i64,
    #[serde(rename = "IfInUcastPkts")]
    pub if_in_ucast_pkts: i64,
    #[serde(rename = "IfInDiscards")]
    pub if_in_discards: i64,
    #[serde(rename = "IfInErrors")]
    pub if_in_errors: i64,
    #[serde(rename = "IfInUnknownProtos")]
    pub if_in_unknown_protos: i64,
    #[serde(rename = "IfOutOctets")]
    pub if_out_octets: i64,
    #[serde(rename = "IfOutUcastPkts")]
    pub if_out_ucast_pkts: i64,
    #[serde(rename = "IfOutDiscards")]
    pub if_out_discards: i64,
    #[serde(rename = "IfOutErrors")]
    pub if_out_errors: i64,
    #[serde(rename = "IfEtherUnderSizePktCnt")]
    pub if_ether_under_size_pkt_cnt: i64,
    #[serde(rename = "IfEtherOverSizePktCnt")]
    pub if_ether_over_size_pkt_cnt: i64,
    #[serde(rename = "IfEtherFragments")]
    pub if_ether_fragments: i64,
    #[serde(rename = "IfEtherCRCAlignError")]
    pub if_ether_crc_align_error: i64,
    #[serde(rename = "IfEtherJabber")]
    pub if_ether_jabber: i64,
    #[serde(rename = "IfEtherPkts")]
    pub if_ether_pkts: i64,
    #[serde(rename = "IfEtherMCPkts")]
    pub if_ether_mc_pkts: i64,
    #[serde(rename = "IfEtherBcastPkts")]
    pub if_ether_bcast_pkts: i64,
    #[serde(rename = "IfEtherPkts64OrLessOctets")]
    pub if_ether_pkts_64_or_less_octets: i64,
    #[serde(rename = "IfEtherPkts65To127Octets")]
    pub if_ether_pkts_65_to_127_octets: i64,
    #[serde(rename = "IfEtherPkts128To255Octets")]
    pub if_ether_pkts_128_to_255_octets: i64,
    #[serde(rename = "IfEtherPkts256To511Octets")]
    pub if_ether_pkts_256_to_511_octets: i64,
    #[serde(rename = "IfEtherPkts512To1023Octets")]
    pub if_ether_pkts_512_to_1023_octets: i64,
    #[serde(rename = "IfEtherPkts1024To1518Octets")]
    pub if_ether_pkts_1024_to_1518_octets: i64,
    #[serde(rename = "ErrDisableReason")]
    pub err_disable_reason: String,
    #[serde(rename = "PresentInHW")]
    pub present_in_hw: String,
    #[serde(rename = "ConfigMode")]
    pub config_mode: String,
    #[serde(rename = "PRBSRxErrCnt")]
    pub prbs_rx_err_cnt: i64,
    #[serde(rename = "PcpToCosProfileRef")]
    pub pcp_to_cos_profile_ref: String,
    #[serde(rename = "DscpToCosProfileRef")]
    pub dscp_to_cos_profile_ref: String,
    #[serde(rename = "SchedProfileRef")]
    pub sched_profile_ref: String,
    #[serde(rename = "OperSpeed")]
    pub oper_speed: i64,
    #[serde(rename = "OperDuplex")]
    pub oper_duplex: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AsicSummaryObject {
    #[serde(rename = "ModuleId")]
    pub module_id: i64,
    #[serde(rename = "NumPortsUp")]
    pub num_ports_up: i64,
    #[serde(rename = "NumPortsDown")]
    pub num_ports_down: i64,
    #[serde(rename = "NumVlans")]
    pub num_vlans: i64,
    #[serde(rename = "NumV4Intfs")]
    pub num_v4_intfs: i64,
    #[serde(rename = "NumV6Intfs")]
    pub num_v6_intfs: i64,
    #[serde(rename = "NumV4Adjs")]
    pub num_v4_adjs: i64,
    #[serde(rename = "NumV6Adjs")]
    pub num_v6_adjs: i64,
    #[serde(rename = "NumV4Routes")]
    pub num_v4_routes: i64,
    #[serde(rename = "NumV6Routes")]
    pub num_v6_routes: i64,
    #[serde(rename = "NumECMPRoutes")]
    pub num_ecmp_routes: i64,
}

/// `state/SystemStatus` body. The device wraps it in envelope counters that
/// carry no information for a singleton; they are ignored.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct SystemStatusObject {
    pub name: String,
    pub ready: bool,
    pub reason: String,
    pub up_time: String,
    pub num_create_calls: String,
    pub num_delete_calls: String,
    pub num_update_calls: String,
    pub num_get_calls: String,
    pub num_action_calls: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flex_daemons: Vec<FlexDaemon>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct FlexDaemon {
    pub name: String,
    pub enable: bool,
    pub state: String,
    pub reason: String,
    pub start_time: String,
    pub keep_alive: String,
    pub restart_count: i64,
    pub restart_time: String,
    pub restart_reason: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RouteStatsObject {
    #[serde(rename = "Vrf")]
    pub vrf: String,
    #[serde(rename = "TotalRouteCount")]
    pub total_route_count: i64,
    #[serde(rename = "ECMPRouteCount")]
    pub ecmp_route_count: i64,
    #[serde(rename = "V4RouteCount")]
    pub v4_route_count: i64,
    #[serde(rename = "V6RouteCount")]
    pub v6_route_count: i64,
    #[serde(rename = "PerProtocolRouteCountList", deserialize_with = "null_as_default")]
    pub per_protocol_route_count_list: Vec<ProtocolRouteCount>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct ProtocolRouteCount {
    pub protocol: String,
    pub route_count: i64,
    pub ecmp_count: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default, rename_all = "PascalCase")]
pub struct BufferPortStatObject {
    pub intf_ref: String,
    pub if_index: i64,
    pub egress_port: i64,
    pub ingress_port: i64,
    pub port_buffer_stat: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Ipv4IntfObject {
    #[serde(rename = "IntfRef")]
    pub intf_ref: String,
    #[serde(rename = "IfIndex")]
    pub if_index: i64,
    #[serde(rename = "IpAddr")]
    pub ip_addr: String,
    #[serde(rename = "OperState")]
    pub oper_state: String,
    #[serde(rename = "NumUpEvents")]
    pub num_up_events: i64,
    #[serde(rename = "LastUpEventTime")]
    pub last_up_event_time: String,
    #[serde(rename = "NumDownEvents")]
    pub num_down_events: i64,
    #[serde(rename = "LastDownEventTime")]
    pub last_down_event_time: String,
    #[serde(rename = "L2IntfType")]
    pub l2_intf_type: String,
    #[serde(rename = "L2IntfId")]
    pub l2_intf_id: i64,
}

/// Per-interface route listing. `V6Routes` has no stable upstream schema and
/// is kept as raw JSON.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RouteStatsPerIntObject {
    #[serde(rename = "Intfref")]
    pub intf_ref: String,
    #[serde(rename = "V4Routes", deserialize_with = "null_as_default")]
    pub v4_routes: Vec<String>,
    #[serde(rename = "V6Routes")]
    pub v6_routes: serde_json::Value,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RouteStatsPerProtoObject {
    #[serde(rename = "Protocol")]
    pub protocol: String,
    #[serde(rename = "V4Routes", deserialize_with = "null_as_default")]
    pub v4_routes: Vec<V4Route>,
    #[serde(rename = "V6Routes")]
    pub v6_routes: serde_json::Value,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct V4Route {
    #[serde(rename = "DestinationNw")]
    pub destination_nw: String,
    #[serde(rename = "IsInstalledInHw")]
    pub is_installed_in_hw: bool,
    #[serde(rename = "NextHopList", deserialize_with = "null_as_default")]
    pub next_hop_list: Vec<NextHop>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct NextHop {
    #[serde(rename = "NextHopIp")]
    pub next_hop_ip: String,
    #[serde(rename = "NextHopIntRef")]
    pub next_hop_int_ref: String,
    #[serde(rename = "Weight")]
    pub weight: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ConfigLogObject {
    #[serde(rename = "SeqNum")]
    pub seq_num: i64,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "API")]
    pub api: String,
    #[serde(rename = "Operation")]
    pub operation: String,
    #[serde(rename = "Data")]
    pub data: String,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "UserAddr")]
    pub user_addr: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
}
