//! System Status Collector
//!
//! Overall readiness of the FlexSwitch stack plus the health of each daemon it
//! supervises.
//!
//! # Samples Produced
//! - `status` (field) - Ready, ReadyReason, Uptime
//!   - Tags: hostname
//! - `DaemonStats` - one group per daemon
//!   - fields: Enable, State, Reason, StartTime, KeepAlive, RestartTime,
//!     RestartReason
//!   - counters: RestartCount
//!   - Tags: Daemon, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::{FlexDaemon, SystemStatus, SystemStatusObject};
use crate::snaproute::Transport;
use tracing::{debug, warn};

pub const DOMAIN: Domain = Domain {
    name: "systemstatus",
    path: "state/SystemStatus",
    policy: FailurePolicy::AnnounceNotReady,
};

type StatusSpec = FieldSpec<SystemStatusObject>;

pub const STATUS_FIELDS: &[StatusSpec] = &[
    StatusSpec::field("Ready", |s| s.ready.into()),
    StatusSpec::field("ReadyReason", |s| (&s.reason).into()),
    StatusSpec::field("Uptime", |s| (&s.up_time).into()),
];

type DaemonSpec = FieldSpec<FlexDaemon>;

pub const DAEMON_FIELDS: &[DaemonSpec] = &[
    DaemonSpec::field("Enable", |d| d.enable.into()),
    DaemonSpec::field("State", |d| (&d.state).into()),
    DaemonSpec::field("Reason", |d| (&d.reason).into()),
    DaemonSpec::field("StartTime", |d| (&d.start_time).into()),
    DaemonSpec::field("KeepAlive", |d| (&d.keep_alive).into()),
    DaemonSpec::counter("RestartCount", |d| d.restart_count.into()),
    DaemonSpec::field("RestartTime", |d| (&d.restart_time).into()),
    DaemonSpec::field("RestartReason", |d| (&d.restart_reason).into()),
];

/// Collects system readiness and daemon health from SnapRoute
pub async fn collect_system_status_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
) -> Result<()> {
    let status: SystemStatus = ctx.fetch(&DOMAIN).await?;
    let object = &status.object;

    ctx.emit("status", STATUS_FIELDS, object, &ctx.host_tags());
    if !object.ready {
        warn!("SnapRoute reports not ready: {}", object.reason);
    }

    for daemon in &object.flex_daemons {
        let tags = ctx.entry_tags("Daemon", daemon.name.clone());
        ctx.emit("DaemonStats", DAEMON_FIELDS, daemon, &tags);
    }
    debug!(
        "Updated system status (ready: {}, {} daemons)",
        object.ready,
        object.flex_daemons.len()
    );
    Ok(())
}
