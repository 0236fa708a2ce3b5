//! Platform Inventory Collector
//!
//! Device-wide inventory strings from `state/platform`.
//!
//! # Samples Produced
//! - `platform` (field) - ProductName, SerialNum, Manufacturer, Vendor,
//!   Release, PlatformName, Version
//!   - Tags: hostname, mgmt-ip, mgmt-ipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::{Platform, PlatformObject};
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "platform",
    path: "state/platform",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<PlatformObject>;

pub const FIELDS: &[Spec] = &[
    Spec::field("ProductName", |p| (&p.product_name).into()),
    Spec::field("SerialNum", |p| (&p.serial_num).into()),
    Spec::field("Manufacturer", |p| (&p.manufacturer).into()),
    Spec::field("Vendor", |p| (&p.vendor).into()),
    Spec::field("Release", |p| (&p.release).into()),
    Spec::field("PlatformName", |p| (&p.platform_name).into()),
    Spec::field("Version", |p| (&p.version).into()),
];

/// Collects platform inventory from SnapRoute
pub async fn collect_platform_metrics<T: Transport>(ctx: &CollectionContext<'_, T>) -> Result<()> {
    let platform: Platform = ctx.fetch(&DOMAIN).await?;
    ctx.emit("platform", FIELDS, &platform.object, &ctx.device_tags());
    debug!(
        "Updated platform metrics: {} ({})",
        platform.object.product_name, platform.object.serial_num
    );
    Ok(())
}
