//! VLAN State Collector
//!
//! VLAN samples share the `ports` measurement with port samples; the two are
//! told apart only by their discriminator tag (`VlanId` here, `port` there).
//!
//! # Samples Produced
//! - `ports`
//!   - fields: Name, OperState, SysInternal Description
//!   - gauges: IfIndex
//!   - Tags: VlanId, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::VlanObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "vlan",
    path: "state/vlans",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<VlanObject>;

pub const FIELDS: &[Spec] = &[
    Spec::field("Name", |v| (&v.name).into()),
    Spec::field("OperState", |v| (&v.oper_state).into()),
    Spec::gauge("IfIndex", |v| v.if_index.into()),
    Spec::field("SysInternal Description", |v| (&v.sys_internal_description).into()),
];

pub async fn collect_vlan_metrics<T: Transport>(ctx: &CollectionContext<'_, T>) -> Result<()> {
    let vlans = ctx.fetch_list::<VlanObject>(&DOMAIN).await?;
    for vlan in &vlans {
        let tags = ctx.entry_tags("VlanId", vlan.object.vlan_id.to_string());
        ctx.emit("ports", FIELDS, &vlan.object, &tags);
    }
    debug!("Updated metrics for {} VLANs", vlans.len());
    Ok(())
}
