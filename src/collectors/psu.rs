//! Power Supply Collector
//!
//! # Samples Produced
//! - `psu` - one group per PSU
//!   - fields: AdminState, ModelNum, Fan Status
//!   - gauges: SerialNum, Volts in/out, Amps In/Out, Power In/Out, Fan ID, Led ID
//!   - Tags: PsuId, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::PsuObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "psu",
    path: "state/psus",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<PsuObject>;

pub const FIELDS: &[Spec] = &[
    Spec::field("AdminState", |p| (&p.admin_state).into()),
    Spec::field("ModelNum", |p| (&p.model_num).into()),
    Spec::gauge("SerialNum", |p| (&p.serial_num).into()),
    Spec::gauge("Volts in", |p| p.vin.into()),
    Spec::gauge("Volts out", |p| p.vout.into()),
    Spec::gauge("Amps In", |p| p.iin.into()),
    Spec::gauge("Amps Out", |p| p.iout.into()),
    Spec::gauge("Power In", |p| p.pin.into()),
    Spec::gauge("Power Out", |p| p.pout.into()),
    Spec::field("Fan Status", |p| (&p.fan).into()),
    Spec::gauge("Fan ID", |p| p.fan_id.into()),
    Spec::gauge("Led ID", |p| p.led_id.into()),
];

/// Collects power supply state from SnapRoute
pub async fn collect_psu_metrics<T: Transport>(ctx: &CollectionContext<'_, T>) -> Result<()> {
    let psus = ctx.fetch_list::<PsuObject>(&DOMAIN).await?;
    for psu in &psus {
        let tags = ctx.entry_tags("PsuId", psu.object.psu_id.to_string());
        ctx.emit("psu", FIELDS, &psu.object, &tags);
    }
    debug!("Updated metrics for {} PSUs", psus.len());
    Ok(())
}
