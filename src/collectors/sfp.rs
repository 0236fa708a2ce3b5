//! SFP Collector
//!
//! # Samples Produced
//! - `sfp` (field) - SfpSpeed, SfpLOS, SfpPresent, SfpType, SerialNum, EEPROM
//!   - Tags: SfpId, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::SfpObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "sfp",
    path: "state/sfps",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<SfpObject>;

pub const FIELDS: &[Spec] = &[
    Spec::field("SfpSpeed", |s| (&s.sfp_speed).into()),
    Spec::field("SfpLOS", |s| (&s.sfp_los).into()),
    Spec::field("SfpPresent", |s| (&s.sfp_present).into()),
    Spec::field("SfpType", |s| (&s.sfp_type).into()),
    Spec::field("SerialNum", |s| (&s.serial_num).into()),
    Spec::field("EEPROM", |s| (&s.eeprom).into()),
];

pub async fn collect_sfp_metrics<T: Transport>(ctx: &CollectionContext<'_, T>) -> Result<()> {
    let sfps = ctx.fetch_list::<SfpObject>(&DOMAIN).await?;
    for sfp in &sfps {
        let tags = ctx.entry_tags("SfpId", sfp.object.sfp_id.to_string());
        ctx.emit("sfp", FIELDS, &sfp.object, &tags);
    }
    debug!("Updated metrics for {} SFPs", sfps.len());
    Ok(())
}
