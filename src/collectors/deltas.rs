//! Per-port counter history for delta samples.
//!
//! Snapshots are keyed by `IfIndex`. A cycle stages the counters it sees and
//! the stage only replaces the history when the cycle completes, so a failed
//! cycle never becomes the baseline of the next one. Ports without a previous
//! snapshot produce no delta.

use std::collections::HashMap;

/// Counters tracked per port
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortCounters {
    pub in_ucast_pkts: i64,
    pub out_ucast_pkts: i64,
    pub in_discards: i64,
    pub out_discards: i64,
    pub ether_pkts: i64,
    pub ether_mc_pkts: i64,
    pub ether_bcast_pkts: i64,
}

impl PortCounters {
    /// Growth since `previous`. A counter that went backwards (device reset or
    /// wrap) yields zero for that counter.
    pub fn since(&self, previous: &PortCounters) -> PortCounters {
        let d = |now: i64, before: i64| now.saturating_sub(before).max(0);
        PortCounters {
            in_ucast_pkts: d(self.in_ucast_pkts, previous.in_ucast_pkts),
            out_ucast_pkts: d(self.out_ucast_pkts, previous.out_ucast_pkts),
            in_discards: d(self.in_discards, previous.in_discards),
            out_discards: d(self.out_discards, previous.out_discards),
            ether_pkts: d(self.ether_pkts, previous.ether_pkts),
            ether_mc_pkts: d(self.ether_mc_pkts, previous.ether_mc_pkts),
            ether_bcast_pkts: d(self.ether_bcast_pkts, previous.ether_bcast_pkts),
        }
    }
}

#[derive(Debug, Default)]
pub struct PortCounterHistory {
    committed: HashMap<i64, PortCounters>,
    staged: HashMap<i64, PortCounters>,
}

impl PortCounterHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop anything staged by an unfinished cycle
    pub fn begin_cycle(&mut self) {
        self.staged.clear();
    }

    /// Stage `current` for `if_index` and return the delta against the last
    /// committed snapshot, if there is one
    pub fn observe(&mut self, if_index: i64, current: PortCounters) -> Option<PortCounters> {
        self.staged.insert(if_index, current);
        self.committed
            .get(&if_index)
            .map(|previous| current.since(previous))
    }

    /// Make the staged snapshots the baseline for the next cycle
    pub fn commit(&mut self) {
        self.committed = std::mem::take(&mut self.staged);
    }

    pub fn snapshot(&self, if_index: i64) -> Option<&PortCounters> {
        self.committed.get(&if_index)
    }

    pub fn len(&self) -> usize {
        self.committed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}
