use serde::Serialize;

use crate::mm1::{Snapshot, SnapshotSink};

/// 一个简单的快照收集器（存内存，仿真结束写 JSON 文件）
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct SnapshotLogger {
    pub snapshots: Vec<Snapshot>,
}

impl SnapshotLogger {
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl SnapshotSink for SnapshotLogger {
    fn emit(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}
