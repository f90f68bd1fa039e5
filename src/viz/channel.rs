use std::sync::mpsc::{Receiver, Sender, channel};

use tracing::debug;

use crate::mm1::{Snapshot, SnapshotSink};

/// 通过无界通道把快照交给消费者线程。消费者断开后快照被丢弃，仿真照常进行。
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<Snapshot>,
    disconnected: bool,
}

impl ChannelSink {
    pub fn new() -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = channel();
        (
            Self {
                tx,
                disconnected: false,
            },
            rx,
        )
    }
}

impl SnapshotSink for ChannelSink {
    fn emit(&mut self, snapshot: Snapshot) {
        if self.disconnected {
            return;
        }
        if self.tx.send(snapshot).is_err() {
            debug!("快照消费者已断开");
            self.disconnected = true;
        }
    }
}
