use serde::{Deserialize, Serialize};

/// 服务台状态。Busy 意味着恰有一位顾客在服务且已调度了离开事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerState {
    #[default]
    Idle,
    Busy,
}

impl ServerState {
    pub fn is_busy(self) -> bool {
        self == ServerState::Busy
    }

    /// 正在服务的顾客数（0 或 1）
    pub fn in_service(self) -> usize {
        usize::from(self.is_busy())
    }
}
