use std::collections::VecDeque;

use super::{INTERARRIVAL, SERVICE, VariateSource};
use crate::error::SimError;

/// 预先给定的有限时长序列，用完即报 `VariateExhausted`。用于构造确定场景。
#[derive(Debug, Clone, Default)]
pub struct ScriptedVariates {
    interarrivals: VecDeque<f64>,
    services: VecDeque<f64>,
}

impl ScriptedVariates {
    pub fn new(
        interarrivals: impl IntoIterator<Item = f64>,
        services: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            interarrivals: interarrivals.into_iter().collect(),
            services: services.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> (usize, usize) {
        (self.interarrivals.len(), self.services.len())
    }
}

impl VariateSource for ScriptedVariates {
    fn next_interarrival(&mut self) -> Result<f64, SimError> {
        self.interarrivals
            .pop_front()
            .ok_or(SimError::VariateExhausted {
                stream: INTERARRIVAL,
            })
    }

    fn next_service(&mut self) -> Result<f64, SimError> {
        self.services
            .pop_front()
            .ok_or(SimError::VariateExhausted { stream: SERVICE })
    }
}
