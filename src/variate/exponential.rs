use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};

use super::{INTERARRIVAL, SERVICE, VariateSource};
use crate::error::{ConfigError, SimError};

/// 指数分布的到达间隔与服务时长，共用一个带种子的 ChaCha8 生成器。
#[derive(Debug, Clone)]
pub struct ExpVariates {
    rng: ChaCha8Rng,
    interarrival: Exp<f64>,
    service: Exp<f64>,
}

impl ExpVariates {
    pub fn new(interarrival_mean: f64, service_mean: f64, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            interarrival: exp_with_mean(INTERARRIVAL, interarrival_mean)?,
            service: exp_with_mean(SERVICE, service_mean)?,
        })
    }
}

fn exp_with_mean(stream: &'static str, mean: f64) -> Result<Exp<f64>, ConfigError> {
    if !(mean.is_finite() && mean > 0.0) {
        return Err(ConfigError::NonPositiveMean {
            name: stream,
            value: mean,
        });
    }
    Exp::new(1.0 / mean).map_err(|e| ConfigError::InvalidDistribution {
        stream,
        reason: e.to_string(),
    })
}

impl VariateSource for ExpVariates {
    fn next_interarrival(&mut self) -> Result<f64, SimError> {
        Ok(self.interarrival.sample(&mut self.rng))
    }

    fn next_service(&mut self) -> Result<f64, SimError> {
        Ok(self.service.sample(&mut self.rng))
    }
}
