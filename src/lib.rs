pub mod error;
pub mod mm1;
pub mod queue;
pub mod sim;
pub mod variate;
pub mod viz;

pub use error::{ConfigError, SimError};

#[cfg(test)]
mod test;
