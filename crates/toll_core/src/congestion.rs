use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that a step waits one extra tick in the reference scenario.
pub const DEFAULT_CONGESTION_DELAY_PROBABILITY: f64 = 0.1;

/// Ad-hoc congestion: after its regular tick a vehicle waits one more tick
/// with probability `probability`.
#[derive(Resource)]
pub struct CongestionDelayModel {
    rng: StdRng,
    probability: f64,
}

impl CongestionDelayModel {
    pub fn new(seed: Option<u64>, probability: f64) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, probability }
    }

    /// A model that never delays.
    pub fn disabled() -> Self {
        Self::new(Some(0), 0.0)
    }

    /// Ticks consumed by one step: 1, or 2 when congestion strikes.
    pub fn sample_step_ticks(&mut self) -> u64 {
        if self.rng.gen::<f64>() < self.probability {
            2
        } else {
            1
        }
    }
}
