//! Synthetic light curves.

use crate::config::SignalConfig;
use crate::data::ObservationSet;
use anyhow::Result;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Normal, Uniform};
use std::f64::consts::TAU;

/// Sample a noisy sinusoid at uniformly random, unsorted times.
pub fn generate(cfg: &SignalConfig) -> Result<ObservationSet> {
    let mut rng = match cfg.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::try_from_os_rng()?,
    };

    let time_dist = Uniform::new(0.0, cfg.time_span)?;
    let noise_dist = Normal::new(0.0, cfg.std_dev_noise)?;

    let mut time = Vec::with_capacity(cfg.n_obs);
    let mut flux = Vec::with_capacity(cfg.n_obs);
    for _ in 0..cfg.n_obs {
        let t = time_dist.sample(&mut rng);
        let signal = cfg.amplitude * (TAU * t / cfg.period).sin();
        time.push(t);
        flux.push(signal + noise_dist.sample(&mut rng));
    }

    Ok(ObservationSet { time, flux })
}
