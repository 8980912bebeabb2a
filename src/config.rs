use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs,
    ops::{Bound, RangeBounds},
    path::Path,
};

/// Largest number of periods a linear grid may expand to.
const MAX_N_PERIODS: usize = 10_000_000;

/// Run configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Candidate periods to evaluate.
    pub periods: PeriodGrid,

    /// Synthetic signal parameters, only needed to generate observations.
    pub signal: Option<SignalConfig>,
}

/// Candidate periods, either listed explicitly or as a linear grid.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodGrid {
    /// Explicit periods, evaluated as given (zero and negative periods included).
    List { values: Vec<f64> },
    /// Periods `start + i * step` strictly below `stop`.
    Range { start: f64, stop: f64, step: f64 },
}

/// Parameters of a noisy sinusoidal light curve.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Number of observations.
    pub n_obs: usize,
    /// Period of the sinusoid.
    pub period: f64,
    /// Amplitude of the sinusoid.
    pub amplitude: f64,
    /// Standard deviation of the Gaussian noise added to every value.
    pub std_dev_noise: f64,
    /// Observation times are drawn uniformly from `[0, time_span)`.
    pub time_span: f64,
    /// Random seed; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// The file must be TOML-encoded and contain a serialized [`Config`].
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.periods.validate().context("invalid periods")?;
        if let Some(signal) = &self.signal {
            signal.validate().context("invalid signal")?;
        }
        Ok(())
    }
}

impl PeriodGrid {
    /// Expand the grid into the list of periods to evaluate.
    pub fn periods(&self) -> Vec<f64> {
        match *self {
            Self::List { ref values } => values.clone(),
            Self::Range { start, stop, step } => (0..Self::range_len(start, stop, step))
                .map(|idx| start + idx as f64 * step)
                .take_while(|&period| period < stop)
                .collect(),
        }
    }

    fn range_len(start: f64, stop: f64, step: f64) -> usize {
        ((stop - start) / step).ceil() as usize
    }

    fn validate(&self) -> Result<()> {
        let Self::Range { start, stop, step } = *self else {
            return Ok(());
        };

        check_pos(start).context("invalid grid start")?;
        check_pos(step).context("invalid grid step")?;
        check_num(stop, (Bound::Excluded(start), Bound::Excluded(f64::MAX)))
            .context("invalid grid stop")?;

        let n_periods = (stop - start) / step;
        check_num(n_periods, 0.0..=MAX_N_PERIODS as f64).context("invalid number of periods")?;

        Ok(())
    }
}

impl SignalConfig {
    fn validate(&self) -> Result<()> {
        check_num(self.n_obs, 1..=10_000_000).context("invalid number of observations")?;
        check_pos(self.period).context("invalid period")?;
        check_num(self.amplitude, 0.0..f64::MAX).context("invalid amplitude")?;
        check_num(self.std_dev_noise, 0.0..f64::MAX).context("invalid noise standard deviation")?;
        check_pos(self.time_span).context("invalid time span")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_pos(num: f64) -> Result<()> {
    if !(num.is_finite() && num > 0.0) {
        bail!("number must be positive and finite, but is {num:?}");
    }
    Ok(())
}
