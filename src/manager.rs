use crate::config::Config;
use crate::data::{DispersionRecord, ObservationSet};
use crate::dispersion::phase_dispersion;
use crate::signal;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

/// Drives the computation for a single run directory.
///
/// The directory holds `config.toml`, the input `observations.msgpack`
/// and, once folded, the output `dispersion.msgpack`.
pub struct Manager {
    run_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(run_dir: P) -> Result<Self> {
        let run_dir = run_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(run_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { run_dir, cfg })
    }

    pub fn generate_observations(&self) -> Result<()> {
        let signal_cfg = self
            .cfg
            .signal
            .as_ref()
            .context("config has no signal section")?;

        let obs_set = signal::generate(signal_cfg).context("failed to generate signal")?;

        let obs_file = self.observations_file();
        obs_set.save(&obs_file)?;
        log::info!("wrote {} observations to {obs_file:?}", obs_set.len());

        Ok(())
    }

    pub fn fold_observations(&self) -> Result<()> {
        let obs_file = self.observations_file();
        let obs_set = ObservationSet::load(&obs_file)?;
        log::info!("loaded {} observations from {obs_file:?}", obs_set.len());

        let periods = self.cfg.periods.periods();

        let start = Instant::now();
        let dispersion = phase_dispersion(&obs_set.time, &obs_set.flux, &periods)
            .context("failed to compute dispersion")?;
        log::info!(
            "computed dispersion at {} periods in {:?}",
            periods.len(),
            start.elapsed()
        );

        let n_non_finite = dispersion.iter().filter(|val| !val.is_finite()).count();
        if n_non_finite > 0 {
            log::warn!("{n_non_finite} periods have non-finite dispersion");
        }

        let record = DispersionRecord {
            periods,
            dispersion,
        };
        let disp_file = self.dispersion_file();
        record.save(&disp_file)?;
        log::info!("wrote {disp_file:?}");

        Ok(())
    }

    pub fn clean_run(&self) -> Result<()> {
        let disp_file = self.dispersion_file();
        if disp_file.exists() {
            fs::remove_file(&disp_file)
                .with_context(|| format!("failed to remove {disp_file:?}"))?;
            log::info!("removed {disp_file:?}");
        }

        Ok(())
    }

    fn observations_file(&self) -> PathBuf {
        self.run_dir.join("observations.msgpack")
    }

    fn dispersion_file(&self) -> PathBuf {
        self.run_dir.join("dispersion.msgpack")
    }
}
