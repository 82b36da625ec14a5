//! Command-line arguments and the optional YAML settings file.
//!
//! A settings file has two optional sections:
//!
//! ```yaml
//! physics:
//!   gravity: 667.43
//!   spawn_mass: 200.0
//! scenario:
//!   kind: listed
//!   bodies:
//!     - { mass: 1000.0, radius: 20.0, pos: [500.0, 300.0] }
//!     - { mass: 10.0, radius: 20.0, pos: [500.0, 400.0], vel: [81.69, 0.0] }
//! ```
//!
//! Missing fields fall back to [`Config::default`] and
//! [`Scenario::default`]. Command-line flags override the file.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nbody_core::{Config, Scenario};
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Interactive 2-D N-body gravity sandbox")]
pub struct Args {
    /// YAML settings file with `physics` and `scenario` sections.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial scenario; overrides the settings file.
    #[arg(short, long, value_enum)]
    pub scenario: Option<ScenarioArg>,

    /// Seed for body colours and random scenarios.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    ThreeBody,
    Scatter,
    Solar,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::ThreeBody => Scenario::ThreeBody,
            ScenarioArg::Scatter => Scenario::scatter(),
            ScenarioArg::Solar => Scenario::solar(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: Config,
    pub scenario: Scenario,
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(text).context("invalid settings YAML")?;
        Ok(settings)
    }

    /// Builds the startup settings from the file named in `args` (if any),
    /// then applies the command-line overrides and validates the result.
    pub fn load(args: &Args) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("cannot open settings file {}", path.display()))?;
                serde_yaml::from_reader(BufReader::new(file))
                    .with_context(|| format!("cannot parse settings file {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(s) = args.scenario {
            settings.scenario = s.into();
        }
        if let Some(seed) = args.seed {
            settings.physics.seed = Some(seed);
        }

        settings.physics.validate()?;
        Ok(settings)
    }
}
