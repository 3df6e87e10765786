use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{Context, ensure};
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution as _, Uniform},
};
use rand_distr::{LogNormal, Normal};
use rand_pcg::Pcg32;

use crate::util::Output;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum Distribution {
    #[default]
    Normal,
    Uniform,
    LogNormal,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of rows to generate
    #[arg(long, default_value_t = 200)]
    count: usize,
    /// Distribution of the values: normal, uniform or lognormal
    #[arg(long, default_value = "normal")]
    distribution: Distribution,
    /// Mean of the values (of their logarithm for lognormal)
    #[arg(long, default_value_t = 50.0)]
    mean: f64,
    /// Standard deviation of the values (of their logarithm for lognormal)
    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
    /// Fraction of rows whose value is left empty
    #[arg(long, default_value_t = 0.0)]
    missing_rate: f64,
    /// Random seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Name of the value column
    #[arg(long, default_value = "value")]
    column: String,
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Draws values from one of the supported distributions.
#[derive(Debug, Clone)]
enum Sampler {
    Normal(Normal<f64>),
    Uniform(Uniform<f64>),
    LogNormal(LogNormal<f64>),
}

impl Sampler {
    fn new(distribution: Distribution, mean: f64, std_dev: f64) -> anyhow::Result<Self> {
        ensure!(
            mean.is_finite() && std_dev.is_finite() && std_dev > 0.0,
            "mean must be finite and std-dev positive (got mean={mean}, std-dev={std_dev})"
        );
        let sampler = match distribution {
            Distribution::Normal => Self::Normal(
                Normal::new(mean, std_dev).context("Invalid normal distribution")?,
            ),
            Distribution::Uniform => {
                // [mean - sqrt(3) sd, mean + sqrt(3) sd] has the requested mean and sd
                let half_width = std_dev * 3.0_f64.sqrt();
                Self::Uniform(
                    Uniform::new(mean - half_width, mean + half_width)
                        .context("Invalid uniform distribution")?,
                )
            }
            Distribution::LogNormal => Self::LogNormal(
                LogNormal::new(mean, std_dev).context("Invalid log-normal distribution")?,
            ),
        };
        Ok(sampler)
    }

    fn sample<R>(&self, rng: &mut R) -> f64
    where
        R: Rng,
    {
        match self {
            Self::Normal(d) => d.sample(rng),
            Self::Uniform(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
        }
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        count,
        distribution,
        mean,
        std_dev,
        missing_rate,
        seed,
        column,
        output,
    } = arg;

    ensure!(
        (0.0..=1.0).contains(missing_rate),
        "missing-rate must be within [0, 1] (got {missing_rate})"
    );
    let sampler = Sampler::new(*distribution, *mean, *std_dev)?;
    let mut rng = match seed {
        Some(seed) => Pcg32::seed_from_u64(*seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };

    let mut output = Output::from_output_path(output.clone())?;
    let missing = write_sample(
        &mut output,
        column,
        *count,
        *missing_rate,
        &sampler,
        &mut rng,
    )
    .with_context(|| format!("Failed to write sample to {}", output.display_path()))?;
    tracing::info!(
        rows = count,
        missing,
        distribution = ?distribution,
        "generated sample"
    );
    output.finish()
}

/// Writes `id,<column>` rows and returns how many values were left empty.
fn write_sample<W, R>(
    writer: W,
    column: &str,
    count: usize,
    missing_rate: f64,
    sampler: &Sampler,
    rng: &mut R,
) -> io::Result<usize>
where
    W: Write,
    R: Rng,
{
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(["id", column])?;

    let mut missing = 0;
    for id in 1..=count {
        let value = if rng.random_bool(missing_rate) {
            missing += 1;
            String::new()
        } else {
            format!("{:.4}", sampler.sample(rng))
        };
        writer.write_record([id.to_string(), value])?;
    }
    writer.flush()?;
    Ok(missing)
}
