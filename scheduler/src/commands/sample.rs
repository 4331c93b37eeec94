use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fjs_parser::load_fjs;
use fjsp::sampler::{self, SamplerOptions};
use log::info;

pub fn sample(
    instance_path: PathBuf,
    count: u32,
    seed: Option<u64>,
    sequential: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let instance = load_fjs(&instance_path)?;

    let options = SamplerOptions {
        schedule_count: count,
        parallel: !sequential,
        seed,
    };
    let best = sampler::sample(&instance, &options)
        .context("sampling produced no candidates (is --count 0?)")?;

    println!("{}", serde_json::to_string_pretty(&best.result)?);

    if let Some(output) = output {
        let encoded = serde_json::to_string_pretty(&best.schedule)?;
        fs::write(&output, encoded)
            .with_context(|| format!("could not write schedule to {}", output.display()))?;
        info!("wrote best schedule to {}", output.display());
    }

    Ok(())
}
