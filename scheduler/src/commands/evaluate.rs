use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fjs_parser::load_fjs;
use fjsp::evaluator;
use fjsp::schedule::Schedule;
use log::{debug, trace};

pub fn evaluate(instance_path: PathBuf, schedule_path: PathBuf) -> Result<()> {
    let instance = load_fjs(&instance_path)?;
    trace!("parsed instance: {instance:#?}");

    let contents = fs::read_to_string(&schedule_path)
        .with_context(|| format!("could not read schedule file {}", schedule_path.display()))?;
    let schedule: Schedule = serde_json::from_str(&contents)
        .with_context(|| format!("could not decode schedule file {}", schedule_path.display()))?;

    let result = evaluator::evaluate(&instance, &schedule)?;
    debug!(
        "feasible: {}, makespan: {}, violations: {}",
        result.is_feasible,
        result.makespan,
        result.violations.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
