//! Repeated draw-and-evaluate over random candidates.
//!
//! Not a search procedure: candidates are independent, which also makes
//! the parallel path a plain data-parallel map over per-candidate seeds.

use fjs_parser::structs::FjsInstance;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::evaluator::{self, EvaluationResult};
use crate::generator::random_schedule;
use crate::schedule::Schedule;

#[derive(Debug, Clone)]
pub struct SamplerOptions {
    pub schedule_count: u32,
    pub parallel: bool,
    /// Base seed; candidate i uses `base seed + i`, so results are
    /// reproducible regardless of thread scheduling.
    pub seed: Option<u64>,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            schedule_count: 1000,
            parallel: true,
            seed: None,
        }
    }
}

pub struct SampledSchedule {
    pub schedule: Schedule,
    pub result: EvaluationResult,
}

/// Draws `schedule_count` random candidates and keeps the best by
/// (feasibility, violation count, makespan). Returns `None` when the
/// count is zero.
pub fn sample(instance: &FjsInstance, options: &SamplerOptions) -> Option<SampledSchedule> {
    let base_seed = options.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(
        "sampling {} candidate schedules (base seed {base_seed})",
        options.schedule_count
    );

    let rate = |index: u32| -> Option<SampledSchedule> {
        let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(index as u64));
        let schedule = random_schedule(instance, &mut rng);

        // Generated schedules are structurally valid by construction.
        let result = evaluator::evaluate(instance, &schedule).ok()?;
        Some(SampledSchedule { schedule, result })
    };

    let best = if options.parallel {
        (0..options.schedule_count)
            .into_par_iter()
            .filter_map(rate)
            .min_by_key(rank)
    } else {
        (0..options.schedule_count).filter_map(rate).min_by_key(rank)
    };

    if let Some(best) = &best {
        debug!(
            "best candidate: feasible={} makespan={} violations={}",
            best.result.is_feasible,
            best.result.makespan,
            best.result.violations.len()
        );
    }

    best
}

fn rank(sampled: &SampledSchedule) -> (bool, usize, u32) {
    (
        !sampled.result.is_feasible,
        sampled.result.violations.len(),
        sampled.result.makespan,
    )
}
