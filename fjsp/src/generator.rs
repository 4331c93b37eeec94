use fjs_parser::structs::FjsInstance;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::schedule::{Schedule, ScheduledOperation};

/// Draws a random candidate schedule for `instance`.
///
/// Each job's operations are laid out sequentially, so the result is always
/// precedence-feasible and structurally valid. The machine for each
/// operation is chosen uniformly among its compatible set; the initial
/// offset per job and the gaps between consecutive operations are drawn
/// from ranges bounded by the instance horizon. Machine conflicts across
/// jobs are not resolved here; the evaluator reports those as
/// `MachineOverlap` violations.
pub fn random_schedule<R: Rng + ?Sized>(instance: &FjsInstance, rng: &mut R) -> Schedule {
    let horizon = instance.horizon();

    let mut jobs = Vec::with_capacity(instance.num_jobs());
    for job in &instance.jobs {
        let mut scheduled = Vec::with_capacity(job.operations.len());
        let mut current = rng.gen_range(0..=horizon / 4);

        for operation in &job.operations {
            let alternative = operation
                .alternatives
                .choose(rng)
                .copied()
                .expect("parsed operations always have a compatible machine");

            let start = current;
            let end = start.saturating_add(alternative.duration);
            scheduled.push(ScheduledOperation {
                machine: alternative.machine,
                start,
                end,
            });

            current = end.saturating_add(rng.gen_range(0..=horizon / 10));
        }

        jobs.push(scheduled);
    }

    Schedule { jobs }
}
