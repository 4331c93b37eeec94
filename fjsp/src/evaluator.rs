//! Feasibility checking and makespan computation for candidate schedules.
//!
//! Structural mismatches between a schedule and its instance abort with
//! [`SchemaError`]; constraint violations are data, collected in full so a
//! solver can use them as repair guidance.

use fjs_parser::structs::FjsInstance;
use log::trace;
use serde::Serialize;
use thiserror::Error;

use crate::schedule::Schedule;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schedule covers {found} jobs, instance declares {expected}")]
    JobCountMismatch { expected: usize, found: usize },
    #[error("job {job}: schedule lists {found} operations, instance declares {expected}")]
    OperationCountMismatch {
        job: usize,
        expected: usize,
        found: usize,
    },
}

/// A single constraint violation, located by job/operation index
/// (or machine for disjunctive conflicts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Violation {
    /// The assigned machine is not in the operation's compatible set.
    InvalidMachineAssignment { job: usize, operation: usize },
    /// `end` differs from `start` plus the processing time on the
    /// assigned machine.
    InconsistentDuration { job: usize, operation: usize },
    /// The operation starts before its predecessor in the same job ends.
    PrecedenceViolation { job: usize, operation: usize },
    /// Two operations occupy the same machine at overlapping times.
    MachineOverlap {
        machine: usize,
        first: (usize, usize),
        second: (usize, usize),
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub is_feasible: bool,
    pub makespan: u32,
    pub violations: Vec<Violation>,
}

/// Validates `schedule` against `instance` and computes its makespan.
///
/// Pure and deterministic: neither input is mutated and identical inputs
/// yield identical results. The makespan is reported even when the
/// schedule is infeasible.
pub fn evaluate(
    instance: &FjsInstance,
    schedule: &Schedule,
) -> Result<EvaluationResult, SchemaError> {
    if schedule.jobs.len() != instance.num_jobs() {
        return Err(SchemaError::JobCountMismatch {
            expected: instance.num_jobs(),
            found: schedule.jobs.len(),
        });
    }
    for (job, (declared, scheduled)) in instance.jobs.iter().zip(&schedule.jobs).enumerate() {
        if scheduled.len() != declared.operations.len() {
            return Err(SchemaError::OperationCountMismatch {
                job,
                expected: declared.operations.len(),
                found: scheduled.len(),
            });
        }
    }

    let mut violations = Vec::new();

    // Per-job checks: machine compatibility, duration consistency,
    // precedence order.
    for (job, (declared, scheduled)) in instance.jobs.iter().zip(&schedule.jobs).enumerate() {
        for (operation, (op, placed)) in declared.operations.iter().zip(scheduled).enumerate() {
            match op.processing_time_on(placed.machine) {
                Some(processing_time) => {
                    if placed.end as u64 != placed.start as u64 + processing_time as u64 {
                        violations.push(Violation::InconsistentDuration { job, operation });
                    }
                }
                // No declared processing time exists to check the window
                // against, so the duration check is skipped here.
                None => violations.push(Violation::InvalidMachineAssignment { job, operation }),
            }

            if operation > 0 && placed.start < scheduled[operation - 1].end {
                violations.push(Violation::PrecedenceViolation { job, operation });
            }
        }
    }

    // Disjunctive checks: group the half-open intervals [start, end) by
    // machine, sort by start, and enumerate every overlapping pair.
    let mut by_machine: Vec<Vec<(u32, u32, usize, usize)>> =
        vec![Vec::new(); instance.num_machines];
    for (job, scheduled) in schedule.jobs.iter().enumerate() {
        for (operation, placed) in scheduled.iter().enumerate() {
            // Assignments to machines outside the instance were already
            // reported above.
            if let Some(intervals) = by_machine.get_mut(placed.machine) {
                intervals.push((placed.start, placed.end, job, operation));
            }
        }
    }
    for (machine, intervals) in by_machine.iter_mut().enumerate() {
        intervals.sort_unstable();
        trace!("machine {machine} intervals: {intervals:?}");

        for i in 0..intervals.len() {
            let (_, end_a, job_a, op_a) = intervals[i];
            for &(start_b, _, job_b, op_b) in &intervals[i + 1..] {
                if start_b >= end_a {
                    break;
                }
                violations.push(Violation::MachineOverlap {
                    machine,
                    first: (job_a, op_a),
                    second: (job_b, op_b),
                });
            }
        }
    }

    let makespan = schedule
        .jobs
        .iter()
        .filter_map(|scheduled| scheduled.last())
        .map(|placed| placed.end)
        .max()
        .unwrap_or(0);

    Ok(EvaluationResult {
        is_feasible: violations.is_empty(),
        makespan,
        violations,
    })
}

#[cfg(test)]
mod tests {
    use fjs_parser::parse_fjs;
    use fjs_parser::structs::FjsInstance;

    use super::{evaluate, SchemaError, Violation};
    use crate::schedule::{Schedule, ScheduledOperation};

    fn op(machine: usize, start: u32, end: u32) -> ScheduledOperation {
        ScheduledOperation {
            machine,
            start,
            end,
        }
    }

    /// 1 job, 2 operations; op 0 runs on machine 0 only (3 time units),
    /// op 1 on machine 1 only (2 time units).
    fn chain_instance() -> FjsInstance {
        parse_fjs("1 2\n2 1 1 3 1 2 2\n").unwrap()
    }

    /// 2 single-operation jobs competing for machine 0 (durations 2 and 3).
    fn contended_instance() -> FjsInstance {
        parse_fjs("2 1\n1 1 1 2\n1 1 1 3\n").unwrap()
    }

    #[test]
    fn feasible_chain_scores_its_makespan() {
        let instance = chain_instance();
        let schedule = Schedule::new(vec![vec![op(0, 0, 3), op(1, 3, 5)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(result.is_feasible);
        assert_eq!(result.makespan, 5);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let instance = chain_instance();
        let schedule = Schedule::new(vec![vec![op(0, 0, 3), op(1, 2, 4)]]);

        let first = evaluate(&instance, &schedule).unwrap();
        let second = evaluate(&instance, &schedule).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn overlapping_machine_use_is_reported_once_per_pair() {
        let instance = contended_instance();
        let schedule = Schedule::new(vec![vec![op(0, 0, 2)], vec![op(0, 0, 3)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(!result.is_feasible);
        assert_eq!(
            result.violations,
            vec![Violation::MachineOverlap {
                machine: 0,
                first: (0, 0),
                second: (1, 0),
            }]
        );
        // Makespan is still the max last-operation end, infeasible or not.
        assert_eq!(result.makespan, 3);
    }

    #[test]
    fn back_to_back_intervals_do_not_overlap() {
        let instance = contended_instance();
        let schedule = Schedule::new(vec![vec![op(0, 3, 5)], vec![op(0, 0, 3)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(result.is_feasible);
        assert_eq!(result.makespan, 5);
    }

    #[test]
    fn precedence_violations_are_located() {
        let instance = chain_instance();
        // Op 1 starts one tick before op 0 ends.
        let schedule = Schedule::new(vec![vec![op(0, 0, 3), op(1, 2, 4)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(!result.is_feasible);
        assert_eq!(
            result.violations,
            vec![Violation::PrecedenceViolation {
                job: 0,
                operation: 1
            }]
        );
    }

    #[test]
    fn incompatible_machines_are_reported() {
        let instance = chain_instance();
        // Op 0 is only compatible with machine 0.
        let schedule = Schedule::new(vec![vec![op(1, 0, 3), op(1, 3, 5)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(result.violations.contains(&Violation::InvalidMachineAssignment {
            job: 0,
            operation: 0
        }));
    }

    #[test]
    fn machines_outside_the_instance_are_invalid_assignments() {
        let instance = contended_instance();
        let schedule = Schedule::new(vec![vec![op(7, 0, 2)], vec![op(0, 2, 5)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert_eq!(
            result.violations,
            vec![Violation::InvalidMachineAssignment {
                job: 0,
                operation: 0
            }]
        );
    }

    #[test]
    fn wrong_durations_are_reported() {
        let instance = chain_instance();
        // Op 0 takes 3 time units on machine 0, not 4.
        let schedule = Schedule::new(vec![vec![op(0, 0, 4), op(1, 4, 6)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert_eq!(
            result.violations,
            vec![Violation::InconsistentDuration {
                job: 0,
                operation: 0
            }]
        );
    }

    #[test]
    fn violations_are_enumerated_not_short_circuited() {
        let instance = parse_fjs("2 1\n2 1 1 2 1 1 2\n1 1 1 3\n").unwrap();
        // Job 0 breaks precedence between its two operations; job 1
        // overlaps job 0 on machine 0.
        let schedule = Schedule::new(vec![vec![op(0, 0, 2), op(0, 1, 3)], vec![op(0, 0, 3)]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(!result.is_feasible);
        assert!(result
            .violations
            .iter()
            .any(|v| matches!(v, Violation::PrecedenceViolation { .. })));
        let overlaps = result
            .violations
            .iter()
            .filter(|v| matches!(v, Violation::MachineOverlap { .. }))
            .count();
        assert!(overlaps >= 2);
    }

    #[test]
    fn job_count_mismatch_is_a_schema_error() {
        let instance = contended_instance();
        let schedule = Schedule::new(vec![vec![op(0, 0, 2)]]);

        assert_eq!(
            evaluate(&instance, &schedule),
            Err(SchemaError::JobCountMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn operation_count_mismatch_is_a_schema_error() {
        let instance = chain_instance();
        let schedule = Schedule::new(vec![vec![op(0, 0, 3)]]);

        assert_eq!(
            evaluate(&instance, &schedule),
            Err(SchemaError::OperationCountMismatch {
                job: 0,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn empty_jobs_contribute_nothing_to_makespan() {
        let instance = parse_fjs("1 1\n0\n").unwrap();
        let schedule = Schedule::new(vec![vec![]]);

        let result = evaluate(&instance, &schedule).unwrap();

        assert!(result.is_feasible);
        assert_eq!(result.makespan, 0);
        assert!(result.violations.is_empty());
    }
}
