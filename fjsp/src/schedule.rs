//! Candidate solutions: one machine assignment and time window per
//! operation, grouped per job in operation order.

use std::collections::BTreeMap;

use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledOperation {
    /// 0-indexed machine the operation runs on.
    pub machine: usize,
    pub start: u32,
    pub end: u32,
}

/// A candidate schedule for some instance.
///
/// `jobs[j]` holds job j's operations in precedence order. Whether the
/// shape matches a given instance is checked by the evaluator, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub jobs: Vec<Vec<ScheduledOperation>>,
}

impl Schedule {
    pub fn new(jobs: Vec<Vec<ScheduledOperation>>) -> Self {
        Self { jobs }
    }
}

// On the wire a schedule is an object keyed by 0-based job index, each
// value an ordered list of {machine, start, end} records.
impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.jobs.iter().enumerate())
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Vec<ScheduledOperation>>::deserialize(deserializer)?;
        let num_jobs = raw.len();

        let mut jobs: Vec<Option<Vec<ScheduledOperation>>> = vec![None; num_jobs];
        for (key, operations) in raw {
            let index: usize = key.parse().map_err(|_| {
                D::Error::custom(format!("job key {key:?} is not a 0-based integer"))
            })?;
            // Only canonical decimal keys: "00", "+1" or padded variants
            // would alias another key's index.
            if key != index.to_string() {
                return Err(D::Error::custom(format!(
                    "job key {key:?} is not a canonical 0-based integer"
                )));
            }
            let slot = jobs.get_mut(index).ok_or_else(|| {
                D::Error::custom(format!(
                    "job key {index} outside the dense range 0..{num_jobs}"
                ))
            })?;
            *slot = Some(operations);
        }

        // num_jobs canonical keys are pairwise distinct and all below
        // num_jobs, so every slot is filled.
        Ok(Schedule {
            jobs: jobs.into_iter().flatten().collect(),
        })
    }
}
