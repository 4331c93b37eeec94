/// A parsed flexible job-shop instance.
///
/// Immutable after construction; all machine ids are 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FjsInstance {
    pub num_machines: usize,
    pub jobs: Vec<FjsJob>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FjsJob {
    /// Operations in precedence order: operation i must complete before
    /// operation i + 1 starts.
    pub operations: Vec<FjsOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FjsOperation {
    /// Non-empty after a successful parse.
    pub alternatives: Vec<FjsAlternative>,
}

/// One machine an operation may run on, with its processing time there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FjsAlternative {
    pub machine: usize,
    pub duration: u32,
}

impl FjsInstance {
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    pub fn total_operations(&self) -> usize {
        self.jobs.iter().map(|job| job.operations.len()).sum()
    }

    /// Trivial upper bound on any reasonable schedule's makespan: the sum
    /// over all operations of their slowest alternative.
    pub fn horizon(&self) -> u32 {
        self.jobs
            .iter()
            .flat_map(|job| &job.operations)
            .map(|op| {
                op.alternatives
                    .iter()
                    .map(|alt| alt.duration)
                    .max()
                    .unwrap_or(0)
            })
            .fold(0, u32::saturating_add)
    }
}

impl FjsOperation {
    /// Processing time of this operation on `machine`, if compatible.
    pub fn processing_time_on(&self, machine: usize) -> Option<u32> {
        self.alternatives
            .iter()
            .find(|alt| alt.machine == machine)
            .map(|alt| alt.duration)
    }
}
