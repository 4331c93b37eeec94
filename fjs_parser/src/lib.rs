// Parser for flexible job-shop instance files in the Brandimarte-style
// .fjs format: a header line followed by one count-driven record per job.

use std::path::{Path, PathBuf};

use chumsky::{prelude::*, Parser};
use structs::{FjsAlternative, FjsInstance, FjsJob, FjsOperation};
use thiserror::Error;

pub mod structs;

#[derive(Debug, Error)]
pub enum FjsParseError {
    #[error("could not tokenize instance text")]
    TokenizeError(Vec<Simple<char>>),
    #[error("header line must hold 2 or 3 integers, found {found}")]
    MalformedHeader { found: usize },
    #[error("header declares a non-positive {what} ({value})")]
    NonPositiveCount { what: &'static str, value: i64 },
    #[error("unexpected end of input at token {offset}: expected {expected}")]
    UnexpectedEof { offset: usize, expected: &'static str },
    #[error("job {job}: negative operation count ({value})")]
    NegativeOperationCount { job: usize, value: i64 },
    #[error("job {job}, operation {operation}: no compatible machines declared")]
    NoCompatibleMachines { job: usize, operation: usize },
    #[error("job {job}, operation {operation}: machine id {machine} outside 1..={num_machines}")]
    MachineIdOutOfRange {
        job: usize,
        operation: usize,
        machine: i64,
        num_machines: usize,
    },
    #[error("job {job}, operation {operation}: processing time {duration} on machine {machine} must be positive")]
    InvalidProcessingTime {
        job: usize,
        operation: usize,
        machine: i64,
        duration: i64,
    },
}

#[derive(Debug, Error)]
pub enum FjsLoadError {
    #[error("could not read instance file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] FjsParseError),
}

/// Reads and parses an instance file from disk.
pub fn load_fjs(path: impl AsRef<Path>) -> Result<FjsInstance, FjsLoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| FjsLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_fjs(&content)?)
}

/// Parses the textual .fjs representation into a validated [`FjsInstance`].
///
/// The header is line-delimited (2 or 3 integers on the first non-blank
/// line; a third value, when present, is ignored). The job records that
/// follow are consumed as a single flat stream of whitespace-separated
/// integers: real-world instance files break lines inconsistently, so no
/// line structure is assumed past the header. Machine ids are 1-indexed in
/// the file and normalized to 0-indexed here, exactly once.
pub fn parse_fjs(content: &str) -> Result<FjsInstance, FjsParseError> {
    let content = content.trim_start();
    let (header, body) = content.split_once('\n').unwrap_or((content, ""));

    let token_parser = crate::token_parser();

    let header = token_parser
        .parse(header)
        .map_err(FjsParseError::TokenizeError)?;
    if header.len() < 2 || header.len() > 3 {
        return Err(FjsParseError::MalformedHeader {
            found: header.len(),
        });
    }
    let num_jobs = positive(header[0], "number of jobs")?;
    let num_machines = positive(header[1], "number of machines")?;

    let stream = token_parser
        .parse(body)
        .map_err(FjsParseError::TokenizeError)?;
    let mut tokens = Tokens {
        stream: &stream,
        offset: 0,
    };

    // Counts come from the untrusted stream: cap every reservation by the
    // tokens actually left, or a declared count near usize::MAX would
    // abort on allocation before the missing tokens are noticed.
    let mut jobs = Vec::with_capacity(num_jobs.min(tokens.remaining()));
    for job in 0..num_jobs {
        let operation_count = tokens.next("operation count")?;
        if operation_count < 0 {
            return Err(FjsParseError::NegativeOperationCount {
                job,
                value: operation_count,
            });
        }

        let mut operations =
            Vec::with_capacity((operation_count as usize).min(tokens.remaining()));
        for operation in 0..operation_count as usize {
            let alternative_count = tokens.next("compatible machine count")?;
            if alternative_count <= 0 {
                return Err(FjsParseError::NoCompatibleMachines { job, operation });
            }

            let mut alternatives =
                Vec::with_capacity((alternative_count as usize).min(tokens.remaining()));
            for _ in 0..alternative_count {
                let machine = tokens.next("machine id")?;
                let duration = tokens.next("processing time")?;

                if machine < 1 || machine as usize > num_machines {
                    return Err(FjsParseError::MachineIdOutOfRange {
                        job,
                        operation,
                        machine,
                        num_machines,
                    });
                }
                let duration_u32 = u32::try_from(duration)
                    .ok()
                    .filter(|&d| d > 0)
                    .ok_or(FjsParseError::InvalidProcessingTime {
                        job,
                        operation,
                        machine,
                        duration,
                    })?;

                alternatives.push(FjsAlternative {
                    machine: machine as usize - 1,
                    duration: duration_u32,
                });
            }
            operations.push(FjsOperation { alternatives });
        }
        jobs.push(FjsJob { operations });
    }

    // Trailing tokens (footers, blank padding) are deliberately left
    // unconsumed.

    Ok(FjsInstance { num_machines, jobs })
}

fn positive(value: i64, what: &'static str) -> Result<usize, FjsParseError> {
    if value <= 0 {
        Err(FjsParseError::NonPositiveCount { what, value })
    } else {
        Ok(value as usize)
    }
}

pub(crate) fn token_parser() -> impl Parser<char, Vec<i64>, Error = Simple<char>> {
    let integer = just('-')
        .or_not()
        .then(text::int(10))
        .map(|(sign, digits): (Option<char>, String)| match sign {
            Some(_) => format!("-{digits}"),
            None => digits,
        })
        .from_str::<i64>()
        .unwrapped()
        .labelled("integer");

    integer.padded().repeated().then_ignore(end())
}

/// Cursor over the flat integer stream of the job records.
struct Tokens<'a> {
    stream: &'a [i64],
    offset: usize,
}

impl<'a> Tokens<'a> {
    fn remaining(&self) -> usize {
        self.stream.len() - self.offset
    }

    fn next(&mut self, expected: &'static str) -> Result<i64, FjsParseError> {
        match self.stream.get(self.offset) {
            Some(&token) => {
                self.offset += 1;
                Ok(token)
            }
            None => Err(FjsParseError::UnexpectedEof {
                offset: self.offset,
                expected,
            }),
        }
    }
}
