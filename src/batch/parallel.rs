//! Parallel batch codec using a producer-consumer pipeline.
//!
//! Architecture:
//! - Dispatcher thread: send one job per input blob
//! - Worker pool: compress or decompress each blob with its own encoder/decoder
//! - Calling thread: receive results, reorder by job id, collect

use std::collections::BTreeMap;

use crossbeam::channel::{bounded, Receiver, Sender};

use crate::error::{Error, Result};
use crate::BatchConfig;

/// Direction of a batch run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

/// A single blob to process
struct Job<'a> {
    /// Position in the input slice, for ordering output
    id: usize,
    data: &'a [u8],
}

/// Result of processing a single blob
struct Done {
    id: usize,
    data: Vec<u8>,
}

/// Compresses or decompresses many independent blobs
pub struct BatchCodec {
    config: BatchConfig,
}

impl BatchCodec {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    fn effective_threads(&self) -> usize {
        match self.config.num_threads {
            0 => num_cpus::get().clamp(1, 32),
            n => n.clamp(1, 32),
        }
    }

    /// Compress every input; output order matches input order
    pub fn compress_all<B: AsRef<[u8]> + Sync>(&self, inputs: &[B]) -> Result<Vec<Vec<u8>>> {
        self.run(inputs, Operation::Compress)
    }

    /// Decompress every input to exhaustion; output order matches input order
    ///
    /// With `framed` set, a blob whose length prefix is invalid decodes to an
    /// empty buffer, like [`crate::decompress_all_with_header`].
    pub fn decompress_all<B: AsRef<[u8]> + Sync>(&self, inputs: &[B]) -> Result<Vec<Vec<u8>>> {
        self.run(inputs, Operation::Decompress)
    }

    pub fn run<B: AsRef<[u8]> + Sync>(
        &self,
        inputs: &[B],
        operation: Operation,
    ) -> Result<Vec<Vec<u8>>> {
        let num_threads = self.effective_threads().min(inputs.len().max(1));
        let framed = self.config.framed;

        if num_threads == 1 {
            return Ok(inputs.iter().map(|b| process(b.as_ref(), operation, framed)).collect());
        }

        // Channel capacity - enough to keep workers busy without buffering every blob
        let channel_capacity = num_threads * 4;
        let (job_tx, job_rx): (Sender<Job<'_>>, Receiver<Job<'_>>) = bounded(channel_capacity);
        let (done_tx, done_rx): (Sender<Done>, Receiver<Done>) = bounded(channel_capacity);

        let result = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                scope.spawn(move |_| worker_thread(job_rx, done_tx, operation, framed));
            }

            // Workers hold the only remaining copies; results end when they exit
            drop(job_rx);
            drop(done_tx);

            scope.spawn(move |_| {
                for (id, input) in inputs.iter().enumerate() {
                    if job_tx.send(Job { id, data: input.as_ref() }).is_err() {
                        break;
                    }
                }
            });

            collect_in_order(done_rx, inputs.len())
        });

        result.map_err(|_| Error::Internal("Batch worker panicked".to_string()))?
    }
}

fn worker_thread(jobs: Receiver<Job<'_>>, results: Sender<Done>, operation: Operation, framed: bool) {
    for job in jobs {
        let data = process(job.data, operation, framed);
        if results.send(Done { id: job.id, data }).is_err() {
            break;
        }
    }
}

fn process(data: &[u8], operation: Operation, framed: bool) -> Vec<u8> {
    match (operation, framed) {
        (Operation::Compress, false) => crate::compress(data),
        (Operation::Compress, true) => crate::compress_with_header(data),
        (Operation::Decompress, false) => crate::decompress_all(data),
        (Operation::Decompress, true) => crate::decompress_all_with_header(data),
    }
}

/// Receive results as they finish and release them in job order
fn collect_in_order(results: Receiver<Done>, expected: usize) -> Result<Vec<Vec<u8>>> {
    let mut pending: BTreeMap<usize, Vec<u8>> = BTreeMap::new();
    let mut ordered = Vec::with_capacity(expected);

    for done in results {
        pending.insert(done.id, done.data);
        while let Some(data) = pending.remove(&ordered.len()) {
            ordered.push(data);
        }
    }

    if ordered.len() != expected {
        return Err(Error::Internal(format!(
            "Batch produced {} of {} results",
            ordered.len(),
            expected
        )));
    }
    Ok(ordered)
}
