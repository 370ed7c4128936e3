use std::io;

use thiserror::Error;

/// Everything that can go wrong between building a reporter and running it.
///
/// Construction problems ([`Error::InvalidConfiguration`],
/// [`Error::TransportUnavailable`]) are returned synchronously from the
/// builder and are never retried. [`Error::Cycle`] is returned by
/// [`Reporter::flush_once`](crate::Reporter::flush_once); the periodic loop
/// logs it and keeps ticking.
#[derive(Debug, Error)]
pub enum Error {
    /// The reporter was configured with a malformed percentile list.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The transport client could not be constructed for the given address.
    #[error("transport unavailable: {0}")]
    TransportUnavailable(#[source] io::Error),

    /// One flush cycle failed part-way through. The cycle still visited every
    /// instrument; `failures` counts the ones whose points could not be
    /// emitted and `first` is the error from the earliest of them.
    #[error("flush cycle failed for {failures} instrument(s): {first}")]
    Cycle {
        failures: usize,
        #[source]
        first: io::Error,
    },
}
