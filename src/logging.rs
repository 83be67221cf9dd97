//! Log output setup.
//!
//! Warnings and errors go to standard error, everything else to standard
//! output.

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Installs the global fmt subscriber.
pub fn init() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(split_writer(std::io::stderr, std::io::stdout))
        .init();
}

/// Sends `WARN` and `ERROR` events to `err`, the rest to `out`.
pub fn split_writer<E, O>(err: E, out: O) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static
where
    E: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    O: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    err.with_max_level(Level::WARN).or_else(out)
}
