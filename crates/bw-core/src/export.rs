//! Buffer snapshot export

use std::io;
use std::path::Path;

/// Write a sink buffer to `path` verbatim.
///
/// The destination is chosen by the caller; this reports success or
/// failure and nothing else.
pub fn write_snapshot(path: &Path, contents: &str) -> io::Result<()> {
    std::fs::write(path, contents)
}
