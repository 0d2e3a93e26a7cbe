//! Atomic file operations
//!
//! # Pattern
//!
//! 1. Write to a uniquely named temporary file in the destination directory
//! 2. Call sync_all() to flush to disk
//! 3. Rename the temp file over the final path (atomic on most filesystems)
//!
//! Readers only ever see the old file or the complete new one. When two
//! processes race, the last rename wins and the other temp file is dropped.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Atomically write a file using a writer function
///
/// The temp file is removed if `write_fn` fails or the process dies
/// before the rename.
///
/// # Example
///
/// ```ignore
/// atomic_write_with("models/bundle.bin", |writer| {
///     writer.write_all(b"payload")?;
///     Ok(())
/// })?;
/// ```
pub fn atomic_write_with<P, F>(path: P, write_fn: F) -> io::Result<()>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write_fn(&mut writer)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
