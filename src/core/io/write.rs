use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Creates the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Writes contents to a file, creating parent directories if they don't exist.
///
/// # Arguments
///
/// * `path` - Path to the file to write.
/// * `contents` - Data to write to the file.
pub fn write_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let write = || -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(contents.as_ref())?;
        Ok(())
    };
    write().map_err(|e| Error::io(path, e))
}
