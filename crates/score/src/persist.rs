//! Atomic file replacement for the score table.
//!
//! Write-rename pattern: the new content goes to a sibling `.tmp` file,
//! `sync_all()` flushes it to disk, then a rename swaps it into place. An
//! interrupted write therefore never truncates or corrupts the table.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

/// Atomically replace `path` with `data`.
pub fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rockfall_persist_test_{}", name));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_and_overwrites() {
        let dir = test_dir("writes");
        let path = dir.join("scores.txt");

        atomic_write(&path, b"version 1").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"version 1");

        atomic_write(&path, b"version 2").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"version 2");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn leaves_no_temp_file_behind() {
        let dir = test_dir("no_temp");
        let path = dir.join("scores.txt");

        atomic_write(&path, b"data").unwrap();

        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        assert!(!Path::new(&tmp).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn survives_a_stale_temp_file() {
        let dir = test_dir("stale_tmp");
        let path = dir.join("scores.txt");

        fs::write(&path, b"original").unwrap();
        // Leftover from a crashed write.
        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(".tmp");
        fs::write(&tmp, b"partial garbage").unwrap();

        atomic_write(&path, b"fresh").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"fresh");
        assert!(!Path::new(&tmp).exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = test_dir("parents");
        let path = dir.join("nested").join("scores.txt");

        atomic_write(&path, b"nested").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"nested");

        let _ = fs::remove_dir_all(&dir);
    }
}
