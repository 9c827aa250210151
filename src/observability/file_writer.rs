//! Line-oriented file writer with numbered size-based rotation.
//!
//! When the active file would grow past [`RotationPolicy::max_bytes`], it is
//! renamed to `<name>.1`, older backups shift up by one (`.1` → `.2`, ...),
//! and the backup past [`RotationPolicy::max_backups`] is deleted.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

pub struct RotatingWriter {
    path: PathBuf,
    policy: RotationPolicy,
    /// Open handle and the number of bytes in the active file.
    state: Mutex<Option<(File, u64)>>,
}

impl RotatingWriter {
    #[must_use]
    pub const fn new(path: PathBuf, policy: RotationPolicy) -> Self {
        Self {
            path,
            policy,
            state: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `line` plus a newline, rotating first if it would not fit.
    ///
    /// A single line larger than the limit is still written, to a fresh file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, rotated or written, or
    /// if a writer thread panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("writer lock poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;

        if state.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            let size = file.metadata()?.len();
            *state = Some((file, size));
        }

        if let Some((_, size)) = state.as_ref() {
            if *size > 0 && size + incoming > self.policy.max_bytes {
                *state = None;
                self.rotate()?;
                let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
                *state = Some((file, 0));
            }
        }

        let Some((file, size)) = state.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "trace file unavailable"));
        };
        writeln!(file, "{line}")?;
        file.flush()?;
        *size += incoming;
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.policy.max_backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = self.backup_path(self.policy.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..self.policy.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

impl std::fmt::Debug for RotatingWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingWriter")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_bytes: u64, max_backups: usize) -> RotationPolicy {
        RotationPolicy {
            max_bytes,
            max_backups,
        }
    }

    #[test]
    fn appends_lines_below_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingWriter::new(dir.path().join("trace.jsonl"), policy(1024, 2));

        writer.write_line("a").unwrap();
        writer.write_line("b").unwrap();

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "a\nb\n");
        assert!(!writer.backup_path(1).exists());
    }

    #[test]
    fn rotates_into_numbered_backups_and_drops_the_oldest() {
        let dir = tempfile::tempdir().unwrap();
        let writer = RotatingWriter::new(dir.path().join("trace.jsonl"), policy(4, 2));

        for line in ["one", "two", "three", "four"] {
            writer.write_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "four\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "three\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "two\n");
        assert!(!writer.backup_path(3).exists());
    }

    #[test]
    fn existing_file_size_counts_toward_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        fs::write(&path, "0123456789\n").unwrap();

        let writer = RotatingWriter::new(path, policy(12, 1));
        writer.write_line("x").unwrap();

        assert_eq!(fs::read_to_string(writer.path()).unwrap(), "x\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "0123456789\n");
    }
}
