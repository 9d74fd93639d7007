//! Size-based log file rotation.
//!
//! When the active file would grow past `max_size`, it is renamed to
//! `<stem>-<UTC timestamp>.<ext>` next to the original and a fresh file is
//! opened. Old backups are pruned by count and by age after every rotation.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const MEGABYTE: u64 = 1024 * 1024;
const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Zero in any field disables that limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_size_bytes: u64,
    pub max_backups: usize,
    pub max_age: Duration,
}

impl RotationPolicy {
    pub fn new(max_size_mb: u64, max_backups: usize, max_age_days: u64) -> Self {
        Self {
            max_size_bytes: max_size_mb.saturating_mul(MEGABYTE),
            max_backups,
            max_age: DAY.saturating_mul(max_age_days.min(u32::MAX as u64) as u32),
        }
    }
}

pub struct RotatingWriter {
    path: PathBuf,
    file: File,
    size: u64,
    policy: RotationPolicy,
}

impl RotatingWriter {
    /// Opens `path` for appending, creating missing parent directories.
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = Self::open_file(&path)?;
        let size = file.metadata()?.len();

        Ok(Self {
            path,
            file,
            size,
            policy,
        })
    }

    fn open_file(path: &Path) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Appends one record. `header` is written first whenever the active
    /// file is empty, including right after a rotation.
    pub fn write_record(&mut self, record: &[u8], header: Option<&[u8]>) -> io::Result<()> {
        let limit = self.policy.max_size_bytes;
        if limit > 0 && self.size > 0 && self.size + record.len() as u64 > limit {
            self.rotate()?;
        }

        if self.size == 0 {
            if let Some(header) = header {
                self.file.write_all(header)?;
                self.size += header.len() as u64;
            }
        }

        self.file.write_all(record)?;
        self.size += record.len() as u64;
        self.file.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_data()
    }

    pub fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        debug!(backup = %backup.display(), "Rotated query log file");

        self.file = Self::open_file(&self.path)?;
        self.size = 0;

        if let Err(e) = self.prune() {
            warn!(error = %e, "Failed to prune old query log backups");
        }
        Ok(())
    }

    fn stem_and_extension(&self) -> (String, Option<String>) {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = self
            .path
            .extension()
            .map(|e| e.to_string_lossy().into_owned());
        (stem, ext)
    }

    fn backup_path(&self) -> PathBuf {
        let (stem, ext) = self.stem_and_extension();
        let stamp = Utc::now().format(BACKUP_TIME_FORMAT);
        let name = match ext {
            Some(ext) => format!("{stem}-{stamp}.{ext}"),
            None => format!("{stem}-{stamp}"),
        };
        self.path.with_file_name(name)
    }

    /// Existing backups, newest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let (stem, ext) = self.stem_and_extension();
        let prefix = format!("{stem}-");
        let suffix = ext.map(|e| format!(".{e}")).unwrap_or_default();

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => parent.to_path_buf(),
            None => PathBuf::from("."),
        };

        let mut found: Vec<(PathBuf, SystemTime)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(&prefix) || !name.ends_with(&suffix) {
                continue;
            }
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            found.push((entry.path(), modified));
        }

        found.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        Ok(found.into_iter().map(|(path, _)| path).collect())
    }

    fn prune(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let now = SystemTime::now();

        for (index, backup) in backups.iter().enumerate() {
            let over_count = self.policy.max_backups > 0 && index >= self.policy.max_backups;
            let too_old = !self.policy.max_age.is_zero()
                && fs::metadata(backup)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|modified| now.duration_since(modified).ok())
                    .is_some_and(|age| age > self.policy.max_age);

            if over_count || too_old {
                fs::remove_file(backup)?;
                debug!(backup = %backup.display(), "Removed old query log backup");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_policy(max_backups: usize) -> RotationPolicy {
        RotationPolicy {
            max_size_bytes: 64,
            max_backups,
            max_age: Duration::ZERO,
        }
    }

    #[test]
    fn test_policy_converts_units() {
        let policy = RotationPolicy::new(100, 3, 28);
        assert_eq!(policy.max_size_bytes, 100 * 1024 * 1024);
        assert_eq!(policy.max_age, Duration::from_secs(28 * 24 * 3600));
    }

    #[test]
    fn test_header_written_once_per_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queries.csv");
        let mut writer = RotatingWriter::open(&path, RotationPolicy::new(0, 0, 0)).unwrap();

        writer.write_record(b"a\n", Some(b"h\n")).unwrap();
        writer.write_record(b"b\n", Some(b"h\n")).unwrap();

        assert_eq!(writer.size(), 6);
        assert_eq!(fs::read_to_string(&path).unwrap(), "h\na\nb\n");
    }

    #[test]
    fn test_rotation_keeps_limited_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queries.log");
        let mut writer = RotatingWriter::open(&path, tiny_policy(2)).unwrap();

        let record = [b'x'; 40];
        for _ in 0..5 {
            writer.write_record(&record, None).unwrap();
            // Distinct backup timestamps
            std::thread::sleep(Duration::from_millis(5));
        }

        let backups = writer.backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups.iter().all(|b| {
            let name = b.file_name().unwrap().to_string_lossy().into_owned();
            name.starts_with("queries-") && name.ends_with(".log")
        }));
        assert_eq!(fs::metadata(&path).unwrap().len(), 40);
    }
}
