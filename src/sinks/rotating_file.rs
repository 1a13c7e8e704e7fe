//! Size-rotating file sink
//!
//! The active segment is always the configured path. When a record would
//! push it past the size limit the segment is closed, renamed to
//! `<stem>-<timestamp><ext>` and a fresh file is opened in its place.
//! Compression and pruning of renamed segments happen on a background
//! "mill" thread so a logging call never waits on gzip.

use crate::core::config::Config;
use crate::core::error::{LoggerError, Result};
use crate::core::sink::Sink;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Timestamp embedded in backup file names, filesystem safe.
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const COMPRESS_SUFFIX: &str = ".gz";

/// When to rotate and what to do with rotated segments
///
/// # Examples
///
/// ```
/// use xlog::sinks::RotationPolicy;
/// use std::time::Duration;
///
/// // Keep a week of 50 MiB segments, compressed
/// let policy = RotationPolicy::new()
///     .with_max_size(50 * 1024 * 1024)
///     .with_max_backups(7)
///     .with_max_age(Duration::from_secs(7 * 24 * 3600))
///     .with_compression(true);
/// assert_eq!(policy.max_backups, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Rotate before a write would make the segment larger than this
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep, 0 keeps all
    pub max_backups: usize,
    /// Remove rotated files older than this
    pub max_age: Option<Duration>,
    /// Whether to gzip rotated files
    pub compress: bool,
    /// Local time or UTC in backup names
    pub local_time: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: 128 * 1024 * 1024,
            max_backups: 0,
            max_age: None,
            compress: true,
            local_time: true,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The policy described by a logger configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_bytes: config.max_size_bytes(),
            max_backups: config.max_backups,
            // Overflowing day counts mean no age limit.
            max_age: (config.max_age_days > 0)
                .then(|| config.max_age_days.checked_mul(24 * 3600))
                .flatten()
                .map(Duration::from_secs),
            compress: config.compress,
            local_time: config.local_time,
        }
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, bytes: u64) -> Self {
        self.max_bytes = bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_local_time(mut self, enabled: bool) -> Self {
        self.local_time = enabled;
        self
    }

    /// Whether the mill has anything to do after a rotation.
    fn needs_mill(&self) -> bool {
        self.compress || self.max_backups > 0 || self.max_age.is_some()
    }
}

/// Splits `dir/app.log` into (`app`, `.log`) for backup naming.
fn name_parts(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("xlog")
        .to_string();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    (stem, ext)
}

/// Backup path for a segment rotated at `now`.
fn backup_path(path: &Path, local_time: bool, now: DateTime<Utc>) -> PathBuf {
    let (stem, ext) = name_parts(path);
    let stamp = if local_time {
        now.with_timezone(&Local).format(BACKUP_TIME_FORMAT).to_string()
    } else {
        now.format(BACKUP_TIME_FORMAT).to_string()
    };
    path.with_file_name(format!("{}-{}{}", stem, stamp, ext))
}

/// Backup path that collides with neither an existing backup nor its
/// compressed form; rotations within the same millisecond step forward.
fn unused_backup_path(path: &Path, local_time: bool) -> PathBuf {
    let mut now = Utc::now();
    loop {
        let backup = backup_path(path, local_time, now);
        let mut compressed = backup.clone().into_os_string();
        compressed.push(COMPRESS_SUFFIX);
        if !backup.exists() && !Path::new(&compressed).exists() {
            return backup;
        }
        now += chrono::Duration::milliseconds(1);
    }
}

/// Rotating file sink; see the module docs for the on-disk layout.
///
/// Construction never touches the filesystem. The file (and its parent
/// directories) are created on the first write.
///
/// ```no_run
/// use xlog::sinks::{RotatingFileSink, RotationPolicy};
///
/// let sink = RotatingFileSink::with_policy(
///     "/var/log/app.log",
///     RotationPolicy::new().with_max_backups(10),
/// );
/// ```
pub struct RotatingFileSink {
    path: PathBuf,
    policy: RotationPolicy,
    file: Option<File>,
    current_size: u64,
    mill: Option<Mill>,
}

impl RotatingFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_policy(path, RotationPolicy::default())
    }

    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            policy,
            file: None,
            current_size: 0,
            mill: None,
        }
    }

    /// Bytes written to the active segment
    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Close the active segment and start a new one, regardless of size.
    pub fn rotate(&mut self) -> Result<()> {
        self.close_file()?;
        self.open_new()?;
        self.signal_mill();
        Ok(())
    }

    /// Flush and close the active segment and stop the mill, waiting for
    /// pending compression to finish. A later write reopens the file.
    pub fn close(&mut self) -> Result<()> {
        let result = self.close_file();
        if let Some(mill) = self.mill.take() {
            mill.shutdown();
        }
        result
    }

    fn close_file(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to flush before closing: {}", e),
                )
            })?;
        }
        Ok(())
    }

    /// Open the existing log file for appending, rotating first if the
    /// pending write would not fit.
    fn open_existing_or_new(&mut self, write_len: u64) -> Result<()> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(_) => return self.open_new(),
        };

        if metadata.len() + write_len > self.policy.max_bytes {
            return self.rotate();
        }

        match OpenOptions::new().append(true).open(&self.path) {
            Ok(file) => {
                lock_file(&file, &self.path);
                self.file = Some(file);
                self.current_size = metadata.len();
                Ok(())
            }
            // Unreadable or vanished; start over with a new file
            Err(_) => self.open_new(),
        }
    }

    /// Move any existing file aside and create a fresh, empty one.
    fn open_new(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        if self.path.exists() {
            let backup = unused_backup_path(&self.path, self.policy.local_time);
            fs::rename(&self.path, &backup).map_err(|e| {
                LoggerError::file_rotation(
                    self.path.display().to_string(),
                    format!("Failed to rename to '{}': {}", backup.display(), e),
                )
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;
        lock_file(&file, &self.path);

        self.file = Some(file);
        self.current_size = 0;
        Ok(())
    }

    fn signal_mill(&mut self) {
        if !self.policy.needs_mill() {
            return;
        }
        if self.mill.is_none() {
            self.mill = Mill::spawn(self.path.clone(), self.policy.clone());
        }
        if let Some(ref mill) = self.mill {
            mill.signal();
        }
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn write_record(&mut self, record: &[u8]) -> Result<()> {
        let len = record.len() as u64;
        if len > self.policy.max_bytes {
            return Err(LoggerError::RecordTooLarge {
                len,
                max: self.policy.max_bytes,
            });
        }

        if self.file.is_none() {
            self.open_existing_or_new(len)?;
        }

        if self.current_size + len > self.policy.max_bytes {
            self.rotate()?;
        }

        let file = self
            .file
            .as_mut()
            .ok_or_else(|| LoggerError::SinkClosed(self.path.display().to_string()))?;
        file.write_all(record).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                format!("Failed to write record: {}", e),
            )
        })?;
        self.current_size += len;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut file) = self.file {
            file.flush().map_err(|e| {
                LoggerError::file_sink(
                    self.path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        // Best effort during drop
        let _ = self.close();
    }
}

#[cfg(feature = "file")]
fn lock_file(file: &File, path: &Path) {
    use fs2::FileExt;

    if let Err(e) = file.try_lock_exclusive() {
        eprintln!(
            "[LOGGER WARNING] Could not lock '{}': {}. Another writer may share this file.",
            path.display(),
            e
        );
    }
}

#[cfg(not(feature = "file"))]
fn lock_file(_file: &File, _path: &Path) {}

/// Background worker compressing and pruning rotated segments
struct Mill {
    sender: Sender<()>,
    handle: thread::JoinHandle<()>,
}

impl Mill {
    fn spawn(path: PathBuf, policy: RotationPolicy) -> Option<Self> {
        // One pending signal is enough: a run always looks at every backup
        let (sender, receiver) = bounded::<()>(1);
        match thread::Builder::new()
            .name("xlog-mill".to_string())
            .spawn(move || Self::run(&path, &policy, receiver))
        {
            Ok(handle) => Some(Self { sender, handle }),
            Err(e) => {
                eprintln!(
                    "[LOGGER WARNING] Failed to start compression thread: {}. \
                     Rotated files are left as-is.",
                    e
                );
                None
            }
        }
    }

    fn signal(&self) {
        // Full means a run is already pending
        let _ = self.sender.try_send(());
    }

    fn run(path: &Path, policy: &RotationPolicy, receiver: Receiver<()>) {
        while receiver.recv().is_ok() {
            if let Err(e) = mill_run_once(path, policy) {
                eprintln!(
                    "[LOGGER WARNING] Post-rotation maintenance of '{}' failed: {}",
                    path.display(),
                    e
                );
            }
        }
    }

    fn shutdown(self) {
        drop(self.sender);
        if let Err(e) = self.handle.join() {
            eprintln!("[LOGGER ERROR] Compression thread panicked: {:?}", e);
        }
    }
}

/// A rotated segment found next to the active file
#[derive(Debug, Clone)]
struct Backup {
    path: PathBuf,
    rotated_at: NaiveDateTime,
    compressed: bool,
}

/// Rotated segments for `path`, newest first.
fn list_backups(path: &Path) -> Result<Vec<Backup>> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir.to_path_buf(),
        None => PathBuf::from("."),
    };
    let (stem, ext) = name_parts(path);
    let prefix = format!("{}-", stem);

    let mut backups = Vec::new();
    for dir_entry in fs::read_dir(&dir)? {
        let dir_entry = dir_entry?;
        if !dir_entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let file_name = dir_entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        let (name, compressed) = match name.strip_suffix(COMPRESS_SUFFIX) {
            Some(inner) => (inner, true),
            None => (name, false),
        };
        let Some(stamp) = name
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.strip_suffix(ext.as_str()))
        else {
            continue;
        };
        if let Ok(rotated_at) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT) {
            backups.push(Backup {
                path: dir_entry.path(),
                rotated_at,
                compressed,
            });
        }
    }

    backups.sort_by(|a, b| b.rotated_at.cmp(&a.rotated_at));
    Ok(backups)
}

/// One pass of pruning then compression over all backups of `path`.
fn mill_run_once(path: &Path, policy: &RotationPolicy) -> Result<()> {
    let mut backups = list_backups(path)?;
    let mut remove = Vec::new();

    if policy.max_backups > 0 {
        // A segment caught mid-compression exists twice; count it once
        let mut kept_stamps = Vec::new();
        let mut kept = Vec::new();
        for backup in backups {
            if !kept_stamps.contains(&backup.rotated_at) {
                kept_stamps.push(backup.rotated_at);
            }
            if kept_stamps.len() > policy.max_backups {
                remove.push(backup);
            } else {
                kept.push(backup);
            }
        }
        backups = kept;
    }

    if let Some(cutoff) = policy.max_age.and_then(|age| age_cutoff(age, policy.local_time)) {
        let (old, fresh): (Vec<_>, Vec<_>) =
            backups.into_iter().partition(|b| b.rotated_at < cutoff);
        remove.extend(old);
        backups = fresh;
    }

    for backup in &remove {
        if let Err(e) = fs::remove_file(&backup.path) {
            eprintln!(
                "[LOGGER WARNING] Failed to remove old backup {}: {}",
                backup.path.display(),
                e
            );
        }
    }

    if policy.compress {
        for backup in backups.iter().filter(|b| !b.compressed) {
            compress_file(&backup.path)?;
        }
    }

    Ok(())
}

/// Backups stamped before this moment are expired. `None` when the cutoff
/// falls before the Unix epoch or outside chrono's range; nothing is that old.
fn age_cutoff(max_age: Duration, local_time: bool) -> Option<NaiveDateTime> {
    let since_epoch = SystemTime::now()
        .checked_sub(max_age)?
        .duration_since(UNIX_EPOCH)
        .ok()?;
    let secs = i64::try_from(since_epoch.as_secs()).ok()?;
    let cutoff = DateTime::<Utc>::from_timestamp(secs, since_epoch.subsec_nanos())?;
    Some(if local_time {
        cutoff.with_timezone(&Local).naive_local()
    } else {
        cutoff.naive_utc()
    })
}

/// Compress a rotated segment with transactional safety using streaming I/O
///
/// The original file is only deleted after the `.gz` is fully written and
/// renamed into place.
fn compress_file(path: &Path) -> Result<()> {
    let mut gz_name = path.as_os_str().to_owned();
    gz_name.push(COMPRESS_SUFFIX);
    let gz_path = PathBuf::from(gz_name);
    let mut temp_name = gz_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_gz_path = PathBuf::from(temp_name);

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to create temporary compressed file: {}", temp_gz_path.display()),
            e,
        )
    })?;
    let buffered_output = BufWriter::with_capacity(64 * 1024, output);
    let mut encoder =
        flate2::write::GzEncoder::new(buffered_output, flate2::Compression::default());

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to read from file: {}", path.display()),
                e,
            )
        })?;
        if bytes_read == 0 {
            break;
        }
        encoder.write_all(&buffer[..bytes_read]).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to compress data chunk", e)
        })?;
    }

    encoder
        .finish()
        .and_then(|mut out| out.flush())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to finish compression", e)
        })?;

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[LOGGER WARNING] Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        );
    }

    Ok(())
}
