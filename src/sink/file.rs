//! Rotating file sink
//!
//! The daemon's logging threads must stay responsive, so file output is
//! implemented as:
//! - a bounded queue (non-blocking `try_send`, lines dropped when full)
//! - a dedicated writer thread with buffered writes and periodic flush
//!
//! All sinks created by one [`FileFactory`] share the same file and
//! writer thread.

use super::{Record, Sink, SinkFactory};
use crate::category::Category;
use crate::constants::{
    DEFAULT_MAX_LOG_BYTES, DEFAULT_MAX_LOG_FILES, FILE_CHANNEL_CAPACITY, FILE_FLUSH_INTERVAL_MS,
};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread;
use std::time::{Duration, Instant};

/// File sink configuration
#[derive(Debug, Clone)]
pub struct FileSinkConfig {
    pub path: PathBuf,
    pub max_bytes: u64,
    pub max_files: usize,
    pub flush_interval: Duration,
    pub channel_capacity: usize,
}

impl FileSinkConfig {
    /// Configuration for `path` with default rotation and flush settings
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_LOG_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
            flush_interval: Duration::from_millis(FILE_FLUSH_INTERVAL_MS),
            channel_capacity: FILE_CHANNEL_CAPACITY,
        }
    }
}

/// Factory sharing one rotating log file among all created sinks
pub struct FileFactory {
    tx: SyncSender<Record>,
}

impl FileFactory {
    /// Open the log file and start the writer thread.
    ///
    /// Fails if the file's directory cannot be created or the file cannot
    /// be opened for append.
    pub fn spawn(cfg: FileSinkConfig) -> io::Result<Self> {
        if let Some(parent) = cfg.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let (file, size) = open_append(&cfg.path)?;
        let (tx, rx) = sync_channel::<Record>(cfg.channel_capacity.max(1));

        thread::Builder::new()
            .name("log-registry-file-writer".to_string())
            .spawn(move || run_writer(rx, cfg, file, size))
            .map_err(|e| io::Error::other(e.to_string()))?;

        Ok(Self { tx })
    }
}

impl SinkFactory for FileFactory {
    fn create(&self, _category: Category, _name: Option<&str>) -> io::Result<Box<dyn Sink>> {
        Ok(Box::new(FileSink {
            tx: self.tx.clone(),
        }))
    }
}

/// Sink feeding the shared writer thread
pub struct FileSink {
    tx: SyncSender<Record>,
}

impl Sink for FileSink {
    fn emit(&mut self, record: &Record) {
        // Queue full or writer gone: drop the line rather than block
        let _ = self.tx.try_send(record.clone());
    }
}

fn run_writer(rx: Receiver<Record>, cfg: FileSinkConfig, file: File, start_size: u64) {
    let max_bytes = cfg.max_bytes.max(1024);
    let max_files = cfg.max_files.max(1);
    let flush_interval = if cfg.flush_interval.is_zero() {
        Duration::from_millis(FILE_FLUSH_INTERVAL_MS)
    } else {
        cfg.flush_interval
    };

    let mut writer = BufWriter::new(file);
    let mut size = start_size;
    let mut dirty = false;
    let mut last_flush = Instant::now();

    loop {
        match rx.recv_timeout(flush_interval) {
            Ok(record) => {
                let line = record.format();
                if write_line(&mut writer, &line).is_ok() {
                    size = size.saturating_add(line.len() as u64 + 1);
                    dirty = true;
                }

                if size >= max_bytes {
                    let _ = writer.flush();
                    drop(writer);
                    let _ = rotate_files(&cfg.path, max_files);
                    match open_truncate(&cfg.path) {
                        Ok(f) => {
                            writer = BufWriter::new(f);
                            size = 0;
                            dirty = false;
                            last_flush = Instant::now();
                        }
                        Err(_) => {
                            // If we cannot reopen the file, stop logging.
                            break;
                        }
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                if dirty && last_flush.elapsed() >= flush_interval {
                    let _ = writer.flush();
                    dirty = false;
                    last_flush = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                let _ = writer.flush();
                break;
            }
        }
    }
}

fn write_line(writer: &mut BufWriter<File>, line: &str) -> io::Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    Ok(())
}

fn open_append(path: &Path) -> io::Result<(File, u64)> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);
    Ok((file, size))
}

fn open_truncate(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

fn rotate_files(path: &Path, max_files: usize) -> io::Result<()> {
    if max_files == 0 {
        return Ok(());
    }

    let stem = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "daemon.log".to_string());
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    // Remove the oldest.
    let oldest = dir.join(format!("{}.{}", stem, max_files));
    let _ = fs::remove_file(&oldest);

    // Shift: N-1 -> N, ... 1 -> 2.
    for i in (1..max_files).rev() {
        let src = dir.join(format!("{}.{}", stem, i));
        let dst = dir.join(format!("{}.{}", stem, i + 1));
        if src.exists() {
            let _ = fs::rename(&src, &dst);
        }
    }

    // Active -> .1
    let first = dir.join(format!("{}.1", stem));
    if path.exists() {
        let _ = fs::rename(path, first);
    }

    Ok(())
}
