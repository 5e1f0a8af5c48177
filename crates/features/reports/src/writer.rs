use crate::error::{ReportError, ReportErrorExt};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

/// Suffix marking in-flight documents within the destination directory.
const TMP_MARKER: &str = ".densitetmp.";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes the document next to its destination and swaps it in with a
/// rename, so readers never observe a half-written report.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), ReportError> {
    let tmp = tmp_path(path);
    let outcome = write_tmp(&tmp, contents).and_then(|()| swap(&tmp, path));
    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    outcome.context("report write failed")
}

fn tmp_path(path: &Path) -> PathBuf {
    let n = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut name = path.file_name().map_or_else(String::new, |f| f.to_string_lossy().into_owned());
    name.push_str(TMP_MARKER);
    name.push_str(&n.to_string());
    path.with_file_name(name)
}

fn write_tmp(tmp: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(tmp)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn swap(tmp: &Path, path: &Path) -> std::io::Result<()> {
    match fs::rename(tmp, path) {
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path)?;
            fs::rename(tmp, path)
        }
        other => other,
    }
}
