//! Output and audit log naming

use super::bank::Bank;
use chrono::Local;
use std::path::{Path, PathBuf};

/// Timestamp shared by the output file and audit log of one run
pub fn run_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// `<output_root>/<folder>/<input stem>_<timestamp>.csv`
pub fn output_path(output_root: &Path, bank: Bank, input: &Path, timestamp: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    output_root
        .join(bank.folder())
        .join(format!("{}_{}.csv", stem, timestamp))
}

/// `<log_dir>/<folder>_<timestamp>.txt`
pub fn audit_log_path(log_dir: &Path, bank: Bank, timestamp: &str) -> PathBuf {
    log_dir.join(format!("{}_{}.txt", bank.folder(), timestamp))
}
