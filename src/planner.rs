//! src/planner.rs
//! Turns a (source, destination) pair into pre-validated decryption jobs.
//!
//! Planning never decrypts and never writes. It looks at existence, the read-only
//! attribute and the first 8 bytes of each candidate file. Every problem becomes the
//! reason of an invalid [`Job`]; nothing here returns an error.

use crate::header::is_legacy_container;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const SOURCE_MISSING: &str = "Source does not exist";
pub const FOLDER_TO_FILE: &str = "Cannot write an encrypted folder to a single file";
pub const SOURCE_FOLDER_MISSING: &str = "Encrypted folder doesn't exist";
pub const DEST_FOLDER_READ_ONLY: &str =
    "Cannot write to output folder - it's ReadOnly in the file system.";
pub const SOURCE_FILE_MISSING: &str = "Encrypted file doesn't exist";
pub const DEST_EXISTS: &str = "Output file already exists, use --overwrite to overwrite files.";
pub const DEST_FILE_READ_ONLY: &str =
    "Cannot write to output file - it's ReadOnly in the file system.";
pub const NOT_LEGACY_ENCRYPTED: &str = "File is not encrypted with the OpenSSL method.";

/// Planning verdict for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Valid,
    Invalid(String),
}

/// One planned decryption: where from, where to, and whether it may run.
///
/// Built only by [`plan_decrypt_jobs`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    source: PathBuf,
    dest: PathBuf,
    status: JobStatus,
}

impl Job {
    pub(crate) fn valid(source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            status: JobStatus::Valid,
        }
    }

    pub(crate) fn invalid(
        source: impl Into<PathBuf>,
        dest: impl Into<PathBuf>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            status: JobStatus::Invalid(reason.into()),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    pub fn status(&self) -> &JobStatus {
        &self.status
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.status, JobStatus::Valid)
    }

    /// Why the job cannot run; empty for valid jobs.
    pub fn reason(&self) -> &str {
        match &self.status {
            JobStatus::Valid => "",
            JobStatus::Invalid(reason) => reason.as_str(),
        }
    }
}

/// Plan decryption of `source` (file or folder) into `dest`.
///
/// Checks run in this order, and the first one that applies decides:
///
/// 1. source is neither a file nor a folder → one invalid job
/// 2. source folder, dest not an existing folder → one invalid job (a missing dest
///    is taken to be a file path, and a folder cannot go into a file)
/// 3. folder → folder: one job per file, each targeting `dest/<file name>`; all
///    descendants when `recursive`, else only direct children
/// 4. file → folder: `dest/<file name>`, then the single-file checks
/// 5. file → file: the single-file checks
///
/// Single-file checks: source exists, dest absent or `overwrite`, dest not
/// read-only, source starts with `"Salted__"`.
///
/// Folder jobs come back sorted by source path.
pub fn plan_decrypt_jobs(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    overwrite: bool,
    recursive: bool,
) -> Vec<Job> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    let Ok(source_meta) = fs::metadata(source) else {
        return vec![Job::invalid(source, dest, SOURCE_MISSING)];
    };

    let source_is_dir = source_meta.is_dir();
    let dest_is_dir = dest.is_dir();

    let jobs = match (source_is_dir, dest_is_dir) {
        (true, false) => vec![Job::invalid(source, dest, FOLDER_TO_FILE)],
        (true, true) => folder_to_folder_jobs(source, dest, overwrite, recursive),
        (false, true) => vec![file_to_folder_job(source, dest, overwrite)],
        (false, false) => vec![file_to_file_job(source, dest, overwrite)],
    };

    debug!(
        source = %source.display(),
        dest = %dest.display(),
        total = jobs.len(),
        valid = jobs.iter().filter(|j| j.is_valid()).count(),
        "planned jobs"
    );
    jobs
}

fn file_to_file_job(source: &Path, dest: &Path, overwrite: bool) -> Job {
    if !source.is_file() {
        return Job::invalid(source, dest, SOURCE_FILE_MISSING);
    }

    if let Ok(dest_meta) = fs::metadata(dest) {
        if !overwrite {
            return Job::invalid(source, dest, DEST_EXISTS);
        }
        if dest_meta.permissions().readonly() {
            return Job::invalid(source, dest, DEST_FILE_READ_ONLY);
        }
    }

    match is_legacy_container(source) {
        Ok(true) => Job::valid(source, dest),
        Ok(false) => Job::invalid(source, dest, NOT_LEGACY_ENCRYPTED),
        Err(e) => {
            debug!(source = %source.display(), error = %e, "header sniff failed");
            Job::invalid(source, dest, NOT_LEGACY_ENCRYPTED)
        }
    }
}

fn file_to_folder_job(source: &Path, dest_dir: &Path, overwrite: bool) -> Job {
    let dest = match source.file_name() {
        Some(name) => dest_dir.join(name),
        None => dest_dir.to_path_buf(),
    };
    file_to_file_job(source, &dest, overwrite)
}

fn folder_to_folder_jobs(
    source_dir: &Path,
    dest_dir: &Path,
    overwrite: bool,
    recursive: bool,
) -> Vec<Job> {
    if !source_dir.is_dir() {
        return vec![Job::invalid(source_dir, dest_dir, SOURCE_FOLDER_MISSING)];
    }

    if is_read_only(dest_dir) {
        return vec![Job::invalid(source_dir, dest_dir, DEST_FOLDER_READ_ONLY)];
    }

    let files = enumerate_files(source_dir, recursive);

    let mut jobs: Vec<Job> = files
        .par_iter()
        .map(|file| file_to_folder_job(file, dest_dir, overwrite))
        .collect();
    jobs.sort_by(|a, b| a.source.cmp(&b.source));
    jobs
}

fn enumerate_files(source_dir: &Path, recursive: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(source_dir).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(1);
    }

    walker
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

fn is_read_only(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| meta.permissions().readonly())
        .unwrap_or(false)
}
