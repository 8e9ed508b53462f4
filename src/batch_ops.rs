//! src/batch_ops.rs
//! Parallel execution of planned jobs.
//!
//! Each job is decrypted at most once, on exactly one worker. A failing job never
//! stops its siblings: every outcome, good or bad, comes back as a result value.

use crate::aliases::Password;
use crate::attributes::{HiddenWhileWriting, OutputVisibility};
use crate::config::BatchOptions;
use crate::decryptor::decrypt_file_with;
use crate::error::SaltcryptError;
use crate::planner::Job;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Outcome of decrypting one job. Exactly one per job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptResult {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub ok: bool,
    /// Empty when `ok`.
    pub error_message: String,
}

/// Outcome of removing an encrypted source after it decrypted successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub target: PathBuf,
    pub ok: bool,
    /// Empty when `ok`.
    pub error_message: String,
}

/// Everything a batch run produced, in no particular order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub decrypt_results: Vec<DecryptResult>,
    pub delete_results: Vec<DeleteResult>,
}

impl BatchReport {
    pub fn decrypted_ok(&self) -> usize {
        self.decrypt_results.iter().filter(|r| r.ok).count()
    }

    pub fn decrypt_failed(&self) -> usize {
        self.decrypt_results.iter().filter(|r| !r.ok).count()
    }

    pub fn deleted_ok(&self) -> usize {
        self.delete_results.iter().filter(|r| r.ok).count()
    }

    pub fn delete_failed(&self) -> usize {
        self.delete_results.iter().filter(|r| !r.ok).count()
    }

    /// True when any decrypt or delete failed; drives the process exit code.
    pub fn has_failures(&self) -> bool {
        self.decrypt_failed() > 0 || self.delete_failed() > 0
    }
}

/// Run one job.
///
/// An invalid job is reported with its planning reason and the cipher is never
/// touched. The source is only removed when `delete_source` is set and the decrypt
/// succeeded.
pub fn decrypt_job(
    job: &Job,
    password: &Password,
    delete_source: bool,
) -> (DecryptResult, Option<DeleteResult>) {
    decrypt_job_with(job, password, delete_source, &HiddenWhileWriting)
}

/// [`decrypt_job`] with a caller-supplied visibility hook around the write.
pub fn decrypt_job_with(
    job: &Job,
    password: &Password,
    delete_source: bool,
    visibility: &dyn OutputVisibility,
) -> (DecryptResult, Option<DeleteResult>) {
    if !job.is_valid() {
        return (
            DecryptResult {
                source: job.source().to_path_buf(),
                dest: job.dest().to_path_buf(),
                ok: false,
                error_message: job.reason().to_string(),
            },
            None,
        );
    }

    let decrypted = match decrypt_file_with(job.source(), password, job.dest(), visibility) {
        Ok(_) => DecryptResult {
            source: job.source().to_path_buf(),
            dest: job.dest().to_path_buf(),
            ok: true,
            error_message: String::new(),
        },
        Err(e) => {
            warn!(source = %job.source().display(), error = %e, "decrypt failed");
            DecryptResult {
                source: job.source().to_path_buf(),
                dest: job.dest().to_path_buf(),
                ok: false,
                error_message: e.to_string(),
            }
        }
    };

    let deleted = (decrypted.ok && delete_source).then(|| delete_source_file(job.source()));
    (decrypted, deleted)
}

pub(crate) fn delete_source_file(path: &Path) -> DeleteResult {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed encrypted source");
            DeleteResult {
                target: path.to_path_buf(),
                ok: true,
                error_message: String::new(),
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not remove encrypted source");
            DeleteResult {
                target: path.to_path_buf(),
                ok: false,
                error_message: e.to_string(),
            }
        }
    }
}

/// Decrypt every job on a bounded worker pool.
///
/// `progress` is called once per finished job with `(completed, total)`. Calls are
/// serialized and `completed` runs 1, 2, .. `total` in that order, whichever worker
/// finished the job.
///
/// # Errors
///
/// Only [`SaltcryptError::WorkerPool`], when the pool cannot be built. Per-file
/// failures are in the returned [`BatchReport`].
pub fn decrypt_batch(
    jobs: &[Job],
    password: &Password,
    options: &BatchOptions,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) -> Result<BatchReport, SaltcryptError> {
    decrypt_batch_with(jobs, password, options, progress, &HiddenWhileWriting)
}

/// [`decrypt_batch`] with a caller-supplied visibility hook for every output file.
pub fn decrypt_batch_with(
    jobs: &[Job],
    password: &Password,
    options: &BatchOptions,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
    visibility: &dyn OutputVisibility,
) -> Result<BatchReport, SaltcryptError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0))
        .build()
        .map_err(|e| SaltcryptError::WorkerPool(e.to_string()))?;

    let total = jobs.len();
    let completed = Mutex::new(0usize);
    info!(total, threads = pool.current_num_threads(), "starting batch");

    let outcomes: Vec<(DecryptResult, Option<DeleteResult>)> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let outcome = decrypt_job_with(
                    job,
                    password,
                    options.delete_source_on_success,
                    visibility,
                );
                report_progress(&completed, total, progress);
                outcome
            })
            .collect()
    });

    let mut report = BatchReport {
        decrypt_results: Vec::with_capacity(total),
        delete_results: Vec::new(),
    };
    for (decrypted, deleted) in outcomes {
        report.decrypt_results.push(decrypted);
        report.delete_results.extend(deleted);
    }

    info!(
        decrypted = report.decrypted_ok(),
        failed = report.decrypt_failed(),
        deleted = report.deleted_ok(),
        delete_failed = report.delete_failed(),
        "batch finished"
    );
    Ok(report)
}

/// The lock is held across the callback so counts arrive in order.
fn report_progress(
    completed: &Mutex<usize>,
    total: usize,
    progress: Option<&(dyn Fn(usize, usize) + Sync)>,
) {
    let mut done = completed.lock().unwrap_or_else(PoisonError::into_inner);
    *done += 1;
    if let Some(tick) = progress {
        tick(*done, total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_job_is_reported_without_decrypting() {
        let job = Job::invalid("in.enc", "out.bin", "Encrypted file doesn't exist");
        let (decrypted, deleted) = decrypt_job(&job, &Password::from("pw"), true);
        assert!(!decrypted.ok);
        assert_eq!(decrypted.error_message, "Encrypted file doesn't exist");
        assert!(deleted.is_none());
    }

    #[test]
    fn deleting_a_missing_source_is_a_failed_result() {
        let dir = tempfile::tempdir().unwrap();
        let result = delete_source_file(&dir.path().join("gone.enc"));
        assert!(!result.ok);
        assert!(!result.error_message.is_empty());
    }

    #[test]
    fn report_counts() {
        let ok = DecryptResult {
            source: "a".into(),
            dest: "b".into(),
            ok: true,
            error_message: String::new(),
        };
        let bad = DecryptResult {
            ok: false,
            error_message: "x".into(),
            ..ok.clone()
        };
        let report = BatchReport {
            decrypt_results: vec![ok, bad],
            delete_results: vec![],
        };
        assert_eq!(report.decrypted_ok(), 1);
        assert_eq!(report.decrypt_failed(), 1);
        assert!(report.has_failures());
        assert!(!BatchReport::default().has_failures());
    }

    #[test]
    fn empty_batch_is_empty_report() {
        let report =
            decrypt_batch(&[], &Password::from("pw"), &BatchOptions::default(), None).unwrap();
        assert_eq!(report, BatchReport::default());
    }
}
