//! tests/batch_ops_tests.rs
//! Plan → run: independence of jobs, source deletion, progress reporting

mod common;
use common::{test_password, write_encrypted, TEST_DATA, TEST_PASSWORD};

use saltcrypt_rs::attributes::OutputVisibility;
use saltcrypt_rs::batch_ops::decrypt_batch_with;
use saltcrypt_rs::{decrypt_batch, decrypt_job, plan_decrypt_jobs, BatchOptions, Job, Password};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// `enc/` with `count` encrypted files and an empty `out/`.
fn folder_setup(count: usize) -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let src_dir = dir.path().join("enc");
    let out_dir = dir.path().join("out");
    fs::create_dir(&src_dir).unwrap();
    fs::create_dir(&out_dir).unwrap();
    for i in 0..count {
        write_encrypted(&src_dir.join(format!("file_{i:02}.enc")), TEST_DATA, TEST_PASSWORD);
    }
    (dir, src_dir, out_dir)
}

#[test]
fn batch_decrypts_whole_folder() {
    let (_dir, src_dir, out_dir) = folder_setup(8);
    let jobs = plan_decrypt_jobs(&src_dir, &out_dir, false, false);

    let report = decrypt_batch(&jobs, &test_password(), &BatchOptions::default(), None).unwrap();
    assert_eq!(report.decrypt_results.len(), 8);
    assert_eq!(report.decrypted_ok(), 8);
    assert!(report.delete_results.is_empty());
    assert!(!report.has_failures());

    for i in 0..8 {
        let out = out_dir.join(format!("file_{i:02}.enc"));
        assert_eq!(fs::read(&out).unwrap(), TEST_DATA);
    }
}

#[test]
fn one_failure_does_not_affect_siblings() {
    let (_dir, src_dir, out_dir) = folder_setup(1);
    write_encrypted(&src_dir.join("other_password.enc"), TEST_DATA, "different");
    fs::write(src_dir.join("readme.txt"), b"plain").unwrap();

    let jobs = plan_decrypt_jobs(&src_dir, &out_dir, false, false);
    assert_eq!(jobs.len(), 3);

    let options = BatchOptions::new().with_threads(Some(2));
    let report = decrypt_batch(&jobs, &test_password(), &options, None).unwrap();

    assert_eq!(report.decrypt_results.len(), 3);
    assert_eq!(report.decrypted_ok(), 1);
    assert_eq!(report.decrypt_failed(), 2);
    assert!(report.has_failures());

    let ok = report.decrypt_results.iter().find(|r| r.ok).unwrap();
    assert_eq!(ok.source, src_dir.join("file_00.enc"));
    assert!(ok.error_message.is_empty());
    assert_eq!(fs::read(&ok.dest).unwrap(), TEST_DATA);

    let not_encrypted = report
        .decrypt_results
        .iter()
        .find(|r| r.source.ends_with("readme.txt"))
        .unwrap();
    assert_eq!(
        not_encrypted.error_message,
        "File is not encrypted with the OpenSSL method."
    );

    let bad_password = report
        .decrypt_results
        .iter()
        .find(|r| r.source.ends_with("other_password.enc"))
        .unwrap();
    assert!(bad_password.error_message.starts_with("could not decrypt: "));
    assert!(!bad_password.dest.exists());
}

#[test]
fn delete_only_after_successful_decrypt() {
    let (_dir, src_dir, out_dir) = folder_setup(2);
    write_encrypted(&src_dir.join("wrong.enc"), TEST_DATA, "wrong");

    let jobs = plan_decrypt_jobs(&src_dir, &out_dir, false, false);
    let options = BatchOptions::new().with_delete_source_on_success(true);
    let report = decrypt_batch(&jobs, &test_password(), &options, None).unwrap();

    assert_eq!(report.decrypted_ok(), 2);
    assert_eq!(report.decrypt_failed(), 1);
    assert_eq!(report.delete_results.len(), 2);
    assert_eq!(report.deleted_ok(), 2);

    assert!(!src_dir.join("file_00.enc").exists());
    assert!(!src_dir.join("file_01.enc").exists());
    assert!(src_dir.join("wrong.enc").exists());
}

#[test]
fn decrypt_job_with_delete() {
    let (_dir, src_dir, out_dir) = folder_setup(1);
    let source = src_dir.join("file_00.enc");
    let jobs = plan_decrypt_jobs(&source, &out_dir, false, false);

    let (decrypted, deleted) = decrypt_job(&jobs[0], &test_password(), true);
    assert!(decrypted.ok, "{}", decrypted.error_message);
    let deleted = deleted.expect("delete requested");
    assert!(deleted.ok);
    assert_eq!(deleted.target, source);
    assert!(!source.exists());
}

#[test]
fn decrypt_job_failure_keeps_source() {
    let (_dir, src_dir, out_dir) = folder_setup(1);
    let source = src_dir.join("file_00.enc");
    let jobs = plan_decrypt_jobs(&source, &out_dir, false, false);

    let (decrypted, deleted) = decrypt_job(&jobs[0], &Password::from("wrong"), true);
    assert!(!decrypted.ok);
    assert!(deleted.is_none());
    assert!(source.exists());
}

#[test]
fn progress_reports_each_job_once() {
    let (_dir, src_dir, out_dir) = folder_setup(5);
    fs::write(src_dir.join("plain.txt"), b"plain").unwrap();
    let jobs = plan_decrypt_jobs(&src_dir, &out_dir, false, false);
    let total = jobs.len();

    let seen = Mutex::new(Vec::new());
    let tick: &(dyn Fn(usize, usize) + Sync) = &|completed: usize, reported_total: usize| {
        assert_eq!(reported_total, total);
        seen.lock().unwrap().push(completed);
    };

    decrypt_batch(&jobs, &test_password(), &BatchOptions::default(), Some(tick)).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen, (1..=total).collect::<Vec<_>>());
}

#[test]
fn progress_arrives_in_order_under_contention() {
    let dir = tempfile::tempdir().unwrap();
    let jobs: Vec<Job> = (0..3000)
        .flat_map(|i| {
            plan_decrypt_jobs(dir.path().join(format!("missing_{i}")), dir.path(), false, false)
        })
        .collect();
    let total = jobs.len();
    assert_eq!(total, 3000);

    let seen = Mutex::new(Vec::with_capacity(total));
    let tick: &(dyn Fn(usize, usize) + Sync) = &|completed: usize, _total: usize| {
        if completed % 7 == 0 {
            thread::sleep(Duration::from_micros(200));
        }
        seen.lock().unwrap().push(completed);
    };

    let options = BatchOptions::new().with_threads(Some(8));
    decrypt_batch(&jobs, &test_password(), &options, Some(tick)).unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen, (1..=total).collect::<Vec<_>>());
}

/// Removes the encrypted source once its output is complete, before the batch deletes it.
struct SourceVanishes(PathBuf);

impl OutputVisibility for SourceVanishes {
    fn hide(&self, _path: &Path) {}
    fn show(&self, _path: &Path) {
        fs::remove_file(&self.0).unwrap();
    }
}

#[test]
fn failed_delete_is_recorded_and_decrypt_stays_ok() {
    let (_dir, src_dir, out_dir) = folder_setup(1);
    let source = src_dir.join("file_00.enc");
    let jobs = plan_decrypt_jobs(&src_dir, &out_dir, false, false);

    let options = BatchOptions::new().with_delete_source_on_success(true);
    let report = decrypt_batch_with(
        &jobs,
        &test_password(),
        &options,
        None,
        &SourceVanishes(source.clone()),
    )
    .unwrap();

    assert_eq!(report.decrypt_results.len(), 1);
    assert!(report.decrypt_results[0].ok);
    assert_eq!(fs::read(out_dir.join("file_00.enc")).unwrap(), TEST_DATA);

    assert_eq!(report.delete_results.len(), 1);
    let deleted = &report.delete_results[0];
    assert_eq!(deleted.target, source);
    assert!(!deleted.ok);
    assert!(!deleted.error_message.is_empty());
    assert!(report.has_failures());
}

#[test]
fn invalid_plan_is_reported_not_raised() {
    let report = decrypt_batch(
        &plan_decrypt_jobs("/nonexistent", "/anywhere", false, false),
        &test_password(),
        &BatchOptions::default(),
        None,
    )
    .unwrap();

    assert_eq!(report.decrypt_results.len(), 1);
    assert_eq!(report.decrypt_results[0].error_message, "Source does not exist");
}
