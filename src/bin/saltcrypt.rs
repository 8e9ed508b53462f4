// src/bin/saltcrypt.rs
//! Batch decryptor for OpenSSL "Salted__" backups: plan, confirm, decrypt, summarize.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use saltcrypt_rs::{decrypt_batch, plan_decrypt_jobs, BatchOptions, BatchReport, Password};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saltcrypt")]
#[command(version)]
#[command(about = "Decrypt files encrypted with the OpenSSL \"Salted__\" AES-256-CBC method", long_about = None)]
struct Cli {
    /// Encrypted file or folder
    #[arg(short = 'e', long = "encrypted")]
    encrypted: PathBuf,

    /// Where to place the decrypted file(s)
    #[arg(short = 'd', long = "decrypted")]
    decrypted: PathBuf,

    /// Password; prompted for when omitted
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Include subfolders
    #[arg(short = 's', long)]
    subfolders: bool,

    /// Overwrite file(s) in the output
    #[arg(short = 'o', long)]
    overwrite: bool,

    /// Delete encrypted files once decrypted
    #[arg(short = 'r', long = "removeencrypted")]
    remove_encrypted: bool,

    /// Per-file results and info-level logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Answer yes to all confirmation prompts
    #[arg(short = 'y', long)]
    silent: bool,

    /// Worker threads (default: one per core)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.remove_encrypted && !cli.silent && !confirm_delete()? {
        println!("Nothing done.");
        return Ok(ExitCode::SUCCESS);
    }

    let password = read_password(cli.password.as_deref())?;
    let options = BatchOptions::new()
        .with_overwrite(cli.overwrite)
        .with_recursive(cli.subfolders)
        .with_delete_source_on_success(cli.remove_encrypted)
        .with_threads(cli.threads);

    let started = Instant::now();

    let jobs = plan_decrypt_jobs(
        &cli.encrypted,
        &cli.decrypted,
        options.overwrite,
        options.recursive,
    );
    info!(jobs = jobs.len(), "planned");

    let bar = progress_bar(jobs.len() as u64)?;
    let tick: &(dyn Fn(usize, usize) + Sync) = &|_completed: usize, _total: usize| bar.inc(1);
    let report = decrypt_batch(&jobs, &password, &options, Some(tick))
        .context("could not start decryption workers")?;
    bar.finish_and_clear();

    show_results(&report, cli.verbose, started.elapsed());

    Ok(if report.has_failures() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn confirm_delete() -> Result<bool> {
    print!("Encrypted files will be deleted once decrypted. Continue? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn read_password(given: Option<&str>) -> Result<Password> {
    if let Some(pw) = given.filter(|pw| !pw.is_empty()) {
        return Ok(Password::from(pw));
    }
    let typed = rpassword::prompt_password(">> Enter password: ")
        .context("failed to read password")?;
    Ok(Password::from(typed))
}

fn progress_bar(total: u64) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("Decrypting Files [{elapsed_precise}] [{wide_bar:.green}] {pos}/{len} ({eta})")
            .context("invalid progress template")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

fn show_results(report: &BatchReport, verbose: bool, elapsed: Duration) {
    if verbose && report.decrypt_results.len() > 1 {
        show_file_results(report);
    }

    println!(
        "{:>22} {:>11} {:>15} {:>10} {:>14}",
        "Total encrypted files", "Decrypt Ok", "Decrypt Failed", "Delete Ok", "Delete Failed"
    );
    println!(
        "{:>22} {:>11} {:>15} {:>10} {:>14}",
        report.decrypt_results.len(),
        report.decrypted_ok(),
        report.decrypt_failed(),
        report.deleted_ok(),
        report.delete_failed()
    );

    if !verbose || report.decrypt_results.len() <= 1 {
        for failed in report.decrypt_results.iter().filter(|r| !r.ok) {
            println!("{}: {}", failed.source.display(), failed.error_message);
        }
        println!("Add --verbose to see details.");
    }

    println!("Time taken: {:.2?}", elapsed);
}

fn show_file_results(report: &BatchReport) {
    for result in &report.decrypt_results {
        let status = if result.ok { "OK" } else { "Fail" };
        print!(
            "{status:<4}  {} -> {}",
            result.source.display(),
            result.dest.display()
        );
        if !result.ok {
            print!("  ({})", result.error_message);
        }

        if let Some(deleted) = report
            .delete_results
            .iter()
            .find(|d| d.target == result.source)
        {
            if deleted.ok {
                print!("  [Deleted]");
            } else {
                print!("  [Delete failed: {}]", deleted.error_message);
            }
        }
        println!();
    }
}
