//! src/config.rs
//! Batch policy flags and worker pool sizing.

/// Options for [`plan_decrypt_jobs`](crate::plan_decrypt_jobs) and
/// [`decrypt_batch`](crate::decrypt_batch).
///
/// Everything defaults to off; `threads: None` lets rayon size the pool from the
/// available parallelism.
///
/// # Thread Safety
///
/// Plain data (`Send + Sync`), shared by reference with every worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Replace output files that already exist.
    pub overwrite: bool,
    /// Descend into subfolders when the source is a folder.
    pub recursive: bool,
    /// Remove each encrypted source once it decrypted successfully.
    pub delete_source_on_success: bool,
    /// Worker pool size.
    pub threads: Option<usize>,
}

impl BatchOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    #[must_use]
    pub fn with_delete_source_on_success(mut self, delete: bool) -> Self {
        self.delete_source_on_success = delete;
        self
    }

    /// Set the worker count (minimum 1). `None` restores the rayon default.
    #[must_use]
    pub fn with_threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads.map(|n| n.max(1));
        self
    }
}
