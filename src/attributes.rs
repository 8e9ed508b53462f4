//! Output file visibility while it is being written.
//!
//! On Windows an in-progress output file is marked hidden and unhidden once the last
//! block is written. Elsewhere this is a no-op. Hook failures are ignored: the hidden
//! bit is cosmetic and never affects the decrypted bytes.

use std::path::Path;

/// Hook around the streaming write of an output file.
pub trait OutputVisibility: Sync {
    /// Called right after the output file is created.
    fn hide(&self, path: &Path);
    /// Called after the output file is fully written.
    fn show(&self, path: &Path);
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisibility;

impl OutputVisibility for NoopVisibility {
    fn hide(&self, _path: &Path) {}
    fn show(&self, _path: &Path) {}
}

/// Sets the hidden attribute during the write on Windows; no-op on other platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenWhileWriting;

impl OutputVisibility for HiddenWhileWriting {
    fn hide(&self, path: &Path) {
        #[cfg(windows)]
        win::set_hidden(path, true);
        #[cfg(not(windows))]
        let _ = path;
    }

    fn show(&self, path: &Path) {
        #[cfg(windows)]
        win::set_hidden(path, false);
        #[cfg(not(windows))]
        let _ = path;
    }
}

#[cfg(windows)]
mod win {
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::path::Path;
    use windows_sys::Win32::Storage::FileSystem::{
        GetFileAttributesW, SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN, INVALID_FILE_ATTRIBUTES,
    };

    pub(super) fn set_hidden(path: &Path, hidden: bool) {
        let name: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();

        // SAFETY: `name` is a NUL-terminated UTF-16 string that outlives both calls.
        unsafe {
            let attrs = GetFileAttributesW(name.as_ptr());
            if attrs == INVALID_FILE_ATTRIBUTES {
                return;
            }
            let next = if hidden {
                attrs | FILE_ATTRIBUTE_HIDDEN
            } else {
                attrs & !FILE_ATTRIBUTE_HIDDEN
            };
            SetFileAttributesW(name.as_ptr(), next);
        }
    }
}
