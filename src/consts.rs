//! # Constants
//!
//! Container layout, key sizes and the magic byte sequences used by the sniffers.

/// ASCII magic at offset 0 of every legacy OpenSSL container.
pub const SALT_HEADER: &[u8; 8] = b"Salted__";

/// Length of [`SALT_HEADER`].
pub const SALT_HEADER_SIZE: usize = 8;

/// Length of the salt stored right after the magic.
pub const SALT_SIZE: usize = 8;

/// Header + salt; ciphertext starts here.
pub const CONTAINER_PREFIX_SIZE: usize = SALT_HEADER_SIZE + SALT_SIZE;

/// AES-256 key length.
pub const KEY_SIZE: usize = 32;

/// AES block / CBC IV length.
pub const IV_SIZE: usize = 16;

/// Bytes of derived material needed for key + IV.
pub const KEY_AND_IV_SIZE: usize = KEY_SIZE + IV_SIZE;

/// AES block size.
pub const BLOCK_SIZE: usize = 16;

/// Buffer size for file-level streaming (64 KiB).
pub const STREAM_BUFFER_SIZE: usize = 64 * 1024;

/// Vendor (QNAP) container magic, format version 1.
pub const VENDOR_MAGIC_V1: &[u8; 7] = b"__QCS__";

/// Vendor (QNAP) container magic, format version 2.
pub const VENDOR_MAGIC_V2: &[u8; 9] = &[75, 54, 108, 114, 94, 125, 28, 49, 1];

/// Offset of the v2 compression flag byte.
pub const VENDOR_V2_FLAG_OFFSET: usize = 9;

/// Flag value meaning "compressible".
pub const VENDOR_V2_COMPRESSED: u8 = 1;
