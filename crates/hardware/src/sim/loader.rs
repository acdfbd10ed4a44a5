//! Program image loading.
//!
//! This module turns raw program bytes into instruction words. It performs:
//! 1. **Binary loading:** Reads a raw image from disk.
//! 2. **Word assembly:** Packs big-endian bytes into 32-bit instruction words,
//!    zero-padding a trailing partial word.

use std::fs;
use std::path::Path;

use crate::common::error::SimError;

/// Packs big-endian bytes into instruction words.
pub fn words_from_be_bytes(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .collect()
}

/// Reads a raw big-endian program image from disk.
pub fn load_image(path: impl AsRef<Path>) -> Result<Vec<u32>, SimError> {
    let bytes = fs::read(path)?;
    Ok(words_from_be_bytes(&bytes))
}
