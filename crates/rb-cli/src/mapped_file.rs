use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// A memory-mapped input sample. Empty files are not mapped.
pub struct MappedFile {
    mmap: Option<Mmap>,
    len: u64,
}

impl MappedFile {
    /// Open and memory-map a file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;

        let len = file
            .metadata()
            .with_context(|| format!("failed to read metadata for {}", path.display()))?
            .len();

        if len == 0 {
            return Ok(Self { mmap: None, len });
        }

        // SAFETY: The file must not be modified externally while mapped.
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("failed to mmap {}", path.display()))?;

        Ok(Self {
            mmap: Some(mmap),
            len,
        })
    }

    /// Total file size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The whole file as a zero-copy byte slice.
    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}
