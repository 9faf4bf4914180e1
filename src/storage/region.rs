use memmap2::{MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io;
use std::ops::{Deref, DerefMut};
use std::path::Path;

/// Memory-mapped backing storage for a [`RingBuffer`](crate::ring::RingBuffer).
///
/// The region only hands out bytes; the ring borrows them and keeps its own
/// indices, so nothing about ring state is written to the mapping.
pub struct MmapRegion {
    file: Option<File>,
    mmap: MmapMut,
}

impl MmapRegion {
    pub fn anonymous(capacity: usize) -> io::Result<Self> {
        check_capacity(capacity)?;
        let mmap = MmapOptions::new().len(capacity).map_anon()?;
        tracing::debug!(capacity, "mapped anonymous ring storage");
        Ok(Self { file: None, mmap })
    }

    /// Maps a fresh file of exactly `capacity` bytes, truncating any old one.
    pub fn create<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        check_capacity(capacity)?;
        let path = path.as_ref();

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(capacity as u64)?;

        let mmap = unsafe { MmapOptions::new().len(capacity).map_mut(&file)? };
        tracing::debug!(path = %path.display(), capacity, "mapped file ring storage");

        Ok(Self {
            file: Some(file),
            mmap,
        })
    }

    /// Maps an existing file; its length becomes the region's capacity.
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let len = file.metadata()?.len() as usize;
        if len == 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "storage file is empty",
            ));
        }

        let mmap = unsafe { MmapOptions::new().len(len).map_mut(&file)? };
        tracing::debug!(path = %path.display(), capacity = len, "reopened file ring storage");

        Ok(Self {
            file: Some(file),
            mmap,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.mmap
    }

    #[inline]
    pub fn is_file_backed(&self) -> bool {
        self.file.is_some()
    }

    /// Writes dirty pages back to the file. A no-op for anonymous regions.
    pub fn flush(&self) -> io::Result<()> {
        if self.is_file_backed() {
            self.mmap.flush()?;
        }
        Ok(())
    }
}

impl Deref for MmapRegion {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.mmap
    }
}

impl DerefMut for MmapRegion {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.mmap
    }
}

impl Drop for MmapRegion {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            tracing::warn!(%err, "failed to flush ring storage on drop");
        }
    }
}

fn check_capacity(capacity: usize) -> io::Result<()> {
    if capacity == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "ring storage capacity must be non-zero",
        ));
    }
    Ok(())
}
