//! Destination region and write cursor for one transfer.

use thiserror::Error;

/// A chunk would run past the end of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("destination full: {required} bytes needed, capacity is {capacity}")]
pub struct DestinationFull {
    pub capacity: usize,
    pub required: usize,
}

/// Caller-owned destination plus the cursor the receiver advances.
///
/// `base_address` is an opaque label for where the region lives (a load
/// address); it is only used for reporting. Writes go through the borrowed
/// slice and never past its end.
#[derive(Debug)]
pub struct Session<'buf> {
    dest: &'buf mut [u8],
    base_address: u64,
    written: usize,
}

impl<'buf> Session<'buf> {
    pub fn new(dest: &'buf mut [u8], base_address: u64) -> Self {
        Self {
            dest,
            base_address,
            written: 0,
        }
    }

    /// Rewind the cursor to the base. Previously written bytes stay in place.
    pub fn reset(&mut self) {
        self.written = 0;
    }

    pub fn base_address(&self) -> u64 {
        self.base_address
    }

    /// Address the next byte will be written to. Saturates at `u64::MAX`
    /// for a region that runs off the end of the address space.
    pub fn write_cursor(&self) -> u64 {
        self.base_address.saturating_add(self.written as u64)
    }

    /// Address one past the last byte of the region, or `None` if the region
    /// does not fit below `u64::MAX`.
    pub fn end_address(&self) -> Option<u64> {
        u64::try_from(self.dest.len())
            .ok()
            .and_then(|len| self.base_address.checked_add(len))
    }

    pub fn total_bytes(&self) -> usize {
        self.written
    }

    pub fn capacity(&self) -> usize {
        self.dest.len()
    }

    /// Bytes written since the last reset.
    pub fn data(&self) -> &[u8] {
        &self.dest[..self.written]
    }

    /// Copy `chain` in order at the cursor and advance past it.
    ///
    /// All-or-nothing: if the whole chain does not fit, nothing is written and
    /// the cursor stays put.
    pub fn append(&mut self, chain: &[&[u8]]) -> Result<usize, DestinationFull> {
        let len: usize = chain.iter().map(|segment| segment.len()).sum();
        let capacity = self.dest.len();
        let end = self
            .written
            .checked_add(len)
            .filter(|&end| end <= capacity)
            .ok_or(DestinationFull {
                capacity,
                required: self.written.saturating_add(len),
            })?;

        for segment in chain {
            let start = self.written;
            self.dest[start..start + segment.len()].copy_from_slice(segment);
            self.written += segment.len();
        }
        debug_assert_eq!(self.written, end);
        Ok(len)
    }
}
