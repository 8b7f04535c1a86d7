//! Memory management utilities
//!
//! [`Arena`] is a bump allocator over a reserved address range that is committed
//! page by page. Growth is an explicit [`Arena::ensure_committed`] call made
//! before every copy into the arena.

use bytemuck::Pod;
use thiserror::Error;

/// Granularity of arena commits
pub const PAGE_SIZE: usize = 4096;

/// Arena allocation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// The request would run past the reserved range
    #[error("Out of memory: {requested} bytes requested, {available} reserved bytes left")]
    OutOfReservedMemory {
        /// Bytes the allocation needed
        requested: usize,
        /// Reserved bytes remaining past the bump pointer
        available: usize,
    },

    /// Alignment was zero or not a power of two
    #[error("Invalid alignment: {0}")]
    InvalidAlignment(usize),

    /// Zero-sized allocations are rejected
    #[error("Zero-sized allocation")]
    ZeroSize,
}

/// Location of an allocation inside an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaAllocation {
    /// Byte offset from the start of the arena
    pub offset: usize,
    /// Length in bytes
    pub len: usize,
}

/// Reserve-then-commit bump allocator
pub struct Arena {
    memory: Vec<u8>,
    reserved: usize,
    bump: usize,
}

impl Arena {
    /// Reserve `size` bytes, rounded up to whole pages. Zero reserves one page.
    pub fn with_reserve(size: usize) -> Self {
        let size = if size == 0 { PAGE_SIZE } else { size };
        let reserved = size.div_ceil(PAGE_SIZE) * PAGE_SIZE;
        Self {
            memory: Vec::with_capacity(reserved),
            reserved,
            bump: 0,
        }
    }

    /// Bytes handed out so far, including alignment padding
    pub fn used(&self) -> usize {
        self.bump
    }

    /// Bytes currently committed
    pub fn committed(&self) -> usize {
        self.memory.len()
    }

    /// Total reserved bytes
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Round the bump pointer up to `alignment`
    pub fn align(&mut self, alignment: usize) -> Result<(), ArenaError> {
        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment(alignment));
        }
        let mask = alignment - 1;
        self.bump = (self.bump + mask) & !mask;
        Ok(())
    }

    /// Commit whole pages until at least `bytes` past the bump pointer are usable
    pub fn ensure_committed(&mut self, bytes: usize) -> Result<(), ArenaError> {
        let needed = self.bump.saturating_add(bytes);
        if needed > self.reserved {
            return Err(ArenaError::OutOfReservedMemory {
                requested: bytes,
                available: self.reserved.saturating_sub(self.bump),
            });
        }
        if needed > self.memory.len() {
            let target = needed.div_ceil(PAGE_SIZE) * PAGE_SIZE;
            log::trace!("Arena commit {} -> {} bytes", self.memory.len(), target);
            self.memory.resize(target, 0);
        }
        Ok(())
    }

    /// Copy `source` into the arena without padding
    pub fn allocate_unaligned(&mut self, source: &[u8]) -> Result<ArenaAllocation, ArenaError> {
        if source.is_empty() {
            return Err(ArenaError::ZeroSize);
        }
        self.ensure_committed(source.len())?;
        let offset = self.bump;
        self.memory[offset..offset + source.len()].copy_from_slice(source);
        self.bump += source.len();
        Ok(ArenaAllocation {
            offset,
            len: source.len(),
        })
    }

    /// Copy `source` into the arena at the next `alignment` boundary
    pub fn allocate(&mut self, source: &[u8], alignment: usize) -> Result<ArenaAllocation, ArenaError> {
        if source.is_empty() {
            return Err(ArenaError::ZeroSize);
        }
        let saved = self.bump;
        self.align(alignment)?;
        self.allocate_unaligned(source).inspect_err(|_| self.bump = saved)
    }

    /// Copy a plain-old-data value into the arena at its natural alignment
    pub fn allocate_value<T: Pod>(&mut self, value: &T) -> Result<ArenaAllocation, ArenaError> {
        self.allocate(bytemuck::bytes_of(value), std::mem::align_of::<T>())
    }

    /// Bytes of a previous allocation
    pub fn bytes(&self, allocation: ArenaAllocation) -> &[u8] {
        &self.memory[allocation.offset..allocation.offset + allocation.len]
    }

    /// Read back a value stored with [`Arena::allocate_value`]
    pub fn read_value<T: Pod>(&self, allocation: ArenaAllocation) -> T {
        bytemuck::pod_read_unaligned(self.bytes(allocation))
    }

    /// Rewind the bump pointer; committed pages stay committed
    pub fn reset(&mut self) {
        self.bump = 0;
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::with_reserve(0)
    }
}
