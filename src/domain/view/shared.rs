use super::owned::cell_count;
use super::*;
use crate::error::*;
use crate::util::*;
use std::mem::{align_of, size_of};
use sync_ptr::SyncMutPtr;

/// Grid backed by an anonymous `MAP_SHARED` mapping.
/// The mapping survives `fork`, so rows written by a child process
/// are visible to the parent once the child has been waited on.
/// It has no name, so concurrent runs can not collide,
/// and it is unmapped when the grid is dropped.
pub struct SharedGrid<T: Cell> {
    n: usize,
    len_bytes: usize,
    mapping_ptr: SyncMutPtr<u8>,
    _cell: std::marker::PhantomData<T>,
}

impl<T: Cell> SharedGrid<T> {
    /// Map a zeroed `n x n` grid.
    pub fn allocate(n: usize) -> Result<Self> {
        let len_bytes = cell_count(n)?
            .checked_mul(size_of::<T>())
            .ok_or_else(|| BenchError::Allocation {
                n,
                reason: "byte count overflows usize".to_string(),
            })?;

        let raw = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                len_bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if raw == libc::MAP_FAILED {
            return Err(BenchError::Allocation {
                n,
                reason: std::io::Error::last_os_error().to_string(),
            });
        }
        let mapping_ptr = unsafe { SyncMutPtr::new(raw as *mut u8) };
        debug_assert!(mapping_ptr.inner() as usize % align_of::<T>() == 0);

        Ok(SharedGrid {
            n,
            len_bytes,
            mapping_ptr,
            _cell: std::marker::PhantomData,
        })
    }

    fn bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(self.mapping_ptr.inner(), self.len_bytes)
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        unsafe {
            std::slice::from_raw_parts_mut(
                self.mapping_ptr.inner(),
                self.len_bytes,
            )
        }
    }
}

impl<T: Cell> GridView<T> for SharedGrid<T> {
    fn n(&self) -> usize {
        self.n
    }

    fn buffer(&self) -> &[T] {
        bytemuck::cast_slice(self.bytes())
    }

    fn buffer_mut(&mut self) -> &mut [T] {
        bytemuck::cast_slice_mut(self.bytes_mut())
    }

    fn is_process_shared(&self) -> bool {
        true
    }
}

impl<T: Cell> Drop for SharedGrid<T> {
    fn drop(&mut self) {
        let result = unsafe {
            libc::munmap(
                self.mapping_ptr.inner() as *mut libc::c_void,
                self.len_bytes,
            )
        };
        if result != 0 {
            log::warn!(
                "munmap of {}x{} shared grid failed: {}",
                self.n,
                self.n,
                std::io::Error::last_os_error()
            );
        }
    }
}
