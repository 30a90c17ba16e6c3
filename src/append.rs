//! Concurrent triangle append buffer (Deep Fried Edition)
//!
//! CPU reimplementation of a GPU append-structured-buffer: a fixed-capacity
//! slot array plus a single atomic counter. A producer claims a slot with
//! one `fetch_add` and then writes it with no further synchronization,
//! since no slot is ever handed to two producers. The counter is the only
//! point of inter-task communication in the whole pipeline.
//!
//! Reads happen only after every producer has finished: the buffer is
//! consumed by value ([`TriangleBuffer::into_triangles`]), so a populated
//! slice can never be observed concurrently with writes.
//!
//! Author: Moroya Sakamoto

use crate::mesh::Triangle;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-capacity, wait-free, multi-producer triangle sink
///
/// Capacity is preallocated to the caller's worst-case bound so no
/// resizing can ever race with writes. Claims past capacity bump the
/// counter but never write; they are reported by
/// [`TriangleBuffer::overflowed`] and fail the build.
pub struct TriangleBuffer {
    slots: Box<[UnsafeCell<MaybeUninit<Triangle>>]>,
    count: AtomicUsize,
}

// Safety: concurrent access to `slots` is confined to `append`, which only
// writes the slot whose index it uniquely claimed from `count`.
unsafe impl Sync for TriangleBuffer {}

impl TriangleBuffer {
    /// Create a buffer with `capacity` preallocated slots and a zeroed counter
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        TriangleBuffer {
            slots,
            count: AtomicUsize::new(0),
        }
    }

    /// Append one triangle, claiming the next slot atomically
    ///
    /// Wait-free: one `fetch_add`, one plain write. Returns `false` when
    /// the claimed slot lies past capacity; nothing is written in that
    /// case and the overflow is permanently visible to [`Self::overflowed`].
    #[inline]
    pub fn append(&self, triangle: Triangle) -> bool {
        let slot = self.count.fetch_add(1, Ordering::Relaxed);
        if slot >= self.slots.len() {
            return false;
        }
        // Safety: `slot` was claimed by exactly this call; no other append
        // writes it, and reads only occur after all producers are joined.
        unsafe {
            (*self.slots[slot].get()).write(triangle);
        }
        true
    }

    /// Number of valid triangles appended so far
    ///
    /// Exact once all producers have been joined.
    pub fn len(&self) -> usize {
        self.count.load(Ordering::Relaxed).min(self.slots.len())
    }

    /// True if no triangle has been appended
    pub fn is_empty(&self) -> bool {
        self.count.load(Ordering::Relaxed) == 0
    }

    /// Preallocated slot capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True if more appends were attempted than the capacity allows
    pub fn overflowed(&self) -> bool {
        self.count.load(Ordering::Relaxed) > self.slots.len()
    }

    /// Consume the buffer, returning the populated triangles
    ///
    /// Taking `self` by value requires exclusive ownership, which the
    /// dispatcher only has back after its parallel join: reading before
    /// the join is unrepresentable, not just forbidden by convention.
    /// Slots past `len` are never read.
    pub fn into_triangles(self) -> Vec<Triangle> {
        let len = self.len();
        let mut triangles = Vec::with_capacity(len);
        for slot in self.slots.iter().take(len) {
            // Safety: slots below `len` were initialized by a successful
            // append, and `&mut self`-equivalent ownership means no writer
            // is live.
            triangles.push(unsafe { (*slot.get()).assume_init() });
        }
        triangles
    }
}
