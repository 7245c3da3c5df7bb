//! Fixed-element-size slot pools with free-index reuse.

use smallvec::SmallVec;

/// Initial element capacity; growth doubles from here.
const FIRST_CAPACITY: usize = 8;

/// A growable pool of `T` handing out stable `u32` indices.
///
/// Freed interior indices go on a free list and are reused by later
/// allocations; freeing the highest-numbered live index shrinks the pool
/// directly instead, so LIFO alloc/free keeps the pool compact. An index
/// returned by [`SlotPool::alloc`] is unique among currently-live indices
/// until its matching [`SlotPool::free`].
#[derive(Debug)]
pub struct SlotPool<T> {
    /// Element storage; `0..elements.len()` is the index space.
    elements: Vec<T>,
    /// Interior holes below `elements.len()`. Inline for the common case
    /// of pools with few holes.
    free: SmallVec<[u32; 8]>,
}

impl<T> SlotPool<T> {
    /// Create an empty pool. No storage is acquired until the first alloc.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            free: SmallVec::new(),
        }
    }

    /// Store `value` and return its index.
    ///
    /// Pops the free list when it has an entry (the dead element is
    /// overwritten); otherwise appends, doubling the backing buffer from a
    /// floor of 8 when full.
    pub fn alloc(&mut self, value: T) -> u32 {
        if let Some(index) = self.free.pop() {
            self.elements[index as usize] = value;
            return index;
        }
        if self.elements.len() == self.elements.capacity() {
            let target = (self.elements.capacity() * 2).max(FIRST_CAPACITY);
            self.elements.reserve_exact(target - self.elements.len());
        }
        let index = self.elements.len() as u32;
        self.elements.push(value);
        index
    }

    /// Release an index.
    ///
    /// The highest live index is popped off the element buffer; anything
    /// lower becomes an interior hole on the free list. Freeing an index
    /// that is already free is a logic error upstream; the table layer
    /// guards against it by checking occupancy first.
    pub fn free(&mut self, index: u32) {
        if index as usize + 1 == self.elements.len() {
            self.elements.pop();
            // Trailing holes exposed by the pop are unreachable until the
            // pool regrows over them, which alloc does via the free list.
            return;
        }
        self.free.push(index);
    }

    /// Shared access to the element at `index`.
    ///
    /// Indices on the free list still resolve (the dead value is
    /// observable); liveness is the caller's bookkeeping, exactly as with
    /// the raw element array this pool replaces.
    pub fn get(&self, index: u32) -> Option<&T> {
        self.elements.get(index as usize)
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.elements.get_mut(index as usize)
    }

    /// Extent of the index space (live elements plus interior holes).
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the index space is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of live elements.
    pub fn live_count(&self) -> usize {
        self.elements.len() - self.free.len()
    }

    /// Current element capacity of the backing buffer.
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Drop every element and both backing buffers. The pool stays valid
    /// and empty.
    pub fn clear(&mut self) {
        self.elements = Vec::new();
        self.free = SmallVec::new();
    }
}

impl<T> Default for SlotPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
