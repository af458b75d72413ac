/// Stable reference to a slot handed out by a `Pool`. Stays valid until the
/// slot is released, even while other slots come and go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Handle(usize);

/// Storage strategy a list acquires its nodes from. `acquire` returning
/// `None` means the pool could not make room for the value.
pub trait Pool<T> {
    fn acquire(&mut self, value: T) -> Option<Handle>;

    /// Gives the slot back, returning its value. `None` if the handle does
    /// not refer to an occupied slot.
    fn release(&mut self, handle: Handle) -> Option<T>;

    fn get(&self, handle: Handle) -> Option<&T>;

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T>;
}

/// Slab of slots over a `Vec`, with released slots kept on a free stack and
/// reused before the slab grows.
pub struct VecPool<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> VecPool<T> {
    pub fn new() -> VecPool<T> {
        VecPool {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> VecPool<T> {
        VecPool {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl<T> Default for VecPool<T> {
    fn default() -> VecPool<T> {
        VecPool::new()
    }
}

impl<T> Pool<T> for VecPool<T> {
    fn acquire(&mut self, value: T) -> Option<Handle> {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(value);
                Some(Handle(index))
            }
            None => {
                self.slots.push(Some(value));
                Some(Handle(self.slots.len() - 1))
            }
        }
    }

    fn release(&mut self, handle: Handle) -> Option<T> {
        let value = self.slots.get_mut(handle.0)?.take()?;
        self.free.push(handle.0);
        Some(value)
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0)?.as_ref()
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots.get_mut(handle.0)?.as_mut()
    }
}

/// `VecPool` with a hard slot limit. `acquire` fails once `limit` slots are
/// occupied, which makes allocation-failure paths reachable in tests.
pub struct BoundedPool<T> {
    inner: VecPool<T>,
    limit: usize,
}

impl<T> BoundedPool<T> {
    pub fn new(limit: usize) -> BoundedPool<T> {
        BoundedPool {
            inner: VecPool::with_capacity(limit),
            limit,
        }
    }

    pub fn occupied(&self) -> usize {
        self.inner.occupied()
    }
}

impl<T> Pool<T> for BoundedPool<T> {
    fn acquire(&mut self, value: T) -> Option<Handle> {
        if self.inner.occupied() >= self.limit {
            return None;
        }
        self.inner.acquire(value)
    }

    fn release(&mut self, handle: Handle) -> Option<T> {
        self.inner.release(handle)
    }

    fn get(&self, handle: Handle) -> Option<&T> {
        self.inner.get(handle)
    }

    fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.inner.get_mut(handle)
    }
}
