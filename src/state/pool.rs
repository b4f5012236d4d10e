//! Reusable-object pool.
//!
//! Items are never dropped once allocated. `live` lists the indices that are
//! currently in use, in the order they were handed out. A new item is only
//! allocated when every allocated item is live, so the pool never grows past
//! the historical peak of simultaneously live items.

pub trait Poolable {
    fn is_free(&self) -> bool;
}

#[derive(Debug)]
pub struct Pool<T> {
    all: Vec<T>,
    live: Vec<usize>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Pool {
            all: Vec::new(),
            live: Vec::new(),
        }
    }
}

impl<T: Poolable> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out an item: a fresh one from `alloc` when nothing can be
    /// recycled, otherwise the first free item after `reuse` has re-pointed
    /// it. `reuse` must leave the item non-free.
    pub fn acquire(
        &mut self,
        alloc: impl FnOnce() -> T,
        reuse: impl FnOnce(&mut T),
    ) -> Option<usize> {
        if self.all.len() <= self.live.len() {
            let index = self.all.len();
            self.all.push(alloc());
            self.live.push(index);
            log::trace!("pool: allocated slot {index}");
            return Some(index);
        }

        match self.all.iter().position(|item| item.is_free()) {
            Some(index) => {
                reuse(&mut self.all[index]);
                debug_assert!(!self.all[index].is_free(), "reuse left slot {index} free");
                self.live.push(index);
                log::trace!("pool: recycled slot {index}");
                Some(index)
            }
            None => {
                // A live item was freed without being released.
                log::error!(
                    "pool: {} allocated, {} live, but no free slot",
                    self.all.len(),
                    self.live.len()
                );
                debug_assert!(false, "pool bookkeeping violated: no free slot");
                None
            }
        }
    }

    /// Returns `index` to the pool. `reset` must leave the item free.
    pub fn release(&mut self, index: usize, reset: impl FnOnce(&mut T)) -> bool {
        let Some(pos) = self.live.iter().position(|&i| i == index) else {
            return false;
        };
        self.live.remove(pos);
        reset(&mut self.all[index]);
        true
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.all.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.all.get_mut(index)
    }

    pub fn is_live(&self, index: usize) -> bool {
        self.live.contains(&index)
    }

    pub fn live_indices(&self) -> &[usize] {
        &self.live
    }

    pub fn iter_live(&self) -> impl Iterator<Item = (usize, &T)> {
        self.live.iter().map(|&i| (i, &self.all[i]))
    }

    /// Visits live items in hand-out order.
    pub fn for_each_live_mut(&mut self, mut f: impl FnMut(usize, &mut T)) {
        for &index in &self.live {
            f(index, &mut self.all[index]);
        }
    }

    pub fn all(&self) -> &[T] {
        &self.all
    }

    /// Number of items ever allocated.
    pub fn allocated(&self) -> usize {
        self.all.len()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
