use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// An opaque render handle. The host maps each id to one of its card views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandleId(u32);

impl HandleId {
    pub fn get(self) -> u32 {
        self.0
    }
}

/// A free list of reusable render handles, bound to card positions.
///
/// Handles are never destroyed: a handle that leaves the screen goes back to the free list and
/// is handed out again for the next card that needs one, preferring a handle that was last bound
/// to that same position (its view likely still shows the right content).
#[derive(Clone, Debug, Default)]
pub struct CardPool {
    /// Most recently released last.
    free: Vec<HandleId>,
    bound: BTreeMap<usize, HandleId>,
    /// Position each handle was last bound to, indexed by handle id.
    last_index: Vec<Option<usize>>,
}

impl CardPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of handles ever created.
    pub fn capacity(&self) -> usize {
        self.last_index.len()
    }

    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    pub fn bound_len(&self) -> usize {
        self.bound.len()
    }

    pub fn handle_for(&self, index: usize) -> Option<HandleId> {
        self.bound.get(&index).copied()
    }

    /// Bound `(index, handle)` pairs in index order.
    pub fn bound(&self) -> impl Iterator<Item = (usize, HandleId)> + '_ {
        self.bound.iter().map(|(&i, &h)| (i, h))
    }

    /// Binds a handle to `index` and returns it with whether it was newly created.
    ///
    /// An index that already has a handle keeps it.
    pub fn acquire(&mut self, index: usize) -> (HandleId, bool) {
        if let Some(handle) = self.handle_for(index) {
            return (handle, false);
        }

        let preferred = self
            .free
            .iter()
            .rposition(|h| self.last_index[h.0 as usize] == Some(index));
        let (handle, is_new) = match preferred {
            Some(pos) => (self.free.remove(pos), false),
            None => match self.free.pop() {
                Some(handle) => (handle, false),
                None => {
                    let handle = HandleId(self.last_index.len() as u32);
                    self.last_index.push(None);
                    (handle, true)
                }
            },
        };

        self.last_index[handle.0 as usize] = Some(index);
        self.bound.insert(index, handle);
        (handle, is_new)
    }

    /// Unbinds the handle at `index` and returns it to the free list.
    pub fn release(&mut self, index: usize) -> Option<HandleId> {
        let handle = self.bound.remove(&index)?;
        self.free.push(handle);
        Some(handle)
    }

    /// Releases the handle of a removed card and shifts every later binding down by one.
    ///
    /// Returns the released handle and the renumbered `(new_index, handle)` pairs.
    pub fn remove_index(&mut self, index: usize) -> (Option<HandleId>, Vec<(usize, HandleId)>) {
        let released = self.bound.remove(&index);
        if let Some(handle) = released {
            // The card is gone; its view content is no use to anyone.
            self.last_index[handle.0 as usize] = None;
            self.free.push(handle);
        }
        let moved = self.renumber(|i| (i > index).then(|| i - 1));
        (released, moved)
    }

    /// Shifts every binding at or after `index` up by one to make room for an inserted card.
    pub fn insert_index(&mut self, index: usize) -> Vec<(usize, HandleId)> {
        self.renumber(|i| (i >= index).then(|| i + 1))
    }

    fn renumber(&mut self, map: impl Fn(usize) -> Option<usize>) -> Vec<(usize, HandleId)> {
        let mut moved = Vec::new();
        let bound = core::mem::take(&mut self.bound);
        for (i, handle) in bound {
            let index = map(i).unwrap_or(i);
            if index != i {
                self.last_index[handle.0 as usize] = Some(index);
                moved.push((index, handle));
            }
            self.bound.insert(index, handle);
        }
        moved
    }
}
