//! Generation-checked handle table for containers owned across the C
//! boundary.
//!
//! A handle names a slot and the generation the slot was in when the
//! handle was issued. Removing a value advances the slot's generation, so
//! a destroyed or never-issued handle resolves to nothing instead of to
//! someone else's array.

/// A slot index plus the generation it was issued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    /// Pack as `index << 32 | generation`.
    pub(crate) fn to_raw(self) -> u64 {
        (u64::from(self.index) << 32) | u64::from(self.generation)
    }

    pub(crate) fn from_raw(raw: u64) -> Self {
        Self {
            index: (raw >> 32) as u32,
            generation: raw as u32,
        }
    }
}

enum Entry<T> {
    Live { generation: u32, value: T },
    /// Reusable; the next value stored here gets `next_generation`.
    Vacant { next_generation: u32 },
    /// Generations exhausted; never reused.
    Retired,
}

/// Owns values on behalf of foreign callers and hands out `u64` handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
}

impl<T> HandleTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
        }
    }

    /// Store `value` and return its raw handle.
    pub(crate) fn insert(&mut self, value: T) -> u64 {
        while let Some(index) = self.vacant.pop() {
            let entry = &mut self.entries[index as usize];
            if let Entry::Vacant { next_generation } = *entry {
                *entry = Entry::Live {
                    generation: next_generation,
                    value,
                };
                return Handle {
                    index,
                    generation: next_generation,
                }
                .to_raw();
            }
        }
        let index = self.entries.len() as u32;
        self.entries.push(Entry::Live {
            generation: 0,
            value,
        });
        Handle {
            index,
            generation: 0,
        }
        .to_raw()
    }

    /// Resolve a raw handle.
    pub(crate) fn get(&self, raw: u64) -> Option<&T> {
        let h = Handle::from_raw(raw);
        match self.entries.get(h.index as usize)? {
            Entry::Live { generation, value } if *generation == h.generation => Some(value),
            _ => None,
        }
    }

    /// Take the value behind a raw handle, invalidating the handle.
    ///
    /// Removing twice returns `None` the second time.
    pub(crate) fn remove(&mut self, raw: u64) -> Option<T> {
        let h = Handle::from_raw(raw);
        let entry = self.entries.get_mut(h.index as usize)?;
        match entry {
            Entry::Live { generation, .. } if *generation == h.generation => {}
            _ => return None,
        }
        let next = match h.generation.checked_add(1) {
            Some(g) => {
                self.vacant.push(h.index);
                Entry::Vacant { next_generation: g }
            }
            None => Entry::Retired,
        };
        match std::mem::replace(entry, next) {
            Entry::Live { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Number of live values.
    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, Entry::Live { .. }))
            .count()
    }
}
