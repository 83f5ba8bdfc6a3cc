//! Deduplication set over blob identifiers.

use maildex_types::BlobId;

/// Table size allocated on first insertion.
const INITIAL_SLOTS: usize = 256;

/// Open-addressing set of [`BlobId`]s used to answer "already indexed?".
///
/// Linear probing with wraparound. The table starts at 256 slots and doubles
/// whenever an insertion would push the load factor past one half, so probe
/// chains stay short even when a scan touches hundreds of thousands of
/// blobs. There is no removal: a run only ever accumulates knowledge.
///
/// Identifiers are uniform hex digests, so [`BlobId::bucket_hash`] — a
/// nibble-packed prefix — spreads them across buckets without hashing the
/// full forty characters.
pub struct SeenSet {
    slots: Vec<Option<BlobId>>,
    len: usize,
}

impl SeenSet {
    /// An empty set. The table is not allocated until the first insertion.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Number of identifiers held.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current table size. After any insertion, `len() * 2 <= capacity()`.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if `id` has been inserted before.
    pub fn contains(&self, id: &BlobId) -> bool {
        if self.len == 0 {
            return false;
        }
        let mut at = self.bucket(id);
        while let Some(held) = &self.slots[at] {
            if held == id {
                return true;
            }
            at = (at + 1) % self.slots.len();
        }
        false
    }

    /// Insert `id`, returning `true` if it was not already present.
    ///
    /// The combined test-and-insert is the common call site shape: a scan
    /// asks "new?" and wants the answer recorded in the same step.
    pub fn insert(&mut self, id: &BlobId) -> bool {
        if self.contains(id) {
            return false;
        }
        if (self.len + 1) * 2 > self.slots.len() {
            self.grow();
        }
        let mut at = self.bucket(id);
        while self.slots[at].is_some() {
            at = (at + 1) % self.slots.len();
        }
        self.slots[at] = Some(*id);
        self.len += 1;
        true
    }

    fn bucket(&self, id: &BlobId) -> usize {
        id.bucket_hash() as usize % self.slots.len()
    }

    /// Double the table (256 slots the first time) and reinsert everything.
    fn grow(&mut self) {
        let new_size = if self.slots.len() > 128 {
            self.slots.len() * 2
        } else {
            INITIAL_SLOTS
        };
        let old = std::mem::replace(&mut self.slots, vec![None; new_size]);
        for id in old.into_iter().flatten() {
            let mut at = self.bucket(&id);
            while self.slots[at].is_some() {
                at = (at + 1) % self.slots.len();
            }
            self.slots[at] = Some(id);
        }
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SeenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeenSet")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .finish()
    }
}
