//! The permutation store (C2): an interning arena with a radix trie for
//! deduplication and dynamic degree expansion.
//!
//! Grounded on the teacher crate's overall `Group<P>` / `Permutation` split
//! (composition always produces a value that is then handed back through a
//! canonicalising layer) but concretised exactly as spec'd: images are
//! dense `u32` rows in one flat arena, and identity is keyed off a radix
//! trie over those rows instead of the teacher's generic `P: Permutation`
//! trait object. IDs never move or get invalidated except across
//! [`PermStore::reset`].

use std::fmt;

use tracing::{debug, trace};

use crate::cycles;

/// A stable, small-integer handle to an interned permutation. `PermId(0)`
/// is always the identity of whatever store produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PermId(pub u32);

impl fmt::Display for PermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl PermId {
    pub const IDENTITY: PermId = PermId(0);
}

/// Sentinel for "no child"/"no id yet" in the trie arena.
const EMPTY: i32 = -1;

/// Process-local permutation interner (C2). Owns the dense image table and
/// the trie arena; never shared across threads (no `Sync` bound is
/// provided — callers needing isolation construct their own store, same as
/// the teacher's owned, non-global `Group<P>`).
#[derive(Debug, Clone)]
pub struct PermStore {
    degree: usize,
    count: u32,
    images: Vec<u32>,
    trie: Vec<i32>,
}

impl Default for PermStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PermStore {
    /// Creates a fresh store of degree 0, with ID 0 reserved for identity.
    pub fn new() -> Self {
        let mut store = Self {
            degree: 0,
            count: 0,
            images: Vec::new(),
            trie: vec![EMPTY],
        };
        let identity = store.register(&[]);
        debug_assert_eq!(identity, PermId::IDENTITY);
        store
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    fn stride(&self) -> usize {
        self.degree + 1
    }

    /// Interns `image`, extending the degree first if `image` is longer
    /// than the current degree. Shorter inputs are implicitly padded with
    /// fixed points.
    pub fn register(&mut self, image: &[usize]) -> PermId {
        if image.len() > self.degree {
            self.upgrade_degree(image.len());
        }

        let degree = self.degree;
        let full: Vec<u32> = (0..degree)
            .map(|i| {
                if i < image.len() {
                    image[i] as u32
                } else {
                    i as u32
                }
            })
            .collect();

        let leaf = self.walk_to_leaf(&full);
        let id_slot = leaf * self.stride();
        if self.trie[id_slot] == EMPTY {
            let id = self.count;
            self.trie[id_slot] = id as i32;
            self.images.extend_from_slice(&full);
            self.count += 1;
            trace!(id, degree, "registered new permutation");
        }
        PermId(self.trie[id_slot] as u32)
    }

    /// Walks the trie along `image`, creating intermediate nodes as
    /// needed, and returns the node index for the path's leaf.
    fn walk_to_leaf(&mut self, image: &[u32]) -> usize {
        let stride = self.stride();
        let mut node = 0usize;
        for &value in image {
            let child_slot = node * stride + 1 + value as usize;
            let child = self.trie[child_slot];
            node = if child == EMPTY {
                let new_node = self.trie.len() / stride;
                self.trie.extend(std::iter::repeat_n(EMPTY, stride));
                self.trie[child_slot] = new_node as i32;
                new_node
            } else {
                child as usize
            };
        }
        node
    }

    /// Grows the global degree to `new_degree`, padding every existing
    /// permutation with fixed points and rebuilding the trie at the new
    /// stride. Single-threaded stop-the-world step, per spec.
    fn upgrade_degree(&mut self, new_degree: usize) {
        debug!(
            old_degree = self.degree,
            new_degree,
            count = self.count,
            "upgrading store degree"
        );
        let old_degree = self.degree;
        let count = self.count as usize;

        let mut new_images = vec![0u32; count * new_degree];
        for id in 0..count {
            let old_row = &self.images[id * old_degree..id * old_degree + old_degree];
            let new_row = &mut new_images[id * new_degree..id * new_degree + new_degree];
            new_row[..old_degree].copy_from_slice(old_row);
            for (k, slot) in new_row.iter_mut().enumerate().skip(old_degree) {
                *slot = k as u32;
            }
        }
        self.images = new_images;
        self.degree = new_degree;

        let stride = new_degree + 1;
        self.trie = vec![EMPTY; stride];
        for id in 0..count {
            let row = self.images[id * new_degree..id * new_degree + new_degree].to_vec();
            let leaf = self.walk_to_leaf(&row);
            self.trie[leaf * stride] = id as i32;
        }
    }

    /// `O(1)` read-only view of the `degree` images of `id`.
    pub fn get(&self, id: PermId) -> &[u32] {
        let start = id.0 as usize * self.degree;
        &self.images[start..start + self.degree]
    }

    /// `c` with `c(k) = a(b(k))` for all `k` — composition convention
    /// `(A·B)(x) = A(B(x))`, per spec.
    pub fn multiply(&mut self, a: PermId, b: PermId) -> PermId {
        if a == PermId::IDENTITY {
            return b;
        }
        if b == PermId::IDENTITY {
            return a;
        }
        let degree = self.degree;
        let row_a = self.get(a);
        let row_b = self.get(b);
        let result: Vec<usize> = (0..degree)
            .map(|k| row_a[row_b[k] as usize] as usize)
            .collect();
        self.register(&result)
    }

    /// `c` with `c(a(k)) = k` for all `k`.
    pub fn inverse(&mut self, a: PermId) -> PermId {
        if a == PermId::IDENTITY {
            return a;
        }
        let degree = self.degree;
        let row_a = self.get(a);
        let mut result = vec![0usize; degree];
        for (k, &v) in row_a.iter().enumerate() {
            result[v as usize] = k;
        }
        self.register(&result)
    }

    /// `g·h·g⁻¹`.
    pub fn conjugate(&mut self, g: PermId, h: PermId) -> PermId {
        let gh = self.multiply(g, h);
        let g_inv = self.inverse(g);
        self.multiply(gh, g_inv)
    }

    /// `a⁻¹·b⁻¹·a·b`.
    pub fn commutator(&mut self, a: PermId, b: PermId) -> PermId {
        let a_inv = self.inverse(a);
        let b_inv = self.inverse(b);
        let lhs = self.multiply(a_inv, b_inv);
        let lhs = self.multiply(lhs, a);
        self.multiply(lhs, b)
    }

    /// Disjoint 1-based cycle notation; `"()"` for the identity.
    pub fn get_as_cycles(&self, id: PermId) -> String {
        let images: Vec<usize> = self.get(id).iter().map(|&v| v as usize).collect();
        cycles::format_cycles(&cycles::images_to_cycles(&images))
    }

    /// Replaces the store with a fresh one. Every previously held
    /// [`PermId`] becomes invalid.
    pub fn reset(&mut self) {
        debug!(degree = self.degree, count = self.count, "resetting store");
        *self = Self::new();
    }
}
