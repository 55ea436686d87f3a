//! Permutation sets (C3): a sorted-unique sequence of interned IDs with
//! vectorised group algebra, built on [`crate::intset`] (C1) and
//! [`crate::store`] (C2).

use crate::DetHashSet;

use crate::error::{PermcoreError, Result};
use crate::intset;
use crate::store::{PermId, PermStore};

/// A sorted, duplicate-free sequence of [`PermId`]s, optionally flagged as
/// a verified group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermSet {
    ids: Vec<u32>,
    is_group: bool,
}

impl PermSet {
    /// Builds a set from an arbitrary sequence of IDs, sorting and
    /// deduplicating unless `presorted` is set by a caller that already
    /// certifies the input is normalised.
    pub fn new(ids: impl IntoIterator<Item = PermId>, presorted: bool) -> Self {
        let mut ids: Vec<u32> = ids.into_iter().map(|id| id.0).collect();
        if !presorted {
            intset::sort_unique(&mut ids);
        }
        Self {
            ids,
            is_group: false,
        }
    }

    /// The `{identity}` singleton, flagged as a (trivial) group.
    pub fn identity() -> Self {
        Self {
            ids: vec![PermId::IDENTITY.0],
            is_group: true,
        }
    }

    pub fn is_group(&self) -> bool {
        self.is_group
    }

    /// Marks the set as a verified group. Callers (C4, the chain, and the
    /// closure/group-algebra helpers below) are the only code paths that
    /// should set this.
    pub fn mark_as_group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn size(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PermId> {
        self.ids.get(index).map(|&id| PermId(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = PermId> + '_ {
        self.ids.iter().map(|&id| PermId(id))
    }

    pub fn contains(&self, id: PermId) -> bool {
        intset::contains(&self.ids, &id.0)
    }

    /// `A·B`: every pairwise product, deduplicated. Not a group in
    /// general. Iterates the smaller operand on the outside to maximise
    /// image-row cache locality in the store.
    pub fn product(&self, other: &Self, store: &mut PermStore) -> Self {
        let mut ids = Vec::with_capacity(self.size() * other.size());
        if self.size() <= other.size() {
            for a in self.iter() {
                for b in other.iter() {
                    ids.push(store.multiply(a, b).0);
                }
            }
        } else {
            for b in other.iter() {
                for a in self.iter() {
                    ids.push(store.multiply(a, b).0);
                }
            }
        }
        intset::sort_unique(&mut ids);
        Self {
            ids,
            is_group: false,
        }
    }

    /// Elementwise inverse. If `self` is a group, the result equals
    /// `self` and the group flag is preserved.
    pub fn inverse(&self, store: &mut PermStore) -> Self {
        if self.is_group {
            return self.clone();
        }
        let mut ids: Vec<u32> = self.iter().map(|id| store.inverse(id).0).collect();
        intset::sort_unique(&mut ids);
        Self {
            ids,
            is_group: false,
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            ids: intset::union(&self.ids, &other.ids),
            is_group: false,
        }
    }

    /// Intersection of two groups is a group; any other combination
    /// conservatively clears the flag.
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            ids: intset::intersection(&self.ids, &other.ids),
            is_group: self.is_group && other.is_group,
        }
    }

    pub fn difference(&self, other: &Self) -> Self {
        Self {
            ids: intset::difference(&self.ids, &other.ids),
            is_group: false,
        }
    }

    pub fn equals(&self, other: &Self) -> bool {
        self.ids == other.ids
    }

    pub fn is_superset_of(&self, other: &Self) -> bool {
        intset::difference(&other.ids, &self.ids).is_empty()
    }

    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.is_superset_of(self)
    }

    /// `O(|A|² · N)`: every pair commutes.
    pub fn is_abelian(&self, store: &mut PermStore) -> bool {
        let ids: Vec<PermId> = self.iter().collect();
        for i in 0..ids.len() {
            for j in (i + 1)..ids.len() {
                let ab = store.multiply(ids[i], ids[j]);
                let ba = store.multiply(ids[j], ids[i]);
                if ab != ba {
                    return false;
                }
            }
        }
        true
    }

    /// BFS orbit of `point` under the set's action via the store.
    pub fn orbit(&self, point: usize, store: &PermStore) -> Result<Vec<usize>> {
        if point >= store.degree() {
            return Err(PermcoreError::OutOfBounds {
                point,
                degree: store.degree(),
            });
        }

        let mut seen = DetHashSet::default();
        let mut queue = std::collections::VecDeque::new();
        seen.insert(point);
        queue.push_back(point);

        while let Some(p) = queue.pop_front() {
            for g in self.iter() {
                let image = store.get(g)[p] as usize;
                if seen.insert(image) {
                    queue.push_back(image);
                }
            }
        }

        let mut out: Vec<usize> = seen.into_iter().collect();
        intset::sort_unique(&mut out);
        Ok(out)
    }

    /// Right-coset decomposition of `self` (treated as G) by `h`: walk the
    /// elements of G in ascending ID order, opening a new coset `H·g` at
    /// the first unvisited `g`.
    pub fn right_coset_decomposition(&self, h: &Self, store: &mut PermStore) -> Vec<Self> {
        let mut visited: DetHashSet<u32> = DetHashSet::default();
        let mut cosets = Vec::new();

        for g in self.iter() {
            if visited.contains(&g.0) {
                continue;
            }
            let mut coset_ids: Vec<u32> = h.iter().map(|hi| store.multiply(hi, g).0).collect();
            intset::sort_unique(&mut coset_ids);
            for &id in &coset_ids {
                visited.insert(id);
            }
            cosets.push(Self {
                ids: coset_ids,
                is_group: false,
            });
        }
        cosets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3(store: &mut PermStore) -> (PermId, PermId) {
        let a = store.register(&[1, 0, 2]);
        let b = store.register(&[1, 2, 0]);
        (a, b)
    }

    #[test]
    fn identity_factory_is_flagged_group() {
        let s = PermSet::identity();
        assert!(s.is_group());
        assert_eq!(s.size(), 1);
    }

    #[test]
    fn product_dedups_and_sorts() {
        let mut store = PermStore::new();
        let (a, b) = s3(&mut store);
        let s = PermSet::new([a, b], false);
        let p = s.product(&s, &mut store);
        assert!(p.size() >= 2);
        let mut sorted = p.ids.clone();
        intset::sort_unique(&mut sorted);
        assert_eq!(sorted, p.ids);
    }

    #[test]
    fn set_ops_use_intset() {
        let mut store = PermStore::new();
        let (a, b) = s3(&mut store);
        let s1 = PermSet::new([a, PermId::IDENTITY], false);
        let s2 = PermSet::new([b, PermId::IDENTITY], false);
        assert_eq!(s1.union(&s2).size(), 3);
        assert_eq!(s1.intersection(&s2).size(), 1);
        assert_eq!(s1.difference(&s2).size(), 1);
    }

    #[test]
    fn orbit_out_of_bounds_is_an_error() {
        let mut store = PermStore::new();
        let (a, _) = s3(&mut store);
        let s = PermSet::new([a], false);
        assert!(s.orbit(100, &store).is_err());
    }

    #[test]
    fn orbit_partitions_point_set_for_a_group() {
        let mut store = PermStore::new();
        let (a, b) = s3(&mut store);
        let closure = crate::closure::closure_from_generators(&[a, b], &mut store);
        let mut covered: Vec<usize> = Vec::new();
        for p in 0..store.degree() {
            let orb = closure.orbit(p, &store).unwrap();
            covered.extend(orb);
        }
        intset::sort_unique(&mut covered);
        assert_eq!(covered, (0..store.degree()).collect::<Vec<_>>());
    }

    #[test]
    fn right_coset_decomposition_partitions_group() {
        let mut store = PermStore::new();
        let (a, b) = s3(&mut store);
        let g = crate::closure::closure_from_generators(&[a, b], &mut store);
        let h = crate::closure::closure_from_generators(&[a], &mut store);

        let cosets = g.right_coset_decomposition(&h, &mut store);
        let total: usize = cosets.iter().map(|c| c.size()).sum();
        assert_eq!(total, g.size());
        assert!(cosets.iter().all(|c| c.size() == h.size()));
    }
}
