//! Consumer-facing generator helpers for the well-known finite groups used
//! by §8's end-to-end scenarios (symmetric, alternating, cyclic, dihedral,
//! Klein four). These are not the out-of-scope visualiser/Cayley-table/
//! Coxeter-search tooling — just the same kind of named-group constructor
//! the teacher crate exposes directly on its `Group<P>` type
//! (`Group::symmetric`/`Group::cyclic`/`Group::dihedral`), reimplemented
//! here as free functions that register generators into a caller-owned
//! [`PermStore`] instead of method on an ambient generic permutation type.

use crate::store::{PermId, PermStore};

/// `Sym(n)`: a transposition and an n-cycle generate the full symmetric
/// group on `n` points.
pub fn symmetric(n: usize, store: &mut PermStore) -> Vec<PermId> {
    if n < 2 {
        return vec![store.register(&(0..n).collect::<Vec<_>>())];
    }
    let mut transposition: Vec<usize> = (0..n).collect();
    transposition.swap(0, 1);
    let mut cycle: Vec<usize> = (1..n).collect();
    cycle.push(0);
    vec![store.register(&transposition), store.register(&cycle)]
}

/// `Alt(n)`: the 3-cycles `(0 1 k)` for `k = 2..n` generate the full
/// alternating group.
pub fn alternating(n: usize, store: &mut PermStore) -> Vec<PermId> {
    (2..n)
        .map(|k| {
            let mut images: Vec<usize> = (0..n).collect();
            images[0] = 1;
            images[1] = k;
            images[k] = 0;
            store.register(&images)
        })
        .collect()
}

/// `C_n`: the single n-cycle `(0 1 2 … n-1)`.
pub fn cyclic(n: usize, store: &mut PermStore) -> Vec<PermId> {
    let mut cycle: Vec<usize> = (1..n).collect();
    cycle.push(0);
    vec![store.register(&cycle)]
}

/// `D_n` (order `2n`) acting on the vertices of an n-gon: the rotation and
/// one reflection.
pub fn dihedral(n: usize, store: &mut PermStore) -> Vec<PermId> {
    let mut rotation: Vec<usize> = (1..n).collect();
    rotation.push(0);
    let reflection: Vec<usize> = (0..n).rev().collect();
    vec![store.register(&rotation), store.register(&reflection)]
}

/// The Klein four-group on 4 points, as used directly by §8 scenario 2.
pub fn klein_four(store: &mut PermStore) -> Vec<PermId> {
    vec![store.register(&[1, 0, 3, 2]), store.register(&[2, 3, 0, 1])]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::closure_from_generators;

    #[test]
    fn symmetric_order_is_factorial() {
        let mut store = PermStore::new();
        let gens = symmetric(4, &mut store);
        let g = closure_from_generators(&gens, &mut store);
        assert_eq!(g.size(), 24);
    }

    #[test]
    fn alternating_order_is_half_factorial() {
        let mut store = PermStore::new();
        let gens = alternating(5, &mut store);
        let g = closure_from_generators(&gens, &mut store);
        assert_eq!(g.size(), 60);
    }

    #[test]
    fn cyclic_order_is_n() {
        let mut store = PermStore::new();
        let gens = cyclic(6, &mut store);
        let g = closure_from_generators(&gens, &mut store);
        assert_eq!(g.size(), 6);
    }

    #[test]
    fn dihedral_order_is_2n() {
        let mut store = PermStore::new();
        let gens = dihedral(5, &mut store);
        let g = closure_from_generators(&gens, &mut store);
        assert_eq!(g.size(), 10);
    }

    #[test]
    fn klein_four_order_is_four() {
        let mut store = PermStore::new();
        let gens = klein_four(&mut store);
        let g = closure_from_generators(&gens, &mut store);
        assert_eq!(g.size(), 4);
    }
}
