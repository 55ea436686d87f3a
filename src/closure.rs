//! Group closure generator (C4): iterative closure from a generating set,
//! for the small-group path where materialising the full element set (as
//! opposed to a stabiliser chain, C5) is practical.

use tracing::trace;

use crate::permset::PermSet;
use crate::store::{PermId, PermStore};

/// `G ← S ∪ S⁻¹ ∪ {e}`, then `G ← G ∪ (G·S)` repeated until `|G|` is
/// stationary. The fixed point is closed under multiplication and
/// contains inverses and identity, so it is a group.
pub fn closure_from_generators(gens: &[PermId], store: &mut PermStore) -> PermSet {
    let s = PermSet::new(gens.iter().copied(), false);
    let s_inv = s.inverse(store);

    let mut g = s.union(&s_inv).union(&PermSet::identity());

    loop {
        let grown = g.union(&g.product(&s, store));
        trace!(before = g.size(), after = grown.size(), "closure iteration");
        if grown.size() == g.size() {
            break;
        }
        g = grown;
    }

    g.mark_as_group()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_of_s3_has_order_six() {
        let mut store = PermStore::new();
        let a = store.register(&[1, 0, 2]);
        let b = store.register(&[1, 2, 0]);
        let g = closure_from_generators(&[a, b], &mut store);
        assert_eq!(g.size(), 6);
        assert!(g.is_group());
    }

    #[test]
    fn closure_of_empty_generators_is_trivial() {
        let mut store = PermStore::new();
        let g = closure_from_generators(&[], &mut store);
        assert_eq!(g.size(), 1);
    }

    #[test]
    fn closure_contains_inverses_and_identity() {
        let mut store = PermStore::new();
        let a = store.register(&[2, 0, 1]);
        let g = closure_from_generators(&[a], &mut store);
        assert!(g.contains(PermId::IDENTITY));
        let inv = g.inverse(&mut store);
        assert!(g.equals(&inv));
    }
}
