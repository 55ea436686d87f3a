//! Structural analysis (C6): normal closure, commutators, derived and
//! lower-central series, solvability, simplicity, quotients, Sylow
//! subgroups, generator analysis, and isomorphism invariants — all
//! composed from [`crate::store`], [`crate::permset`] and [`crate::chain`].

use std::collections::VecDeque;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rng;
use tracing::{debug, trace};

use crate::chain::StabilizerChain;
use crate::closure::closure_from_generators;
use crate::cycles::images_to_cycles;
use crate::error::{PermcoreError, Result, TriState};
use crate::limits::Limits;
use crate::store::{PermId, PermStore};

/// Flattens a chain's per-level strong generators into a single generating
/// set for the group it represents.
pub fn chain_generators(chain: &StabilizerChain) -> Vec<PermId> {
    (0..chain.depth())
        .flat_map(|level| chain.strong_generators(level).iter().copied())
        .collect()
}

/// Every generator of `h_gens` sifts to identity in `g_chain`.
pub fn is_subgroup(g_chain: &StabilizerChain, h_gens: &[PermId], store: &mut PermStore) -> bool {
    h_gens.iter().all(|&h| g_chain.contains(h, store))
}

/// For every generator `g` of G and `n` of N, `g·n·g⁻¹` sifts to identity
/// in `n_chain`; fails fast on the first miss.
pub fn is_normal(
    g_gens: &[PermId],
    n_gens: &[PermId],
    n_chain: &StabilizerChain,
    store: &mut PermStore,
) -> bool {
    for &g in g_gens {
        for &n in n_gens {
            let conj = store.conjugate(g, n);
            if !n_chain.contains(conj, store) {
                return false;
            }
        }
    }
    true
}

/// BFS-queue normal closure of `s` in `⟨g_gens⟩`: seed a fresh chain with
/// `s`, then repeatedly conjugate every new element by each generator of G
/// and insert, until the queue drains.
pub fn normal_closure(g_gens: &[PermId], s: &[PermId], store: &mut PermStore) -> StabilizerChain {
    let mut k = StabilizerChain::new();
    let mut queue: VecDeque<PermId> = VecDeque::new();

    for &id in s {
        k.sift_and_insert(id, store);
        queue.push_back(id);
    }

    while let Some(n) = queue.pop_front() {
        for &g in g_gens {
            let conj = store.conjugate(g, n);
            if !k.contains(conj, store) {
                trace!(?conj, "normal closure grew");
                k.sift_and_insert(conj, store);
                queue.push_back(conj);
            }
        }
    }

    k
}

/// `[A,B]`: nonzero commutators over the cross-product of generators,
/// closed normally under `container_gens`. `commutator_subgroup` is the
/// `A == B == container` special case.
pub fn mixed_commutator(
    a_gens: &[PermId],
    b_gens: &[PermId],
    container_gens: &[PermId],
    store: &mut PermStore,
) -> StabilizerChain {
    let mut commutators = Vec::new();
    for &a in a_gens {
        for &b in b_gens {
            let c = store.commutator(a, b);
            if c != PermId::IDENTITY {
                commutators.push(c);
            }
        }
    }
    normal_closure(container_gens, &commutators, store)
}

pub fn commutator_subgroup(g_gens: &[PermId], store: &mut PermStore) -> StabilizerChain {
    mixed_commutator(g_gens, g_gens, g_gens, store)
}

/// `G⁽⁰⁾ = G`, `G⁽ⁿ⁺¹⁾ = [G⁽ⁿ⁾, G⁽ⁿ⁾]`. Stops when the order stabilises
/// (perfect group) or reaches 1. Returns the series and whether it reached
/// 1 (solvable) within `limits.derived_series_depth`.
pub fn derived_series(
    g_gens: &[PermId],
    limits: &Limits,
    store: &mut PermStore,
) -> Result<(Vec<StabilizerChain>, bool)> {
    let mut series = vec![StabilizerChain::compute(g_gens, store)];
    let mut prev_order = series[0].order();

    loop {
        if prev_order == BigUint::one() {
            return Ok((series, true));
        }
        if series.len() > limits.derived_series_depth {
            return Err(PermcoreError::Overflow(
                "derived series depth".to_string(),
                limits.derived_series_depth,
            ));
        }
        let gens = chain_generators(series.last().unwrap());
        let next = commutator_subgroup(&gens, store);
        let next_order = next.order();
        let stabilised = next_order == prev_order;
        debug!(?next_order, stabilised, "derived series step");
        series.push(next);
        if stabilised {
            return Ok((series, false));
        }
        prev_order = next_order;
    }
}

pub fn is_solvable(g_gens: &[PermId], limits: &Limits, store: &mut PermStore) -> Result<bool> {
    derived_series(g_gens, limits, store).map(|(_, solvable)| solvable)
}

/// `G_0 = G`, `G_{n+1} = [G_n, G]`. Stops on stabilisation; returns the
/// series and whether it reached 1 (nilpotent). No duplicate
/// "stabilisation" entry is appended at the end (REDESIGN: the source's
/// dead path is not reproduced).
pub fn lower_central_series(
    g_gens: &[PermId],
    limits: &Limits,
    store: &mut PermStore,
) -> Result<(Vec<StabilizerChain>, bool)> {
    let mut series = vec![StabilizerChain::compute(g_gens, store)];
    let mut prev_order = series[0].order();

    loop {
        if prev_order == BigUint::one() {
            return Ok((series, true));
        }
        if series.len() > limits.lower_central_series_depth {
            return Err(PermcoreError::Overflow(
                "lower central series depth".to_string(),
                limits.lower_central_series_depth,
            ));
        }
        let gens = chain_generators(series.last().unwrap());
        let next = mixed_commutator(&gens, g_gens, g_gens, store);
        let next_order = next.order();
        if next_order == prev_order {
            return Ok((series, false));
        }
        series.push(next);
        prev_order = next_order;
    }
}

pub fn is_nilpotent(g_gens: &[PermId], limits: &Limits, store: &mut PermStore) -> Result<bool> {
    lower_central_series(g_gens, limits, store).map(|(_, nilpotent)| nilpotent)
}

/// Largest power of `p` dividing `n`.
fn p_part(n: &BigUint, p: u64) -> BigUint {
    let p_big = BigUint::from(p);
    let mut n = n.clone();
    let mut part = BigUint::one();
    while (&n % &p_big).is_zero() {
        n /= &p_big;
        part *= &p_big;
    }
    part
}

fn p_part_u64(mut n: u64, p: u64) -> u64 {
    let mut part = 1;
    while n.is_multiple_of(p) {
        n /= p;
        part *= p;
    }
    part
}

fn is_power_of_p(n: &BigUint, p: u64) -> bool {
    let p_big = BigUint::from(p);
    let mut n = n.clone();
    if n.is_zero() {
        return false;
    }
    while n > BigUint::one() {
        if (&n % &p_big) != BigUint::zero() {
            return false;
        }
        n /= &p_big;
    }
    true
}

/// Order of a permutation: the lcm of its disjoint-cycle lengths.
fn element_order(id: PermId, store: &PermStore) -> u64 {
    let images: Vec<usize> = store.get(id).iter().map(|&v| v as usize).collect();
    images_to_cycles(&images)
        .iter()
        .map(|c| c.len() as u64)
        .fold(1u64, |a, b| a.lcm(&b))
}

/// `id^n` via repeated squaring.
fn power(id: PermId, mut n: u64, store: &mut PermStore) -> PermId {
    let mut base = id;
    let mut result = PermId::IDENTITY;
    while n > 0 {
        if n & 1 == 1 {
            result = store.multiply(result, base);
        }
        base = store.multiply(base, base);
        n >>= 1;
    }
    result
}

/// Native-64-bit trial-division primality, valid for `n` below the "safe
/// threshold" this spec's simplicity test requires; beyond it, returns
/// `None` (unproven).
const PRIME_TEST_LIMIT: u64 = 1 << 40;

fn small_prime_check(n: &BigUint) -> Option<bool> {
    let n_u64 = n.to_u64()?;
    if n_u64 > PRIME_TEST_LIMIT {
        return None;
    }
    if n_u64 < 2 {
        return Some(false);
    }
    if n_u64 % 2 == 0 {
        return Some(n_u64 == 2);
    }
    let mut i = 3u64;
    while i * i <= n_u64 {
        if n_u64 % i == 0 {
            return Some(false);
        }
        i += 2;
    }
    Some(true)
}

/// Tri-state simplicity test. Trivial -> No. Abelian -> Yes iff `|G|` is a
/// small prime, No if composite, Unknown if the order exceeds the native
/// primality threshold. Non-perfect -> No. Otherwise: test the normal
/// closure of each generator and `limits.simplicity_random_samples` random
/// elements; any proper nontrivial closure found -> No; none found ->
/// Unknown (heuristic likely-simple).
pub fn is_simple<R: Rng>(
    g_gens: &[PermId],
    limits: &Limits,
    store: &mut PermStore,
    rng: &mut R,
) -> Result<TriState> {
    let chain = StabilizerChain::compute(g_gens, store);
    let order = chain.order();

    if order == BigUint::one() {
        return Ok(TriState::No);
    }

    let abelian = closure_from_generators(g_gens, store).is_abelian(store);
    if abelian {
        return Ok(match small_prime_check(&order) {
            Some(true) => TriState::Yes,
            Some(false) => TriState::No,
            None => TriState::Unknown,
        });
    }

    let gens = chain_generators(&chain);
    let derived = commutator_subgroup(&gens, store);
    if derived.order() != order {
        return Ok(TriState::No);
    }

    let is_proper_nontrivial = |n: &BigUint| *n > BigUint::one() && *n < order;

    for &g in g_gens {
        let nc = normal_closure(&gens, &[g], store);
        if is_proper_nontrivial(&nc.order()) {
            return Ok(TriState::No);
        }
    }
    for _ in 0..limits.simplicity_random_samples {
        let r = chain.random_element(rng, store);
        let nc = normal_closure(&gens, &[r], store);
        if is_proper_nontrivial(&nc.order()) {
            return Ok(TriState::No);
        }
    }

    Ok(TriState::Unknown)
}

/// An injection from coset indices to chosen representatives, plus the
/// permutation group those cosets carry under right multiplication by G.
/// `index_store` owns the induced permutations, which act on coset indices
/// `0..representatives.len()`, not on the original points — a quotient is
/// an independent group living in its own store, per §9's "multiple stores
/// coexisting" design note.
#[derive(Debug)]
pub struct QuotientMap {
    pub representatives: Vec<PermId>,
    pub index_store: PermStore,
    pub quotient_chain: StabilizerChain,
}

/// `G/N`: rejects with [`PermcoreError::NotDivisor`] when `|N|` does not
/// divide `|G|`, and with [`PermcoreError::Overflow`] when `[G:N]` exceeds
/// `limits.max_quotient_index`.
pub fn quotient(
    g_gens: &[PermId],
    n_gens: &[PermId],
    limits: &Limits,
    store: &mut PermStore,
) -> Result<QuotientMap> {
    let g_chain = StabilizerChain::compute(g_gens, store);
    let n_chain = StabilizerChain::compute(n_gens, store);
    let g_order = g_chain.order();
    let n_order = n_chain.order();

    if n_order.is_zero() || (&g_order % &n_order) != BigUint::zero() {
        return Err(PermcoreError::NotDivisor(
            "N".to_string(),
            n_order.to_string(),
            "G".to_string(),
            g_order.to_string(),
        ));
    }

    let index = &g_order / &n_order;
    if index > BigUint::from(limits.max_quotient_index) {
        return Err(PermcoreError::Overflow(
            "quotient index [G:N]".to_string(),
            limits.max_quotient_index,
        ));
    }

    let find_coset = |candidate: PermId, reps: &[PermId], store: &mut PermStore| -> Option<usize> {
        reps.iter().position(|&rep| {
            let rep_inv = store.inverse(rep);
            let test = store.multiply(candidate, rep_inv);
            n_chain.contains(test, store)
        })
    };

    let mut representatives = vec![PermId::IDENTITY];
    let mut queue = VecDeque::new();
    queue.push_back(0usize);

    while let Some(i) = queue.pop_front() {
        let rep_i = representatives[i];
        for &gen in g_gens {
            let candidate = store.multiply(rep_i, gen);
            if find_coset(candidate, &representatives, store).is_none() {
                representatives.push(candidate);
                queue.push_back(representatives.len() - 1);
            }
        }
    }
    debug!(
        cosets = representatives.len(),
        "quotient coset enumeration complete"
    );

    let mut index_store = PermStore::new();
    let mut quotient_gens = Vec::new();
    for &gen in g_gens {
        let mut images = vec![0usize; representatives.len()];
        for (i, &rep_i) in representatives.iter().enumerate() {
            let candidate = store.multiply(rep_i, gen);
            images[i] = find_coset(candidate, &representatives, store)
                .expect("coset enumeration already covers every reachable representative");
        }
        quotient_gens.push(index_store.register(&images));
    }
    let quotient_chain = StabilizerChain::compute(&quotient_gens, &mut index_store);

    Ok(QuotientMap {
        representatives,
        index_store,
        quotient_chain,
    })
}

/// Random-greedy Sylow p-subgroup construction: accumulate p-parts of
/// random elements into a running p-group until its order hits the target
/// `|G|_p`, restarting on stagnation; fails loudly after
/// `limits.sylow_restart_budget` restarts.
pub fn sylow_subgroup<R: Rng>(
    g_gens: &[PermId],
    p: u64,
    limits: &Limits,
    store: &mut PermStore,
    rng: &mut R,
) -> Result<StabilizerChain> {
    let chain = StabilizerChain::compute(g_gens, store);
    let order = chain.order();
    let target = p_part(&order, p);

    if target == BigUint::one() {
        return Ok(StabilizerChain::new());
    }

    for _restart in 0..limits.sylow_restart_budget {
        let mut p_gens: Vec<PermId> = Vec::new();
        let mut p_chain = StabilizerChain::new();

        for _trial in 0..limits.sylow_trial_budget {
            if p_chain.order() == target {
                break;
            }
            let g = chain.random_element(rng, store);
            let g_order = element_order(g, store);
            let ord_p = p_part_u64(g_order, p);
            if ord_p <= 1 {
                continue;
            }
            let h = power(g, g_order / ord_p, store);
            if h == PermId::IDENTITY {
                continue;
            }

            let mut candidate_gens = p_gens.clone();
            candidate_gens.push(h);
            let candidate_chain = StabilizerChain::compute(&candidate_gens, store);
            let candidate_order = candidate_chain.order();
            if is_power_of_p(&candidate_order, p) && candidate_order <= target {
                p_gens = candidate_gens;
                p_chain = candidate_chain;
            }
        }

        if p_chain.order() == target {
            return Ok(p_chain);
        }
        trace!(restart = _restart, "sylow search stagnated, restarting");
    }

    Err(PermcoreError::Overflow(
        "Sylow p-subgroup search".to_string(),
        limits.sylow_restart_budget,
    ))
}

/// Classification of one candidate generator under greedy insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorAnalysis {
    pub id: PermId,
    pub fundamental: bool,
}

/// Greedily inserts each candidate (in input order, for deterministic
/// classification) into an accumulating chain, marking it fundamental if
/// it extends the group's order or redundant if it was already contained.
pub fn analyze_generators(candidates: &[PermId], store: &mut PermStore) -> Vec<GeneratorAnalysis> {
    let mut chain = StabilizerChain::new();
    let mut results = Vec::with_capacity(candidates.len());

    for &id in candidates {
        let before = chain.order();
        chain.sift_and_insert(id, store);
        let after = chain.order();
        results.push(GeneratorAnalysis {
            id,
            fundamental: after != before,
        });
    }
    results
}

/// Tri-state isomorphism invariant check across two (possibly distinct)
/// stores: 0 on order, abelian, or derived-subgroup-order mismatch; -1
/// otherwise. Never returns `Yes` — constructing an actual isomorphism is
/// out of scope.
pub fn isomorphism_invariants(
    a_gens: &[PermId],
    a_store: &mut PermStore,
    b_gens: &[PermId],
    b_store: &mut PermStore,
) -> TriState {
    let a_chain = StabilizerChain::compute(a_gens, a_store);
    let b_chain = StabilizerChain::compute(b_gens, b_store);
    if a_chain.order() != b_chain.order() {
        return TriState::No;
    }

    let a_abelian = closure_from_generators(a_gens, a_store).is_abelian(a_store);
    let b_abelian = closure_from_generators(b_gens, b_store).is_abelian(b_store);
    if a_abelian != b_abelian {
        return TriState::No;
    }

    let a_derived = commutator_subgroup(&chain_generators(&a_chain), a_store).order();
    let b_derived = commutator_subgroup(&chain_generators(&b_chain), b_store).order();
    if a_derived != b_derived {
        return TriState::No;
    }

    TriState::Unknown
}
