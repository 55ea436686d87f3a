//! Sorted-integer set utilities (C1).
//!
//! Every function here operates on strictly ascending, duplicate-free
//! slices. Callers are responsible for that precondition except where a
//! function is explicitly about establishing it ([`sort_unique`]).

/// `O(log n)` membership test over an ascending, unique slice.
pub fn contains<T: Ord>(sorted: &[T], x: &T) -> bool {
    sorted.binary_search(x).is_ok()
}

/// Ascending, duplicate-free union of two ascending unique slices.
pub fn union<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() {
        return b.to_vec();
    }
    if b.is_empty() {
        return a.to_vec();
    }

    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Ascending intersection of two ascending unique slices.
pub fn intersection<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Elements of `a` not present in `b`, ascending.
pub fn difference<T: Ord + Copy>(a: &[T], b: &[T]) -> Vec<T> {
    if a.is_empty() {
        return Vec::new();
    }
    if b.is_empty() {
        return a.to_vec();
    }

    let mut out = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out
}

/// Sorts `v` ascending in place, then compacts duplicates, truncating to the
/// unique prefix.
pub fn sort_unique<T: Ord>(v: &mut Vec<T>) {
    v.sort_unstable();
    v.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_found_and_missing() {
        let s = [1, 3, 5, 9];
        assert!(contains(&s, &5));
        assert!(!contains(&s, &4));
    }

    #[test]
    fn union_merges_and_dedups() {
        assert_eq!(union(&[1, 3, 5], &[2, 3, 4]), vec![1, 2, 3, 4, 5]);
        assert_eq!(union(&[], &[1, 2]), vec![1, 2]);
        assert_eq!(union(&[1, 2], &[]), vec![1, 2]);
    }

    #[test]
    fn intersection_common_elements() {
        assert_eq!(intersection(&[1, 3, 5], &[2, 3, 4, 5]), vec![3, 5]);
        assert_eq!(intersection::<i32>(&[], &[1, 2]), Vec::<i32>::new());
    }

    #[test]
    fn difference_removes_present() {
        assert_eq!(difference(&[1, 2, 3, 4], &[2, 4]), vec![1, 3]);
        assert_eq!(difference::<i32>(&[], &[1]), Vec::<i32>::new());
        assert_eq!(difference(&[1, 2], &[]), vec![1, 2]);
    }

    #[test]
    fn sort_unique_compacts() {
        let mut v = vec![3, 1, 2, 1, 3, 2];
        sort_unique(&mut v);
        assert_eq!(v, vec![1, 2, 3]);
    }
}
