//! Cycle notation (§6): 1-based integer lists inside parentheses, no
//! separator required between cycles, `"()"` denotes identity. Whitespace
//! and commas inside a cycle are interchangeable separators.
//!
//! Grounded on the teacher crate's `perm::export::cycles::CyclePermutation`,
//! which builds the same representation (`Vec<Vec<usize>>` of disjoint
//! 1-based cycles) and formats it the same way; here the parse direction is
//! added because the engine is input-driven (registering permutations from
//! external cycle strings) rather than only exporting them.

use crate::error::{PermcoreError, Result};

/// Parses cycle notation into 1-based cycles, e.g. `"(1 2 3)(4 5)"` ->
/// `[[1,2,3],[4,5]]`. `"()"` and the empty string both parse to no cycles.
pub fn parse_cycles(input: &str) -> Result<Vec<Vec<usize>>> {
    let mut cycles = Vec::new();
    let mut depth = 0usize;
    let mut current = Vec::new();
    let mut token = String::new();

    let flush_token = |token: &mut String, current: &mut Vec<usize>| -> Result<()> {
        if token.is_empty() {
            return Ok(());
        }
        let n: usize = token.parse().map_err(|_| {
            PermcoreError::InvalidInput(format!("expected a positive integer, found '{token}'"))
        })?;
        if n == 0 {
            return Err(PermcoreError::InvalidInput(
                "cycle notation points are 1-based; 0 is invalid".to_string(),
            ));
        }
        current.push(n);
        token.clear();
        Ok(())
    };

    for c in input.chars() {
        match c {
            '(' => {
                if depth != 0 {
                    return Err(PermcoreError::InvalidInput(
                        "nested parentheses are not valid cycle notation".to_string(),
                    ));
                }
                depth = 1;
                current.clear();
            }
            ')' => {
                if depth != 1 {
                    return Err(PermcoreError::InvalidInput(
                        "unmatched ')' in cycle notation".to_string(),
                    ));
                }
                flush_token(&mut token, &mut current)?;
                depth = 0;
                if !current.is_empty() {
                    cycles.push(std::mem::take(&mut current));
                }
            }
            c if c.is_whitespace() || c == ',' => {
                flush_token(&mut token, &mut current)?;
            }
            c if c.is_ascii_digit() => {
                token.push(c);
            }
            other => {
                return Err(PermcoreError::InvalidInput(format!(
                    "unexpected character '{other}' in cycle notation"
                )));
            }
        }
    }

    if depth != 0 {
        return Err(PermcoreError::InvalidInput(
            "unterminated '(' in cycle notation".to_string(),
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for &p in cycles.iter().flatten() {
        if !seen.insert(p) {
            return Err(PermcoreError::InvalidInput(format!(
                "point {p} appears in more than one cycle"
            )));
        }
    }

    Ok(cycles)
}

/// Expands 1-based disjoint cycles into a 0-based image array of length
/// `degree` (points absent from every cycle are fixed).
pub fn cycles_to_images(cycles: &[Vec<usize>], degree: usize) -> Result<Vec<usize>> {
    let mut images: Vec<usize> = (0..degree).collect();
    for cycle in cycles {
        for &p in cycle {
            if p > degree {
                return Err(PermcoreError::OutOfBounds {
                    point: p - 1,
                    degree,
                });
            }
        }
        for window in cycle.windows(2) {
            images[window[0] - 1] = window[1] - 1;
        }
        if let (Some(&first), Some(&last)) = (cycle.first(), cycle.last()) {
            images[last - 1] = first - 1;
        }
    }
    Ok(images)
}

/// Decomposes a 0-based image array into disjoint 1-based cycles (fixed
/// points omitted).
pub fn images_to_cycles(images: &[usize]) -> Vec<Vec<usize>> {
    let n = images.len();
    let mut visited = vec![false; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut cycle = vec![start + 1];
        let mut current = images[start];
        while current != start {
            visited[current] = true;
            cycle.push(current + 1);
            current = images[current];
        }
        if cycle.len() > 1 {
            cycles.push(cycle);
        }
    }
    cycles
}

/// Renders cycles in the canonical `"(a b c)(d e)"` / `"()"` form.
pub fn format_cycles(cycles: &[Vec<usize>]) -> String {
    if cycles.is_empty() {
        return "()".to_string();
    }
    let mut out = String::new();
    for cycle in cycles {
        out.push('(');
        for (i, p) in cycle.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&p.to_string());
        }
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_identity() {
        assert_eq!(parse_cycles("()").unwrap(), Vec::<Vec<usize>>::new());
        assert_eq!(parse_cycles("").unwrap(), Vec::<Vec<usize>>::new());
    }

    #[test]
    fn parse_single_cycle_space_and_comma() {
        assert_eq!(parse_cycles("(1 2 3)").unwrap(), vec![vec![1, 2, 3]]);
        assert_eq!(parse_cycles("(1, 2, 3)").unwrap(), vec![vec![1, 2, 3]]);
    }

    #[test]
    fn parse_multiple_cycles_no_separator() {
        assert_eq!(
            parse_cycles("(1 2)(3 4 5)").unwrap(),
            vec![vec![1, 2], vec![3, 4, 5]]
        );
    }

    #[test]
    fn parse_rejects_non_positive_and_non_integer() {
        assert!(parse_cycles("(0 1)").is_err());
        assert!(parse_cycles("(a b)").is_err());
        assert!(parse_cycles("(1 2").is_err());
    }

    #[test]
    fn parse_rejects_repeated_point() {
        assert!(parse_cycles("(1 2)(2 3)").is_err());
    }

    #[test]
    fn round_trip_images_to_cycles_to_images() {
        let images = vec![1usize, 2, 0, 4, 3];
        let cycles = images_to_cycles(&images);
        let back = cycles_to_images(&cycles, images.len()).unwrap();
        assert_eq!(images, back);
    }

    #[test]
    fn round_trip_cycles_to_images_to_cycles() {
        let input = "(1 2 3)(4 5)";
        let cycles = parse_cycles(input).unwrap();
        let images = cycles_to_images(&cycles, 5).unwrap();
        let back = images_to_cycles(&images);
        assert_eq!(cycles, back);
        assert_eq!(format_cycles(&back), "(1 2 3)(4 5)");
    }

    #[test]
    fn identity_formats_as_parens() {
        assert_eq!(format_cycles(&images_to_cycles(&[0, 1, 2])), "()");
    }
}
