//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a valid library name (lowercase alphanumeric with hyphens)
    pub fn library_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,20}[a-z0-9]".prop_map(String::from)
    }

    /// Generate a valid semver version string
    pub fn semver_version() -> impl Strategy<Value = String> {
        (0u32..30, 0u32..30, 0u32..30)
            .prop_map(|(major, minor, patch)| format!("{major}.{minor}.{patch}"))
    }

    /// Generate distinct library names
    pub fn library_names(size: std::ops::Range<usize>) -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set(library_name(), size).prop_map(|set| set.into_iter().collect())
    }

    /// Generate units and `(dependent, dependency)` edges without cycles
    ///
    /// Edges only point from a later name to an earlier one, so the edge set
    /// can never close a loop. Duplicate edges are allowed.
    pub fn acyclic_graph() -> impl Strategy<Value = (Vec<String>, Vec<(String, String)>)> {
        library_names(1..12).prop_flat_map(|names| {
            let len = names.len();
            let edges = prop::collection::vec((0..len, 0..len), 0..len * 2);
            (Just(names), edges).prop_map(|(names, pairs)| {
                let edges = pairs
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| {
                        let (from, to) = if a > b { (a, b) } else { (b, a) };
                        (names[from].clone(), names[to].clone())
                    })
                    .collect();
                (names, edges)
            })
        })
    }

    /// Generate units and edges that contain at least one cycle of length >= 2
    pub fn cyclic_graph() -> impl Strategy<Value = (Vec<String>, Vec<(String, String)>)> {
        library_names(2..10).prop_flat_map(|names| {
            let len = names.len();
            let extra = prop::collection::vec((0..len, 0..len), 0..len);
            (Just(names), 2..=len, extra).prop_map(|(names, cycle_len, extra)| {
                let mut edges: Vec<(String, String)> = (0..cycle_len)
                    .map(|i| (names[i].clone(), names[(i + 1) % cycle_len].clone()))
                    .collect();
                edges.extend(
                    extra
                        .into_iter()
                        .map(|(a, b)| (names[a].clone(), names[b].clone())),
                );
                (names, edges)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_library_name_generator(name in library_name()) {
            prop_assert!(name.len() >= 2);
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_semver_version_generator(version in semver_version()) {
            prop_assert!(semver::Version::parse(&version).is_ok());
        }

        #[test]
        fn test_acyclic_edges_reference_known_names((names, edges) in acyclic_graph()) {
            for (from, to) in &edges {
                prop_assert!(names.contains(from));
                prop_assert!(names.contains(to));
                prop_assert_ne!(from, to);
            }
        }
    }
}
