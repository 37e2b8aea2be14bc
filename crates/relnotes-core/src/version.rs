//! Total ordering over dotted numeric version strings.
//!
//! Versions such as `"1.21"`, `"1.22.1"` are compared component by component,
//! numerically. Comparison never fails: a component without leading digits
//! counts as `0`, so every pair of strings has a definite ordering.

use std::cmp::Ordering;

/// Compare two dotted version strings.
///
/// The first differing component decides. When all shared components are
/// equal, the version with more components is greater (`"1.22.1" > "1.22"`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.').map(component_value);
    let mut right = b.split('.').map(component_value);

    loop {
        match (left.next(), right.next()) {
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => continue,
                decided => return decided,
            },
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (None, None) => return Ordering::Equal,
        }
    }
}

/// Numeric value of one component: its leading run of ASCII digits.
///
/// Unparsable or overflowing components are `0`.
fn component_value(part: &str) -> u64 {
    let part = part.trim_start();
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().unwrap_or(0)
}

/// Whether `version` is non-empty and every component is all ASCII digits.
pub fn is_well_formed(version: &str) -> bool {
    !version.is_empty()
        && version
            .split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Sort version strings oldest first.
pub fn sort_ascending<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare_versions(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_compare_equal() {
        for v in ["1", "1.21", "1.22.1", "0.0.0", ""] {
            assert_eq!(compare_versions(v, v), Ordering::Equal, "{v}");
        }
    }

    #[test]
    fn longer_version_wins_on_shared_prefix() {
        assert_eq!(compare_versions("1.22.1", "1.22"), Ordering::Greater);
        assert_eq!(compare_versions("1.22", "1.22.1"), Ordering::Less);
        assert_eq!(compare_versions("1.22.0", "1.22"), Ordering::Greater);
    }

    #[test]
    fn components_compare_numerically() {
        assert_eq!(compare_versions("2.0", "1.23"), Ordering::Greater);
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.021", "1.21"), Ordering::Equal);
    }

    #[test]
    fn unparsable_components_count_as_zero() {
        assert_eq!(compare_versions("1.x", "1.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.rc1", "1.1"), Ordering::Less);
        assert_eq!(compare_versions("1.22rc1", "1.22"), Ordering::Equal);
        assert_eq!(
            compare_versions("1.99999999999999999999999", "1.1"),
            Ordering::Less
        );
    }

    #[test]
    fn antisymmetric_over_samples() {
        let samples = ["1", "1.0", "1.2", "1.10", "1.22.1", "2.0", "x.1", ""];
        for a in samples {
            for b in samples {
                assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
            }
        }
    }

    #[test]
    fn transitive_over_generated_chain() {
        let mut chain = Vec::new();
        for major in 0..3u32 {
            for minor in 0..12u32 {
                chain.push(format!("{major}.{minor}"));
                chain.push(format!("{major}.{minor}.1"));
            }
        }
        for window in chain.windows(3) {
            assert_eq!(compare_versions(&window[0], &window[1]), Ordering::Less);
            assert_eq!(compare_versions(&window[1], &window[2]), Ordering::Less);
            assert_eq!(compare_versions(&window[0], &window[2]), Ordering::Less);
        }
    }

    #[test]
    fn sort_ascending_uses_numeric_order() {
        let mut versions = vec!["1.22.1", "1.9", "1.22", "1.10"];
        sort_ascending(&mut versions);
        assert_eq!(versions, vec!["1.9", "1.10", "1.22", "1.22.1"]);
    }

    #[test]
    fn well_formed_rejects_non_numeric_parts() {
        assert!(is_well_formed("1.22"));
        assert!(is_well_formed("1.22.1"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("1..2"));
        assert!(!is_well_formed("go1.22"));
        assert!(!is_well_formed("1.22rc1"));
    }
}
