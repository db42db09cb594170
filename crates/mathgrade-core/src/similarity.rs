use regex::Regex;
use std::collections::HashSet;

/// Deterministic similarity between two canonical answers, in [0, 1].
/// Decision ladder, first applicable rule wins:
/// 1. exact equality -> 1.0
/// 2. one non-empty string contains the other -> 0.9
/// 3. first numeral of each side within absolute 0.001 -> 0.95, or
///    within 5% relative difference -> 0.8
/// 4. token-set Jaccard similarity
///
/// Total: numeral parse failures fall through to the Jaccard rule, and
/// degenerate inputs hit the explicit empty-set branches.
pub fn similarity_score(expected: &str, actual: &str) -> f64 {
    if expected == actual {
        return 1.0;
    }

    if !expected.is_empty()
        && !actual.is_empty()
        && (actual.contains(expected) || expected.contains(actual))
    {
        return 0.9;
    }

    if let (Some(a), Some(b)) = (first_numeral(expected), first_numeral(actual)) {
        if (a - b).abs() < 0.001 {
            return 0.95;
        }
        let denom = a.max(b);
        // both numerals zero is caught by the absolute check above
        if denom > 0.0 && (a - b).abs() / denom < 0.05 {
            return 0.8;
        }
    }

    jaccard(expected, actual)
}

/// Greedy scan for the first decimal or integer numeral. Multi-number
/// answers are compared by their first numeral only.
pub(crate) fn first_numeral(text: &str) -> Option<f64> {
    let re = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    re.find(text)?.as_str().parse::<f64>().ok()
}

fn jaccard(expected: &str, actual: &str) -> f64 {
    let a: HashSet<&str> = expected.split_whitespace().collect();
    let b: HashSet<&str> = actual.split_whitespace().collect();

    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(&b).count();
    let union = a.union(&b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert_eq!(similarity_score("4", "4"), 1.0);
        assert_eq!(similarity_score("", ""), 1.0);
    }

    #[test]
    fn containment_is_symmetric() {
        assert_eq!(similarity_score("x = 5", "so x = 5 exactly"), 0.9);
        assert_eq!(similarity_score("so x = 5 exactly", "x = 5"), 0.9);
    }

    #[test]
    fn empty_side_never_contains() {
        // "" is a substring of everything; the containment rule must
        // not fire for it
        assert_eq!(similarity_score("", "something else entirely"), 0.0);
        assert_eq!(similarity_score("something else entirely", ""), 0.0);
    }

    #[test]
    fn close_numerals() {
        assert_eq!(similarity_score("answer 3.1415", "value 3.1410"), 0.95);
    }

    #[test]
    fn relative_tolerance() {
        // 100 vs 104: 4% apart, beyond absolute tolerance
        assert_eq!(similarity_score("total 100", "total is 104"), 0.8);
    }

    #[test]
    fn far_numerals_fall_to_jaccard() {
        let score = similarity_score("area 100", "area 500");
        assert!(score < 0.8, "got {}", score);
    }

    #[test]
    fn zero_numerals_hit_absolute_branch() {
        assert_eq!(similarity_score("offset 0 units", "delta 0 found"), 0.95);
    }

    #[test]
    fn jaccard_overlap() {
        // no shared substring, no numerals
        let score = similarity_score("alpha beta", "beta gamma");
        assert!((score - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_hold() {
        let pairs = [
            ("", "x"),
            ("90 degrees", "90"),
            ("pi", "3.14159"),
            ("1/2", "0.5"),
        ];
        for (e, a) in pairs {
            let s = similarity_score(e, a);
            assert!((0.0..=1.0).contains(&s), "{} out of bounds", s);
        }
    }

    #[test]
    fn half_vs_decimal_takes_jaccard_path() {
        // first numerals are 1 and 0.5; neither tolerance applies, so
        // the token overlap (zero) decides
        assert_eq!(similarity_score("1/2", "0.5"), 0.0);
    }
}
