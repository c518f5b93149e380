//! Ratcliff/Obershelp string similarity.

/// Returns the similarity ratio of `a` and `b` in `0.0..=1.0`.
///
/// The ratio is `2 * M / T` where `M` is the number of characters matched by
/// repeatedly taking the longest common substring and recursing on both sides of it,
/// and `T` is the combined length. Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let (a_start, b_start, len) = longest_common_substring(a, b);
    if len == 0 {
        return 0;
    }

    len + matching_characters(&a[..a_start], &b[..b_start])
        + matching_characters(&a[a_start + len..], &b[b_start + len..])
}

/// Finds the earliest longest block shared by `a` and `b` as `(a_start, b_start, len)`.
fn longest_common_substring(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        let mut current = vec![0usize; b.len() + 1];
        for j in 0..b.len() {
            if a[i] == b[j] {
                current[j + 1] = previous[j] + 1;
                if current[j + 1] > best.2 {
                    best = (i + 1 - current[j + 1], j + 1 - current[j + 1], current[j + 1]);
                }
            }
        }
        previous = current;
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_match_fully() {
        assert_eq!(ratio("sample company", "sample company"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
    }

    #[test]
    fn disjoint_strings_do_not_match() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn matches_known_ratio() {
        // "abcd" vs "bcde": matched block "bcd" gives 2 * 3 / 8
        assert!((ratio("abcd", "bcde") - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn recurses_on_both_sides_of_block() {
        // blocks "sample" and "company" match, the differing middle char does not
        let score = ratio("sample-company", "sample company");
        assert!((score - 26.0 / 28.0).abs() < 1e-9);
    }
}
