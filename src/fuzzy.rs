//! Fuzzy similarity scoring for the search field
//!
//! Scores use a partial-ratio metric: the shorter string is aligned against
//! every same-length window of the longer one and the best normalized
//! LCS ratio wins. Scores are in `0.0..=100.0`.
//!
//! Smart case: a query with any uppercase letter is compared verbatim,
//! otherwise both sides are lowercased first.

/// True when the query should be matched case-sensitively
pub fn is_case_sensitive(query: &str) -> bool {
    query.chars().any(char::is_uppercase)
}

/// A query prepared once and scored against many candidates
#[derive(Debug, Clone)]
pub struct FuzzyQuery {
    chars: Vec<char>,
    case_sensitive: bool,
}

impl FuzzyQuery {
    pub fn new(query: &str) -> Self {
        let case_sensitive = is_case_sensitive(query);
        let chars = if case_sensitive {
            query.chars().collect()
        } else {
            query.to_lowercase().chars().collect()
        };
        Self {
            chars,
            case_sensitive,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Score one candidate against this query
    pub fn score(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = if self.case_sensitive {
            candidate.chars().collect()
        } else {
            candidate.to_lowercase().chars().collect()
        };
        partial_ratio(&self.chars, &candidate)
    }
}

/// Similarity of `candidate` to `query` in `0.0..=100.0`
pub fn similarity(query: &str, candidate: &str) -> f64 {
    FuzzyQuery::new(query).score(candidate)
}

/// Rank label positions by descending score; ties keep ascending position.
///
/// Nothing is excluded: the score only orders the result.
pub fn rank<S: AsRef<str>>(query: &str, labels: &[S]) -> Vec<usize> {
    let query = FuzzyQuery::new(query);
    let mut scored: Vec<(usize, f64)> = labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (idx, query.score(label.as_ref())))
        .collect();

    // Stable sort keeps ascending index among equal scores
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(idx, _)| idx).collect()
}

fn partial_ratio(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let n = long.len();
    let in_short = |c: &char| short.contains(c);

    let mut best = 0.0f64;
    let mut consider = |window: &[char]| {
        let score = ratio(short, window);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    // Prefix windows shorter than the query, ending on a shared character
    for k in 1..m {
        if in_short(&long[k - 1]) && consider(&long[..k]) {
            return 100.0;
        }
    }

    // Full-length windows; an optimal window can always start on a shared char
    for start in 0..=(n - m) {
        if in_short(&long[start]) && consider(&long[start..start + m]) {
            return 100.0;
        }
    }

    // Suffix windows shorter than the query, starting on a shared character
    for k in (1..m).rev() {
        let start = n - k;
        if in_short(&long[start]) && consider(&long[start..]) {
            return 100.0;
        }
    }

    best
}

/// Normalized indel similarity: 2 * LCS / (|a| + |b|), scaled to 100
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(similarity("hello", "hello"), 100.0);
        assert_eq!(similarity("Hello World", "Hello World"), 100.0);
        assert_eq!(similarity("", ""), 100.0);
    }

    #[test]
    fn test_substring_scores_100() {
        assert_eq!(similarity("bar", "foo bar baz"), 100.0);
    }

    #[test]
    fn test_scores_within_bounds() {
        for (q, c) in [("abc", "xyz"), ("abc", ""), ("", "abc"), ("long query", "q")] {
            let s = similarity(q, c);
            assert!((0.0..=100.0).contains(&s), "{} vs {} => {}", q, c, s);
        }
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_smart_case_lowercase_query_ignores_case() {
        assert_eq!(similarity("readme", "README.md"), 100.0);
    }

    #[test]
    fn test_smart_case_uppercase_query_is_verbatim() {
        assert!(is_case_sensitive("ReadMe"));
        assert!(!is_case_sensitive("readme"));
        assert!(similarity("README", "readme.md") < 100.0);
        assert_eq!(similarity("README", "README.md"), 100.0);
    }

    #[test]
    fn test_partial_alignment_beats_scattered_match() {
        let close = similarity("main", "src/main.rs");
        let far = similarity("main", "m_a_i_n");
        assert!(close > far);
    }

    #[test]
    fn test_rank_orders_by_score_then_index() {
        let labels = vec!["zzz", "apple", "zzz", "apricot"];
        let order = rank("apple", &labels);
        assert_eq!(order[0], 1);
        // The two non-matching labels keep their relative order
        let z0 = order.iter().position(|&i| i == 0).unwrap();
        let z2 = order.iter().position(|&i| i == 2).unwrap();
        assert!(z0 < z2);
        assert_eq!(order.len(), labels.len());
    }

    #[test]
    fn test_rank_keeps_everything() {
        let labels = vec!["a", "b", "c"];
        let mut order = rank("q", &labels);
        order.sort();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
