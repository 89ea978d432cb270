/// Which registered fixes a resolver may offer.
///
/// Patterns are matched against fix names with `*` and `?` wildcards. A deny match
/// always wins; a non-empty allow list restricts offers to its matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverPolicy {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
}

impl ResolverPolicy {
    pub fn permits(&self, fix_name: &str) -> bool {
        if self.deny.iter().any(|pat| glob_match(pat, fix_name)) {
            return false;
        }
        self.allow.is_empty() || self.allow.iter().any(|pat| glob_match(pat, fix_name))
    }

    /// Allow and deny patterns that match none of `fix_names`, allow list first.
    pub fn unmatched_patterns<'p>(&'p self, fix_names: &[&str]) -> Vec<&'p str> {
        self.allow
            .iter()
            .chain(&self.deny)
            .filter(|pat| !fix_names.iter().any(|name| glob_match(pat, name)))
            .map(String::as_str)
            .collect()
    }
}

fn glob_match(pat: &str, text: &str) -> bool {
    // Simple wildcard matcher: '*' and '?'.
    //
    // DP implementation to avoid recursion.
    let p = pat.as_bytes();
    let t = text.as_bytes();
    let mut dp = vec![vec![false; t.len() + 1]; p.len() + 1];
    dp[0][0] = true;

    for i in 1..=p.len() {
        if p[i - 1] == b'*' {
            dp[i][0] = dp[i - 1][0];
        }
    }

    for i in 1..=p.len() {
        for j in 1..=t.len() {
            dp[i][j] = match p[i - 1] {
                b'*' => dp[i - 1][j] || dp[i][j - 1],
                b'?' => dp[i - 1][j - 1],
                c => dp[i - 1][j - 1] && c == t[j - 1],
            };
        }
    }

    dp[p.len()][t.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_supports_star_and_question_mark() {
        assert!(glob_match("const2*", "const2let"));
        assert!(glob_match("const?let", "const2let"));
        assert!(glob_match("*", ""));
        assert!(!glob_match("let*", "const2let"));
    }

    #[test]
    fn empty_policy_permits_everything() {
        assert!(ResolverPolicy::default().permits("const2let"));
    }

    #[test]
    fn deny_wins_over_allow() {
        let policy = ResolverPolicy {
            allow: vec!["*".to_string()],
            deny: vec!["const2let".to_string()],
        };
        assert!(!policy.permits("const2let"));
    }

    #[test]
    fn allow_list_restricts() {
        let policy = ResolverPolicy {
            allow: vec!["other*".to_string()],
            deny: vec![],
        };
        assert!(!policy.permits("const2let"));
        assert!(policy.permits("other-fix"));
    }

    #[test]
    fn reports_patterns_that_match_no_fix() {
        let policy = ResolverPolicy {
            allow: vec!["const*".to_string(), "cnst2let".to_string()],
            deny: vec!["missing?".to_string()],
        };
        assert_eq!(
            policy.unmatched_patterns(&["const2let"]),
            vec!["cnst2let", "missing?"]
        );
    }
}
