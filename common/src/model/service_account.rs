//! Service/admin account detection rules.
//!
//! Accounts such as `svc-backup@corp.com` or `admin.*@corp.com` should not be
//! counted as employee seats. Detection is driven by email glob patterns that
//! admins maintain from the dashboard; the backend applies the same patterns
//! during sync, so the conversion here must stay deliberately simple: `*`
//! matches any run of characters, `?` matches exactly one, everything else is
//! literal.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceAccountRule {
    pub id: String, // UUID
    /// Email glob, e.g. `svc-*@corp.com`.
    pub pattern: String,
    pub note: Option<String>,
    /// ISO 8601 timestamp.
    pub created_at: String,
}

/// Converts an email glob into an anchored, case-insensitive regex.
/// Every character except the two wildcards is escaped literally.
pub fn pattern_to_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push_str("(?i)^");
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(&ch.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
}

/// Whether `email` matches the glob `pattern`. Invalid patterns match nothing.
pub fn pattern_matches(pattern: &str, email: &str) -> bool {
    pattern_to_regex(pattern)
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

/// Whether any of the given rules flags `email` as a service account.
pub fn is_service_account(rules: &[ServiceAccountRule], email: &str) -> bool {
    rules.iter().any(|r| pattern_matches(&r.pattern, email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_any_run() {
        assert!(pattern_matches("svc-*@corp.com", "svc-backup@corp.com"));
        assert!(pattern_matches("svc-*@corp.com", "svc-@corp.com"));
        assert!(!pattern_matches("svc-*@corp.com", "backup@corp.com"));
    }

    #[test]
    fn question_mark_matches_exactly_one() {
        assert!(pattern_matches("bot?@corp.com", "bot1@corp.com"));
        assert!(!pattern_matches("bot?@corp.com", "bot@corp.com"));
        assert!(!pattern_matches("bot?@corp.com", "bot12@corp.com"));
    }

    #[test]
    fn literal_dots_are_escaped() {
        // The dot must not behave as a regex wildcard.
        assert!(!pattern_matches("admin@corp.com", "admin@corpxcom"));
        assert!(pattern_matches("admin@corp.com", "admin@corp.com"));
    }

    #[test]
    fn matching_is_case_insensitive_and_anchored() {
        assert!(pattern_matches("Admin-*@Corp.com", "admin-ops@corp.COM"));
        assert!(!pattern_matches("admin@corp.com", "xadmin@corp.com"));
        assert!(!pattern_matches("admin@corp.com", "admin@corp.come"));
    }

    #[test]
    fn rule_set_detection() {
        let rules = vec![
            ServiceAccountRule {
                id: "1".into(),
                pattern: "svc-*@corp.com".into(),
                note: None,
                created_at: "2026-01-01T00:00:00Z".into(),
            },
            ServiceAccountRule {
                id: "2".into(),
                pattern: "*.bot@corp.com".into(),
                note: Some("CI bots".into()),
                created_at: "2026-01-01T00:00:00Z".into(),
            },
        ];
        assert!(is_service_account(&rules, "svc-ldap@corp.com"));
        assert!(is_service_account(&rules, "deploy.bot@corp.com"));
        assert!(!is_service_account(&rules, "ana@corp.com"));
    }
}
