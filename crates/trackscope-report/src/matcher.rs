//! Tiered matching of an extracted username against tracked accounts.
//!
//! Tiers run in a fixed order and the first hit wins; within a tier the
//! first account in input order wins. The ordering is contractual: an
//! earlier tier's hit is returned even when a later tier would have matched
//! a different account.

use regex::Regex;
use trackscope_api::TrackedAccount;
use trackscope_core::Platform;

use crate::extract::capture_username;

/// Finds the tracked account whose `platform` link matches `username`.
///
/// An empty username short-circuits to no match without scanning. Otherwise
/// three increasingly lenient comparisons are tried against each account's
/// link field for `platform` (accounts without that field are skipped):
///
/// 1. exact — trimmed, case-insensitive equality (covers link fields that
///    store a bare username rather than a URL);
/// 2. url — equality against the username extracted from the link field by
///    the platform's profile-URL pattern;
/// 3. normalized — equality after stripping all non-alphanumerics from both
///    sides (both stripped forms must be non-empty).
#[must_use]
pub fn match_account<'a>(
    platform: Platform,
    username: &str,
    accounts: &'a [TrackedAccount],
) -> Option<&'a TrackedAccount> {
    let needle = username.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let pattern = Regex::new(platform.username_pattern()).expect("valid username regex");

    // Tier 1: exact link-field equality.
    let exact = accounts.iter().find(|account| {
        account
            .platform_link(platform)
            .is_some_and(|link| link.trim().to_lowercase() == needle)
    });
    if exact.is_some() {
        return exact;
    }

    // Tier 2: username extracted from the link URL.
    let from_url = accounts.iter().find(|account| {
        account.platform_link(platform).is_some_and(|link| {
            let extracted = capture_username(&pattern, link);
            !extracted.is_empty() && extracted.to_lowercase() == needle
        })
    });
    if from_url.is_some() {
        return from_url;
    }

    // Tier 3: strip everything non-alphanumeric and compare.
    let normalized_needle = normalize(&needle);
    if normalized_needle.is_empty() {
        return None;
    }
    accounts.iter().find(|account| {
        account
            .platform_link(platform)
            .is_some_and(|link| normalize(link) == normalized_needle)
    })
}

/// Lowercases and strips all non-alphanumeric characters.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, name: &str, instagram_link: Option<&str>) -> TrackedAccount {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "iac_no": format!("IAC-{id:03}"),
            "instagram_link": instagram_link,
        }))
        .expect("valid test account")
    }

    #[test]
    fn empty_username_short_circuits() {
        let accounts = vec![account(1, "Alice", Some("alice"))];
        assert!(match_account(Platform::Instagram, "", &accounts).is_none());
        assert!(match_account(Platform::Instagram, "   ", &accounts).is_none());
    }

    #[test]
    fn exact_tier_matches_bare_username_links() {
        let accounts = vec![
            account(1, "Alice", Some("alice")),
            account(2, "Bob", Some("bob")),
        ];
        let found = match_account(Platform::Instagram, "Bob", &accounts);
        assert_eq!(found.map(|a| a.id), Some(2));
    }

    #[test]
    fn url_tier_matches_full_profile_links() {
        let accounts = vec![account(1, "Alice", Some("https://www.instagram.com/alice"))];
        let found = match_account(Platform::Instagram, "alice", &accounts);
        assert_eq!(found.map(|a| a.id), Some(1));
    }

    #[test]
    fn normalized_tier_ignores_punctuation() {
        let accounts = vec![account(1, "Alice", Some("alice.tan"))];
        let found = match_account(Platform::Instagram, "alice_tan", &accounts);
        assert_eq!(found.map(|a| a.id), Some(1));
    }

    #[test]
    fn exact_tier_beats_url_tier_regardless_of_order() {
        // A stores a bare username, B stores the same name as a URL. The
        // exact tier completes over all accounts before the URL tier starts,
        // so A wins even when listed after B.
        let a = account(1, "A", Some("alice"));
        let b = account(2, "B", Some("https://instagram.com/alice"));

        let forward = vec![a.clone(), b.clone()];
        assert_eq!(
            match_account(Platform::Instagram, "alice", &forward).map(|x| x.id),
            Some(1)
        );

        let reversed = vec![b, a];
        assert_eq!(
            match_account(Platform::Instagram, "alice", &reversed).map(|x| x.id),
            Some(1)
        );
    }

    #[test]
    fn within_a_tier_first_account_in_input_order_wins() {
        let accounts = vec![
            account(1, "First", Some("alice")),
            account(2, "Second", Some("ALICE")),
        ];
        let found = match_account(Platform::Instagram, "alice", &accounts);
        assert_eq!(found.map(|a| a.id), Some(1));
    }

    #[test]
    fn accounts_without_the_platform_link_are_skipped() {
        let accounts = vec![account(1, "NoLink", None), account(2, "Alice", Some("alice"))];
        let found = match_account(Platform::Instagram, "alice", &accounts);
        assert_eq!(found.map(|a| a.id), Some(2));
    }

    #[test]
    fn punctuation_only_username_does_not_match_punctuation_only_link() {
        let accounts = vec![account(1, "Dashes", Some("---"))];
        assert!(match_account(Platform::Instagram, "...", &accounts).is_none());
    }

    #[test]
    fn no_match_returns_none() {
        let accounts = vec![account(1, "Alice", Some("alice"))];
        assert!(match_account(Platform::Instagram, "someone_else", &accounts).is_none());
    }
}
