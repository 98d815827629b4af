//! Patch matching (C3).
//!
//! Three contexts, three different matching rules — they are not
//! interchangeable. `title` and `url` fully-match a regex against a key;
//! `attrs` does a literal substring search of the *regex source itself*
//! against a long, concatenated attribute string (the source format's own
//! convention, not a general regex technique).

use crate::patch::{Patch, PatchSet};

/// Loopback host used by the embedded UI for its own local pages. A target
/// whose URL contains this is never treated as remote, whatever its regex.
pub const LOOPBACK_HOST: &str = "steamloopback.host";

/// Whether a patch's regex matches `key` over its entire length.
///
/// Uses the pattern's start-and-end-anchored form so alternations (`foo|foobar`)
/// get proper full-string semantics from the automaton, rather than a bounds
/// check bolted onto `find`'s leftmost-first substring match.
fn matches_fully(patch: &Patch, key: &str) -> bool {
    patch.full_match_regex().is_match(key)
}

/// Local-scoped patches whose regex fully matches a page title.
pub fn match_title<'a>(patch_set: &'a PatchSet, title: &str) -> Vec<&'a Patch> {
    patch_set
        .local_patches()
        .filter(|p| matches_fully(p, title))
        .collect()
}

/// Remote-scoped patches whose regex fully matches a target URL.
///
/// Loopback URLs never match, regardless of what the patch regex says.
pub fn match_url<'a>(patch_set: &'a PatchSet, url: &str) -> Vec<&'a Patch> {
    if url.contains(LOOPBACK_HOST) {
        return Vec::new();
    }
    patch_set
        .remote_patches()
        .filter(|p| matches_fully(p, url))
        .collect()
}

/// Local-scoped patches whose regex *source* appears as a substring of an
/// `<html>` attribute string.
///
/// This is a deliberate asymmetry with [`match_title`]: attribute strings are
/// long concatenations of class/id tokens, so the source format matches on
/// substring rather than full-regex-match here.
pub fn match_attrs<'a>(patch_set: &'a PatchSet, attrs: &str) -> Vec<&'a Patch> {
    patch_set
        .local_patches()
        .filter(|p| attrs.contains(p.regex().as_str()))
        .collect()
}

/// Whether a target URL is eligible for remote patching at all: not a
/// loopback URL, and matched by at least one remote-scoped patch.
pub fn should_patch(patch: &Patch, target_url: &str) -> bool {
    patch.is_remote_scoped() && !target_url.contains(LOOPBACK_HOST) && matches_fully(patch, target_url)
}

#[cfg(test)]
mod tests;
