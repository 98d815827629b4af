//! Patch and PatchSet data model.
//!
//! A [`Patch`] is a `(regex, css?, js?)` triple. Whether it is local- or
//! remote-scoped is derived, not declared: the regex source is inspected for
//! the literal substring `http`. This is the source skin format's own
//! discriminator and is preserved here for compatibility with existing skins.

use regex::Regex;
use serde::Deserialize;

use crate::error::EngineError;

/// A single skin patch: a target-matching regex plus the CSS and/or JS to inject.
#[derive(Debug, Clone)]
pub struct Patch {
    regex: Regex,
    full_match_regex: Regex,
    css: Option<String>,
    js: Option<String>,
}

impl Patch {
    /// Build a patch from an already-compiled regex, validating the
    /// at-least-one-artifact invariant.
    ///
    /// Alongside the source regex (kept for [`Patch::is_remote_scoped`] and
    /// attribute substring matching, which operate on the regex source
    /// text), this compiles a second, start-and-end-anchored regex used for
    /// full-string matching (title and URL contexts). Anchoring and
    /// delegating to `is_match` rather than bolting a bounds check onto
    /// `find`'s leftmost-first result is what makes alternation patterns
    /// like `foo|foobar` match correctly against the full string.
    pub fn new(regex: Regex, css: Option<String>, js: Option<String>) -> Result<Self, EngineError> {
        if css.is_none() && js.is_none() {
            return Err(EngineError::EmptyPatch {
                pattern: regex.as_str().to_string(),
            });
        }
        let full_match_regex = Regex::new(&format!("^(?:{})$", regex.as_str())).map_err(|source| {
            EngineError::InvalidPatchRegex {
                pattern: regex.as_str().to_string(),
                source,
            }
        })?;
        Ok(Self { regex, full_match_regex, css, js })
    }

    /// The match regex, as authored (unanchored).
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The same pattern anchored at both ends, for full-string matching.
    #[must_use]
    pub fn full_match_regex(&self) -> &Regex {
        &self.full_match_regex
    }

    /// CSS artifact, if present.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }

    /// JS artifact, if present.
    #[must_use]
    pub fn js(&self) -> Option<&str> {
        self.js.as_deref()
    }

    /// A patch is remote-scoped iff its regex source contains the literal
    /// substring `http`; this is the skin format's own discriminator.
    #[must_use]
    pub fn is_remote_scoped(&self) -> bool {
        self.regex.as_str().contains("http")
    }

    /// A patch is local-scoped iff it is not remote-scoped.
    #[must_use]
    pub fn is_local_scoped(&self) -> bool {
        !self.is_remote_scoped()
    }
}

/// An ordered set of patches plus a validity flag.
///
/// When `valid` is false the remote engine skips all work; the local engine
/// keeps attaching to targets but matches zero patches (see §4.4/§7 of the
/// design: config errors never stop target discovery).
#[derive(Debug, Clone, Default)]
pub struct PatchSet {
    patches: Vec<Patch>,
    valid: bool,
}

impl PatchSet {
    /// An empty, invalid patch set — the safe default before the first config load.
    #[must_use]
    pub fn empty_invalid() -> Self {
        Self {
            patches: Vec::new(),
            valid: false,
        }
    }

    /// Construct directly from parsed patches and a validity flag.
    #[must_use]
    pub fn new(patches: Vec<Patch>, valid: bool) -> Self {
        Self { patches, valid }
    }

    /// Whether the config this set was parsed from was well-formed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// All patches, in config order.
    #[must_use]
    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    /// Local-scoped patches, in config order.
    pub fn local_patches(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(|p| p.is_local_scoped())
    }

    /// Remote-scoped patches, in config order.
    pub fn remote_patches(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(|p| p.is_remote_scoped())
    }
}

/// Wire shape of a single patch entry in the skin config document.
///
/// Field names are preserved bit-for-bit (including casing) to stay
/// compatible with existing skin files — this is not a general-purpose
/// serde convention, it mirrors the source format exactly.
#[derive(Debug, Deserialize)]
struct RawPatch {
    #[serde(rename = "MatchRegexString")]
    match_regex_string: String,
    #[serde(rename = "TargetCss")]
    target_css: Option<String>,
    #[serde(rename = "TargetJs")]
    target_js: Option<String>,
}

/// Wire shape of the skin config document.
#[derive(Debug, Deserialize)]
pub struct PatchSetDocument {
    #[serde(rename = "Patches")]
    patches: Vec<RawPatch>,
    #[serde(default)]
    config_fail: bool,
}

impl TryFrom<PatchSetDocument> for PatchSet {
    type Error = EngineError;

    fn try_from(doc: PatchSetDocument) -> Result<Self, Self::Error> {
        if doc.config_fail {
            return Ok(PatchSet::empty_invalid());
        }

        let mut patches = Vec::with_capacity(doc.patches.len());
        for raw in doc.patches {
            let regex =
                Regex::new(&raw.match_regex_string).map_err(|source| EngineError::InvalidPatchRegex {
                    pattern: raw.match_regex_string.clone(),
                    source,
                })?;
            patches.push(Patch::new(regex, raw.target_css, raw.target_js)?);
        }

        Ok(PatchSet::new(patches, true))
    }
}

/// Parse a skin config document (as JSON text) into a [`PatchSet`].
///
/// # Errors
///
/// Returns an error if the document is not valid JSON in the expected shape,
/// if any patch's regex fails to compile, or if a patch has neither
/// `TargetCss` nor `TargetJs`.
pub fn parse_patch_set(json: &str) -> Result<PatchSet, EngineError> {
    let doc: PatchSetDocument =
        serde_json::from_str(json).map_err(|e| EngineError::PatchSetSource(e.to_string()))?;
    PatchSet::try_from(doc)
}

#[cfg(test)]
mod tests;
