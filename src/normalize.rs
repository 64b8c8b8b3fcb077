// src/normalize.rs
//
// The value normalizer: classifies one free-form support string into a
// support-level code plus a version marker, stashing anything it had to
// strip or reinterpret as a note.
//
// Classification is an ordered cascade. A pre-pass first shortens
// "version number followed by prose" to the bare version token (keeping
// the full text as a note), then the rules in RULES run top to bottom and
// the first hit wins. Order is load-bearing: the exact-yes rule must see
// the text before the yes-with-qualifier rule, "Not supported (...)"
// must be taken before any substring rule, and so on. The table is a
// plain const so tests can pin the sequence down.
//
// `normalize` is total. Whatever the input, it returns a valid
// (code, marker) pair; unclassifiable text degrades to (u, "?") with the
// original preserved in the note. Downstream reassembly relies on never
// seeing a missing classification.

use crate::core::sanitize::collapse_ws;
use crate::model::{Slot, Support};

/// The unknown-version marker.
pub const UNKNOWN_MARKER: &str = "?";

/// Result of normalizing a single (slot, raw text) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub code: Support,
    pub marker: String,
    pub note: Option<String>,
}

impl Normalized {
    fn new(code: Support, marker: &str, note: Option<&str>) -> Self {
        Self {
            code,
            marker: marker.to_string(),
            note: note.map(str::to_string),
        }
    }
}

type Rule = fn(Slot, &str) -> Option<Normalized>;

/// The rule cascade, in evaluation order. First match wins.
pub const RULES: &[(&str, Rule)] = &[
    ("nightly", nightly),
    ("not-supported", not_supported),
    ("exact-yes", exact_yes),
    ("yes-with-qualifier", yes_with_qualifier),
    ("bare-unknown", bare_unknown),
    ("empty-value", empty_value),
    ("bare-version", bare_version),
    ("dash-placeholder", dash_placeholder),
    ("partial", partial),
    ("removed", removed),
    ("see-note", see_note),
];

/// Normalize one slot value.
///
/// Examples:
/// - `(Normal, "16.0")` -> `(y, "16.0")`
/// - `(Prefix, "5.0")` -> `(x, "5.0")`
/// - `(Normal, "12.10 (without prefix)")` -> `(y, "12.10")` + note
/// - `(Normal, "Not supported")` -> `(n, "?")`
/// - `(Normal, "chaos")` -> `(u, "?")` + note
pub fn normalize(slot: Slot, raw: &str) -> Normalized {
    let cleaned = collapse_ws(raw);
    let mut value = cleaned.as_str();
    let mut stashed = false;

    // Pre-pass: a version number with trailing prose. Classify the bare
    // token; the full text survives in the note.
    if let Some(sp) = value.find(' ') {
        if is_version(&value[..sp]) {
            stashed = true;
            value = &cleaned[..sp];
        }
    }

    let mut out = classify(slot, value);
    if stashed {
        // The full original text beats the shortened token as a note.
        out.note = Some(cleaned.clone());
    }
    out
}

/// Run the rule table over an already-cleaned value.
pub fn classify(slot: Slot, value: &str) -> Normalized {
    for (_, rule) in RULES {
        if let Some(hit) = rule(slot, value) {
            return hit;
        }
    }
    // Anomaly of last resort: admit we don't know, keep the evidence.
    Normalized::new(Support::Unknown, UNKNOWN_MARKER, Some(value))
}

/// Strict version shape: `^\d+(\.\d+)*$`.
pub fn is_version(s: &str) -> bool {
    !s.is_empty()
        && s.split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

/* ---------- rules, in cascade order ---------- */

// "Nightly", "Nightly build (537.1)", "Activated on Nightly only (24)",
// "On Nightly, behind the media.webvtt.enabled preference."
fn nightly(_slot: Slot, value: &str) -> Option<Normalized> {
    if value.to_lowercase().contains("nightly") {
        return Some(Normalized::new(Support::Almost, UNKNOWN_MARKER, Some(value)));
    }
    None
}

// "Not supported", "Not supported (grid media type is not supported)".
// The exact literal carries no extra information, so no note for it.
fn not_supported(slot: Slot, value: &str) -> Option<Normalized> {
    if slot == Slot::Normal && value.to_lowercase().starts_with("not supported") {
        let note = if value == "Not supported" { None } else { Some(value) };
        return Some(Normalized::new(Support::No, UNKNOWN_MARKER, note));
    }
    None
}

// "yes", "Yes", "(Yes)" — nothing else.
fn exact_yes(slot: Slot, value: &str) -> Option<Normalized> {
    match yes_tail(value) {
        Some("") => Some(Normalized::new(
            Support::for_slot(slot),
            UNKNOWN_MARKER,
            Some(value),
        )),
        _ => None,
    }
}

// "(Yes) [1]", "(Yes) (Not in Chromium)": a yes with strings attached is
// only almost a yes.
fn yes_with_qualifier(_slot: Slot, value: &str) -> Option<Normalized> {
    match yes_tail(value) {
        Some(tail) if !tail.is_empty() => {
            Some(Normalized::new(Support::Almost, UNKNOWN_MARKER, Some(value)))
        }
        _ => None,
    }
}

// A bare "?" in the principal slot.
fn bare_unknown(slot: Slot, value: &str) -> Option<Normalized> {
    if slot == Slot::Normal && value == UNKNOWN_MARKER {
        return Some(Normalized::new(Support::Unknown, UNKNOWN_MARKER, None));
    }
    None
}

// An empty principal slot (seen on text-align-last).
fn empty_value(slot: Slot, value: &str) -> Option<Normalized> {
    if slot == Slot::Normal && value.is_empty() {
        return Some(Normalized::new(Support::Unknown, UNKNOWN_MARKER, None));
    }
    None
}

// "13", "13.0", "10.60": the marker is the version itself.
fn bare_version(slot: Slot, value: &str) -> Option<Normalized> {
    if is_version(value) {
        return Some(Normalized::new(Support::for_slot(slot), value, None));
    }
    None
}

// "-", "---": a placeholder someone typed into the table.
fn dash_placeholder(_slot: Slot, value: &str) -> Option<Normalized> {
    if !value.is_empty() && value.bytes().all(|b| b == b'-') {
        return Some(Normalized::new(Support::Unknown, UNKNOWN_MARKER, Some(value)));
    }
    None
}

// "Partial (see below)", "Partial since 11.0, full since 16.0".
fn partial(_slot: Slot, value: &str) -> Option<Normalized> {
    if value.starts_with("Partial") {
        return Some(Normalized::new(Support::Almost, UNKNOWN_MARKER, Some(value)));
    }
    None
}

// "Removed in 23.0 (23.0)", "Support was removed in Gecko 7.0."
fn removed(_slot: Slot, value: &str) -> Option<Normalized> {
    if value.to_lowercase().contains("removed") {
        return Some(Normalized::new(Support::No, UNKNOWN_MARKER, Some(value)));
    }
    None
}

// "see note" anywhere in the text defers to prose we cannot encode.
fn see_note(_slot: Slot, value: &str) -> Option<Normalized> {
    if value.to_lowercase().contains("see note") {
        return Some(Normalized::new(Support::Almost, UNKNOWN_MARKER, Some(value)));
    }
    None
}

/* ---------- helpers ---------- */

/// Match `^\(?yes\)?` case-insensitively and return what follows, or None
/// when the value does not start with a yes at all. Both parentheses are
/// independently optional, mirroring the sloppy source data.
fn yes_tail(value: &str) -> Option<&str> {
    // ASCII pattern, so byte offsets into the original are safe.
    let mut idx = 0usize;
    let bytes = value.as_bytes();
    if bytes.first() == Some(&b'(') {
        idx += 1;
    }
    match value.get(idx..idx + 3) {
        Some(head) if head.eq_ignore_ascii_case("yes") => idx += 3,
        _ => return None,
    }
    if bytes.get(idx) == Some(&b')') {
        idx += 1;
    }
    Some(&value[idx..])
}
