// tests/normalize_values.rs
//
// The normalizer's observable contract, rule by rule, plus the blanket
// guarantees: total on any input, markers are always a version number or
// "?", and stripped text always survives in the note.

use compat_scrape::model::{Slot, Support};
use compat_scrape::normalize::{RULES, UNKNOWN_MARKER, is_version, normalize};

fn n(raw: &str) -> compat_scrape::normalize::Normalized {
    normalize(Slot::Normal, raw)
}

#[test]
fn bare_version_is_support_at_that_version() {
    let out = n("3.0");
    assert_eq!(out.code, Support::Yes);
    assert_eq!(out.marker, "3.0");
    assert_eq!(out.note, None);

    let out = n("10.60");
    assert_eq!((out.code, out.marker.as_str()), (Support::Yes, "10.60"));
}

#[test]
fn prefix_slot_yields_prefixed_code() {
    let out = normalize(Slot::Prefix, "5.0");
    assert_eq!(out.code, Support::Prefixed);
    assert_eq!(out.marker, "5.0");

    let out = normalize(Slot::Prefix, "(Yes)");
    assert_eq!(out.code, Support::Prefixed);
    assert_eq!(out.marker, UNKNOWN_MARKER);
}

#[test]
fn version_with_trailing_prose_keeps_the_prose_as_note() {
    let out = n("12.10 (without prefix)");
    assert_eq!(out.code, Support::Yes);
    assert_eq!(out.marker, "12.10");
    assert_eq!(out.note.as_deref(), Some("12.10 (without prefix)"));

    let out = n("16.0 (16.0)");
    assert_eq!(out.marker, "16.0");
    assert_eq!(out.note.as_deref(), Some("16.0 (16.0)"));
}

#[test]
fn exact_yes_has_unknown_marker() {
    for raw in ["yes", "Yes", "(Yes)", "(yes)"] {
        let out = n(raw);
        assert_eq!(out.code, Support::Yes, "raw = {raw:?}");
        assert_eq!(out.marker, UNKNOWN_MARKER);
        assert_eq!(out.note.as_deref(), Some(raw));
    }
}

#[test]
fn qualified_yes_downgrades_to_almost() {
    for raw in ["(Yes) [1]", "(Yes) (Not in Chromium)", "Yes, behind a flag"] {
        let out = n(raw);
        assert_eq!(out.code, Support::Almost, "raw = {raw:?}");
        assert_eq!(out.marker, UNKNOWN_MARKER);
        assert_eq!(out.note.as_deref(), Some(raw));
    }
}

#[test]
fn not_supported_without_extra_text_carries_no_note() {
    let out = n("Not supported");
    assert_eq!(out.code, Support::No);
    assert_eq!(out.marker, UNKNOWN_MARKER);
    assert_eq!(out.note, None);

    // The nbsp variant collapses to the same literal.
    let out = n("Not\u{a0}supported");
    assert_eq!(out.code, Support::No);
    assert_eq!(out.note, None);
}

#[test]
fn not_supported_with_explanation_keeps_it() {
    let out = n("Not supported (grid media type is not supported)");
    assert_eq!(out.code, Support::No);
    assert_eq!(out.marker, UNKNOWN_MARKER);
    assert!(out.note.as_deref().unwrap_or("").contains("grid media type"));
}

#[test]
fn nightly_means_almost() {
    for raw in [
        "Nightly build (537.1)",
        "Activated on Nightly only (24)",
        "On Nightly, behind the media.webvtt.enabled preference.",
    ] {
        let out = n(raw);
        assert_eq!(out.code, Support::Almost, "raw = {raw:?}");
        assert_eq!(out.marker, UNKNOWN_MARKER);
        assert_eq!(out.note.as_deref(), Some(raw));
    }
}

#[test]
fn partial_removed_and_see_note() {
    let out = n("Partial (see below)");
    assert_eq!(out.code, Support::Almost);

    let out = n("Partial since 11.0, full since 16.0");
    assert_eq!(out.code, Support::Almost);

    let out = n("Removed in 23.0 (23.0)");
    assert_eq!(out.code, Support::No);
    assert_eq!(out.note.as_deref(), Some("Removed in 23.0 (23.0)"));

    let out = n("Supported until 4.0; see note below.");
    assert_eq!(out.code, Support::Almost);
}

#[test]
fn placeholders_and_blanks_are_unknown() {
    let out = n("?");
    assert_eq!((out.code, out.note), (Support::Unknown, None));

    let out = n("");
    assert_eq!((out.code, out.note), (Support::Unknown, None));

    let out = n("-");
    assert_eq!(out.code, Support::Unknown);
    assert_eq!(out.note.as_deref(), Some("-"));
}

#[test]
fn unclassifiable_text_degrades_but_is_preserved() {
    for raw in ["chaos", "Feature detection required", "χάος", "3.0beta"] {
        let out = n(raw);
        assert_eq!(out.code, Support::Unknown, "raw = {raw:?}");
        assert_eq!(out.marker, UNKNOWN_MARKER);
        assert_eq!(out.note.as_deref(), Some(raw));
    }
}

#[test]
fn marker_is_always_a_version_or_unknown() {
    let samples = [
        "3.0",
        "16.0 (16.0)",
        "(Yes)",
        "(Yes) [1]",
        "Not supported",
        "Nightly",
        "Partial",
        "Removed in 23.0",
        "see note",
        "?",
        "",
        "-",
        "total nonsense with \u{a0} inside",
        "5.0 (5.0), prefixed",
    ];
    for (slot, raw) in samples
        .iter()
        .flat_map(|r| [(Slot::Normal, *r), (Slot::Prefix, *r)])
    {
        let out = normalize(slot, raw);
        assert!(
            out.marker == UNKNOWN_MARKER || is_version(&out.marker),
            "bad marker {:?} for ({:?}, {:?})",
            out.marker,
            slot,
            raw
        );
    }
}

#[test]
fn normalizing_an_emitted_version_marker_is_stable() {
    let first = n("16.0 (16.0)");
    let second = n(&first.marker);
    assert_eq!(second.code, first.code);
    assert_eq!(second.marker, first.marker);
}

#[test]
fn version_shape_is_strict() {
    for ok in ["1", "13", "13.0", "10.60", "1.2.3"] {
        assert!(is_version(ok), "{ok:?}");
    }
    for bad in ["", ".", "1.", ".5", "1..2", "13a", "v13", "13,0"] {
        assert!(!is_version(bad), "{bad:?}");
    }
}

#[test]
fn cascade_order_is_pinned() {
    let names: Vec<&str> = RULES.iter().map(|(name, _)| *name).collect();
    assert_eq!(
        names,
        [
            "nightly",
            "not-supported",
            "exact-yes",
            "yes-with-qualifier",
            "bare-unknown",
            "empty-value",
            "bare-version",
            "dash-placeholder",
            "partial",
            "removed",
            "see-note",
        ]
    );
}
