// src/convert.rs
//
// The entry converter: walks one page's raw compat table, runs every slot
// value through the normalizer and reassembles the result into a
// CompatRecord carrying page identity (origin, slug, category,
// breadcrumb).
//
// This is a total transform. Unclassifiable values degrade inside the
// normalizer, a malformed breadcrumb degrades to a sentinel category;
// nothing here aborts a page.

use std::collections::BTreeMap;

use crate::config::consts::DOCS_MARKER;
use crate::core::sanitize::{collapse_ws, slugify};
use crate::model::{BrowserSupport, CompatRecord, Contents, RawTable, Slot, SlotRecord};
use crate::normalize::normalize;

/// Category assigned when the breadcrumb is too short to carry one.
pub const FALLBACK_CATEGORY: &str = "edge-case-to-fix";

pub fn convert(table: &RawTable, origin: &str) -> CompatRecord {
    let breadcrumb = breadcrumb_of(origin);
    let category = breadcrumb
        .len()
        .checked_sub(2)
        .and_then(|i| breadcrumb.get(i))
        .map(|seg| slugify(seg))
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

    let mut contents = Contents::new();
    for (platform, features) in table {
        let mut feature_out = BTreeMap::new();
        for (feature, browsers) in features {
            let mut browser_out: BTreeMap<String, BrowserSupport> = BTreeMap::new();
            for (browser, slots) in browsers {
                let name = browser_name(browser);
                let entry = browser_out.entry(name).or_default();
                apply_slots(entry, slots);
            }
            feature_out.insert(collapse_ws(feature), browser_out);
        }
        contents.insert(platform.clone(), feature_out);
    }

    CompatRecord {
        breadcrumb,
        category,
        origin: origin.to_string(),
        slug: slug_of(origin),
        contents,
    }
}

fn apply_slots(entry: &mut BrowserSupport, slots: &SlotRecord) {
    if let Some(raw) = &slots.normal {
        apply(entry, Slot::Normal, raw);
    }
    if let Some(raw) = &slots.prefix {
        apply(entry, Slot::Prefix, raw);
    }
}

fn apply(entry: &mut BrowserSupport, slot: Slot, raw: &str) {
    let n = normalize(slot, raw);
    // Colliding markers concatenate rather than overwrite (see
    // BrowserSupport::insert_version).
    entry.insert_version(&n.marker, n.code);
    if let Some(note) = n.note {
        entry.add_note(slot, &note);
    }
}

/// "Firefox (Gecko)" -> "Firefox". The parenthetical engine annotation is
/// display noise; position >= 1 so a name that *starts* with a
/// parenthesis is left alone.
fn browser_name(raw: &str) -> String {
    let name = collapse_ws(raw);
    match name.find('(') {
        Some(pos) if pos >= 1 => name[..pos].trim_end().to_string(),
        _ => name,
    }
}

/// Path segments after the documentation-root marker. URLs without the
/// marker fall back to the full path after the host.
fn breadcrumb_of(origin: &str) -> Vec<String> {
    let path = match origin.find(DOCS_MARKER) {
        Some(i) => &origin[i + DOCS_MARKER.len()..],
        None => after_host(origin),
    };
    path.split('/')
        .filter(|seg| !seg.is_empty())
        .map(str::to_string)
        .collect()
}

fn after_host(origin: &str) -> &str {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .unwrap_or(origin);
    match rest.find('/') {
        Some(i) => &rest[i + 1..],
        None => "",
    }
}

/// Slug from the trailing path segment, slugified ("." counts as
/// punctuation, so "box-shadow.html" -> "box-shadow-html").
fn slug_of(origin: &str) -> String {
    let last = origin
        .split('/')
        .filter(|seg| !seg.is_empty())
        .next_back()
        .unwrap_or("");
    slugify(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_name_strips_engine_annotation() {
        assert_eq!(browser_name("Firefox (Gecko)"), "Firefox");
        assert_eq!(browser_name("Firefox   Mobile (Gecko)"), "Firefox Mobile");
        assert_eq!(browser_name("Chrome"), "Chrome");
        assert_eq!(browser_name("(odd)"), "(odd)");
    }

    #[test]
    fn breadcrumb_follows_docs_marker() {
        let b = breadcrumb_of("https://developer.mozilla.org/en-US/docs/Web/CSS/box-shadow");
        assert_eq!(b, vec!["Web", "CSS", "box-shadow"]);
    }

    #[test]
    fn breadcrumb_without_marker_uses_path() {
        let b = breadcrumb_of("https://example.org/just/a/page");
        assert_eq!(b, vec!["just", "a", "page"]);
    }

    #[test]
    fn slug_from_trailing_segment() {
        assert_eq!(slug_of("https://developer.mozilla.org/en-US/docs/Web/CSS/:indeterminate"), "indeterminate");
        assert_eq!(slug_of("https://developer.mozilla.org/en-US/docs/Web/CSS/@keyframes"), "keyframes");
        assert_eq!(slug_of("https://developer.mozilla.org/en-US/docs/Web/CSS/box-shadow"), "box-shadow");
    }
}
