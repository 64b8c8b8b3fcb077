// src/specs/compat.rs
//
// Reads an MDN "Browser compatibility" section. The section carries up
// to two tables, marked id="compat-desktop" and id="compat-mobile":
//
//   <table id="compat-desktop">
//     <tr><th>Feature</th><th>Chrome</th><th>Firefox (Gecko)</th>...</tr>
//     <tr><td>Basic support</td><td>3.0</td><td>16.0 (16.0)</td>...</tr>
//     ...
//
// A cell may describe both a prefixed and an unprefixed version, split
// by <br>, with the prefixed part flagged by a span like
//   <span class="inlineIndicator prefixBox prefixBoxInline">-moz</span>
// Anchors (footnote links) and "unimplemented" markers are stripped
// before the text is read; the free text itself is left alone — the
// normalizer deals with it later.

use std::collections::BTreeMap;

use crate::core::html::{
    inner_after_open_tag, next_tag_block_ci, remove_elements_ci, strip_tags, to_lower,
};
use crate::core::sanitize::normalize_entities;
use crate::model::{FeatureTable, RawTable, SlotRecord};

const PLATFORM_MARKERS: &[(&str, &str)] = &[
    ("desktop", "compat-desktop"),
    ("mobile", "compat-mobile"),
];

/// Extract the raw compat table from a section's HTML.
///
/// Returns `Ok(None)` when the markup has no compat table at all (the
/// caller skips the page, it is not an error). Structural corruption —
/// a data row wider than the browser header, or data rows without any
/// header — is an error scoped to this page.
pub fn scrape_table(html: &str) -> Result<Option<RawTable>, Box<dyn std::error::Error>> {
    let mut table = RawTable::new();
    for (platform, marker) in PLATFORM_MARKERS {
        if let Some(inner) = locate_marked_table(html, marker) {
            let features = parse_compat_table(inner)?;
            if !features.is_empty() {
                table.insert(platform.to_string(), features);
            }
        }
    }
    if table.is_empty() { Ok(None) } else { Ok(Some(table)) }
}

/// Find the `<table>` carrying (or immediately following) the given id
/// and return its inner HTML. The id sits on the table itself or on a
/// wrapper element directly before it, depending on the page's vintage.
fn locate_marked_table<'a>(html: &'a str, marker_id: &str) -> Option<&'a str> {
    let lc = to_lower(html);
    let needle = format!("id=\"{}\"", marker_id);
    let idx = lc.find(&needle)?;

    let tag_start = lc[..idx].rfind('<').unwrap_or(0);
    let from = if lc[tag_start..].starts_with("<table") { tag_start } else { idx };

    let (s, e) = next_tag_block_ci(html, "<table", "</table>", from)?;
    let block = &html[s..e];
    let open_end = block.find('>')? + 1;
    let close = block.len() - "</table>".len();
    Some(&block[open_end..close])
}

fn parse_compat_table(inner: &str) -> Result<FeatureTable, Box<dyn std::error::Error>> {
    let browsers = read_browser_headers(inner);

    let mut out = FeatureTable::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(inner, "<tr", "</tr>", pos) {
        let tr = &inner[tr_s..tr_e];
        pos = tr_e;
        if to_lower(tr).contains("<th") {
            continue; // header row
        }

        let mut cells = Vec::new();
        let mut td_pos = 0usize;
        while let Some((td_s, td_e)) = next_tag_block_ci(tr, "<td", "</td>", td_pos) {
            cells.push(inner_after_open_tag(&tr[td_s..td_e]));
            td_pos = td_e;
        }
        if cells.is_empty() {
            continue;
        }

        let feature = strip_tags(normalize_entities(&cells.remove(0)));
        if browsers.is_empty() {
            return Err("compat table has data rows but no browser header".into());
        }
        if cells.len() > browsers.len() {
            return Err(format!(
                "row \"{}\" has {} value cells for {} browsers",
                feature,
                cells.len(),
                browsers.len()
            )
            .into());
        }

        let mut row = BTreeMap::new();
        for (browser, cell) in browsers.iter().zip(cells.iter()) {
            row.insert(browser.clone(), parse_cell(cell));
        }
        out.insert(feature, row);
    }
    Ok(out)
}

/// Header `<th>` cells; the first one is the feature-column label
/// ("Feature"), the rest are browser names.
fn read_browser_headers(inner: &str) -> Vec<String> {
    let mut headers = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(inner, "<th", "</th>", pos) {
        let clean = strip_tags(normalize_entities(&inner_after_open_tag(&inner[s..e])));
        headers.push(clean);
        pos = e;
    }
    if headers.len() > 1 { headers.split_off(1) } else { Vec::new() }
}

/// One `<td>`'s inner HTML into a slot record. Parts are split on <br>;
/// a part carrying a prefixBox indicator fills the prefix slot, any
/// other part the normal slot (last of each kind wins, as in the source
/// markup there is at most one of each).
fn parse_cell(cell_html: &str) -> SlotRecord {
    let mut rec = SlotRecord::default();
    for part in split_br(cell_html) {
        let prefixed = to_lower(&part).contains("prefixbox");

        let mut cleaned = remove_elements_ci(&part, "a");
        cleaned = remove_marked_spans(&cleaned, "prefixbox");
        cleaned = remove_marked_spans(&cleaned, "unimplemented");
        let text = strip_tags(normalize_entities(&cleaned));

        if prefixed {
            rec.prefix = Some(text);
        } else {
            rec.normal = Some(text);
        }
    }
    rec
}

/// Split on `<br>` / `<br/>` / `<br />`, case-insensitive.
fn split_br(html: &str) -> Vec<String> {
    let lc = to_lower(html);
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut from = 0usize;

    while let Some(rel) = lc[from..].find("<br") {
        let at = from + rel;
        let boundary = matches!(lc.as_bytes().get(at + 3), Some(b' ') | Some(b'>') | Some(b'/'));
        if !boundary {
            from = at + 3;
            continue;
        }
        let Some(gt) = lc[at..].find('>') else { break };
        parts.push(html[start..at].to_string());
        start = at + gt + 1;
        from = start;
    }
    parts.push(html[start..].to_string());
    parts
}

/// Remove every `<span ...>` element whose opening tag mentions
/// `class_sub` (lowercase substring match on the tag head).
fn remove_marked_spans(html: &str, class_sub: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html.to_string();

    loop {
        let lc = to_lower(&rest);
        let Some(open) = lc.find("<span") else { break };
        let Some(head_end_rel) = lc[open..].find('>') else { break };
        let head = &lc[open..open + head_end_rel];

        if head.contains(class_sub) {
            let Some(close_rel) = lc[open..].find("</span>") else { break };
            out.push_str(&rest[..open]);
            rest = rest[open + close_rel + "</span>".len()..].to_string();
        } else {
            out.push_str(&rest[..open + head_end_rel + 1]);
            rest = rest[open + head_end_rel + 1..].to_string();
        }
    }
    out.push_str(&rest);
    out
}
