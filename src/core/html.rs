// src/core/html.rs
// Low-level HTML string manipulation, deliberately naive but tailored to
// the markup MDN emits for compat sections. Tag/attribute matching is
// ASCII case-insensitive.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Find the next complete tag block from `from` onwards, case-insensitive.
/// A block spans from the start of the opening tag to the end of the
/// closing tag, e.g. `<tr ...> ... </tr>`.
pub fn next_tag_block_ci(s: &str, open_tag: &str, close_tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let open_lc = to_lower(open_tag);
    let close_lc = to_lower(close_tag);
    let start = lc.get(from..)?.find(&open_lc)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&close_lc)?;
    let end = open_end + end_rel + close_tag.len();
    Some((start, end))
}

/// Given a complete block like `<td ...>INNER</td>`, return INNER
/// (which may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    String::new()
}

/// Remove all `<...>` tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::collapse_ws(&out)
}

/// Remove every `<tag ...>...</tag>` element (opening tag, content and
/// closing tag). `tag` is the bare tag name; a boundary check keeps
/// `"a"` from matching `<abbr>`. Non-nested elements only, which is all
/// the compat cells contain.
pub fn remove_elements_ci(s: &str, tag: &str) -> String {
    let open = format!("<{}", to_lower(tag));
    let close = format!("</{}>", to_lower(tag));
    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    loop {
        let lc = to_lower(rest);
        let mut found = None;
        let mut search_from = 0usize;
        while let Some(rel) = lc[search_from..].find(&open) {
            let at = search_from + rel;
            // boundary: next char must end the tag name
            match lc.as_bytes().get(at + open.len()) {
                Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'/') => {
                    found = Some(at);
                    break;
                }
                _ => search_from = at + open.len(),
            }
        }
        let Some(start) = found else { break };
        let Some(end_rel) = lc[start..].find(&close) else { break };
        out.push_str(&rest[..start]);
        rest = &rest[start + end_rel + close.len()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_elements_drops_anchors_only() {
        let html = r##"5.0 <a href="#note1">[1]</a> and <abbr>x</abbr>"##;
        let out = remove_elements_ci(html, "a");
        assert_eq!(out, "5.0  and <abbr>x</abbr>");
    }

    #[test]
    fn next_tag_block_finds_nested_cells() {
        let html = "<tr><td>one</td><td>two</td></tr>";
        let (s, e) = next_tag_block_ci(html, "<td", "</td>", 0).unwrap();
        assert_eq!(&html[s..e], "<td>one</td>");
        let (s2, e2) = next_tag_block_ci(html, "<td", "</td>", e).unwrap();
        assert_eq!(&html[s2..e2], "<td>two</td>");
    }
}
