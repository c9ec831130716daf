//! Remote listing extraction from HTML index markup
//!
//! The listing is a best-effort scrape, not a strict grammar: the text
//! between the first `<pre>` and `</pre>` pair is split on `<br>` markers,
//! and every line shaped like `<signature><whitespace><a
//! href="...">filename</a>` contributes one entry. Lines that do not match
//! are skipped. The scan is a single forward pass over the markup; no
//! backtracking pattern engine is involved.

use tracing::debug;
use webmirror_types::{RemoteListing, ToolEntry};

/// Parse raw index markup into a filename → signature mapping.
///
/// Missing or malformed markup yields an empty mapping, which callers treat
/// as "nothing to do". Duplicate filenames resolve last-wins.
pub fn parse_listing(markup: &str) -> RemoteListing {
    let mut listing = RemoteListing::new();

    let Some(block) = extract_pre_block(markup) else {
        debug!("no <pre> block found in listing markup");
        return listing;
    };

    for line in split_br_lines(block) {
        match parse_entry(line) {
            Some(entry) => {
                listing.insert(entry.filename, entry.signature);
            }
            None => {
                if !line.is_empty() {
                    debug!("skipped listing line: {line}");
                }
            }
        }
    }

    debug!("{} tools found in listing", listing.len());
    listing
}

/// Parse one candidate line into a listing entry.
///
/// The accepted shape is `<signature><whitespace><a href="...">filename</a>`
/// where the signature ends in a run of ASCII digits and the anchor closes
/// the line. Tag names and the closing `</a>` match case-insensitively.
pub fn parse_entry(line: &str) -> Option<ToolEntry> {
    let line = line.trim();

    // the anchor terminator must close the line
    let body_end = line.len().checked_sub("</a>".len())?;
    if !line.is_char_boundary(body_end) || !line[body_end..].eq_ignore_ascii_case("</a>") {
        return None;
    }

    let a_start = find_anchor_open(line)?;

    // the signature precedes the anchor, separated by at least one
    // whitespace character, and ends in a digit
    let before = &line[..a_start];
    let signature = before.trim_end();
    if signature.len() == before.len() || signature.len() < 2 {
        return None;
    }
    if !signature.ends_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    // `<a` is followed by whitespace, then `href="`
    let rest = line[a_start + "<a".len()..body_end].trim_start();
    let keyword = rest.get(.."href=\"".len())?;
    if !keyword.eq_ignore_ascii_case("href=\"") {
        return None;
    }
    let href_body = &rest["href=\"".len()..];

    // the href is greedy: the filename follows the last `">` on the line
    let close = href_body.rfind("\">")?;
    let filename = &href_body[close + "\">".len()..];
    if filename.is_empty() {
        return None;
    }

    Some(ToolEntry::new(filename.to_string(), signature.to_string()))
}

/// Extract the text between the first `<pre>` and the following `</pre>`
fn extract_pre_block(markup: &str) -> Option<&str> {
    let start = find_ignore_case(markup, "<pre>", 0)? + "<pre>".len();
    let end = find_ignore_case(markup, "</pre>", start)?;
    Some(&markup[start..end])
}

/// Split a pre block on literal `<br>` markers, trimming each segment
fn split_br_lines(block: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut pos = 0;

    while let Some(idx) = find_ignore_case(block, "<br>", pos) {
        lines.push(block[pos..idx].trim());
        pos = idx + "<br>".len();
    }
    lines.push(block[pos..].trim());

    lines
}

/// Find the first `<a` that opens an anchor tag (followed by whitespace)
fn find_anchor_open(line: &str) -> Option<usize> {
    let mut pos = 0;
    while let Some(idx) = find_ignore_case(line, "<a", pos) {
        let rest = &line[idx + "<a".len()..];
        if rest.chars().next().is_some_and(char::is_whitespace) {
            return Some(idx);
        }
        pos = idx + "<a".len();
    }
    None
}

/// ASCII case-insensitive substring search starting at `from`
fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if from > haystack.len() {
        return None;
    }

    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|idx| from + idx)
}
