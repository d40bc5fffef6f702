//! HTML Table Extraction
//! Pulls the first `<table>` of a page apart into header names and cell rows.

/// Header names plus body rows as scraped. Empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Extract the first table of `doc`.
///
/// `header_row` picks which `<thead>` row names the columns (rushing pages have a
/// grouping row above the real one); the last row is used if there are fewer.
/// Every `<tr>` of the body becomes a row, including repeated header rows, which
/// the caller is expected to filter out.
pub fn extract_table(doc: &str, header_row: usize) -> Option<RawTable> {
    let (start, end) = next_element(&doc.to_ascii_lowercase(), "table", 0)?;
    let table = &doc[start..end];

    let (head, body) = match next_element(&table.to_ascii_lowercase(), "thead", 0) {
        Some((hs, he)) => (&table[hs..he], &table[he..]),
        None => ("", table),
    };

    let mut header_rows = rows_of(head);
    if header_rows.is_empty() {
        // No <thead>: the first body row carries the names
        let mut body_rows = rows_of(body);
        if body_rows.is_empty() {
            return None;
        }
        let names = body_rows.remove(0);
        return Some(RawTable {
            headers: unique_names(names.into_iter().map(Option::unwrap_or_default)),
            rows: body_rows,
        });
    }

    let pick = header_row.min(header_rows.len() - 1);
    let names = header_rows.swap_remove(pick);
    Some(RawTable {
        headers: unique_names(names.into_iter().map(Option::unwrap_or_default)),
        rows: rows_of(body),
    })
}

/// All `<tr>` rows of a fragment, each as its `<th>`/`<td>` cell texts.
fn rows_of(fragment: &str) -> Vec<Vec<Option<String>>> {
    let lc = fragment.to_ascii_lowercase();
    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_element(&lc, "tr", pos) {
        pos = tr_e;
        let cells = cells_of(&fragment[tr_s..tr_e]);
        if !cells.is_empty() {
            rows.push(cells);
        }
    }
    rows
}

fn cells_of(tr: &str) -> Vec<Option<String>> {
    let lc = tr.to_ascii_lowercase();
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let th = next_element(&lc, "th", pos);
        let td = next_element(&lc, "td", pos);
        let (start, end) = match (th, td) {
            (Some(a), Some(b)) => {
                if a.0 < b.0 {
                    a
                } else {
                    b
                }
            }
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => break,
        };
        let text = normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(
            &tr[start..end],
        ))));
        cells.push(if text.is_empty() { None } else { Some(text) });
        pos = end;
    }
    cells
}

/// Suffix repeated names with `.1`, `.2`, ... so every column is addressable.
fn unique_names(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{}.{}", name, n);
            n += 1;
        }
        out.push(candidate);
    }
    out
}

/// Byte span of the next `<tag ...>...</tag>` element at or after `from`.
/// `lc` is the ASCII-lowercased text, so offsets are valid on the original too.
/// The tag name must be followed by `>`, `/` or whitespace, so `th` never
/// matches `<thead>`.
fn next_element(lc: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);

    let mut search = from;
    let start = loop {
        let at = lc.get(search..)?.find(&open)? + search;
        let next = lc[at + open.len()..].chars().next()?;
        if next == '>' || next == '/' || next.is_ascii_whitespace() {
            break at;
        }
        search = at + open.len();
    };

    let open_end = lc[start..].find('>')? + start + 1;
    let close_at = lc[open_end..].find(&close)? + open_end;
    let end = lc[close_at..].find('>')? + close_at + 1;
    Some((start, end))
}

fn inner_after_open_tag(block: &str) -> &str {
    match (block.find('>'), block.rfind('<')) {
        (Some(oe), Some(cs)) if cs > oe => &block[oe + 1..cs],
        _ => "",
    }
}

fn strip_tags(s: &str) -> String {
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
    normalize_ws(&out)
}

fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
