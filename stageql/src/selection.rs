//! Line-based field extraction
//!
//! Existing callers rely on this exact behavior: the body of the first
//! balanced brace pair is read line by line, and each line contributes at
//! most one field name. Nested selections are flattened, not understood.

/// Extract the ordered list of requested field names from a document
pub fn extract_fields(document: &str) -> Vec<String> {
    match top_level_body(document) {
        Some(body) => body.lines().filter_map(field_name).collect(),
        None => Vec::new(),
    }
}

/// Text strictly inside the first balanced `{ ... }` pair
fn top_level_body(document: &str) -> Option<&str> {
    let open = document.find('{')?;
    let mut depth = 0usize;

    for (offset, c) in document[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&document[open + 1..open + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

fn field_name(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let head = match line.find('{') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let name = head.trim_end_matches('}').trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
