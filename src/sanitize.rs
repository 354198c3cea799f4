//! Whitelist HTML sanitizer for outbound text fields.
//!
//! Stored text is never rewritten; this runs on every read/create response so
//! user-supplied markup renders as inert text. Tags outside the whitelist have
//! their angle brackets entity-escaped in place, whitelisted tags are rebuilt
//! keeping only whitelisted attributes. Idempotent: sanitizing already
//! sanitized text is a no-op.

/// Attributes permitted per whitelisted tag. `None` means the tag itself is
/// not allowed and gets escaped.
fn allowed_attrs(tag: &str) -> Option<&'static [&'static str]> {
    const NONE: &[&str] = &[];
    Some(match tag {
        "a" => &["href", "target", "title"],
        "img" => &["src", "alt", "title", "width", "height"],
        "blockquote" => &["cite"],
        "b" | "strong" | "i" | "em" | "u" | "s" | "small" | "sub" | "sup" | "p" | "div"
        | "span" | "br" | "hr" | "code" | "pre" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
        | "ul" | "ol" | "li" | "dl" | "dt" | "dd" | "table" | "thead" | "tbody" | "tr"
        | "td" | "th" | "caption" => NONE,
        _ => return None,
    })
}

/// URL-valued attributes that must not smuggle a script-bearing scheme.
fn is_url_attr(name: &str) -> bool {
    name == "href" || name == "src"
}

/// Reject `javascript:`/`vbscript:`/`data:` URLs, including ones padded with
/// whitespace or control characters that browsers strip before dispatch.
fn has_forbidden_scheme(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_ascii_control())
        .flat_map(char::to_lowercase)
        .collect();
    compact.starts_with("javascript:")
        || compact.starts_with("vbscript:")
        || compact.starts_with("data:")
}

struct RawTag<'a> {
    /// Lowercased element name.
    name: String,
    closing: bool,
    self_closing: bool,
    /// Attributes in source order: lowercased name, raw (unescaped) value.
    attrs: Vec<(String, Option<&'a str>)>,
    /// Byte index just past the terminating `>`.
    end: usize,
}

/// Try to read a tag starting at `start` (which must point at `<`). Returns
/// `None` when the input is not tag-shaped; the caller then escapes the `<`
/// and keeps scanning.
fn parse_tag(input: &str, start: usize) -> Option<RawTag<'_>> {
    let bytes = input.as_bytes();
    let mut i = start + 1;

    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }

    if !bytes.get(i).is_some_and(u8::is_ascii_alphabetic) {
        return None;
    }
    let name_start = i;
    while bytes
        .get(i)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'-')
    {
        i += 1;
    }
    let name = input[name_start..i].to_ascii_lowercase();

    let mut attrs: Vec<(String, Option<&str>)> = Vec::new();
    let mut self_closing = false;

    loop {
        while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
            i += 1;
        }
        match bytes.get(i) {
            None => return None,
            Some(b'>') => {
                return Some(RawTag { name, closing, self_closing, attrs, end: i + 1 });
            }
            Some(b'/') => {
                if bytes.get(i + 1) == Some(&b'>') {
                    self_closing = true;
                    i += 1;
                } else {
                    i += 1;
                }
            }
            Some(_) => {
                let attr_start = i;
                while bytes
                    .get(i)
                    .is_some_and(|&b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'/' | b'>'))
                {
                    i += 1;
                }
                if i == attr_start {
                    i += 1;
                    continue;
                }
                let attr_name = input[attr_start..i].to_ascii_lowercase();

                while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                    i += 1;
                }
                let value = if bytes.get(i) == Some(&b'=') {
                    i += 1;
                    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
                        i += 1;
                    }
                    match bytes.get(i) {
                        Some(&quote) if quote == b'"' || quote == b'\'' => {
                            let value_start = i + 1;
                            let rel = input[value_start..].find(quote as char)?;
                            i = value_start + rel + 1;
                            Some(&input[value_start..value_start + rel])
                        }
                        _ => {
                            let value_start = i;
                            while bytes
                                .get(i)
                                .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'>')
                            {
                                i += 1;
                            }
                            Some(&input[value_start..i])
                        }
                    }
                } else {
                    None
                };
                attrs.push((attr_name, value));
            }
        }
    }
}

fn push_escaped_angles(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_attr_value(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_rebuilt_tag(out: &mut String, tag: &RawTag<'_>, allowed: &[&str]) {
    out.push('<');
    if tag.closing {
        out.push('/');
        out.push_str(&tag.name);
        out.push('>');
        return;
    }
    out.push_str(&tag.name);
    for (name, value) in &tag.attrs {
        if !allowed.contains(&name.as_str()) {
            continue;
        }
        if is_url_attr(name) && value.as_deref().is_some_and(has_forbidden_scheme) {
            continue;
        }
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            push_attr_value(out, value);
            out.push('"');
        }
    }
    if tag.self_closing {
        out.push_str(" /");
    }
    out.push('>');
}

/// Sanitize one text field for presentation. Text without markup comes back
/// unchanged.
pub fn sanitize(input: &str) -> String {
    if !input.contains(['<', '>']) {
        return input.to_string();
    }

    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len() + 16);
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => match parse_tag(input, i) {
                Some(tag) => {
                    match allowed_attrs(&tag.name) {
                        Some(allowed) => push_rebuilt_tag(&mut out, &tag, allowed),
                        None => {
                            // Escape the whole tag in place; inner text stays.
                            out.push_str("&lt;");
                            push_escaped_angles(&mut out, &input[i + 1..tag.end - 1]);
                            out.push_str("&gt;");
                        }
                    }
                    i = tag.end;
                }
                None => {
                    out.push_str("&lt;");
                    i += 1;
                }
            },
            b'>' => {
                out.push_str("&gt;");
                i += 1;
            }
            _ => {
                let start = i;
                while i < bytes.len() && bytes[i] != b'<' && bytes[i] != b'>' {
                    i += 1;
                }
                out.push_str(&input[start..i]);
            }
        }
    }

    out
}
