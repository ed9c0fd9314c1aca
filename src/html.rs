use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// How user-supplied strings are inserted into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Escaping {
    /// Inserted verbatim.
    #[default]
    Raw,
    /// Text and attribute values are escaped, unsafe color tokens are dropped.
    Html,
}

/// HTML 4 / XML valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Accepts hex colors, functional notations and bare keywords.
pub fn is_safe_color(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }

    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }

    if let Some(open) = value.find('(') {
        let name = &value[..open];
        let Some(args) = value[open + 1..].strip_suffix(')') else {
            return false;
        };
        return matches!(name, "rgb" | "rgba" | "hsl" | "hsla")
            && args
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '%' | ' ' | '/'));
    }

    value.chars().all(|c| c.is_ascii_alphabetic())
}

const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Percent-encodes a value for use inside a query string.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{encode_component, escape_html, is_safe_color};

    #[test]
    fn escape_special_html_chars() {
        let s = r#"<b class="x&y">'z'</b>"#;
        assert_eq!(
            escape_html(s),
            "&lt;b class=&quot;x&amp;y&quot;&gt;&#39;z&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_drops_invalid_control_chars() {
        assert_eq!(escape_html("A\u{0007}B\tC"), "AB\tC");
    }

    #[test]
    fn color_tokens() {
        for ok in ["#fff", "#4f6ef7", "#11223344", "rgb(1, 2, 3)", "hsla(10, 50%, 50%, .5)", "white"] {
            assert!(is_safe_color(ok), "{ok} should be accepted");
        }
        for bad in ["", "#12", "red;background:url(x)", "\"><script>", "expression(alert(1))"] {
            assert!(!is_safe_color(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn encodes_query_components() {
        assert_eq!(encode_component("https://a.b/c?d=1"), "https%3A%2F%2Fa.b%2Fc%3Fd%3D1");
        assert_eq!(encode_component("Привет"), "%D0%9F%D1%80%D0%B8%D0%B2%D0%B5%D1%82");
    }
}
