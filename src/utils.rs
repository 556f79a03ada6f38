pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// strips a single leading utf-8 byte-order-mark, if present.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text)
}

/// splits text into lines on `\r\n`, `\r` or `\n`.
/// yields `(line_number, line)` pairs, numbered from 1. a trailing terminator
/// does not produce an extra empty line.
pub fn universal_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    let mut line_number = 0;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        line_number += 1;
        let (line, next) = match rest.find(['\r', '\n']) {
            Some(pos) => {
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..pos], &rest[pos + skip..])
            }
            None => (rest, ""),
        };
        rest = next;
        Some((line_number, line))
    })
}

/// renders a separator for log output, making whitespace visible.
pub fn printable_separator(separator: &str) -> String {
    match separator {
        "\t" => "\\t".to_string(),
        " " => "<space>".to_string(),
        other => other.to_string(),
    }
}
