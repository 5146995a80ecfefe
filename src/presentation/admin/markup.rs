/// Escape text for HTML element content or a double-quoted attribute value.
/// `&` is escaped first so entities produced by the later passes survive.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}
