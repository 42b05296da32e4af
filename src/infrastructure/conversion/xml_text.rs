use std::borrow::Cow;

use quick_xml::escape::{resolve_html5_entity, unescape_with};

/// Decodes character references and named HTML entities. Text with a
/// malformed or unknown reference is returned unchanged.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    unescape_with(text, resolve_html5_entity).unwrap_or(Cow::Borrowed(text))
}
