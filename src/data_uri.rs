use crate::element::{SvgSource, serialize_svg};
use crate::error::SvgToolboxError;
use base64::Engine;

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Encodes an svg document or element as a base64 data URI.
pub fn svg_to_base64<'a>(source: impl Into<SvgSource<'a>>) -> Result<String, SvgToolboxError> {
    let markup = serialize_svg(source)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(markup.as_bytes());
    Ok(format!("{SVG_DATA_URI_PREFIX}{payload}"))
}

/// Decodes a base64 data URI (or bare payload) back to svg markup.
///
/// The payload must decode to UTF-8 text that contains an svg tag;
/// anything else is rejected as [`SvgToolboxError::InvalidBase64`].
pub fn base64_to_svg(input: &str) -> Result<String, SvgToolboxError> {
    let payload = match input.split_once(',') {
        Some((_, payload)) => payload,
        None => input,
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|_| SvgToolboxError::InvalidBase64)?;
    let markup = String::from_utf8(bytes).map_err(|_| SvgToolboxError::InvalidBase64)?;

    if !markup.to_ascii_lowercase().contains("<svg") {
        return Err(SvgToolboxError::InvalidBase64);
    }
    Ok(markup)
}
