use crate::element::SvgSource;
use crate::error::SvgToolboxError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Rendered size of an svg document. When a viewBox is declared it wins
/// over the width/height attributes; absent both, width and height are 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvgDimensions {
    pub width: f64,
    pub height: f64,
    pub view_box: Option<ViewBox>,
}

fn parse_view_box(raw: &str) -> Option<ViewBox> {
    let mut numbers = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()));
    let view_box = ViewBox {
        x: numbers.next()??,
        y: numbers.next()??,
        width: numbers.next()??,
        height: numbers.next()??,
    };
    Some(view_box)
}

// Length attributes may carry a unit suffix ("120px"); only the leading
// numeric prefix counts.
fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(index, _)| index)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse::<f64>().ok()
}

/// Extracts dimensions from an svg document or element.
pub fn svg_dimensions<'a>(
    source: impl Into<SvgSource<'a>>,
) -> Result<SvgDimensions, SvgToolboxError> {
    let markup = source.into().into_markup();
    let document =
        roxmltree::Document::parse(&markup).map_err(|_| SvgToolboxError::NoRootElement)?;
    let root = document.root_element();
    if !root.tag_name().name().eq_ignore_ascii_case("svg") {
        return Err(SvgToolboxError::NoRootElement);
    }

    if let Some(view_box) = root.attribute("viewBox").and_then(parse_view_box) {
        return Ok(SvgDimensions {
            width: view_box.width,
            height: view_box.height,
            view_box: Some(view_box),
        });
    }

    Ok(SvgDimensions {
        width: root.attribute("width").and_then(parse_length).unwrap_or(0.0),
        height: root
            .attribute("height")
            .and_then(parse_length)
            .unwrap_or(0.0),
        view_box: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_box_wins_over_width_and_height() {
        let dims =
            svg_dimensions(r#"<svg width="10" height="20" viewBox="0 0 100 200"></svg>"#).unwrap();
        assert_eq!(dims.width, 100.0);
        assert_eq!(dims.height, 200.0);
        assert_eq!(
            dims.view_box,
            Some(ViewBox {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 200.0,
            })
        );
    }

    #[test]
    fn falls_back_to_width_and_height() {
        let dims = svg_dimensions(r#"<svg width="120.5" height="60"></svg>"#).unwrap();
        assert_eq!(dims.width, 120.5);
        assert_eq!(dims.height, 60.0);
        assert!(dims.view_box.is_none());
    }

    #[test]
    fn tolerates_unit_suffixes() {
        let dims = svg_dimensions(r#"<svg width="120px" height="60pt"></svg>"#).unwrap();
        assert_eq!(dims.width, 120.0);
        assert_eq!(dims.height, 60.0);
    }

    #[test]
    fn comma_separated_view_box_parses() {
        let dims = svg_dimensions(r#"<svg viewBox="0,0,30,40"></svg>"#).unwrap();
        assert_eq!(dims.width, 30.0);
        assert_eq!(dims.height, 40.0);
    }

    #[test]
    fn missing_dimensions_yield_zero() {
        let dims = svg_dimensions("<svg></svg>").unwrap();
        assert_eq!(dims.width, 0.0);
        assert_eq!(dims.height, 0.0);
    }

    #[test]
    fn malformed_view_box_is_ignored() {
        let dims = svg_dimensions(r#"<svg viewBox="0 0 ten 40" width="7"></svg>"#).unwrap();
        assert!(dims.view_box.is_none());
        assert_eq!(dims.width, 7.0);
    }

    #[test]
    fn non_svg_root_is_an_error() {
        assert!(matches!(
            svg_dimensions("<div></div>"),
            Err(SvgToolboxError::NoRootElement)
        ));
    }
}
