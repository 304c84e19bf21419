use crate::element::{SvgElement, SvgSource};
use crate::error::SvgToolboxError;
use std::collections::HashSet;

/// One fill or stroke color used somewhere in the document, with the
/// element's opacity when declared.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgColor {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub opacity: Option<f32>,
}

/// Collects every fill and stroke color in document order, de-duplicated
/// by (kind, value, opacity). `none` and `transparent` do not count.
pub fn extract_colors<'a>(
    source: impl Into<SvgSource<'a>>,
) -> Result<Vec<SvgColor>, SvgToolboxError> {
    let markup = source.into().into_markup();
    let svg = SvgElement::parse(&markup)?;

    let mut seen = HashSet::new();
    let mut colors = Vec::new();

    for node in svg.node().inclusive_descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        let attributes = element.attributes.borrow();
        let opacity_raw = attributes.get("opacity").map(str::to_string);
        let opacity = opacity_raw.as_deref().and_then(|raw| raw.parse::<f32>().ok());
        let opacity_key = opacity_raw.as_deref().unwrap_or("1");

        if let Some(fill) = attributes.get("fill") {
            if fill != "none"
                && fill != "transparent"
                && seen.insert(format!("fill:{fill}:{opacity_key}"))
            {
                colors.push(SvgColor {
                    fill: Some(fill.to_string()),
                    stroke: None,
                    opacity,
                });
            }
        }

        if let Some(stroke) = attributes.get("stroke") {
            if stroke != "none"
                && stroke != "transparent"
                && seen.insert(format!("stroke:{stroke}:{opacity_key}"))
            {
                colors.push(SvgColor {
                    fill: None,
                    stroke: Some(stroke.to_string()),
                    opacity,
                });
            }
        }
    }

    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_fills_and_strokes_in_document_order() {
        let colors = extract_colors(
            r##"<svg><rect fill="#ff0000"/><circle stroke="blue"/><path fill="#00ff00"/></svg>"##,
        )
        .unwrap();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0].fill.as_deref(), Some("#ff0000"));
        assert_eq!(colors[1].stroke.as_deref(), Some("blue"));
        assert_eq!(colors[2].fill.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn skips_none_and_transparent() {
        let colors = extract_colors(
            r#"<svg><rect fill="none" stroke="transparent"/><rect fill="red"/></svg>"#,
        )
        .unwrap();
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].fill.as_deref(), Some("red"));
    }

    #[test]
    fn deduplicates_by_value_and_opacity() {
        let colors = extract_colors(
            r#"<svg><rect fill="red"/><circle fill="red"/><path fill="red" opacity="0.5"/></svg>"#,
        )
        .unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].opacity, None);
        assert_eq!(colors[1].opacity, Some(0.5));
    }

    #[test]
    fn same_value_counts_separately_for_fill_and_stroke() {
        let colors =
            extract_colors(r#"<svg><rect fill="red" stroke="red"/></svg>"#).unwrap();
        assert_eq!(colors.len(), 2);
        assert!(colors[0].fill.is_some());
        assert!(colors[1].stroke.is_some());
    }

    #[test]
    fn fails_without_root_svg() {
        assert!(matches!(
            extract_colors("<div></div>"),
            Err(SvgToolboxError::NoRootElement)
        ));
    }
}
