use crate::element::{SvgElement, SvgSource};
use crate::error::SvgToolboxError;

// Bounds hostile input before any repeated scanning happens.
const MAX_CONTENT_LENGTH: usize = 10_000_000;
const MAX_STRIP_PASSES: usize = 1000;

/// Drops attributes whose value is empty or whitespace-only, on the svg
/// root and everything below it.
pub fn remove_empty_attributes<'a>(
    source: impl Into<SvgSource<'a>>,
) -> Result<String, SvgToolboxError> {
    let markup = source.into().into_markup();
    let svg = SvgElement::parse(&markup)?;

    for node in svg.node().inclusive_descendants() {
        let Some(element) = node.as_element() else {
            continue;
        };
        element
            .attributes
            .borrow_mut()
            .map
            .retain(|_, attribute| !attribute.value.trim().is_empty());
    }

    Ok(svg.to_svg_string())
}

fn find_comment_close(text: &str) -> Option<usize> {
    // Both close tokens are honored; whichever starts first wins.
    match (text.find("-->"), text.find("--!>")) {
        (Some(normal), Some(bang)) if bang < normal => Some(bang + 4),
        (Some(normal), _) => Some(normal + 3),
        (None, Some(bang)) => Some(bang + 4),
        (None, None) => None,
    }
}

fn strip_comments_once(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 4..];
        match find_comment_close(after) {
            Some(end) => rest = &after[end..],
            // Orphaned opener: drop the delimiter, keep the tail.
            None => rest = after,
        }
    }
    out.push_str(rest);
    // Orphaned closers left behind by nesting.
    out.replace("--!>", "").replace("-->", "")
}

/// Strips comments, repeating until a fixed point so nested comments
/// cannot resurface (`<!--<!-- inner -->-->` must become nothing, not
/// `<!-- inner -->`).
pub fn remove_comments(markup: &str) -> Result<String, SvgToolboxError> {
    if markup.len() > MAX_CONTENT_LENGTH {
        return Err(SvgToolboxError::Markup(format!(
            "content length exceeds {MAX_CONTENT_LENGTH} bytes"
        )));
    }

    let mut current = markup.to_string();
    for _ in 0..MAX_STRIP_PASSES {
        let stripped = strip_comments_once(&current);
        if stripped == current {
            return Ok(current);
        }
        current = stripped;
    }
    Err(SvgToolboxError::Markup(
        "comment removal did not converge".to_string(),
    ))
}

/// Collapses whitespace runs to single spaces, removes whitespace between
/// tags, and trims the ends.
pub fn normalize_whitespace(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_run = false;
    for c in markup.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out.replace("> <", "><").trim().to_string()
}

/// Comment removal, then empty-attribute removal, then whitespace
/// normalization.
pub fn optimize_svg<'a>(source: impl Into<SvgSource<'a>>) -> Result<String, SvgToolboxError> {
    let markup = source.into().into_markup();
    let without_comments = remove_comments(&markup)?;
    let without_empty = remove_empty_attributes(without_comments.as_str())?;
    Ok(normalize_whitespace(&without_empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_empty_and_blank_attributes() {
        let cleaned = remove_empty_attributes(
            r#"<svg width=""><path d="M 1 2" stroke="  " fill="red"/></svg>"#,
        )
        .unwrap();
        assert!(!cleaned.contains("width"));
        assert!(!cleaned.contains("stroke"));
        assert!(cleaned.contains("fill=\"red\""));
        assert!(cleaned.contains("d=\"M 1 2\""));
    }

    #[test]
    fn removes_simple_comments() {
        let cleaned = remove_comments("<svg><!-- note --><rect/></svg>").unwrap();
        assert_eq!(cleaned, "<svg><rect/></svg>");
    }

    #[test]
    fn nested_comments_cannot_resurface() {
        let cleaned = remove_comments("<!--<!-- inner -->-->").unwrap();
        assert_eq!(cleaned, "");
    }

    #[test]
    fn orphaned_delimiters_are_dropped() {
        assert_eq!(remove_comments("a <!-- b").unwrap(), "a  b");
        assert_eq!(remove_comments("a --> b").unwrap(), "a  b");
        assert_eq!(remove_comments("a --!> b").unwrap(), "a  b");
    }

    #[test]
    fn oversized_input_is_rejected() {
        let big = "x".repeat(MAX_CONTENT_LENGTH + 1);
        assert!(matches!(
            remove_comments(&big),
            Err(SvgToolboxError::Markup(_))
        ));
    }

    #[test]
    fn normalizes_whitespace_runs_and_tag_gaps() {
        let normalized = normalize_whitespace("  <svg>\n\t<rect />\n</svg>  ");
        assert_eq!(normalized, "<svg><rect /></svg>");
    }

    #[test]
    fn optimize_chains_all_three_passes() {
        let optimized = optimize_svg(
            "<svg class=\"\">\n  <!-- generator junk -->\n  <rect fill=\"red\"/>\n</svg>",
        )
        .unwrap();
        assert!(!optimized.contains("<!--"));
        assert!(!optimized.contains("class"));
        assert!(!optimized.contains('\n'));
        assert!(optimized.contains("fill=\"red\""));
    }

    #[test]
    fn optimize_requires_svg_root() {
        assert!(matches!(
            optimize_svg("<p>no svg</p>"),
            Err(SvgToolboxError::NoRootElement)
        ));
    }
}
