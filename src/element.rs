use crate::error::SvgToolboxError;
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use std::borrow::Cow;
use std::fmt;

/// An owned handle on the root `<svg>` element of a parsed document.
///
/// Every public operation parses its own tree; nothing is shared between
/// calls and no global parser instance exists.
pub struct SvgElement {
    node: NodeRef,
}

impl SvgElement {
    /// Parses markup and locates its root svg element.
    ///
    /// Parsing is lenient (hand-authored markup is expected); the only
    /// surfaced failure is the structural absence of an `<svg>` element.
    pub fn parse(markup: &str) -> Result<Self, SvgToolboxError> {
        let document = kuchiki::parse_html().one(markup);
        let svg = document
            .select_first("svg")
            .map_err(|_| SvgToolboxError::NoRootElement)?;
        Ok(Self {
            node: svg.as_node().clone(),
        })
    }

    pub(crate) fn node(&self) -> &NodeRef {
        &self.node
    }

    /// Serialized form of the element itself (not the enclosing document),
    /// trimmed of leading/trailing whitespace.
    pub fn to_svg_string(&self) -> String {
        self.node.to_string().trim().to_string()
    }

    /// Deep clone by serializing and reparsing, so all attributes and
    /// children are duplicated with no node sharing.
    pub fn deep_clone(&self) -> Result<Self, SvgToolboxError> {
        Self::parse(&self.to_svg_string())
    }

    /// Merges several svg elements into one new root svg element, each
    /// input appended as a cloned child.
    pub fn merge(elements: &[SvgElement]) -> Result<Self, SvgToolboxError> {
        let mut markup = String::from("<svg>");
        for element in elements {
            markup.push_str(&element.to_svg_string());
        }
        markup.push_str("</svg>");
        Self::parse(&markup)
    }
}

impl fmt::Debug for SvgElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SvgElement")
            .field("markup", &self.to_svg_string())
            .finish()
    }
}

/// Input accepted by the document-level operations: raw markup or an
/// already-parsed element. Normalized to markup before processing.
#[derive(Debug, Clone, Copy)]
pub enum SvgSource<'a> {
    Markup(&'a str),
    Element(&'a SvgElement),
}

impl<'a> From<&'a str> for SvgSource<'a> {
    fn from(value: &'a str) -> Self {
        SvgSource::Markup(value)
    }
}

impl<'a> From<&'a String> for SvgSource<'a> {
    fn from(value: &'a String) -> Self {
        SvgSource::Markup(value)
    }
}

impl<'a> From<&'a SvgElement> for SvgSource<'a> {
    fn from(value: &'a SvgElement) -> Self {
        SvgSource::Element(value)
    }
}

impl<'a> SvgSource<'a> {
    pub(crate) fn into_markup(self) -> Cow<'a, str> {
        match self {
            SvgSource::Markup(markup) => Cow::Borrowed(markup),
            SvgSource::Element(element) => Cow::Owned(element.to_svg_string()),
        }
    }
}

/// Serializes an svg source to a string, verifying that the markup variant
/// actually contains an svg element.
pub fn serialize_svg<'a>(source: impl Into<SvgSource<'a>>) -> Result<String, SvgToolboxError> {
    match source.into() {
        SvgSource::Markup(markup) => {
            SvgElement::parse(markup)?;
            Ok(markup.trim().to_string())
        }
        SvgSource::Element(element) => Ok(element.to_svg_string()),
    }
}
