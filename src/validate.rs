/// Whether the content is well-formed XML with an `svg` root element.
pub fn is_valid_svg_string(content: &str) -> bool {
    roxmltree::Document::parse(content)
        .map(|document| {
            document
                .root_element()
                .tag_name()
                .name()
                .eq_ignore_ascii_case("svg")
        })
        .unwrap_or(false)
}
