use crate::element::SvgElement;
use crate::error::SvgToolboxError;
use crate::path_data::{PathDataReport, parse_path_data_with_report, serialize_path_data};
use rayon::prelude::*;

/// What a sanitization pass discarded, summed over all path elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    /// Path elements whose `d` attribute was rewritten (present, possibly unchanged).
    pub paths_rewritten: usize,
    pub dropped_tokens: usize,
    pub dropped_commands: usize,
}

/// Rewrites the `d` attribute of every path element under the root svg
/// element to its canonical, finite-numbers-only form.
///
/// A path with no `d` attribute is left untouched; a path whose `d` has no
/// surviving command is set to the empty string. Returns the serialized
/// root element, trimmed. The canonical form is a fixed point, so running
/// this twice equals running it once.
pub fn remove_nan_coordinates(markup: &str) -> Result<String, SvgToolboxError> {
    remove_nan_coordinates_with_report(markup).map(|(sanitized, _)| sanitized)
}

/// Like [`remove_nan_coordinates`], also reporting how much was dropped.
pub fn remove_nan_coordinates_with_report(
    markup: &str,
) -> Result<(String, SanitizeReport), SvgToolboxError> {
    let svg = SvgElement::parse(markup)?;

    let mut paths = Vec::new();
    if let Ok(found) = svg.node().select("path") {
        paths.extend(found);
    }

    let originals: Vec<Option<String>> = paths
        .iter()
        .map(|path| path.attributes.borrow().get("d").map(str::to_string))
        .collect();

    // The per-path cleanup is pure string work and each path is independent
    // of every other, so fan it out. DOM writes stay on this thread and
    // follow document order.
    let cleaned: Vec<Option<(String, PathDataReport)>> = originals
        .into_par_iter()
        .map(|d| {
            d.map(|d| {
                let (commands, report) = parse_path_data_with_report(&d);
                (serialize_path_data(&commands), report)
            })
        })
        .collect();

    let mut report = SanitizeReport::default();
    for (path, outcome) in paths.iter().zip(cleaned) {
        let Some((canonical, drops)) = outcome else {
            continue;
        };
        report.paths_rewritten += 1;
        report.dropped_tokens += drops.dropped_tokens;
        report.dropped_commands += drops.dropped_commands;
        path.attributes.borrow_mut().insert("d", canonical);
    }

    Ok((svg.to_svg_string(), report))
}
