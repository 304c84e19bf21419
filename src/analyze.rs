use crate::element::{SvgElement, SvgSource};
use crate::error::SvgToolboxError;
use crate::path_data::{PathCommand, parse_path_data};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Aggregate counts over every path element of a document.
///
/// `command_types` folds letter case (both `m` and `M` count as `M`);
/// the per-command case is preserved in the analysis map itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathStatistics {
    pub total_paths: usize,
    pub total_commands: usize,
    pub command_types: BTreeMap<char, usize>,
}

/// Maps every path element of the document to its sanitized command list,
/// in document order.
///
/// Ids come from the `id` attribute when declared, else the positional
/// fallback `path-<index>` over all path elements. A declared id can shadow
/// a later positional one (`id="path-0"` plus an unlabeled first path);
/// that ambiguity is inherited deliberately and not de-duplicated. A path
/// with no `d` attribute maps to an empty command list.
pub fn analyze_paths<'a>(
    source: impl Into<SvgSource<'a>>,
) -> Result<IndexMap<String, Vec<PathCommand>>, SvgToolboxError> {
    let markup = source.into().into_markup();
    let svg = SvgElement::parse(&markup)?;

    let mut entries: Vec<(String, Option<String>)> = Vec::new();
    if let Ok(paths) = svg.node().select("path") {
        for (index, path) in paths.enumerate() {
            let attributes = path.attributes.borrow();
            let id = attributes
                .get("id")
                .map(str::to_string)
                .unwrap_or_else(|| format!("path-{index}"));
            entries.push((id, attributes.get("d").map(str::to_string)));
        }
    }

    // Parsing is independent per path; the indexed collect restores
    // document order whatever the scheduling.
    let parsed: Vec<(String, Vec<PathCommand>)> = entries
        .into_par_iter()
        .map(|(id, d)| {
            let commands = d.map(|d| parse_path_data(&d)).unwrap_or_default();
            (id, commands)
        })
        .collect();

    Ok(parsed.into_iter().collect())
}

/// Statistics derived from [`analyze_paths`] in a single aggregation pass;
/// the markup is never traversed a second time.
pub fn path_statistics<'a>(
    source: impl Into<SvgSource<'a>>,
) -> Result<PathStatistics, SvgToolboxError> {
    let analysis = analyze_paths(source)?;

    let mut statistics = PathStatistics {
        total_paths: analysis.len(),
        ..PathStatistics::default()
    };
    for commands in analysis.values() {
        statistics.total_commands += commands.len();
        for command in commands {
            *statistics
                .command_types
                .entry(command.kind.to_ascii_uppercase())
                .or_insert(0) += 1;
        }
    }

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_ids_follow_document_order() {
        let analysis =
            analyze_paths(r#"<svg><path d="M 10,20" /><path d="M 30,40" /></svg>"#).unwrap();
        let ids: Vec<&String> = analysis.keys().collect();
        assert_eq!(ids, ["path-0", "path-1"]);
        assert_eq!(analysis["path-0"].len(), 1);
        assert_eq!(analysis["path-0"][0].kind, 'M');
        assert_eq!(analysis["path-1"][0].params, vec![30.0, 40.0]);
    }

    #[test]
    fn declared_ids_win_over_positional_fallback() {
        let analysis = analyze_paths(
            r#"<svg><path id="first" d="M 1 2"/><path d="L 3 4"/></svg>"#,
        )
        .unwrap();
        assert!(analysis.contains_key("first"));
        assert!(analysis.contains_key("path-1"));
        assert!(!analysis.contains_key("path-0"));
    }

    #[test]
    fn path_without_d_contributes_empty_commands() {
        let analysis = analyze_paths(r#"<svg><path /><path d="M 1 2"/></svg>"#).unwrap();
        assert_eq!(analysis.len(), 2);
        assert!(analysis["path-0"].is_empty());
        assert_eq!(analysis["path-1"].len(), 1);
    }

    #[test]
    fn invalid_commands_never_surface_in_analysis() {
        let analysis = analyze_paths(r#"<svg><path d="M nan nan L 1 2"/></svg>"#).unwrap();
        let commands = &analysis["path-0"];
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].kind, 'L');
    }

    #[test]
    fn accepts_parsed_elements() {
        let element = SvgElement::parse(r#"<svg><path d="M 1 2"/></svg>"#).unwrap();
        let analysis = analyze_paths(&element).unwrap();
        assert_eq!(analysis.len(), 1);
    }

    #[test]
    fn fails_without_root_svg() {
        assert!(matches!(
            analyze_paths("<div></div>"),
            Err(SvgToolboxError::NoRootElement)
        ));
    }

    #[test]
    fn statistics_aggregate_counts_and_fold_case() {
        let statistics =
            path_statistics(r#"<svg><path d="M 10,20 M 30,40 L 50,60 L 70,80" /></svg>"#)
                .unwrap();
        assert_eq!(statistics.total_paths, 1);
        assert_eq!(statistics.total_commands, 4);
        assert_eq!(statistics.command_types[&'M'], 2);
        assert_eq!(statistics.command_types[&'L'], 2);

        let folded =
            path_statistics(r#"<svg><path d="m 1 2 z"/><path d="M 3 4 Z"/></svg>"#).unwrap();
        assert_eq!(folded.command_types[&'M'], 2);
        assert_eq!(folded.command_types[&'Z'], 2);
    }

    #[test]
    fn statistics_ignore_dropped_commands() {
        let statistics =
            path_statistics(r#"<svg><path d="M 1 2 L nan nan H 5"/></svg>"#).unwrap();
        assert_eq!(statistics.total_commands, 2);
        assert!(!statistics.command_types.contains_key(&'L'));
    }
}
