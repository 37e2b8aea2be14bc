//! Plain-text feature report rendering.
//!
//! The report lists one section per release in ascending version order.
//! Releases that contribute nothing after filtering are left out. Library
//! order within a release follows the result's map iteration and is not part
//! of the output contract.

use crate::aggregate::{AggregationResult, LibraryChanges};
use crate::domain::release::{Change, LibraryChange};

/// Closing line appended to every non-empty report.
pub const CLOSING_NOTE: &str = "Note: These are all the features available in your project version. Use them to write modern, idiomatic code.\n";

/// Render `result` as a line-oriented text report.
///
/// Identical input always yields identical output.
pub fn render_report(
    result: &AggregationResult,
    target_version: &str,
    library: Option<&str>,
) -> String {
    if result.is_empty() {
        return format!("No features found for your project ({}).", result.to_version);
    }
    let library = library.filter(|lib| !lib.is_empty());

    let mut out = format!("Features Available in Your Project ({target_version})\n\n");
    out.push_str(&format!("Summary: {}\n\n", result.summary));

    for version in result.versions() {
        let changes = result
            .changes_by_version
            .get(version)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let libraries = result
            .library_changes_by_version
            .get(version)
            .map(|libs| visible_libraries(libs, library))
            .unwrap_or_default();

        if changes.is_empty() && libraries.is_empty() {
            continue;
        }

        out.push_str(&format!("Release {version} Features:\n\n"));

        if !changes.is_empty() {
            render_changes(&mut out, changes);
        }
        if !libraries.is_empty() {
            render_libraries(&mut out, &libraries, library.is_none());
        }

        out.push('\n');
    }

    out.push_str(CLOSING_NOTE);
    out
}

/// Libraries with at least one entry, restricted to `library` when set.
fn visible_libraries<'a>(
    libs: &'a LibraryChanges,
    library: Option<&str>,
) -> Vec<(&'a str, &'a [LibraryChange])> {
    libs.iter()
        .filter(|(name, entries)| !entries.is_empty() && library.map_or(true, |l| l == *name))
        .map(|(name, entries)| (name.as_str(), entries.as_slice()))
        .collect()
}

fn render_changes(out: &mut String, changes: &[Change]) {
    out.push_str("Language & Runtime Changes:\n");
    for change in changes {
        out.push_str(&format!(
            "- {} ({}): {}\n",
            change.category, change.impact, change.description
        ));
    }
    out.push('\n');
}

fn render_libraries(out: &mut String, libraries: &[(&str, &[LibraryChange])], with_headers: bool) {
    out.push_str("Standard Library Updates:\n");
    for (name, entries) in libraries {
        if with_headers {
            out.push_str(&format!("Library {name}:\n"));
        }
        for entry in *entries {
            render_library_change(out, entry);
        }
        out.push('\n');
    }
}

fn render_library_change(out: &mut String, change: &LibraryChange) {
    match &change.symbol {
        Some(symbol) => out.push_str(&format!(
            "- {} ({}): {}\n",
            symbol, change.impact, change.description
        )),
        None => out.push_str(&format!("- ({}): {}\n", change.impact, change.description)),
    }
    if let Some(example) = &change.example {
        out.push_str(&format!("  Example: {example}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn result_with(
        to_version: &str,
        by_version: Vec<(&str, Vec<Change>, LibraryChanges)>,
    ) -> AggregationResult {
        let mut result = AggregationResult {
            to_version: to_version.to_string(),
            summary: "test summary".to_string(),
            ..Default::default()
        };
        let mut changes_by_version = HashMap::new();
        let mut libs_by_version = HashMap::new();
        for (version, changes, libs) in by_version {
            result.changes.extend(changes.iter().cloned());
            for (name, entries) in &libs {
                result
                    .library_info
                    .entry(name.clone())
                    .or_default()
                    .extend(entries.iter().cloned());
            }
            changes_by_version.insert(version.to_string(), changes);
            libs_by_version.insert(version.to_string(), libs);
        }
        result.changes_by_version = changes_by_version;
        result.library_changes_by_version = libs_by_version;
        result
    }

    #[test]
    fn empty_result_is_single_line() {
        let result = result_with("1.22", vec![]);
        assert_eq!(
            render_report(&result, "1.22", None),
            "No features found for your project (1.22)."
        );
    }

    #[test]
    fn full_report_is_stable() {
        let libs = LibraryChanges::from([(
            "slices".to_string(),
            vec![LibraryChange::new("sorts a slice", "new")
                .with_symbol("Sort")
                .with_example("slices.Sort(s)")],
        )]);
        let result = result_with(
            "1.21",
            vec![(
                "1.21",
                vec![Change::new("language", "min and max", "new")],
                libs,
            )],
        );

        let actual = render_report(&result, "1.21", None);
        let expected = "Features Available in Your Project (1.21)\n\n\
Summary: test summary\n\n\
Release 1.21 Features:\n\n\
Language & Runtime Changes:\n\
- language (new): min and max\n\n\
Standard Library Updates:\n\
Library slices:\n\
- Sort (new): sorts a slice\n  Example: slices.Sort(s)\n\n\n\
Note: These are all the features available in your project version. Use them to write modern, idiomatic code.\n";
        assert_eq!(actual, expected);
    }

    #[test]
    fn package_wide_change_has_no_symbol() {
        let libs = LibraryChanges::from([(
            "net/http".to_string(),
            vec![LibraryChange::new("overall performance improvements", "performance")],
        )]);
        let result = result_with("1.22", vec![("1.22", vec![], libs)]);
        let report = render_report(&result, "1.22", None);
        assert!(report.contains("- (performance): overall performance improvements\n"));
        assert!(!report.contains("Language & Runtime Changes:"));
    }
}
