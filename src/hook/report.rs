//! Result composition
//!
//! Assembles the cached and freshly researched results into the final
//! output: a summary table, a detail section per result, and a one-line
//! count summary. Nothing is dropped; failure markers appear inline.

use crate::hook::output::HookOutput;
use crate::research::dispatcher::ResearchResult;

/// Builds the hook output from the merged results.
///
/// `checked` is the number of packages that went through diff resolution,
/// not just the number that diverged.
pub fn compose(results: &[ResearchResult], checked: usize) -> HookOutput {
    let table_rows: Vec<String> = results
        .iter()
        .map(|r| {
            format!(
                "| {} | {} | {} | Breaking changes |",
                r.diff.package, r.diff.installed_major, r.diff.latest_major
            )
        })
        .collect();

    let summary_table = format!(
        "| Package | Installed | Latest | Status |\n\
         |---------|-----------|--------|--------|\n\
         {}",
        table_rows.join("\n")
    );

    let sections: Vec<String> = results
        .iter()
        .map(|r| {
            format!(
                "\n### {}: {} \u{2192} {}\n\n{}\n",
                r.diff.package, r.diff.installed_major, r.diff.latest_major, r.research
            )
        })
        .collect();

    let context = format!(
        "## Package Version Check\n\n{}\n\n---\n{}\n",
        summary_table,
        sections.join("")
    );

    let cached = results.iter().filter(|r| r.from_cache).count();
    let researched = results.len() - cached;

    let summary = if researched > 0 {
        format!(
            "\u{1F4E6} Checked {} packages \u{2192} {} major version diffs (researched {}, cached {})",
            checked,
            results.len(),
            researched,
            cached
        )
    } else {
        format!(
            "\u{1F4E6} Checked {} packages \u{2192} {} major version diffs (all cached \u{26A1})",
            checked,
            results.len()
        )
    };

    HookOutput::new(summary, context)
}
