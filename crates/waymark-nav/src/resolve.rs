//! Document reference resolution.
//!
//! A loaded tree still contains unverified document ids. Resolution
//! cross-checks every [`DocRef`](crate::DocRef) against the document index
//! and refuses to let navigation with dangling references reach a published
//! site.

use rayon::prelude::*;
use waymark_index::DocIndex;

use crate::error::{Issue, IssueKind, SidebarError, ValidationReport};
use crate::node::{NavNode, Sidebar, SidebarSet};

/// Cross-check every document reference against the index.
///
/// On success the set passes through unchanged. On failure the error lists
/// every unresolved id across every sidebar, not just the first, so an
/// author can fix the whole list in one pass.
///
/// Sidebars are checked in parallel; each is an independent pure lookup
/// over disjoint data.
pub fn resolve(set: SidebarSet, index: &dyn DocIndex) -> Result<SidebarSet, SidebarError> {
    resolve_report(&set, index).into_result()?;
    tracing::debug!(sidebars = set.len(), "Resolved all document references");
    Ok(set)
}

/// The report [`resolve`] would fail with, without consuming the set.
///
/// Empty when every reference resolves. Issue order follows the document:
/// sidebar by sidebar, depth-first within each.
pub fn resolve_report(set: &SidebarSet, index: &dyn DocIndex) -> ValidationReport {
    let issue_lists: Vec<Vec<Issue>> = set
        .sidebars()
        .par_iter()
        .map(|sidebar| check_sidebar(sidebar, index))
        .collect();

    let mut report = ValidationReport::new();
    for issues in issue_lists {
        report.merge(issues.into());
    }
    report
}

fn check_sidebar(sidebar: &Sidebar, index: &dyn DocIndex) -> Vec<Issue> {
    let mut issues = Vec::new();
    sidebar.walk(&mut |path, node| {
        if let NavNode::Doc(doc) = node
            && !index.has(&doc.id)
        {
            issues.push(Issue::new(
                &sidebar.name,
                path,
                IssueKind::UnknownDocument { id: doc.id.clone() },
            ));
        }
    });
    issues
}
