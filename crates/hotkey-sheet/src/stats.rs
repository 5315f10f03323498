use crate::layout::{PlacementPlan, plan};
use crate::model::{Document, SectionChild};
use crate::types::*;

/// Summary of a cheat sheet and its layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetStatistics {
    pub sections: usize,
    pub subsections: usize,
    pub entries: usize,
    pub pages: usize,
}

/// Number of pages the document needs.
///
/// Runs the full flow planner, so the answer always matches what
/// generation produces for the same input.
pub fn estimate_pages(document: &Document) -> Result<usize> {
    Ok(plan(document)?.page_count())
}

/// Calculate statistics for a document
pub fn calculate_statistics(document: &Document) -> Result<SheetStatistics> {
    let plan = plan(document)?;
    Ok(statistics_for_plan(document, &plan))
}

/// Statistics for a document that has already been planned
pub fn statistics_for_plan(document: &Document, plan: &PlacementPlan) -> SheetStatistics {
    let subsections = document
        .sections
        .iter()
        .flat_map(|section| &section.children)
        .filter(|child| matches!(child, SectionChild::Subsection(_)))
        .count();

    SheetStatistics {
        sections: document.sections.len(),
        subsections,
        entries: document.entry_count(),
        pages: plan.page_count(),
    }
}
