//! Section ordering
//!
//! Sections render ascending by `order`. Equal ranks fall back to creation
//! time and then to the id, so the sequence is the same whatever order the
//! records arrive in.

use crate::section::{ReorderEntry, Section};
use homestretch_core::{SectionId, SectionOrder, SiteError, SiteResult};
use std::cmp::Ordering;

/// Total order used everywhere sections are listed or rendered
pub fn compare_sections(a: &Section, b: &Section) -> Ordering {
    a.order
        .cmp(&b.order)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort in place into render order
pub fn sort_sections(sections: &mut [Section]) {
    sections.sort_by(compare_sections);
}

/// Sorted copy of a section list
pub fn sorted(sections: &[Section]) -> Vec<Section> {
    let mut sections = sections.to_vec();
    sort_sections(&mut sections);
    sections
}

/// Rank for a section appended after all existing ones (`max + 1`)
pub fn next_order<'a>(sections: impl IntoIterator<Item = &'a Section>) -> SectionOrder {
    sections
        .into_iter()
        .map(|s| s.order)
        .max()
        .map(|max| max.next())
        .unwrap_or_else(SectionOrder::first)
}

/// Move one id to `new_index` (0-based, clamped) within an ordered id list
pub fn move_id(ids: &[SectionId], id: SectionId, new_index: usize) -> SiteResult<Vec<SectionId>> {
    let from = ids
        .iter()
        .position(|candidate| *candidate == id)
        .ok_or(SiteError::SectionNotFound(id))?;

    let mut ids = ids.to_vec();
    let moved = ids.remove(from);
    let to = new_index.min(ids.len());
    ids.insert(to, moved);
    Ok(ids)
}

/// Contiguous ranks `1..=n` for ids already in display order
pub fn contiguous_orders(ids: &[SectionId]) -> Vec<ReorderEntry> {
    ids.iter()
        .zip(SectionOrder::sequence(ids.len()))
        .map(|(id, order)| ReorderEntry { id: *id, order })
        .collect()
}

/// The full reorder request produced by dragging `id` to `new_index`
///
/// Every section gets a new contiguous rank, so the request can be sent as
/// one bulk reorder.
pub fn plan_move(sections: &[Section], id: SectionId, new_index: usize) -> SiteResult<Vec<ReorderEntry>> {
    let ids: Vec<SectionId> = sorted(sections).iter().map(|s| s.id).collect();
    let moved = move_id(&ids, id, new_index)?;
    Ok(contiguous_orders(&moved))
}

/// Apply reorder entries to a list, returning the re-sorted result
///
/// All ids must exist; sections not named keep their rank.
pub fn apply_reorder(sections: &[Section], entries: &[ReorderEntry]) -> SiteResult<Vec<Section>> {
    let mut next = sections.to_vec();
    for entry in entries {
        let section = next
            .iter_mut()
            .find(|s| s.id == entry.id)
            .ok_or(SiteError::SectionNotFound(entry.id))?;
        section.order = entry.order;
    }
    sort_sections(&mut next);
    Ok(next)
}

// ============================================================================
// Tests
// ============================================================================
