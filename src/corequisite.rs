//! Co-requisite link maintenance.
//!
//! Co-requisite links pair sections that must be taken together. The link
//! graph is stored on each section as a set of partner handles and must stay
//! symmetric: if A lists B, B lists A. Every mutation of those sets goes
//! through this module, and each operation updates both endpoints before
//! returning.
//!
//! # Target Resolution
//! Links are requested by [`SectionKey`]. When several live sections share
//! the key, the first one (catalog order) that does not time-conflict with
//! the owner wins; if all conflict, the first one wins. A key that resolves
//! to nothing is skipped without error.

use crate::models::{Catalog, SectionId, SectionKey};

/// Summary of a [`rebind`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebindReport {
    /// Partners whose back-link to the owner was removed.
    pub removed: Vec<SectionId>,
    /// Partners linked after the edit.
    pub linked: Vec<SectionId>,
    /// Requested targets that resolved to no live section.
    pub unresolved: Vec<SectionKey>,
}

/// Resolves `target` to a concrete section for `owner`.
pub fn resolve_target(catalog: &Catalog, owner: SectionId, target: &SectionKey) -> Option<SectionId> {
    let owner_section = catalog.section(owner)?;
    let candidates: Vec<SectionId> = catalog
        .find_by_key(target)
        .into_iter()
        .filter(|&id| id != owner)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&id| {
            catalog
                .section(id)
                .is_some_and(|s| !s.overlaps(owner_section))
        })
        .or_else(|| candidates.first().copied())
}

/// Links `owner` and the section named by `target` in both directions.
///
/// Returns the resolved partner, or `None` if the target is missing.
pub fn link(catalog: &mut Catalog, owner: SectionId, target: &SectionKey) -> Option<SectionId> {
    let Some(partner) = resolve_target(catalog, owner, target) else {
        log::debug!("co-requisite target {target} not found for {owner}; link skipped");
        return None;
    };
    link_ids(catalog, owner, partner).then_some(partner)
}

/// Links two live sections by handle. Self-links are refused.
pub fn link_ids(catalog: &mut Catalog, a: SectionId, b: SectionId) -> bool {
    if a == b || catalog.section(a).is_none() || catalog.section(b).is_none() {
        return false;
    }
    if let Some(s) = catalog.section_mut(a) {
        s.corequisites.insert(b);
    }
    if let Some(s) = catalog.section_mut(b) {
        s.corequisites.insert(a);
    }
    true
}

/// Removes every link touching `id`, on both sides.
///
/// Returns the number of partners that listed `id`.
pub fn unlink_all(catalog: &mut Catalog, id: SectionId) -> usize {
    let listing: Vec<SectionId> = catalog
        .sections()
        .filter(|s| s.lists(id))
        .filter_map(|s| s.id())
        .collect();

    for &partner in &listing {
        if let Some(s) = catalog.section_mut(partner) {
            s.corequisites.remove(&id);
        }
    }
    if let Some(s) = catalog.section_mut(id) {
        s.corequisites.clear();
    }
    listing.len()
}

/// Replaces the link set of `owner` with links to `new_links`.
///
/// Targets are resolved before anything is mutated, then old links are
/// scrubbed and new ones added. Re-running with the same arguments yields
/// the same graph.
pub fn rebind(catalog: &mut Catalog, owner: SectionId, new_links: &[SectionKey]) -> RebindReport {
    let mut report = RebindReport::default();
    let Some(section) = catalog.section(owner) else {
        return report;
    };
    report.removed = section.corequisites().iter().copied().collect();

    let mut resolved = Vec::with_capacity(new_links.len());
    for key in new_links {
        match resolve_target(catalog, owner, key) {
            Some(id) => resolved.push(id),
            None => {
                log::debug!("co-requisite target {key} not found for {owner}; link skipped");
                report.unresolved.push(key.clone());
            }
        }
    }

    unlink_all(catalog, owner);
    for id in resolved {
        if link_ids(catalog, owner, id) && !report.linked.contains(&id) {
            report.linked.push(id);
        }
    }
    report
}
