use crate::config::ReportConfig;
use densite_domain::{DensityStats, Locality, LocalityKind};
use std::collections::HashMap;
use strum::IntoEnumIterator;

/// Working set shared by every renderer: sorted, truncated, grouped.
#[derive(Debug)]
pub(crate) struct ReportData {
    /// Density-descending entries after the limit was applied. Ties keep the
    /// relative order they had in the snapshot (stable sort).
    pub(crate) ordered: Vec<Locality>,
    /// One entry per declared [`LocalityKind`], in declaration order, each
    /// preserving the post-sort order of its members. Kinds with no members
    /// are present with an empty vector so grouped output can render empty
    /// sections.
    pub(crate) groups: Vec<(LocalityKind, Vec<Locality>)>,
    /// Density statistics over `ordered`; `None` when disabled or empty.
    pub(crate) stats: Option<DensityStats>,
}

pub(crate) fn prepare(snapshot: &[Locality], config: &ReportConfig) -> ReportData {
    let mut ordered = snapshot.to_vec();
    ordered.sort_by(|a, b| b.density().total_cmp(&a.density()));
    if let Some(limit) = config.limit() {
        ordered.truncate(limit);
    }

    let stats = config
        .include_statistics()
        .then(|| DensityStats::from_densities(ordered.iter().map(Locality::density)))
        .flatten();

    let mut by_kind: HashMap<LocalityKind, Vec<Locality>> = HashMap::new();
    for locality in &ordered {
        by_kind.entry(locality.kind()).or_default().push(locality.clone());
    }
    let groups =
        LocalityKind::iter().map(|kind| (kind, by_kind.remove(&kind).unwrap_or_default())).collect();

    ReportData { ordered, groups, stats }
}
