//! What happened to each deformation spec of a part.

use emerge_scene::SceneError;
use glam::DVec3;

/// Why a spec was not applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The spec names no selection group.
    MissingGroupName,
    /// No selection group with that name exists.
    GroupNotFound,
    /// The group exists but has no members.
    EmptyGroup,
    /// None of the group's members belong to this part's geometry.
    OutsidePart,
    /// The members resolved to no points.
    NoPoints,
    /// The scene rejected a query or the scaling.
    Scene(SceneError),
}

/// Result of one spec, in spec order.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecOutcome {
    /// The spec scaled its points.
    Applied {
        group: String,
        factor: f64,
        scale: DVec3,
        pivot: DVec3,
        points: usize,
    },
    /// `active` was false.
    Inactive { group: String },
    /// The spec could not be resolved; nothing was changed for it.
    Skipped { group: String, reason: SkipReason },
}

/// Outcomes of all deformation specs of one part.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeformationReport {
    pub part: String,
    pub outcomes: Vec<SpecOutcome>,
}

impl DeformationReport {
    /// Number of specs that were actually applied.
    pub fn applied_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SpecOutcome::Applied { .. }))
            .count()
    }

    /// Number of specs skipped because they could not be resolved.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, SpecOutcome::Skipped { .. }))
            .count()
    }
}
