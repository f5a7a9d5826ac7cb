//! What a generation pass produced.

use emerge_assets::{AssetHandle, NoVariantError};
use emerge_deform::DeformationReport;
use emerge_scene::{NodeHandle, SceneError};
use emerge_terrain::TerrainOutput;

/// A part that now exists in the scene.
#[derive(Debug, Clone)]
pub struct GeneratedPart {
    pub part: String,
    /// Variant that was imported.
    pub asset: AssetHandle,
    /// The `<part><suffix>` group holding the imported nodes.
    pub group: NodeHandle,
    /// Locator nodes found under the group (kept or deleted per settings).
    pub locators: usize,
    pub deformation: DeformationReport,
}

/// Why a part was left out.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipCause {
    /// No asset file matches the part.
    NoVariant(NoVariantError),
    /// The scene could not import the chosen file.
    ImportFailed(SceneError),
    /// The chosen file imported no nodes.
    EmptyImport,
}

/// A part that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedPart {
    pub part: String,
    /// Chosen variant, if one was found.
    pub asset: Option<AssetHandle>,
    pub cause: SkipCause,
}

/// Result of generating one part.
#[derive(Debug, Clone)]
pub enum PartOutcome {
    Generated(GeneratedPart),
    Skipped(SkippedPart),
}

/// Every part of a full model pass, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct ModelReport {
    pub generated: Vec<GeneratedPart>,
    pub skipped: Vec<SkippedPart>,
}

impl ModelReport {
    pub fn push(&mut self, outcome: PartOutcome) {
        match outcome {
            PartOutcome::Generated(part) => self.generated.push(part),
            PartOutcome::Skipped(part) => self.skipped.push(part),
        }
    }

    /// Deformations applied across all generated parts.
    pub fn deformations_applied(&self) -> usize {
        self.generated
            .iter()
            .map(|p| p.deformation.applied_count())
            .sum()
    }
}

/// Terrain and clouds of an environment pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentReport {
    pub terrain: TerrainOutput,
    /// The `cloud_field` group.
    pub clouds: NodeHandle,
}

/// Result of [`crate::Pipeline::run`].
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Seed of the shared random stream.
    pub seed: u64,
    pub model: ModelReport,
    pub environment: EnvironmentReport,
}
