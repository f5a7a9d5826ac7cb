use emerge_assets::CatalogError;
use emerge_config::ConfigError;
use emerge_scene::SceneError;
use emerge_terrain::TerrainError;

/// Errors that stop a generation pass.
///
/// Missing variants, empty imports and unresolved selection groups are not
/// errors; they are reported in [`crate::ModelReport`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("environment error: {0}")]
    Terrain(#[from] TerrainError),

    #[error("asset catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
