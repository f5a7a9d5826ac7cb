use emerge_config::ValidationError;
use emerge_scene::SceneError;

/// Errors from terrain or cloud field generation.
#[derive(Debug, thiserror::Error)]
pub enum TerrainError {
    /// Parameters failed validation; nothing was created.
    #[error("invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    /// The scene rejected an operation part-way through.
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
}
