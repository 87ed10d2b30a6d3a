pub type Result<T> = std::result::Result<T, RenderError>;

/// Failure inside one rendering strategy.
///
/// These never leave the [`crate::Visualizer`]: each one is turned into an error panel.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("{message}")]
    Diagram { message: String },

    #[error("Invalid chart configuration: {0}")]
    ChartConfig(#[from] serde_json::Error),

    #[error("Chart configuration must be a JSON object")]
    ChartNotObject,

    #[error("Chart datasets must be an array")]
    DatasetsNotArray,

    #[error("Dataset {index} is not an object")]
    InvalidDataset { index: usize },

    #[error("\"{chart_type}\" is not a registered controller.")]
    UnregisteredController { chart_type: String },

    #[error("Markup rewrite failed: {0}")]
    Rewrite(String),

    #[error("Renderer panicked: {0}")]
    Panicked(String),
}

impl RenderError {
    pub fn is_chart_error(&self) -> bool {
        matches!(
            self,
            RenderError::ChartConfig(_)
                | RenderError::ChartNotObject
                | RenderError::DatasetsNotArray
                | RenderError::InvalidDataset { .. }
                | RenderError::UnregisteredController { .. }
        )
    }
}
