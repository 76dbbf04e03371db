#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Stage '{stage}' failed: {message}")]
    Stage {
        stage: &'static str,
        message: String,
    },
}

impl PipelineError {
    pub fn stage(stage: &'static str, message: impl Into<String>) -> Self {
        PipelineError::Stage {
            stage,
            message: message.into(),
        }
    }
}
