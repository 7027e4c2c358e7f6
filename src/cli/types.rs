#[derive(Debug, Clone)]
pub struct CommandResult {
    pub text: String,
    pub success: bool,
}

impl CommandResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}
