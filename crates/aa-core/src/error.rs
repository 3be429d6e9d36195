use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Tool error: {tool} - {message}")]
    Tool { tool: String, message: String },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound(name.into())
    }

    /// Name of the tool that raised this error, if any.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            Error::Tool { tool, .. } => Some(tool),
            Error::ToolNotFound(name) => Some(name),
            Error::Serialization(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_display() {
        let err = Error::tool("fetch_user_articles", "unsupported platform: foo");
        assert_eq!(
            err.to_string(),
            "Tool error: fetch_user_articles - unsupported platform: foo"
        );
        assert_eq!(err.tool_name(), Some("fetch_user_articles"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.tool_name().is_none());
    }
}
