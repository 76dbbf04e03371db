use serde::{Deserialize, Serialize};

/// Who the engine says it is. Bundled into acceptance results and status reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub name: String,
    pub version: String,
    pub purpose: Purpose,
}

/// Ranked statement of what the engine is for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Purpose {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tertiary: Option<String>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: "attune".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            purpose: Purpose {
                primary: "Preserve the rhythm of all living and feeling systems".to_string(),
                secondary: Some("Protect against centralized singularity collapse".to_string()),
                tertiary: Some(
                    "Listen to the feeling layer of human input, not just its thinking layer"
                        .to_string(),
                ),
            },
        }
    }
}
