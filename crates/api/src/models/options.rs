use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum ScriptTarget {
    ES3,
    ES5,
    ES2015,
    ES2016,
    ES2017,
    #[default]
    #[serde(alias = "Latest")]
    ESNext,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub target: ScriptTarget,
    pub allow_js: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            target: ScriptTarget::ESNext,
            allow_js: false,
        }
    }
}

impl CompilerOptions {
    /// Defaults used for plain JavaScript buffers.
    pub fn javascript() -> Self {
        Self {
            allow_js: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticsOptions {
    pub no_syntax_validation: bool,
}
