use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Monotonic version token of a source entry.
///
/// Serialized as a decimal string so that callers which only compare tokens
/// for equality never have to care about the numeric representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScriptVersion(pub u64);

impl ScriptVersion {
    pub const INITIAL: ScriptVersion = ScriptVersion(1);

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ScriptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScriptVersion {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ScriptVersion)
    }
}

impl From<u64> for ScriptVersion {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl Serialize for ScriptVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScriptVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Editors send either a number or the string token.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Str(String),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Num(n) => Ok(ScriptVersion(n)),
            Raw::Str(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

impl JsonSchema for ScriptVersion {
    fn schema_name() -> Cow<'static, str> {
        "ScriptVersion".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        String::json_schema(generator)
    }
}

/// Where a source entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SourceOrigin {
    LiveBuffer,
    AuxiliaryDeclaration,
    BuiltinDefault,
}

/// Script classification handed to the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Ts,
    Tsx,
    Js,
    Jsx,
}

impl ScriptKind {
    /// Infer the kind from the suffix after the last `.` of a file name.
    /// Unknown suffixes fall back to JavaScript when `allow_js` is set.
    pub fn from_file_name(file_name: &str, allow_js: bool) -> Self {
        let suffix = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(file_name);
        match suffix {
            "ts" => Self::Ts,
            "tsx" => Self::Tsx,
            "js" => Self::Js,
            "jsx" => Self::Jsx,
            _ if allow_js => Self::Js,
            _ => Self::Ts,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::Tsx => "tsx",
            Self::Js => "js",
            Self::Jsx => "jsx",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An auxiliary declaration source pushed by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExtraLib {
    pub content: String,
    pub version: ScriptVersion,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_kind_from_suffix() {
        assert_eq!(ScriptKind::from_file_name("file:///a/b.ts", false), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_file_name("x.tsx", false), ScriptKind::Tsx);
        assert_eq!(ScriptKind::from_file_name("x.jsx", false), ScriptKind::Jsx);
        assert_eq!(ScriptKind::from_file_name("lib.d.ts", false), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_file_name("inmemory://model/1", false), ScriptKind::Ts);
        assert_eq!(ScriptKind::from_file_name("inmemory://model/1", true), ScriptKind::Js);
        assert_eq!(ScriptKind::from_file_name("script.nts", true), ScriptKind::Js);
    }

    #[test]
    fn test_version_accepts_number_or_string() {
        let a: ScriptVersion = serde_json::from_str("3").unwrap();
        let b: ScriptVersion = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"3\"");
        assert_eq!(a.next(), ScriptVersion(4));
    }
}
