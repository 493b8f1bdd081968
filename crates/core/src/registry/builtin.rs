use scriptscope_api::{ScriptTarget, ScriptVersion};

pub const DEFAULT_LIB_NAME: &str = "defaultLib:lib.d.ts";
pub const DEFAULT_LIB_ES6_NAME: &str = "defaultLib:lib.es6.d.ts";

const DEFAULT_LIB: &str = include_str!("../../assets/lib.d.ts");
const DEFAULT_LIB_ES6: &str = include_str!("../../assets/lib.es6.d.ts");

/// Builtin libraries never change within a process.
pub const BUILTIN_VERSION: ScriptVersion = ScriptVersion(1);

/// Name of the builtin library in effect for `target`.
pub fn active_builtin(target: ScriptTarget) -> &'static str {
    if target <= ScriptTarget::ES5 {
        DEFAULT_LIB_NAME
    } else {
        DEFAULT_LIB_ES6_NAME
    }
}

pub fn builtin_text(file_name: &str) -> Option<&'static str> {
    match file_name {
        DEFAULT_LIB_NAME => Some(DEFAULT_LIB),
        DEFAULT_LIB_ES6_NAME => Some(DEFAULT_LIB_ES6),
        _ => None,
    }
}

pub fn is_builtin(file_name: &str) -> bool {
    builtin_text(file_name).is_some()
}
