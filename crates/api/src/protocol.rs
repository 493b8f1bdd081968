//! Request/response surface between the editor side and the language worker.
//!
//! Every request produces exactly one response; there is no streaming.

use crate::models::{
    CompilerOptions, Diagnostic, ExtraLib, OutlineEntry, ReferenceMap, ScriptVersion,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum WorkerRequest {
    /// Create or update a live buffer. Updates must carry a greater version.
    #[serde(rename_all = "camelCase")]
    SyncBuffer {
        file_name: String,
        version: ScriptVersion,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    CloseBuffer { file_name: String },
    /// Replace the whole auxiliary declaration set.
    SyncExtraLibs { libs: BTreeMap<String, ExtraLib> },
    UpdateCompilerOptions { options: CompilerOptions },
    ListFiles,
    #[serde(rename_all = "camelCase")]
    GetScriptVersion { file_name: String },
    #[serde(rename_all = "camelCase")]
    GetScriptText { file_name: String },
    #[serde(rename_all = "camelCase")]
    GetOutline { file_name: String },
    #[serde(rename_all = "camelCase")]
    GetReferencedProperties {
        file_name: String,
        roots: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    GetSyntacticDiagnostics { file_name: String },
}

impl WorkerRequest {
    pub fn method(&self) -> &'static str {
        match self {
            WorkerRequest::SyncBuffer { .. } => "syncBuffer",
            WorkerRequest::CloseBuffer { .. } => "closeBuffer",
            WorkerRequest::SyncExtraLibs { .. } => "syncExtraLibs",
            WorkerRequest::UpdateCompilerOptions { .. } => "updateCompilerOptions",
            WorkerRequest::ListFiles => "listFiles",
            WorkerRequest::GetScriptVersion { .. } => "getScriptVersion",
            WorkerRequest::GetScriptText { .. } => "getScriptText",
            WorkerRequest::GetOutline { .. } => "getOutline",
            WorkerRequest::GetReferencedProperties { .. } => "getReferencedProperties",
            WorkerRequest::GetSyntacticDiagnostics { .. } => "getSyntacticDiagnostics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ResponsePayload {
    Ack,
    Files(Vec<String>),
    Version(Option<ScriptVersion>),
    Text(Option<String>),
    Outline(Vec<OutlineEntry>),
    References(ReferenceMap),
    Diagnostics(Vec<Diagnostic>),
}

impl ResponsePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            ResponsePayload::Ack => "ack",
            ResponsePayload::Files(_) => "files",
            ResponsePayload::Version(_) => "version",
            ResponsePayload::Text(_) => "text",
            ResponsePayload::Outline(_) => "outline",
            ResponsePayload::References(_) => "references",
            ResponsePayload::Diagnostics(_) => "diagnostics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WorkerResponse {
    Ok { result: ResponsePayload },
    Error { message: String },
}

impl WorkerResponse {
    pub fn ok(result: ResponsePayload) -> Self {
        WorkerResponse::Ok { result }
    }

    pub fn error(message: impl Into<String>) -> Self {
        WorkerResponse::Error {
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<ResponsePayload, String> {
        match self {
            WorkerResponse::Ok { result } => Ok(result),
            WorkerResponse::Error { message } => Err(message),
        }
    }
}
