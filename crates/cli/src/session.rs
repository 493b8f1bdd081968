use scriptscope_api::ScriptVersion;
use scriptscope_core::WorkerConfig;
use scriptscope_runtime::{ExtraLibHandle, WorkerManager};
use std::path::Path;

/// A manager with one file open as a live buffer.
pub struct Session {
    pub manager: WorkerManager,
    pub file_name: String,
    _libs: Vec<ExtraLibHandle>,
}

impl Session {
    pub async fn open(
        config: &WorkerConfig,
        path: &Path,
        libs: &[impl AsRef<Path>],
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let manager = scriptscope_runtime::build_default_manager(config);

        let mut handles = Vec::with_capacity(libs.len());
        for lib in libs {
            let lib = lib.as_ref();
            let content = std::fs::read_to_string(lib)?;
            let lib_name = lib.display().to_string();
            handles.push(manager.defaults().add_extra_lib(content, Some(&lib_name))?);
        }

        let file_name = path.display().to_string();
        let text = std::fs::read_to_string(path)?;
        manager
            .sync_buffer(&file_name, ScriptVersion::INITIAL, text)
            .await?;
        tracing::debug!(file = %file_name, libs = handles.len(), "opened session");

        Ok(Self {
            manager,
            file_name,
            _libs: handles,
        })
    }

    pub async fn close(self) {
        self.manager.shutdown().await;
    }
}
