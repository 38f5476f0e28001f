//! Module import seam
//!
//! An icon's `importPath` names a module. Importers turn that path into an
//! [`IconModule`] holding the component exports the loader picks from.

use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, BoxFuture, FutureExt};
use tracing::{debug, warn};

use super::component::{IconHandle, SvgIcon};
use super::error::ImportError;

/// Named export carrying raw vector icons
pub const VECTOR_EXPORT: &str = "ReactComponent";

/// Prefix for paths relative to the icon root
const ROOT_ALIAS: &str = "@/";

/// An imported icon module
#[derive(Debug, Clone, Default)]
pub struct IconModule {
    exports: HashMap<String, IconHandle>,
    default: Option<IconHandle>,
}

impl IconModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, component: IconHandle) -> Self {
        self.default = Some(component);
        self
    }

    pub fn with_export(mut self, name: &str, component: IconHandle) -> Self {
        self.exports.insert(name.to_string(), component);
        self
    }

    pub fn default_export(&self) -> Option<&IconHandle> {
        self.default.as_ref()
    }

    pub fn export(&self, name: &str) -> Option<&IconHandle> {
        self.exports.get(name)
    }
}

/// Resolves import paths to icon modules
pub trait ModuleImporter: Send + Sync + fmt::Debug {
    fn import(&self, path: &str) -> BoxFuture<'static, Result<IconModule, ImportError>>;
}

/// In-memory module table
#[derive(Debug, Clone, Default)]
pub struct StaticImporter {
    modules: HashMap<String, IconModule>,
}

impl StaticImporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str, module: IconModule) {
        self.modules.insert(path.to_string(), module);
    }

    pub fn with_module(mut self, path: &str, module: IconModule) -> Self {
        self.insert(path, module);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleImporter for StaticImporter {
    fn import(&self, path: &str) -> BoxFuture<'static, Result<IconModule, ImportError>> {
        let result = self
            .modules
            .get(path)
            .cloned()
            .ok_or_else(|| ImportError::NotFound(path.to_string()));
        future::ready(result).boxed()
    }
}

/// Loads `<root>/<importPath>.svg` from disk
#[derive(Debug, Clone)]
pub struct DirImporter {
    root: PathBuf,
}

impl DirImporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing an import path. Paths may not leave the root.
    pub fn resolve(&self, import_path: &str) -> Result<PathBuf, ImportError> {
        let relative = import_path.strip_prefix(ROOT_ALIAS).unwrap_or(import_path);
        let relative = Path::new(relative);

        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.as_os_str().is_empty() || escapes {
            return Err(ImportError::InvalidPath(import_path.to_string()));
        }

        let mut file = self.root.join(relative).into_os_string();
        file.push(".svg");
        Ok(PathBuf::from(file))
    }
}

impl ModuleImporter for DirImporter {
    fn import(&self, path: &str) -> BoxFuture<'static, Result<IconModule, ImportError>> {
        let import_path = path.to_string();
        let file = self.resolve(path);

        async move {
            let file = file?;
            debug!("Reading icon module {:?}", file);

            let markup = tokio::fs::read_to_string(&file).await.map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ImportError::NotFound(import_path.clone())
                } else {
                    ImportError::Io {
                        path: import_path.clone(),
                        source: e,
                    }
                }
            })?;

            let icon: IconHandle = Arc::new(
                SvgIcon::from_markup(&markup)
                    .ok_or_else(|| ImportError::Failed(format!("{} is not SVG markup", import_path)))?,
            );
            Ok(IconModule::new()
                .with_export(VECTOR_EXPORT, icon.clone())
                .with_default(icon))
        }
        .boxed()
    }
}

/// Retries a failing importer with exponential backoff
#[derive(Debug, Clone)]
pub struct RetryingImporter {
    inner: Arc<dyn ModuleImporter>,
    max_retries: u32,
    base_delay: Duration,
}

impl RetryingImporter {
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

    pub fn new(inner: Arc<dyn ModuleImporter>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: Self::DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl ModuleImporter for RetryingImporter {
    fn import(&self, path: &str) -> BoxFuture<'static, Result<IconModule, ImportError>> {
        let this = self.clone();
        let path = path.to_string();

        async move {
            let mut attempt = 0;
            loop {
                match this.inner.import(&path).await {
                    Ok(module) => return Ok(module),
                    Err(e) if attempt < this.max_retries => {
                        attempt += 1;
                        warn!(
                            "Retrying icon import {} ({}/{}): {}",
                            path, attempt, this.max_retries, e
                        );
                        tokio::time::sleep(this.backoff(attempt)).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::component::FallbackIcon;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    /// Fails a fixed number of times before succeeding
    #[derive(Debug)]
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl ModuleImporter for Flaky {
        fn import(&self, path: &str) -> BoxFuture<'static, Result<IconModule, ImportError>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let result = if call < self.failures {
                Err(ImportError::Failed(format!("{} attempt {}", path, call)))
            } else {
                Ok(IconModule::new().with_default(Arc::new(FallbackIcon)))
            };
            future::ready(result).boxed()
        }
    }

    #[tokio::test]
    async fn test_static_importer() {
        let importer = StaticImporter::new()
            .with_module("a", IconModule::new().with_default(Arc::new(FallbackIcon)));

        let module = importer.import("a").await.unwrap();
        assert!(module.default_export().is_some());
        assert!(module.export(VECTOR_EXPORT).is_none());
        assert!(matches!(importer.import("b").await, Err(ImportError::NotFound(p)) if p == "b"));
    }

    #[test]
    fn test_dir_resolve() {
        let importer = DirImporter::new("/icons");
        assert_eq!(
            importer.resolve("@/assets/icons/folder").unwrap(),
            PathBuf::from("/icons/assets/icons/folder.svg")
        );
        assert_eq!(
            importer.resolve("gear").unwrap(),
            PathBuf::from("/icons/gear.svg")
        );
        assert!(matches!(importer.resolve("../etc/passwd"), Err(ImportError::InvalidPath(_))));
        assert!(matches!(importer.resolve("/etc/passwd"), Err(ImportError::InvalidPath(_))));
        assert!(matches!(importer.resolve(""), Err(ImportError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_dir_importer_reads_svg() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        std::fs::write(
            dir.path().join("assets").join("star.svg"),
            r#"<svg viewBox="0 0 24 24"><path d="M12 2l3 7h7l-6 4"/></svg>"#,
        )
        .unwrap();

        let importer = DirImporter::new(dir.path());
        let module = importer.import("@/assets/star").await.unwrap();
        assert!(module.default_export().is_some());
        assert!(module
            .export(VECTOR_EXPORT)
            .unwrap()
            .render(&Default::default())
            .contains("M12 2l3 7h7l-6 4"));
    }

    #[tokio::test]
    async fn test_dir_importer_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.svg"), "plain text").unwrap();
        let importer = DirImporter::new(dir.path());

        assert!(matches!(importer.import("missing").await, Err(ImportError::NotFound(_))));
        assert!(matches!(importer.import("bad").await, Err(ImportError::Failed(_))));
        assert!(matches!(importer.import("../x").await, Err(ImportError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_retrying_importer_recovers() {
        let flaky = Arc::new(Flaky {
            failures: 2,
            calls: AtomicU32::new(0),
        });
        let importer = RetryingImporter::new(flaky.clone(), 3).with_base_delay(Duration::from_millis(1));

        assert!(importer.import("x").await.is_ok());
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retrying_importer_gives_up() {
        let flaky = Arc::new(Flaky {
            failures: 10,
            calls: AtomicU32::new(0),
        });
        let importer = RetryingImporter::new(flaky.clone(), 2).with_base_delay(Duration::from_millis(1));

        let err = importer.import("x").await.unwrap_err();
        assert_eq!(err.to_string(), "Import failed: x attempt 2");
        assert_eq!(flaky.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_backoff_doubles() {
        let importer = RetryingImporter::new(Arc::new(StaticImporter::new()), 3);
        assert_eq!(importer.backoff(1), Duration::from_millis(200));
        assert_eq!(importer.backoff(2), Duration::from_millis(400));
        assert_eq!(importer.backoff(3), Duration::from_millis(800));
    }
}
