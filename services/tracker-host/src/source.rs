use anyhow::Context;
use async_trait::async_trait;
use st_content::{ContentSource, Resource};
use std::path::PathBuf;

/// Reads the tracker documents from the site directory the host serves.
#[derive(Debug, Clone)]
pub(crate) struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait(?Send)]
impl ContentSource for FsContentSource {
    async fn fetch_text(&self, resource: Resource) -> anyhow::Result<String> {
        let path = self.root.join(resource.path());
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_content::LoadError;

    #[tokio::test]
    async fn reads_documents_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/db.json"), "[]").unwrap();

        let source = FsContentSource::new(dir.path());
        let text = source.fetch_text(Resource::DbCatalog).await.unwrap();
        assert_eq!(text, "[]");
    }

    #[tokio::test]
    async fn missing_document_fails_the_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/java.json"), "[]").unwrap();
        std::fs::write(dir.path().join("data/details.json"), "{}").unwrap();

        let err = st_content::load(&FsContentSource::new(dir.path()))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
        assert_eq!(err.resource(), Resource::DbCatalog);
    }
}
