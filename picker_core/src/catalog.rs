// picker_core/src/catalog.rs

//! This module enumerates the placeable models shipped with the app and
//! builds the ordered list of `ModelRecord`s the rest of the picker uses.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use crate::config::CatalogConfig;
use crate::error::PickerError;
use crate::model::{ModelRecord, Thumbnail};

// =========================================================================
// == Collaborator Traits ==
// =========================================================================

/// The bundled resource store.
pub trait ResourceStore {
    /// Lists the file names directly inside `path`.
    fn enumerate(&self, path: &Path) -> Result<Vec<String>, PickerError>;
}

/// The image store thumbnails are looked up in.
pub trait ImageStore {
    fn contains(&self, name: &str) -> bool;
}

/// A `ResourceStore` backed by a directory on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirResourceStore;

impl ResourceStore for DirResourceStore {
    fn enumerate(&self, path: &Path) -> Result<Vec<String>, PickerError> {
        let unavailable = |reason: String| PickerError::CatalogUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        if !path.is_dir() {
            return Err(unavailable("not a directory".to_string()));
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| unavailable(e.to_string()))?;
            if !entry.file_type().is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

/// An `ImageStore` that looks for `<dir>/<name>.png`.
#[derive(Debug, Clone)]
pub struct DirImageStore {
    pub dir: PathBuf,
}

impl DirImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.png"))
    }
}

impl ImageStore for DirImageStore {
    fn contains(&self, name: &str) -> bool {
        self.image_path(name).is_file()
    }
}

// =========================================================================
// == Enumeration ==
// =========================================================================

/// Returns one identifier per entry of `dir` whose extension is `extension`,
/// with the extension stripped, in enumeration order.
///
/// An inaccessible directory yields an empty list; the failure is only logged.
pub fn list_available_models(
    store: &dyn ResourceStore,
    dir: &Path,
    extension: &str,
) -> Vec<String> {
    let files = match store.enumerate(dir) {
        Ok(files) => files,
        Err(e) => {
            tracing::warn!("{}. No models will be available.", e);
            return Vec::new();
        }
    };

    files
        .iter()
        .filter_map(|filename| {
            let path = Path::new(filename);
            if path.extension().is_some_and(|ext| ext == extension) {
                path.file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            } else {
                None
            }
        })
        .collect()
}

/// Picks the thumbnail image for `identifier`, falling back to `fallback`
/// when the store has no image of that name.
pub fn resolve_thumbnail(images: &dyn ImageStore, identifier: &str, fallback: &str) -> Thumbnail {
    if images.contains(identifier) {
        Thumbnail {
            image_name: identifier.to_string(),
            is_fallback: false,
        }
    } else {
        tracing::debug!(
            "No thumbnail for '{}', using fallback '{}'.",
            identifier,
            fallback
        );
        Thumbnail {
            image_name: fallback.to_string(),
            is_fallback: true,
        }
    }
}

// =========================================================================
// == Catalog ==
// =========================================================================

/// The ordered set of placeable models. Order is display order only.
pub struct Catalog<H> {
    records: Vec<Arc<ModelRecord<H>>>,
}

impl<H> Default for Catalog<H> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<H> Catalog<H> {
    /// Scans the configured models directory and builds one record per model.
    pub fn build(
        store: &dyn ResourceStore,
        images: &dyn ImageStore,
        config: &CatalogConfig,
    ) -> Self {
        let models_path = config.models_path();
        let identifiers = list_available_models(store, &models_path, &config.model_extension);
        tracing::info!(
            "Found {} model(s) in {:?}.",
            identifiers.len(),
            models_path
        );
        Self::from_identifiers(identifiers, images, &config.fallback_thumbnail)
    }

    pub fn from_identifiers<I, S>(identifiers: I, images: &dyn ImageStore, fallback: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = identifiers
            .into_iter()
            .map(|identifier| {
                let identifier = identifier.into();
                let thumbnail = resolve_thumbnail(images, &identifier, fallback);
                Arc::new(ModelRecord::new(identifier, thumbnail))
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[Arc<ModelRecord<H>>] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Arc<ModelRecord<H>>> {
        self.records.get(index)
    }

    pub fn find(&self, identifier: &str) -> Option<&Arc<ModelRecord<H>>> {
        self.records.iter().find(|r| r.identifier() == identifier)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;

    struct FakeStore(Vec<&'static str>);

    impl ResourceStore for FakeStore {
        fn enumerate(&self, _path: &Path) -> Result<Vec<String>, PickerError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct FailingStore;

    impl ResourceStore for FailingStore {
        fn enumerate(&self, path: &Path) -> Result<Vec<String>, PickerError> {
            Err(PickerError::CatalogUnavailable {
                path: path.to_path_buf(),
                reason: "permission denied".to_string(),
            })
        }
    }

    struct FakeImages(HashSet<&'static str>);

    impl ImageStore for FakeImages {
        fn contains(&self, name: &str) -> bool {
            self.0.contains(name)
        }
    }

    #[test]
    fn filters_by_extension_and_strips_it() {
        let store = FakeStore(vec![
            "teapot.usdz",
            "Info.plist",
            "toy_robot_vintage.usdz",
            "teapot.png",
            "usdz",
        ]);
        let ids = list_available_models(&store, Path::new("bundle"), "usdz");
        assert_eq!(ids, vec!["teapot", "toy_robot_vintage"]);
    }

    #[test]
    fn inaccessible_store_yields_empty() {
        let ids = list_available_models(&FailingStore, Path::new("bundle"), "usdz");
        assert!(ids.is_empty());
    }

    #[test]
    fn missing_directory_yields_empty() {
        let ids = list_available_models(
            &DirResourceStore,
            Path::new("/definitely/not/a/real/dir"),
            "glb",
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn dir_store_lists_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("teapot.glb"), b"").unwrap();
        fs::write(dir.path().join("toy_biplane.glb"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.glb")).unwrap();
        fs::write(dir.path().join("nested.glb").join("inner.glb"), b"").unwrap();

        let mut ids = list_available_models(&DirResourceStore, dir.path(), "glb");
        ids.sort();
        assert_eq!(ids, vec!["teapot", "toy_biplane"]);
    }

    #[test]
    fn thumbnail_falls_back_when_missing() {
        let images = FakeImages(HashSet::from(["teapot"]));
        let own = resolve_thumbnail(&images, "teapot", "teapot");
        assert!(!own.is_fallback);

        let fallback = resolve_thumbnail(&images, "fender_stratocaster", "teapot");
        assert_eq!(fallback.image_name, "teapot");
        assert!(fallback.is_fallback);
    }

    #[test]
    fn dir_image_store_checks_png() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("teapot.png"), b"").unwrap();
        let images = DirImageStore::new(dir.path());
        assert!(images.contains("teapot"));
        assert!(!images.contains("toy_biplane"));
    }

    #[test]
    fn build_creates_one_record_per_model() {
        let dir = tempfile::tempdir().unwrap();
        let models = dir.path().join("models");
        fs::create_dir(&models).unwrap();
        fs::write(models.join("teapot.glb"), b"").unwrap();
        fs::write(models.join("toy_robot_vintage.glb"), b"").unwrap();

        let config = CatalogConfig {
            assets_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let images = DirImageStore::new(config.thumbnails_path());
        let catalog: Catalog<u32> = Catalog::build(&DirResourceStore, &images, &config);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("teapot").is_some());
        assert!(catalog.find("toy_robot_vintage").is_some());
        assert!(catalog.get(2).is_none());
    }
}
