//! Variant discovery by file-name convention and uniform random choice.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use emerge_config::VariantConvention;
use rand::Rng;
use rand::seq::IndexedRandom;

/// No asset variant matches a part. Recoverable: the part is skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no asset variant found for part {part}")]
pub struct NoVariantError {
    /// Part identifier.
    pub part: String,
}

/// Errors while scanning an asset directory.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The directory or one of its entries could not be read.
    #[error("failed to read asset directory {}: {source}", path.display())]
    Io {
        /// Directory being scanned.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// One importable asset file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    /// File name, e.g. `alas_QAP_02.ma`.
    pub name: String,
    /// Full path handed to the scene importer.
    pub path: PathBuf,
}

/// All asset files available to a generation pass.
#[derive(Debug, Clone)]
pub struct VariantCatalog {
    assets: Vec<AssetHandle>,
    convention: VariantConvention,
}

impl VariantCatalog {
    /// Build a catalog from file names located in `base_dir`.
    pub fn from_names<I, S>(base_dir: &Path, names: I, convention: VariantConvention) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let assets = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                AssetHandle {
                    path: base_dir.join(&name),
                    name,
                }
            })
            .collect();
        Self { assets, convention }
    }

    /// List the regular files of `dir`, sorted by name.
    pub fn scan(dir: &Path, convention: VariantConvention) -> Result<Self, CatalogError> {
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.file_type().map_err(io_err)?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        tracing::debug!("Scanned {} asset file(s) in {}", names.len(), dir.display());
        Ok(Self::from_names(dir, names, convention))
    }

    /// Every asset in the catalog.
    pub fn assets(&self) -> &[AssetHandle] {
        &self.assets
    }

    /// Whether an asset name follows the convention for `part_id`:
    /// case-insensitive `<part_id><separator>` prefix and an accepted extension.
    pub fn matches(&self, part_id: &str, asset_name: &str) -> bool {
        let prefix = format!("{part_id}{}", self.convention.separator).to_lowercase();
        if !asset_name.to_lowercase().starts_with(&prefix) {
            return false;
        }
        Path::new(asset_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.convention
                    .extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }

    /// Assets usable as variants of `part_id`, in catalog order.
    pub fn list_variants(&self, part_id: &str) -> Vec<AssetHandle> {
        self.assets
            .iter()
            .filter(|asset| self.matches(part_id, &asset.name))
            .cloned()
            .collect()
    }

    /// Pick one variant of `part_id` uniformly at random.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        part_id: &str,
        rng: &mut R,
    ) -> Result<AssetHandle, NoVariantError> {
        choose_from(part_id, &self.list_variants(part_id), rng).cloned()
    }

    /// Resolve the variants of every listed part once.
    pub fn index<'a>(&self, part_ids: impl IntoIterator<Item = &'a str>) -> VariantIndex {
        let by_part = part_ids
            .into_iter()
            .map(|id| (id.to_string(), self.list_variants(id)))
            .collect();
        VariantIndex { by_part }
    }
}

/// Variants resolved per part ahead of generation.
#[derive(Debug, Clone, Default)]
pub struct VariantIndex {
    by_part: HashMap<String, Vec<AssetHandle>>,
}

impl VariantIndex {
    /// Variants of a part; empty when the part was not indexed or has none.
    pub fn variants(&self, part_id: &str) -> &[AssetHandle] {
        self.by_part.get(part_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pick one variant of `part_id` uniformly at random.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        part_id: &str,
        rng: &mut R,
    ) -> Result<&AssetHandle, NoVariantError> {
        choose_from(part_id, self.variants(part_id), rng)
    }
}

fn choose_from<'a, R: Rng + ?Sized>(
    part_id: &str,
    variants: &'a [AssetHandle],
    rng: &mut R,
) -> Result<&'a AssetHandle, NoVariantError> {
    variants.choose(rng).ok_or_else(|| NoVariantError {
        part: part_id.to_string(),
    })
}
