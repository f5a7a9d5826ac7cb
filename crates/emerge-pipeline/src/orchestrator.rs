//! Sequencing of variant choice, import, placement and deformation.

use emerge_assets::{VariantCatalog, VariantIndex};
use emerge_config::{Configuration, PipelineSettings};
use emerge_deform::DeformationEngine;
use emerge_scene::{NodeHandle, ScenePort};
use emerge_terrain::{CloudScatter, GENERATED_SEED_LIMIT, TerrainSynthesizer};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::PipelineError;
use crate::report::{
    EnvironmentReport, GeneratedPart, GenerationReport, ModelReport, PartOutcome, SkipCause,
    SkippedPart,
};

/// One generation session: loaded configuration, resolved variants and the
/// shared random stream every random decision draws from, in call order.
pub struct Pipeline {
    settings: PipelineSettings,
    config: Configuration,
    variants: VariantIndex,
    engine: DeformationEngine,
    seed: u64,
    rng: ChaCha8Rng,
}

impl Pipeline {
    /// Validate settings, resolve every part's variants once and seed the stream.
    pub fn new(
        settings: PipelineSettings,
        config: Configuration,
        catalog: &VariantCatalog,
    ) -> Result<Self, PipelineError> {
        settings.validate()?;

        let variants = catalog.index(config.part_ids());
        for id in config.part_ids() {
            if variants.variants(id).is_empty() {
                tracing::warn!("No asset variants for part {}", id);
            }
        }

        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!("Pipeline seed {}", seed);

        Ok(Self {
            settings,
            config,
            variants,
            engine: DeformationEngine::new(),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Load the part document and scan the asset directory named by `settings`.
    pub fn from_settings(settings: PipelineSettings) -> Result<Self, PipelineError> {
        let config = Configuration::load(&settings.parts_config)?;
        let catalog = VariantCatalog::scan(&settings.assets_dir, settings.variants.clone())?;
        tracing::info!(
            "Loaded {} part(s) and {} asset file(s)",
            config.len(),
            catalog.assets().len()
        );
        Self::new(settings, config, &catalog)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Name of the group a generated part lives under.
    pub fn generated_name(&self, part_id: &str) -> String {
        format!("{}{}", part_id, self.settings.generated_suffix)
    }

    /// Replace any previous generation of `part_id` with a fresh random variant,
    /// placed and deformed per its configuration.
    ///
    /// Parts without a configuration entry are placed at identity with no
    /// deformation. Missing variants and empty or failed imports skip the part.
    pub fn generate_part<S>(
        &mut self,
        part_id: &str,
        scene: &mut S,
    ) -> Result<PartOutcome, PipelineError>
    where
        S: ScenePort + ?Sized,
    {
        let group_name = self.generated_name(part_id);
        if let Some(previous) = scene.find_node(&group_name) {
            tracing::debug!("Deleting previous {}", group_name);
            scene.delete_node(previous)?;
        }

        let asset = match self.variants.choose(part_id, &mut self.rng) {
            Ok(asset) => asset.clone(),
            Err(e) => {
                tracing::warn!("{}", e);
                return Ok(PartOutcome::Skipped(SkippedPart {
                    part: part_id.to_string(),
                    asset: None,
                    cause: SkipCause::NoVariant(e),
                }));
            }
        };

        let skip = |cause: SkipCause| -> Result<PartOutcome, PipelineError> {
            Ok(PartOutcome::Skipped(SkippedPart {
                part: part_id.to_string(),
                asset: Some(asset.clone()),
                cause,
            }))
        };

        let imported = match scene.import_asset(&asset.path) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!("{}: import of {} failed: {}", part_id, asset.name, e);
                return skip(SkipCause::ImportFailed(e));
            }
        };
        if imported.is_empty() {
            tracing::warn!("{}: {} imported no nodes", part_id, asset.name);
            return skip(SkipCause::EmptyImport);
        }

        let group = scene.group(&imported, &group_name)?;
        let locators = self.handle_locators(part_id, group, scene)?;

        let placement = self.config.part_or_identity(part_id);
        scene.move_node(group, placement.position, true)?;
        scene.rotate_node(group, placement.rotation)?;
        scene.scale_node(group, placement.scale)?;

        let deformation = self
            .engine
            .apply(part_id, group, placement, scene, &mut self.rng);

        tracing::info!(
            "Generated {} from {} ({} deformation(s))",
            part_id,
            asset.name,
            deformation.applied_count()
        );

        Ok(PartOutcome::Generated(GeneratedPart {
            part: part_id.to_string(),
            asset,
            group,
            locators,
            deformation,
        }))
    }

    /// Generate every configured part in document order.
    pub fn generate_model<S>(&mut self, scene: &mut S) -> Result<ModelReport, PipelineError>
    where
        S: ScenePort + ?Sized,
    {
        let ids: Vec<String> = self.config.part_ids().map(str::to_string).collect();
        let mut report = ModelReport::default();
        for id in &ids {
            report.push(self.generate_part(id, scene)?);
        }
        tracing::info!(
            "Model: {} part(s) generated, {} skipped",
            report.generated.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Synthesize the terrain, then scatter the clouds.
    ///
    /// An unset terrain seed is drawn from the shared stream, so a seeded
    /// pipeline reproduces its terrain too.
    pub fn build_environment<S>(&mut self, scene: &mut S) -> Result<EnvironmentReport, PipelineError>
    where
        S: ScenePort + ?Sized,
    {
        let mut terrain_config = self.settings.terrain.clone();
        if terrain_config.seed.is_none() {
            terrain_config.seed = Some(self.rng.random_range(0..GENERATED_SEED_LIMIT));
        }
        let terrain = TerrainSynthesizer::new(terrain_config).synthesize(scene)?;
        tracing::info!("Terrain seed {}", terrain.seed);

        let clouds = CloudScatter::new(self.settings.clouds.clone()).scatter(scene, &mut self.rng)?;
        Ok(EnvironmentReport { terrain, clouds })
    }

    /// Full pass: model, then environment.
    pub fn run<S>(&mut self, scene: &mut S) -> Result<GenerationReport, PipelineError>
    where
        S: ScenePort + ?Sized,
    {
        let model = self.generate_model(scene)?;
        let environment = self.build_environment(scene)?;
        Ok(GenerationReport {
            seed: self.seed,
            model,
            environment,
        })
    }

    /// Count locator nodes below `group`, deleting them unless they are kept.
    fn handle_locators<S>(
        &self,
        part_id: &str,
        group: NodeHandle,
        scene: &mut S,
    ) -> Result<usize, PipelineError>
    where
        S: ScenePort + ?Sized,
    {
        let marker = self.settings.locator_marker.as_str();
        if marker.is_empty() {
            return Ok(0);
        }

        let mut locators = Vec::new();
        let mut stack = scene.children(group);
        while let Some(node) = stack.pop() {
            let is_locator = scene
                .node_name(node)
                .is_some_and(|name| name.contains(marker));
            if is_locator {
                locators.push(node);
            } else {
                stack.extend(scene.children(node));
            }
        }

        if self.settings.keep_locators {
            if !locators.is_empty() {
                tracing::info!("{}: keeping {} locator(s)", part_id, locators.len());
            }
        } else {
            for &node in &locators {
                scene.delete_node(node)?;
            }
            tracing::debug!("{}: deleted {} locator(s)", part_id, locators.len());
        }
        Ok(locators.len())
    }
}
