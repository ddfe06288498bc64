//! Declarative pool manifests
//!
//! A manifest names a set of pools up front so a scene can stock them from
//! data instead of code:
//!
//! ```json
//! {
//!   "defaults": { "release_check": "strict" },
//!   "pools": {
//!     "bullets": {
//!       "prefab": "Bullet",
//!       "holder": { "name": "Bullets", "position": { "x": 0.0, "y": 1.5, "z": 0.0 } },
//!       "initial_count": 32,
//!       "config": { "grow_on_demand": true }
//!     }
//!   }
//! }
//! ```
//!
//! A pool's `config` replaces `defaults` wholesale; fields it leaves out take
//! their [`PoolConfig::default`] values, not the manifest defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::PoolConfig;
use crate::error::{PoolError, PoolResult};
use crate::poolable::Component;
use crate::pooler::PoolBuilder;
use crate::scene::{Holder, Prefab, SharedScene};

/// Named pool declarations plus shared defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolManifest {
    /// Config for pools that do not carry their own
    #[serde(default)]
    pub defaults: PoolConfig,

    #[serde(default)]
    pub pools: BTreeMap<String, PoolDecl>,
}

/// One pool as declared in a manifest
///
/// Prefab and holder are optional on the wire so that a missing one surfaces
/// as the same construction error code would get.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolDecl {
    #[serde(default)]
    pub prefab: Option<Prefab>,

    #[serde(default)]
    pub holder: Option<Holder>,

    #[serde(default)]
    pub initial_count: i64,

    /// Replace an existing pool for the same element type on registration
    #[serde(default)]
    pub overwrite: bool,

    #[serde(default)]
    pub config: Option<PoolConfig>,
}

impl PoolManifest {
    /// Parse a manifest from JSON text
    pub fn from_json(json: &str) -> PoolResult<Self> {
        serde_json::from_str(json).map_err(PoolError::manifest)
    }

    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> PoolResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PoolError::manifest(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn get(&self, name: &str) -> Option<&PoolDecl> {
        self.pools.get(name)
    }

    /// Declared pool names, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    /// Effective config of the pool declared as `name`
    pub fn config_for(&self, name: &str) -> Option<PoolConfig> {
        let decl = self.get(name)?;
        Some(decl.config.clone().unwrap_or_else(|| self.defaults.clone()))
    }

    /// Builder preloaded with the declaration of `name`
    pub fn builder<T: Component>(
        &self,
        name: &str,
        scene: SharedScene,
    ) -> PoolResult<PoolBuilder<T>> {
        let decl = self
            .get(name)
            .ok_or_else(|| PoolError::undeclared_pool(name))?;

        let mut builder = PoolBuilder::new(scene)
            .initial_count(decl.initial_count)
            .config(decl.config.clone().unwrap_or_else(|| self.defaults.clone()));
        builder.prefab = decl.prefab.clone();
        builder.holder = decl.holder.clone();
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseCheck;
    use crate::scene::Position;
    use crate::testing::{MockScene, Tally};
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"{
        "defaults": { "release_check": "lenient" },
        "pools": {
            "bullets": {
                "prefab": "Bullet",
                "holder": { "name": "Bullets", "position": { "x": 0.0, "y": 1.5, "z": 0.0 } },
                "initial_count": 4,
                "config": { "grow_on_demand": true }
            },
            "sparks": {
                "prefab": "Spark",
                "holder": { "name": "Effects" },
                "initial_count": 2,
                "overwrite": true
            },
            "broken": { "holder": { "name": "Nowhere" } }
        }
    }"#;

    #[test]
    fn test_parse() {
        let manifest = PoolManifest::from_json(MANIFEST).unwrap();
        assert_eq!(
            manifest.names().collect::<Vec<_>>(),
            ["broken", "bullets", "sparks"]
        );

        let bullets = manifest.get("bullets").unwrap();
        assert_eq!(bullets.prefab, Some(Prefab::new("Bullet")));
        assert_eq!(bullets.initial_count, 4);
        assert!(!bullets.overwrite);
        assert_eq!(
            bullets.holder.as_ref().map(Holder::position),
            Some(Position::new(0.0, 1.5, 0.0))
        );
        assert!(manifest.get("sparks").unwrap().overwrite);
    }

    #[test]
    fn test_pool_config_replaces_defaults() {
        let manifest = PoolManifest::from_json(MANIFEST).unwrap();

        let bullets = manifest.config_for("bullets").unwrap();
        assert_eq!(bullets.release_check, ReleaseCheck::Strict);
        assert!(bullets.grow_on_demand);

        let sparks = manifest.config_for("sparks").unwrap();
        assert_eq!(sparks, PoolConfig::lenient());

        assert!(manifest.config_for("rockets").is_none());
    }

    #[test]
    fn test_builder_stocks_declared_pool() {
        let manifest = PoolManifest::from_json(MANIFEST).unwrap();
        let pool = manifest
            .builder::<Tally>("bullets", MockScene::shared())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(pool.pooled(), 4);
        assert_eq!(pool.prefab().name(), "Bullet");
        assert!(pool.config().grow_on_demand);
    }

    #[test]
    fn test_declaration_errors() {
        let manifest = PoolManifest::from_json(MANIFEST).unwrap();

        let err = manifest
            .builder::<Tally>("broken", MockScene::shared())
            .unwrap()
            .build()
            .unwrap_err();
        assert_eq!(err, PoolError::MissingPrefab);

        let err = manifest
            .builder::<Tally>("rockets", MockScene::shared())
            .unwrap_err();
        assert_eq!(err.code(), "POOL:MANIFEST:UNDECLARED");
    }

    #[test]
    fn test_invalid_json() {
        let err = PoolManifest::from_json(r#"{"pools": {"a": {"initial_count": "many"}}}"#)
            .unwrap_err();
        assert_eq!(err.code(), "POOL:MANIFEST:INVALID");

        let err = PoolManifest::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = PoolManifest::from_json("{}").unwrap();
        assert_eq!(manifest, PoolManifest::default());
    }
}
