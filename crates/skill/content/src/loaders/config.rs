//! Skill tree configuration loader.

use std::path::Path;

use skill_core::SkillConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`SkillConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: &Path) -> LoadResult<SkillConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SkillConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skill_core::DowngradePolicy;

    #[test]
    fn partial_config_uses_defaults() {
        let config = ConfigLoader::parse(
            r#"
            allow_downgrade = true
            downgrade_policy = "cascade"
            "#,
        )
        .unwrap();

        assert!(config.allow_downgrade);
        assert_eq!(config.downgrade_policy, DowngradePolicy::Cascade);
        assert_eq!(config.points_per_level, SkillConfig::DEFAULT_POINTS_PER_LEVEL);
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(ConfigLoader::parse(r#"downgrade_policy = "sometimes""#).is_err());
    }
}
