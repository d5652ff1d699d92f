use serde::Deserialize;

/// Rebuild tuning, loaded from `bake.toml` or left at defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BakeConfig {
    /// Sectors added around a dirty rectangle before a partial rebuild.
    pub margin: i32,
    /// Build sectors of one room on the rayon pool.
    pub parallel: bool,
    /// Mirror partial rebuilds into rooms adjoining a touched portal.
    pub propagate: bool,
    /// Relight after rebuilding; vertex colors stay white when off.
    pub lighting: bool,
}

impl Default for BakeConfig {
    fn default() -> Self {
        Self {
            margin: 1,
            parallel: true,
            propagate: true,
            lighting: true,
        }
    }
}

impl BakeConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let cfg: BakeConfig = toml::from_str(toml_str)?;
        if cfg.margin < 0 {
            return Err(format!("margin must be non-negative, got {}", cfg.margin).into());
        }
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(BakeConfig::from_toml_str("").unwrap(), BakeConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = BakeConfig::from_toml_str("margin = 2\npropagate = false\n").unwrap();
        assert_eq!(cfg.margin, 2);
        assert!(!cfg.propagate);
        assert!(cfg.parallel);
    }

    #[test]
    fn negative_margin_is_rejected() {
        assert!(BakeConfig::from_toml_str("margin = -1").is_err());
    }
}
