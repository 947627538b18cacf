//! Battle tuning loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loads battle tuning overrides from a TOML file.
///
/// The file may set any subset of [`BattleConfig`]'s fields; everything
/// left out keeps its default. Useful for difficulty modes and balance
/// experiments without a rebuild.
pub fn load_tuning(path: &Path) -> LoadResult<BattleConfig> {
    let content = read_file(path)?;
    let config: BattleConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse tuning TOML: {}", e))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_overrides_keep_defaults_elsewhere() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gamble_percent = 25").unwrap();
        writeln!(file, "wounded_fraction = 0.6").unwrap();

        let config = load_tuning(file.path()).expect("Failed to load tuning");
        assert_eq!(config.gamble_percent, 25);
        assert_eq!(config.wounded_fraction, 0.6);
        assert_eq!(
            config.on_hit_energy_gain,
            BattleConfig::DEFAULT_ON_HIT_ENERGY_GAIN
        );
        assert_eq!(config.log_capacity, BattleConfig::DEFAULT_LOG_CAPACITY);
    }

    #[test]
    fn missing_files_are_reported_with_the_path() {
        let err = load_tuning(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
