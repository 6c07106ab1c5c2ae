use super::{types::EngineConfig, ConfigError};

/// Validate configuration
/// Currently validates:
/// - matcher thresholds lie in [0, 1] and matched > unknown
/// - pair ceiling and registry trip threshold are non-zero
/// - filter size window is ordered
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    let m = &config.matcher;
    for (name, value) in [
        ("matcher.best_match_threshold", m.best_match_threshold),
        ("matcher.matched_threshold", m.matched_threshold),
        ("matcher.unknown_threshold", m.unknown_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be within 0.0-1.0, got {value}"
            )));
        }
    }

    if m.matched_threshold <= m.unknown_threshold {
        return Err(ConfigError::ValidationError(format!(
            "matcher.matched_threshold ({}) must be greater than matcher.unknown_threshold ({})",
            m.matched_threshold, m.unknown_threshold
        )));
    }

    if m.max_pairs_per_call == 0 {
        return Err(ConfigError::ValidationError(
            "matcher.max_pairs_per_call cannot be 0".to_string(),
        ));
    }

    if config.registry.trip_threshold == 0 {
        return Err(ConfigError::ValidationError(
            "registry.trip_threshold cannot be 0".to_string(),
        ));
    }

    if config.filter.min_size_bytes >= config.filter.max_size_bytes {
        return Err(ConfigError::ValidationError(format!(
            "filter.min_size_bytes ({}) must be below filter.max_size_bytes ({})",
            config.filter.min_size_bytes, config.filter.max_size_bytes
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_threshold_out_of_range() {
        let mut config = EngineConfig::default();
        config.matcher.best_match_threshold = 1.5;
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_inverted_bands() {
        let mut config = EngineConfig::default();
        config.matcher.matched_threshold = 0.3;
        config.matcher.unknown_threshold = 0.5;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_pair_ceiling() {
        let mut config = EngineConfig::default();
        config.matcher.max_pairs_per_call = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_trip_threshold() {
        let mut config = EngineConfig::default();
        config.registry.trip_threshold = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_inverted_size_window() {
        let mut config = EngineConfig::default();
        config.filter.min_size_bytes = config.filter.max_size_bytes + 1;
        assert!(validate_config(&config).is_err());
    }
}
