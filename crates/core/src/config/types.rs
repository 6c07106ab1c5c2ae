use serde::{Deserialize, Serialize};

/// Root engine configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

/// Tunables for the relevance scorer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Best-match threshold for binary selection.
    #[serde(default = "default_best_match_threshold")]
    pub best_match_threshold: f32,
    /// Scores at or above this classify as matched.
    #[serde(default = "default_matched_threshold")]
    pub matched_threshold: f32,
    /// Scores at or above this (but below matched) classify as uncertain.
    #[serde(default = "default_unknown_threshold")]
    pub unknown_threshold: f32,
    /// Hard ceiling on query x candidate pairs per scorer call.
    #[serde(default = "default_max_pairs_per_call")]
    pub max_pairs_per_call: usize,
    /// Timeout for the one-time scorer load.
    #[serde(default = "default_scorer_load_timeout_secs")]
    pub scorer_load_timeout_secs: u64,
    /// Fall back to the similarity-based scorer when the semantic backend
    /// is unavailable.
    #[serde(default = "default_true")]
    pub heuristic_fallback: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            best_match_threshold: default_best_match_threshold(),
            matched_threshold: default_matched_threshold(),
            unknown_threshold: default_unknown_threshold(),
            max_pairs_per_call: default_max_pairs_per_call(),
            scorer_load_timeout_secs: default_scorer_load_timeout_secs(),
            heuristic_fallback: default_true(),
        }
    }
}

fn default_best_match_threshold() -> f32 {
    0.7
}

fn default_matched_threshold() -> f32 {
    0.65
}

fn default_unknown_threshold() -> f32 {
    0.35
}

fn default_max_pairs_per_call() -> usize {
    crate::matching::MAX_PAIRS_PER_CALL
}

fn default_scorer_load_timeout_secs() -> u64 {
    600
}

fn default_true() -> bool {
    true
}

/// Circuit breaker policy for provider registries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Consecutive failures before a provider trips.
    #[serde(default = "default_trip_threshold")]
    pub trip_threshold: u32,
    /// How long a tripped provider stays out of rotation.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            trip_threshold: default_trip_threshold(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

fn default_trip_threshold() -> u32 {
    3
}

fn default_cooldown_secs() -> u64 {
    3600
}

/// Hard-filter floors and caps applied before profile selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Floor on the 0-100 relevance score.
    #[serde(default = "default_min_match_score")]
    pub min_match_score: f32,
    /// Results below this size are treated as samples/fakes.
    #[serde(default = "default_min_size_bytes")]
    pub min_size_bytes: u64,
    /// Results above this size are treated as collection packs.
    #[serde(default = "default_max_size_bytes")]
    pub max_size_bytes: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_match_score: default_min_match_score(),
            min_size_bytes: default_min_size_bytes(),
            max_size_bytes: default_max_size_bytes(),
        }
    }
}

fn default_min_match_score() -> f32 {
    crate::quality::DEFAULT_MIN_MATCH_SCORE
}

fn default_min_size_bytes() -> u64 {
    crate::quality::DEFAULT_MIN_SIZE_BYTES
}

fn default_max_size_bytes() -> u64 {
    crate::quality::DEFAULT_MAX_SIZE_BYTES
}
