pub mod config;
pub mod engine;
pub mod matching;
pub mod metrics;
pub mod providers;
pub mod quality;
pub mod registry;
pub mod similarity;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, ConfigError, EngineConfig, FilterConfig,
    MatcherConfig, RegistryConfig,
};
pub use engine::{AcquireError, AcquisitionEngine, AcquisitionOutcome};
pub use matching::{
    BestMatch, HeuristicScorer, LazyScorer, MatchBand, MatchCandidate, MatchQuery, PairScorer,
    RelevanceScorer, ScorerError,
};
pub use quality::{
    parse, parse_extended, select_best, ParsedTorrent, Quality, QualityProfile,
    QualityProfileItem, SelectionError, Source,
};
pub use registry::{
    Backends, IndexerRegistry, MetadataRegistry, ProviderRegistry, TorrentClientRegistry,
};
