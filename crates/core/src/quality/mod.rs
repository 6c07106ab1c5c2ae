//! Quality extraction and profile-driven selection.
//!
//! Raw indexer titles are annotated with quality/source tokens by the
//! parser, then a user-owned quality profile narrows and ranks the scored
//! candidates down to a single pick.

mod filter;
mod parser;
mod types;

pub use filter::{
    apply_hard_filters, apply_score_filter, apply_size_filters, filter_by_profile, rank,
    select_best, DEFAULT_MAX_SIZE_BYTES, DEFAULT_MIN_MATCH_SCORE, DEFAULT_MIN_SIZE_BYTES,
};
pub use parser::{parse, parse_extended, ParsedMedia, ParsedQuality};
pub use types::{
    AudioTag, Codec, ParsedTorrent, Quality, QualityProfile, QualityProfileItem, SelectionError,
    Source,
};
