//! Quality and source extraction from release titles.
//!
//! Pattern-based, case-insensitive classification. Unrecognized titles
//! degrade to `any` rather than erroring; malformed input never fails.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::{AudioTag, Codec, Quality, Source};

static QUALITY_2160: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(2160p|4k|uhd)\b").unwrap());
static QUALITY_1080: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b1080p\b").unwrap());
static QUALITY_720: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b720p\b").unwrap());
static QUALITY_480: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b480p\b").unwrap());

static SOURCE_BLURAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(blu-?ray|bd-?rip|br-?rip)\b").unwrap());
static SOURCE_WEBDL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bweb-?dl\b").unwrap());
static SOURCE_WEBRIP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bweb-?rip\b").unwrap());
static SOURCE_HDTV: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhdtv\b").unwrap());
static SOURCE_DVD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(dvd-?rip|dvd)\b").unwrap());

static CODEC_H265: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(x265|h\.?265|hevc)\b").unwrap());
static CODEC_H264: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(x264|h\.?264|avc)\b").unwrap());

static AUDIO_ATMOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\batmos\b").unwrap());
static AUDIO_DTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bdts\b").unwrap());
static AUDIO_AAC: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\baac\b").unwrap());
static AUDIO_DD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(ddp?[257]\.1|dd)\b").unwrap());

/// Quality and source extracted from a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedQuality {
    pub quality: Quality,
    pub source: Source,
}

/// Extended extraction including informational codec/audio tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedMedia {
    pub quality: Quality,
    pub source: Source,
    pub codec: Option<Codec>,
    pub audio: Option<AudioTag>,
}

/// Extract quality and source from a free-text release title.
///
/// Precedence when multiple tokens appear: higher resolutions win, and
/// bluray > web-dl > web-rip > hdtv > dvd.
pub fn parse(title: &str) -> ParsedQuality {
    ParsedQuality {
        quality: parse_quality(title),
        source: parse_source(title),
    }
}

/// Extended variant of [`parse`] that also picks up codec and audio tags.
pub fn parse_extended(title: &str) -> ParsedMedia {
    ParsedMedia {
        quality: parse_quality(title),
        source: parse_source(title),
        codec: parse_codec(title),
        audio: parse_audio(title),
    }
}

fn parse_quality(title: &str) -> Quality {
    if QUALITY_2160.is_match(title) {
        Quality::P2160
    } else if QUALITY_1080.is_match(title) {
        Quality::P1080
    } else if QUALITY_720.is_match(title) {
        Quality::P720
    } else if QUALITY_480.is_match(title) {
        Quality::P480
    } else {
        Quality::Any
    }
}

fn parse_source(title: &str) -> Source {
    if SOURCE_BLURAY.is_match(title) {
        Source::Bluray
    } else if SOURCE_WEBDL.is_match(title) {
        Source::Webdl
    } else if SOURCE_WEBRIP.is_match(title) {
        Source::Webrip
    } else if SOURCE_HDTV.is_match(title) {
        Source::Hdtv
    } else if SOURCE_DVD.is_match(title) {
        Source::Dvd
    } else {
        Source::Any
    }
}

fn parse_codec(title: &str) -> Option<Codec> {
    if CODEC_H265.is_match(title) {
        Some(Codec::H265)
    } else if CODEC_H264.is_match(title) {
        Some(Codec::H264)
    } else {
        None
    }
}

fn parse_audio(title: &str) -> Option<AudioTag> {
    if AUDIO_ATMOS.is_match(title) {
        Some(AudioTag::Atmos)
    } else if AUDIO_DTS.is_match(title) {
        Some(AudioTag::Dts)
    } else if AUDIO_AAC.is_match(title) {
        Some(AudioTag::Aac)
    } else if AUDIO_DD.is_match(title) {
        Some(AudioTag::Dd)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quality_tokens() {
        assert_eq!(parse("Scene.A.2160p.WEB-DL").quality, Quality::P2160);
        assert_eq!(parse("Scene A [4K] x265").quality, Quality::P2160);
        assert_eq!(parse("Scene A UHD remux").quality, Quality::P2160);
        assert_eq!(parse("Scene.A.1080p.WEB-DL").quality, Quality::P1080);
        assert_eq!(parse("scene a 720p hdtv").quality, Quality::P720);
        assert_eq!(parse("Scene A 480p").quality, Quality::P480);
    }

    #[test]
    fn test_parse_quality_precedence() {
        // Higher resolution wins when several tokens appear
        assert_eq!(parse("Scene A 2160p 1080p").quality, Quality::P2160);
        assert_eq!(parse("Scene A 1080p upscaled from 720p").quality, Quality::P1080);
    }

    #[test]
    fn test_parse_quality_unknown() {
        assert_eq!(parse("Scene A").quality, Quality::Any);
        assert_eq!(parse("").quality, Quality::Any);
        // "1080px" has no word boundary after the token
        assert_eq!(parse("banner 1080px wide").quality, Quality::Any);
    }

    #[test]
    fn test_parse_source_tokens() {
        assert_eq!(parse("Scene.A.1080p.BluRay.x264").source, Source::Bluray);
        assert_eq!(parse("Scene A Blu-Ray").source, Source::Bluray);
        assert_eq!(parse("Scene A BDRip").source, Source::Bluray);
        assert_eq!(parse("Scene A BRRip").source, Source::Bluray);
        assert_eq!(parse("Scene.A.WEB-DL").source, Source::Webdl);
        assert_eq!(parse("Scene.A.WEBDL").source, Source::Webdl);
        assert_eq!(parse("Scene A WEBRip").source, Source::Webrip);
        assert_eq!(parse("Scene A web-rip").source, Source::Webrip);
        assert_eq!(parse("Scene A HDTV").source, Source::Hdtv);
        assert_eq!(parse("Scene A DVDRip").source, Source::Dvd);
        assert_eq!(parse("Scene A DVD").source, Source::Dvd);
    }

    #[test]
    fn test_parse_source_precedence() {
        assert_eq!(parse("Scene A BluRay WEB-DL").source, Source::Bluray);
        assert_eq!(parse("Scene A WEB-DL WEBRip").source, Source::Webdl);
        assert_eq!(parse("Scene A WEBRip HDTV").source, Source::Webrip);
    }

    #[test]
    fn test_parse_source_unknown() {
        assert_eq!(parse("Scene A 1080p").source, Source::Any);
    }

    #[test]
    fn test_parse_case_insensitive() {
        let p = parse("scene.a.1080P.bluray");
        assert_eq!(p.quality, Quality::P1080);
        assert_eq!(p.source, Source::Bluray);
    }

    #[test]
    fn test_parse_extended_codec() {
        assert_eq!(parse_extended("Scene A x265").codec, Some(Codec::H265));
        assert_eq!(parse_extended("Scene A HEVC").codec, Some(Codec::H265));
        assert_eq!(parse_extended("Scene A h.265").codec, Some(Codec::H265));
        assert_eq!(parse_extended("Scene A x264").codec, Some(Codec::H264));
        assert_eq!(parse_extended("Scene A AVC").codec, Some(Codec::H264));
        assert_eq!(parse_extended("Scene A").codec, None);
    }

    #[test]
    fn test_parse_extended_audio() {
        assert_eq!(parse_extended("Scene A Atmos").audio, Some(AudioTag::Atmos));
        assert_eq!(parse_extended("Scene A DTS-HD").audio, Some(AudioTag::Dts));
        assert_eq!(parse_extended("Scene A AAC 2.0").audio, Some(AudioTag::Aac));
        assert_eq!(parse_extended("Scene A DD5.1").audio, Some(AudioTag::Dd));
        assert_eq!(parse_extended("Scene A DDP5.1").audio, Some(AudioTag::Dd));
        assert_eq!(parse_extended("Scene A").audio, None);
    }

    #[test]
    fn test_parse_extended_full_title() {
        let p = parse_extended("Studio.Scene.A.2024.1080p.WEB-DL.DDP5.1.H.264");
        assert_eq!(p.quality, Quality::P1080);
        assert_eq!(p.source, Source::Webdl);
        assert_eq!(p.codec, Some(Codec::H264));
        assert_eq!(p.audio, Some(AudioTag::Dd));
    }

    #[test]
    fn test_parse_never_panics_on_garbage() {
        for title in ["", "///", "\u{0}\u{1}", "ℓ💿𝔴eird", "p1080"] {
            let _ = parse_extended(title);
        }
    }
}
