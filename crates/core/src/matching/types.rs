//! Shared types for the matching pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The expected identity of a subscribed release, built per search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    /// Expected release title.
    pub title: String,
    /// Expected performer name, if the subscription names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    /// Expected studio name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    /// Expected release date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl MatchQuery {
    /// Create a query with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            performer: None,
            studio: None,
            date: None,
        }
    }

    pub fn with_performer(mut self, performer: impl Into<String>) -> Self {
        self.performer = Some(performer.into());
        self
    }

    pub fn with_studio(mut self, studio: impl Into<String>) -> Self {
        self.studio = Some(studio.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Canonical text representation fed to the pairwise scorer.
    ///
    /// Absent fields are omitted; the title always comes last.
    pub fn canonical_text(&self) -> String {
        canonical_text(
            self.performer.as_deref(),
            self.studio.as_deref(),
            self.date,
            &self.title,
        )
    }
}

/// A release being evaluated against a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Opaque candidate id (indexer guid, info hash, ...).
    pub id: String,
    /// Release title as reported.
    pub title: String,
    /// Release date, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Studio, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub studio: Option<String>,
    /// Credited performers, in reported order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub performers: Vec<String>,
}

impl MatchCandidate {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date: None,
            studio: None,
            performers: Vec::new(),
        }
    }

    pub fn with_performers(mut self, performers: Vec<String>) -> Self {
        self.performers = performers;
        self
    }

    pub fn with_studio(mut self, studio: impl Into<String>) -> Self {
        self.studio = Some(studio.into());
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Canonical text representation fed to the pairwise scorer.
    pub fn canonical_text(&self) -> String {
        let performer = if self.performers.is_empty() {
            None
        } else {
            Some(self.performers.join(", "))
        };
        canonical_text(
            performer.as_deref(),
            self.studio.as_deref(),
            self.date,
            &self.title,
        )
    }
}

fn canonical_text(
    performer: Option<&str>,
    studio: Option<&str>,
    date: Option<NaiveDate>,
    title: &str,
) -> String {
    let mut parts = Vec::with_capacity(4);
    if let Some(p) = performer {
        parts.push(format!("Performer: {p}"));
    }
    if let Some(s) = studio {
        parts.push(format!("Studio: {s}"));
    }
    if let Some(d) = date {
        parts.push(format!("Date: {}", d.format("%Y-%m-%d")));
    }
    parts.push(format!("Title: {title}"));
    parts.join(" | ")
}

/// The winning candidate for one query, with its confidence and the
/// position it held in the input slice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMatch {
    pub candidate: MatchCandidate,
    /// Confidence in 0.0-1.0. Recomputed per search, never persisted.
    pub score: f32,
    /// Index into the candidate slice the match was selected from.
    pub index: usize,
}

/// Three-band classification of a confidence score.
///
/// Used by callers that keep uncertain and unknown candidates around
/// instead of discarding everything below one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBand {
    Matched,
    Uncertain,
    Unknown,
}
