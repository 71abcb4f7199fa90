//! Reform Catalog
//!
//! Ranks every political and social reform level by its position inside its
//! reform track, and keeps the divisor used to turn summed ranks into a
//! progress ratio.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::Node;

/// Level names that sit inside a track but are flags, not reform steps.
pub const EXCLUDED_LEVELS: &[&str] = &["next_step_only", "administrative"];

/// Which reform category a level belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReformCategory {
    Political,
    Social,
}

impl ReformCategory {
    pub const ALL: [ReformCategory; 2] = [ReformCategory::Political, ReformCategory::Social];

    /// Map a top-level section key to its category. Other sections are ignored.
    pub fn from_section(key: &str) -> Option<Self> {
        match key {
            "political_reforms" => Some(Self::Political),
            "social_reforms" => Some(Self::Social),
            _ => None,
        }
    }

    pub fn section(&self) -> &'static str {
        match self {
            Self::Political => "political_reforms",
            Self::Social => "social_reforms",
        }
    }
}

impl fmt::Display for ReformCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Political => write!(f, "political"),
            Self::Social => write!(f, "social"),
        }
    }
}

/// How the per-category total is derived from the parsed tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalsMode {
    /// Total is (ranked levels in the last parsed track) - 1. Each track
    /// overwrites the previous one.
    #[default]
    LastTrack,
    /// Total is the sum of (ranked levels - 1) over every track.
    Summed,
}

impl TotalsMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastTrack => "last_track",
            Self::Summed => "summed",
        }
    }
}

impl fmt::Display for TotalsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TotalsMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "last_track" => Ok(Self::LastTrack),
            "summed" => Ok(Self::Summed),
            other => Err(format!(
                "unknown totals mode '{}' (expected last_track or summed)",
                other
            )),
        }
    }
}

/// A ranked reform step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReformLevel {
    pub name: String,
    pub category: ReformCategory,
    pub track: String,
    /// Zero-based position among the ranked levels of its track
    pub rank: u32,
}

/// Ranked reform levels for both categories.
#[derive(Debug, Clone, Default)]
pub struct ReformCatalog {
    political_ranks: HashMap<String, u32>,
    social_ranks: HashMap<String, u32>,
    political_tracks: Vec<String>,
    social_tracks: Vec<String>,
    levels: Vec<ReformLevel>,
    total_political_rank: i32,
    total_social_rank: i32,
    mode: TotalsMode,
}

impl ReformCatalog {
    /// Build with [`TotalsMode::LastTrack`].
    pub fn build(root: &Node) -> Self {
        Self::build_with(root, TotalsMode::LastTrack)
    }

    pub fn build_with(root: &Node, mode: TotalsMode) -> Self {
        let mut catalog = Self {
            mode,
            ..Self::default()
        };

        for section in root.children() {
            let Some(category) = ReformCategory::from_section(section.key()) else {
                continue;
            };
            for track in section.children() {
                catalog.add_track(category, track);
            }
        }

        info!(
            political_tracks = catalog.political_tracks.len(),
            social_tracks = catalog.social_tracks.len(),
            total_political_rank = catalog.total_political_rank,
            total_social_rank = catalog.total_social_rank,
            mode = %mode,
            "Loaded reform catalog"
        );
        for category in ReformCategory::ALL {
            if catalog.total_rank(category) <= 0 {
                warn!(
                    category = %category,
                    total = catalog.total_rank(category),
                    "Reform total is not positive, {} progress will not be finite",
                    category
                );
            }
        }

        catalog
    }

    fn add_track(&mut self, category: ReformCategory, track: &Node) {
        let track_name = track.key().to_string();
        let mut ranked: u32 = 0;

        for level in track.children() {
            if EXCLUDED_LEVELS.contains(&level.key()) {
                continue;
            }

            // first definition of a level name keeps its rank
            self.ranks_mut(category)
                .entry(level.key().to_string())
                .or_insert(ranked);
            self.levels.push(ReformLevel {
                name: level.key().to_string(),
                category,
                track: track_name.clone(),
                rank: ranked,
            });
            ranked += 1;
        }

        let track_total = ranked as i32 - 1;
        let mode = self.mode;
        let total = self.total_mut(category);
        *total = match mode {
            TotalsMode::LastTrack => track_total,
            TotalsMode::Summed => *total + track_total,
        };

        self.tracks_mut(category).push(track_name);
    }

    fn ranks_mut(&mut self, category: ReformCategory) -> &mut HashMap<String, u32> {
        match category {
            ReformCategory::Political => &mut self.political_ranks,
            ReformCategory::Social => &mut self.social_ranks,
        }
    }

    fn tracks_mut(&mut self, category: ReformCategory) -> &mut Vec<String> {
        match category {
            ReformCategory::Political => &mut self.political_tracks,
            ReformCategory::Social => &mut self.social_tracks,
        }
    }

    fn total_mut(&mut self, category: ReformCategory) -> &mut i32 {
        match category {
            ReformCategory::Political => &mut self.total_political_rank,
            ReformCategory::Social => &mut self.total_social_rank,
        }
    }

    /// Rank of a level in the given category's table.
    pub fn rank(&self, category: ReformCategory, level: &str) -> Option<u32> {
        match category {
            ReformCategory::Political => self.political_ranks.get(level).copied(),
            ReformCategory::Social => self.social_ranks.get(level).copied(),
        }
    }

    pub fn political_rank(&self, level: &str) -> Option<u32> {
        self.rank(ReformCategory::Political, level)
    }

    pub fn social_rank(&self, level: &str) -> Option<u32> {
        self.rank(ReformCategory::Social, level)
    }

    pub fn total_rank(&self, category: ReformCategory) -> i32 {
        match category {
            ReformCategory::Political => self.total_political_rank,
            ReformCategory::Social => self.total_social_rank,
        }
    }

    pub fn total_political_rank(&self) -> i32 {
        self.total_political_rank
    }

    pub fn total_social_rank(&self) -> i32 {
        self.total_social_rank
    }

    /// Track names of a category in declaration order.
    pub fn tracks(&self, category: ReformCategory) -> &[String] {
        match category {
            ReformCategory::Political => &self.political_tracks,
            ReformCategory::Social => &self.social_tracks,
        }
    }

    /// Ranked levels of one track, in rank order.
    pub fn levels_in_track<'a>(
        &'a self,
        category: ReformCategory,
        track: &'a str,
    ) -> impl Iterator<Item = &'a ReformLevel> + 'a {
        self.levels
            .iter()
            .filter(move |l| l.category == category && l.track == track)
    }

    pub fn mode(&self) -> TotalsMode {
        self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
