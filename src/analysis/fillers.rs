use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed set of filler categories. Every detected filler maps to exactly
/// one category; tokens outside the lexicon are not counted as fillers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerCategory {
    DiscourseMarker,
    Intensifier,
    Repetition,
    Stalling,
}

impl FillerCategory {
    /// Returns the canonical string value surfaced in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            FillerCategory::DiscourseMarker => "discourse_marker",
            FillerCategory::Intensifier => "intensifier",
            FillerCategory::Repetition => "repetition",
            FillerCategory::Stalling => "stalling",
        }
    }
}

/// A single filler detected in a transcript. `position` is the index of the
/// first token of the match; positions are unique within one transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerOccurrence {
    pub surface: String,
    pub category: FillerCategory,
    pub position: usize,
}

/// Per-category filler counters. The category sum and the total are the
/// same value by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub discourse_markers: usize,
    pub intensifiers: usize,
    pub repetitions: usize,
    pub stalling: usize,
}

impl CategoryCounts {
    pub fn add(&mut self, category: FillerCategory) {
        match category {
            FillerCategory::DiscourseMarker => self.discourse_markers += 1,
            FillerCategory::Intensifier => self.intensifiers += 1,
            FillerCategory::Repetition => self.repetitions += 1,
            FillerCategory::Stalling => self.stalling += 1,
        }
    }

    pub fn count(&self, category: FillerCategory) -> usize {
        match category {
            FillerCategory::DiscourseMarker => self.discourse_markers,
            FillerCategory::Intensifier => self.intensifiers,
            FillerCategory::Repetition => self.repetitions,
            FillerCategory::Stalling => self.stalling,
        }
    }

    pub fn merge(&mut self, other: &CategoryCounts) {
        self.discourse_markers += other.discourse_markers;
        self.intensifiers += other.intensifiers;
        self.repetitions += other.repetitions;
        self.stalling += other.stalling;
    }

    pub fn total(&self) -> usize {
        self.discourse_markers + self.intensifiers + self.repetitions + self.stalling
    }

    /// Category/count pairs in declaration order, for breakdown folds.
    pub fn entries(&self) -> [(FillerCategory, usize); 4] {
        [
            (FillerCategory::DiscourseMarker, self.discourse_markers),
            (FillerCategory::Intensifier, self.intensifiers),
            (FillerCategory::Repetition, self.repetitions),
            (FillerCategory::Stalling, self.stalling),
        ]
    }
}

/// Result of scanning one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerAnalysis {
    pub word_count: usize,
    /// Occurrences ordered by token position.
    pub occurrences: Vec<FillerOccurrence>,
    pub counts: CategoryCounts,
    pub total_fillers: usize,
    /// Fillers per word; 0 for an empty transcript.
    pub filler_ratio: f64,
    /// Occurrence count per matched surface form.
    pub surface_tally: BTreeMap<String, usize>,
}

const DISCOURSE_MARKERS: &[&str] = &[
    "like", "you know", "i mean", "you see", "right", "okay", "so", "well", "now", "then",
    "anyway", "anyhow",
];

const INTENSIFIERS: &[&str] = &[
    "literally",
    "actually",
    "really",
    "totally",
    "absolutely",
    "definitely",
    "basically",
    "essentially",
];

const STALLING: &[&str] = &[
    "uh",
    "um",
    "er",
    "ah",
    "eh",
    "mm",
    "hmm",
    "sort of",
    "kind of",
    "pretty much",
    "more or less",
];

/// Repeated tokens shorter than this never count as Repetition fillers, so
/// stutters over short function words ("it it") are left alone.
const MIN_REPEAT_TOKEN_LEN: usize = 3;

#[derive(Debug, Clone)]
struct LexiconEntry {
    tokens: Vec<String>,
    category: FillerCategory,
}

/// Ordered, longest-match-first phrase table mapping trigger words and
/// short fixed phrases to their category.
#[derive(Debug, Clone)]
pub struct FillerLexicon {
    entries: Vec<LexiconEntry>,
}

impl Default for FillerLexicon {
    fn default() -> Self {
        let mut entries = Vec::new();
        for (table, category) in [
            (DISCOURSE_MARKERS, FillerCategory::DiscourseMarker),
            (INTENSIFIERS, FillerCategory::Intensifier),
            (STALLING, FillerCategory::Stalling),
        ] {
            for phrase in table {
                entries.push(LexiconEntry {
                    tokens: phrase.split_whitespace().map(str::to_string).collect(),
                    category,
                });
            }
        }
        // Longest phrases first so a phrase match wins over the single words
        // it subsumes.
        entries.sort_by(|a, b| b.tokens.len().cmp(&a.tokens.len()));
        Self { entries }
    }
}

impl FillerLexicon {
    /// Scans a transcript and classifies every filler occurrence.
    ///
    /// Matching is case-insensitive over word-boundary tokens, with phrase
    /// matches taking priority over the single words they contain. A run of
    /// identical consecutive tokens that is not itself a lexicon trigger
    /// counts as exactly one Repetition occurrence, anchored at the run's
    /// first token, regardless of the run length.
    pub fn classify(&self, transcript: &str) -> FillerAnalysis {
        let tokens = tokenize(transcript);
        let mut occurrences = Vec::new();
        let mut counts = CategoryCounts::default();

        let mut index = 0;
        while index < tokens.len() {
            if let Some(entry) = self.match_at(&tokens, index) {
                occurrences.push(FillerOccurrence {
                    surface: entry.tokens.join(" "),
                    category: entry.category,
                    position: index,
                });
                counts.add(entry.category);
                index += entry.tokens.len();
                continue;
            }

            if let Some(run_end) = self.repetition_run(&tokens, index) {
                occurrences.push(FillerOccurrence {
                    surface: tokens[index].clone(),
                    category: FillerCategory::Repetition,
                    position: index,
                });
                counts.add(FillerCategory::Repetition);
                index = run_end;
                continue;
            }

            index += 1;
        }

        let word_count = tokens.len();
        let total_fillers = counts.total();
        let filler_ratio = if word_count > 0 {
            total_fillers as f64 / word_count as f64
        } else {
            0.0
        };

        let mut surface_tally = BTreeMap::new();
        for occurrence in &occurrences {
            *surface_tally.entry(occurrence.surface.clone()).or_insert(0) += 1;
        }

        FillerAnalysis {
            word_count,
            occurrences,
            counts,
            total_fillers,
            filler_ratio,
            surface_tally,
        }
    }

    fn match_at(&self, tokens: &[String], index: usize) -> Option<&LexiconEntry> {
        self.entries.iter().find(|entry| {
            tokens.len() - index >= entry.tokens.len()
                && entry
                    .tokens
                    .iter()
                    .zip(&tokens[index..])
                    .all(|(expected, actual)| expected == actual)
        })
    }

    fn is_single_trigger(&self, token: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.tokens.len() == 1 && entry.tokens[0] == token)
    }

    /// Returns the exclusive end index of a repetition run starting at
    /// `index`, or None if the token does not immediately repeat.
    fn repetition_run(&self, tokens: &[String], index: usize) -> Option<usize> {
        let token = &tokens[index];
        if token.len() < MIN_REPEAT_TOKEN_LEN || self.is_single_trigger(token) {
            return None;
        }

        let mut run_end = index + 1;
        while run_end < tokens.len() && &tokens[run_end] == token {
            run_end += 1;
        }

        if run_end > index + 1 {
            Some(run_end)
        } else {
            None
        }
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
