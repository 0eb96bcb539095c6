//! Weighted fuzzy search over a snapshot of catalog tools.
//!
//! Every indexed field is matched in two passes:
//!
//! 1. [`SkimMatcherV2`] finds the query as an in-order subsequence. The chars
//!    it skips inside the matched span count as edits.
//! 2. When that fails or skips too much, an approximate substring alignment
//!    catches substitution typos (`"ravit"` for `"revit"`), which a
//!    subsequence matcher cannot express.
//!
//! A field hit is kept when it needs at most `floor(threshold * query_len)`
//! edits and scores `weight * (1 - edits / query_len) * proximity`, where
//! `proximity` falls linearly from 1.0 at the start of the field to 0.5 at
//! [`LOCATION_DISTANCE`] chars in. A tool ranks by its best field.

use std::cmp::Ordering;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::domain::entities::Tool;

/// Fraction of the query that may deviate from the matched text.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Maximum number of hits returned by [`FuzzySearchIndex::search`].
pub const MAX_RESULTS: usize = 10;

/// Longer queries are cut to this many chars before matching.
pub const MAX_QUERY_CHARS: usize = 64;

/// Offset at which a match has lost half of its positional score.
pub const LOCATION_DISTANCE: usize = 100;

/// Searchable tool fields and their relative weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Tagline,
    Description,
    Tags,
    Category,
}

impl SearchField {
    pub fn weight(&self) -> f64 {
        match self {
            Self::Name => 3.0,
            Self::Tagline => 2.0,
            Self::Description => 1.0,
            Self::Tags => 1.5,
            Self::Category => 1.0,
        }
    }
}

/// A ranked search hit borrowing from the index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub tool: &'a Tool,
    pub score: f64,
    pub field: SearchField,
}

/// Lowercased field text, kept both as a string for the skim matcher and as
/// chars for the alignment pass.
struct IndexedField {
    field: SearchField,
    text: String,
    chars: Vec<char>,
}

/// Where and how closely a query matched one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Alignment {
    pub edits: usize,
    /// Char offset of the first matched char.
    pub start: usize,
}

/// Lowercased, trimmed query cut to [`MAX_QUERY_CHARS`].
pub fn normalize_query(query: &str) -> String {
    query
        .trim()
        .chars()
        .take(MAX_QUERY_CHARS)
        .collect::<String>()
        .to_lowercase()
}

/// Immutable search index built from one tool collection.
///
/// The index owns its snapshot; rebuild it when the catalog changes.
pub struct FuzzySearchIndex {
    tools: Vec<Tool>,
    fields: Vec<Vec<IndexedField>>,
    matcher: SkimMatcherV2,
    threshold: f64,
    limit: usize,
}

impl FuzzySearchIndex {
    /// Builds the index with the default threshold and result cap.
    pub fn build(tools: Vec<Tool>) -> Self {
        let fields = tools.iter().map(index_tool).collect();

        Self {
            tools,
            fields,
            matcher: SkimMatcherV2::default().ignore_case(),
            threshold: DEFAULT_THRESHOLD,
            limit: MAX_RESULTS,
        }
    }

    /// Overrides the fuzziness threshold, clamped to `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Overrides the result cap (at least 1).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Returns the best matches for `query`, best first.
    ///
    /// Blank queries mean "no active search" and return nothing. Equal scores
    /// keep collection order.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'_>> {
        let query = normalize_query(query);
        if query.is_empty() {
            return Vec::new();
        }
        let pattern: Vec<char> = query.chars().collect();
        let max_edits = (self.threshold * pattern.len() as f64).floor() as usize;

        let mut hits: Vec<SearchHit<'_>> = self
            .tools
            .iter()
            .zip(&self.fields)
            .filter_map(|(tool, fields)| {
                self.best_field(&query, &pattern, fields, max_edits)
                    .map(|(field, score)| SearchHit { tool, score, field })
            })
            .collect();

        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        hits.truncate(self.limit);
        hits
    }

    /// Best scoring field of one tool, if any field is within `max_edits`.
    fn best_field(
        &self,
        query: &str,
        pattern: &[char],
        fields: &[IndexedField],
        max_edits: usize,
    ) -> Option<(SearchField, f64)> {
        let len = pattern.len() as f64;

        fields
            .iter()
            .filter_map(|f| {
                self.align(query, pattern, f, max_edits).map(|alignment| {
                    let quality = 1.0 - alignment.edits as f64 / len;
                    (f.field, f.field.weight() * quality * proximity(alignment.start))
                })
            })
            .fold(None, |best: Option<(SearchField, f64)>, candidate| match best {
                Some((_, score)) if score >= candidate.1 => best,
                _ => Some(candidate),
            })
    }

    fn align(
        &self,
        query: &str,
        pattern: &[char],
        field: &IndexedField,
        max_edits: usize,
    ) -> Option<Alignment> {
        if let Some(alignment) = self.subsequence_alignment(query, pattern.len(), field)
            && alignment.edits <= max_edits
        {
            return Some(alignment);
        }
        substring_alignment(pattern, &field.chars, max_edits)
    }

    /// Skim subsequence match; skipped chars inside the span are edits.
    fn subsequence_alignment(
        &self,
        query: &str,
        pattern_len: usize,
        field: &IndexedField,
    ) -> Option<Alignment> {
        let (_, indices) = self.matcher.fuzzy_indices(&field.text, query)?;
        let (&first, &last) = (indices.first()?, indices.last()?);
        let span = last - first + 1;

        Some(Alignment {
            edits: span.saturating_sub(pattern_len),
            start: first,
        })
    }
}

/// 1.0 at offset 0, falling to 0.5 at [`LOCATION_DISTANCE`] and beyond.
fn proximity(start: usize) -> f64 {
    1.0 - 0.5 * start.min(LOCATION_DISTANCE) as f64 / LOCATION_DISTANCE as f64
}

fn index_tool(tool: &Tool) -> Vec<IndexedField> {
    let mut fields = vec![indexed(SearchField::Name, &tool.name)];

    if let Some(tagline) = tool.tagline.as_deref() {
        fields.push(indexed(SearchField::Tagline, tagline));
    }
    fields.push(indexed(SearchField::Description, &tool.description));
    fields.extend(tool.tags.iter().map(|tag| indexed(SearchField::Tags, tag)));
    fields.push(indexed(SearchField::Category, &tool.category));

    fields.retain(|f| !f.chars.is_empty());
    fields
}

fn indexed(field: SearchField, text: &str) -> IndexedField {
    let text = text.to_lowercase();
    let chars = text.chars().collect();
    IndexedField { field, text, chars }
}

/// Minimum edit distance between `pattern` and any substring of `text`.
///
/// Semi-global alignment: the text may be entered and left at any column for
/// free. Returns `None` when every alignment needs more than `max_edits`.
/// `start` is estimated from where the best alignment ends.
pub(crate) fn substring_alignment(
    pattern: &[char],
    text: &[char],
    max_edits: usize,
) -> Option<Alignment> {
    let m = pattern.len();
    if m == 0 {
        return Some(Alignment { edits: 0, start: 0 });
    }

    // prev[i] = cost of aligning pattern[..i] ending at the previous text column.
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];
    let mut best = prev[m];
    let mut best_end = 0;

    for (column, &tc) in text.iter().enumerate() {
        curr[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            let skip_text = prev[i] + 1;
            let skip_pattern = curr[i - 1] + 1;
            curr[i] = substitution.min(skip_text).min(skip_pattern);
        }
        if curr[m] < best {
            best = curr[m];
            best_end = column + 1;
        }
        if best == 0 {
            break;
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best <= max_edits).then(|| Alignment {
        edits: best,
        start: best_end.saturating_sub(m),
    })
}
