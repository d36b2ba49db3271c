use crate::record::ProductRecord;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// Category
///
/// Coarse audience segmentation. `All` disables the category predicate.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum Category {
    #[default]
    All,
    Kid,
    Man,
    Woman,
    Baby,
}

impl Category {
    /// Audience letter stored in the `sex` field; `None` for `All`.
    #[must_use]
    pub const fn code(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Kid => Some("K"),
            Self::Man => Some("M"),
            Self::Woman => Some("W"),
            Self::Baby => Some("B"),
        }
    }

    /// Category implied by a raw audience code, `None` when empty or
    /// unrecognized.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            c if c.eq_ignore_ascii_case("K") => Some(Self::Kid),
            c if c.eq_ignore_ascii_case("M") => Some(Self::Man),
            c if c.eq_ignore_ascii_case("W") => Some(Self::Woman),
            c if c.eq_ignore_ascii_case("B") => Some(Self::Baby),
            _ => None,
        }
    }

    /// Free-text synonyms tolerated in uncurated catalog entries.
    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::All => &[],
            Self::Kid => &["kid", "crian"],
            Self::Man => &["men"],
            Self::Woman => &["women", "mulher"],
            Self::Baby => &["bebe", "baby"],
        }
    }

    /// Code-or-keyword match: a record belongs to the category when its
    /// audience code agrees, or when its name/description mentions one of
    /// the category keywords. The OR is deliberate so both curated and
    /// keyword-only entries surface.
    #[must_use]
    pub fn matches(self, record: &ProductRecord) -> bool {
        let Some(code) = self.code() else {
            return true;
        };

        if record.sex.trim().eq_ignore_ascii_case(code) {
            return true;
        }

        let name = record.name.to_lowercase();
        let description = record.description.to_lowercase();

        self.keywords()
            .iter()
            .any(|keyword| name.contains(keyword) || description.contains(keyword))
    }
}

///
/// SortMode
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum SortMode {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    SizeAsc,
    SizeDesc,
}

///
/// ViewQuery
///
/// Filter and ordering for one catalog view. The engine recomputes the
/// whole view on every call; catalogs are dozens to low-hundreds of rows
/// and nothing here is incremental.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ViewQuery {
    pub search: String,
    pub category: Category,
    pub sort: SortMode,
}

impl ViewQuery {
    /// Construct an empty view query (no filter, default order).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// CONSTRUCTORS
    ///

    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    /// Derive the filtered, ordered view. Copies the matching records and
    /// never mutates the input sequence.
    ///
    /// Text search applies to `name` only; the description participates in
    /// category keyword matching but not in free-text search.
    #[must_use]
    pub fn apply(&self, records: &[ProductRecord]) -> Vec<ProductRecord> {
        let query = self.search.to_lowercase();

        let mut out: Vec<ProductRecord> = records
            .iter()
            .filter(|record| self.category.matches(record))
            .filter(|record| query.is_empty() || record.name.to_lowercase().contains(&query))
            .cloned()
            .collect();

        sort_records(&mut out, self.sort);
        out
    }
}

///
/// Sorting
///
/// Every order is two-tier: records carrying the sort attribute strictly
/// precede records missing it, and ties inside a tier break by name
/// (ascending, byte order). The underlying sort is stable, so fully-equal
/// keys keep their input order.
///

pub(crate) fn sort_records(records: &mut [ProductRecord], mode: SortMode) {
    match mode {
        SortMode::Default | SortMode::PriceAsc => {
            records.sort_by(|a, b| two_tier(a.price.as_ref(), b.price.as_ref(), false).then_with(|| a.name.cmp(&b.name)));
        }
        SortMode::PriceDesc => {
            records.sort_by(|a, b| two_tier(a.price.as_ref(), b.price.as_ref(), true).then_with(|| a.name.cmp(&b.name)));
        }
        SortMode::SizeAsc | SortMode::SizeDesc => {
            let unknown = unknown_sizes(records);
            let descending = mode == SortMode::SizeDesc;

            records.sort_by(|a, b| {
                let left = size_rank(&a.size, &unknown);
                let right = size_rank(&b.size, &unknown);
                two_tier(left.as_ref(), right.as_ref(), descending).then_with(|| a.name.cmp(&b.name))
            });
        }
    }
}

// Present-before-absent, then the requested direction within the present
// tier. Absent-vs-absent is equal so the name tie-break decides.
fn two_tier<K: Ord>(left: Option<&K>, right: Option<&K>, descending: bool) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => {
            let cmp = a.cmp(b);
            if descending { cmp.reverse() } else { cmp }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

///
/// Size Rank
///
/// Fixed rank table for conventional garment sizes; `XXL` and `2XL` are the
/// same rank. Unknown non-empty sizes rank above the table by first
/// occurrence in the input sequence, which keeps the order deterministic
/// across runs without hashing. An empty size means the attribute is
/// absent.
///

const SIZE_RANKS: [(&str, u32); 8] = [
    ("xxs", 0),
    ("xs", 1),
    ("s", 2),
    ("m", 3),
    ("l", 4),
    ("xl", 5),
    ("xxl", 6),
    ("2xl", 6),
];

// Rank band reserved for sizes outside the fixed table.
const UNKNOWN_SIZE_BASE: u32 = 7;

fn known_size_rank(folded: &str) -> Option<u32> {
    SIZE_RANKS
        .iter()
        .find(|(token, _)| *token == folded)
        .map(|(_, rank)| *rank)
}

fn size_rank(size: &str, unknown: &[String]) -> Option<u32> {
    let folded = size.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }

    known_size_rank(&folded).or_else(|| {
        unknown
            .iter()
            .position(|s| *s == folded)
            .map(|index| UNKNOWN_SIZE_BASE + index as u32)
    })
}

// Unknown size tokens in first-occurrence order over the input sequence.
fn unknown_sizes(records: &[ProductRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for record in records {
        let folded = record.size.trim().to_lowercase();
        if folded.is_empty() || known_size_rank(&folded).is_some() || seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
    }

    seen
}

///
/// TESTS
///
