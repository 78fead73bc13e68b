//! The query engine: filter composition and stable sorting.
//!
//! A [`QuerySpec`] is the complete, immutable description of the
//! current filter/sort selection. Views never mutate it in place;
//! state transitions replace the whole value and re-apply it.
//!
//! The engine never raises for malformed records. Every stage degrades
//! each record to "exclude" (filters) or "sort last" (distance sort)
//! when data is missing or ill-typed. That tolerance is a deliberate
//! contract, asserted by the tests below.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::favorites::FavoriteSet;
use crate::geo::{self, Coordinates};
use crate::identity;
use crate::record::{Record, CATEGORY_ATTR, NAME_ATTR};

/// Sort order selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Distance from the query center. Degenerates to a no-op when no
    /// center is set.
    Distance,
    /// Lexical sort on a string-coerced attribute.
    Attribute(String),
}

impl SortKey {
    /// `"distance"` is a sentinel; anything else names an attribute.
    pub fn parse(raw: &str) -> SortKey {
        if raw == "distance" {
            SortKey::Distance
        } else {
            SortKey::Attribute(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Filter and sort configuration for one query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Case-insensitive substring match on the display name. Empty
    /// matches everything.
    pub search_text: String,
    /// Selected category values; empty means no categorical filter.
    pub categories: BTreeSet<String>,
    /// Only records present in the favorite set.
    pub favorites_only: bool,
    /// Reference point for the radius filter and distance sort.
    pub center: Option<Coordinates>,
    /// Radius in km; only active together with `center`.
    pub radius_km: Option<f64>,
    pub sort: Option<SortKey>,
    pub direction: SortDirection,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn with_center(mut self, center: Option<Coordinates>) -> Self {
        self.center = center;
        self
    }

    pub fn with_radius_km(mut self, radius_km: Option<f64>) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Apply the filters, then the sort, to a record collection.
    ///
    /// Filter stages run in a fixed order (text, category, radius,
    /// favorite); each strictly narrows the previous stage's output.
    /// The stages are independent predicates, so the order affects
    /// performance only. The sort is stable: ties keep their
    /// post-filter relative order, in both directions.
    pub fn apply<'a>(&self, records: &'a [Record], favorites: &FavoriteSet) -> Vec<&'a Record> {
        let needle = self.search_text.to_lowercase();
        let mut matched: Vec<&Record> = records
            .iter()
            .filter(|r| self.matches_search(&needle, r))
            .filter(|r| self.matches_categories(r))
            .filter(|r| self.matches_radius(r))
            .filter(|r| self.matches_favorite(r, favorites))
            .collect();
        self.sort_records(&mut matched);
        matched
    }

    fn matches_search(&self, needle: &str, record: &Record) -> bool {
        if needle.is_empty() {
            return true;
        }
        record
            .coerced_text(NAME_ATTR)
            .to_lowercase()
            .contains(needle)
    }

    fn matches_categories(&self, record: &Record) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        self.categories.contains(&record.coerced_text(CATEGORY_ATTR))
    }

    /// Active only when both center and radius are set. Records
    /// lacking numeric coordinates fail the filter; the boundary is
    /// inclusive.
    fn matches_radius(&self, record: &Record) -> bool {
        let (Some(center), Some(radius_km)) = (self.center, self.radius_km) else {
            return true;
        };
        match record.coords() {
            Some(coords) => geo::haversine_km(center, coords) <= radius_km,
            None => false,
        }
    }

    fn matches_favorite(&self, record: &Record, favorites: &FavoriteSet) -> bool {
        if !self.favorites_only {
            return true;
        }
        favorites.contains(&identity::record_key(record))
    }

    fn sort_records(&self, records: &mut [&Record]) {
        match &self.sort {
            Some(SortKey::Distance) => {
                // No center: distance sort degenerates to a no-op.
                let Some(center) = self.center else {
                    return;
                };
                records.sort_by(|a, b| {
                    let da = distance_or_infinity(center, a);
                    let db = distance_or_infinity(center, b);
                    self.direction
                        .apply(da.partial_cmp(&db).unwrap_or(Ordering::Equal))
                });
            }
            Some(SortKey::Attribute(attr)) => {
                records.sort_by(|a, b| {
                    self.direction
                        .apply(a.coerced_text(attr).cmp(&b.coerced_text(attr)))
                });
            }
            None => {}
        }
    }
}

/// Records without numeric coordinates sort as +infinity: always last
/// ascending, first descending.
fn distance_or_infinity(center: Coordinates, record: &Record) -> f64 {
    record
        .coords()
        .map(|coords| geo::haversine_km(center, coords))
        .unwrap_or(f64::INFINITY)
}
