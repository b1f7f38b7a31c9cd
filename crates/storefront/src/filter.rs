//! Catalog filtering: price range, era/style/material selections and size.
//!
//! A product is shown when it passes every dimension at once. The only rule
//! worth remembering: an empty selection admits everything (see
//! [`Selection::admits`]).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use archiv_catalog::{Catalog, Era, Material, PriceBounds, Product, Size, Style};
use archiv_core::{DomainError, DomainResult, ValueObject};

/// Closed price interval `[min, max]` inside the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceRange")]
pub struct PriceRange {
    min: u64,
    max: u64,
}

#[derive(Deserialize)]
struct RawPriceRange {
    min: u64,
    max: u64,
}

impl PriceRange {
    /// Range inside [`PriceBounds::DEFAULT`] with `min <= max`.
    pub fn new(min: u64, max: u64) -> DomainResult<Self> {
        if min > max {
            return Err(DomainError::validation(format!(
                "price range min {min} exceeds max {max}"
            )));
        }
        let bounds = PriceBounds::DEFAULT;
        if !bounds.contains(min) || !bounds.contains(max) {
            return Err(DomainError::validation(format!(
                "price range [{min}, {max}] outside [{}, {}]",
                bounds.min, bounds.max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    /// Inclusive on both ends.
    pub fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Both ends lie inside `bounds`.
    pub fn fits(&self, bounds: PriceBounds) -> bool {
        bounds.min <= self.min && self.max <= bounds.max
    }
}

/// The whole slider: every price passes.
impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PriceBounds::DEFAULT.min,
            max: PriceBounds::DEFAULT.max,
        }
    }
}

impl ValueObject for PriceRange {}

impl TryFrom<RawPriceRange> for PriceRange {
    type Error = DomainError;

    fn try_from(raw: RawPriceRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

/// Checked values of one multi-select filter (eras, styles or materials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de> + Ord"))]
pub struct Selection<T: Ord> {
    values: BTreeSet<T>,
}

impl<T: Ord> Selection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty selection admits every value; otherwise the value must be checked.
    pub fn admits(&self, value: &T) -> bool {
        self.values.is_empty() || self.values.contains(value)
    }

    /// Check or uncheck `value`. Returns whether the selection changed.
    pub fn set(&mut self, value: T, checked: bool) -> bool {
        if checked {
            self.values.insert(value)
        } else {
            self.values.remove(&value)
        }
    }

    pub fn is_checked(&self, value: &T) -> bool {
        self.values.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self {
            values: BTreeSet::new(),
        }
    }
}

impl<T: Ord> FromIterator<T> for Selection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: Ord + Clone + core::fmt::Debug> ValueObject for Selection<T> {}

/// Size picker state: everything, or exactly one size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SizeSelection {
    #[default]
    All,
    Only(Size),
}

impl SizeSelection {
    pub fn admits(&self, product: &Product) -> bool {
        match self {
            SizeSelection::All => true,
            SizeSelection::Only(size) => product.fits(*size),
        }
    }
}

impl core::fmt::Display for SizeSelection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SizeSelection::All => f.write_str("all"),
            SizeSelection::Only(size) => core::fmt::Display::fmt(size, f),
        }
    }
}

impl core::str::FromStr for SizeSelection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(SizeSelection::All);
        }
        Ok(SizeSelection::Only(s.parse()?))
    }
}

impl TryFrom<String> for SizeSelection {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SizeSelection> for String {
    fn from(value: SizeSelection) -> Self {
        value.to_string()
    }
}

/// Every active filter of a session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub price_range: PriceRange,
    pub eras: Selection<Era>,
    pub styles: Selection<Style>,
    pub materials: Selection<Material>,
    pub size: SizeSelection,
}

impl FilterCriteria {
    /// All five predicates, combined with AND.
    pub fn matches(&self, product: &Product) -> bool {
        self.price_range.contains(product.price())
            && self.eras.admits(product.era())
            && self.styles.admits(product.style())
            && self.materials.admits(product.material())
            && self.size.admits(product)
    }

    /// True when no filter narrows the catalog (the state a reset restores).
    pub fn is_unconstrained(&self) -> bool {
        self.price_range == PriceRange::default()
            && self.eras.is_empty()
            && self.styles.is_empty()
            && self.materials.is_empty()
            && self.size == SizeSelection::All
    }
}

/// Products passing `criteria`, in catalog order. May be empty.
pub fn filter_products<'a>(catalog: &'a Catalog, criteria: &FilterCriteria) -> Vec<&'a Product> {
    catalog.iter().filter(|p| criteria.matches(p)).collect()
}
