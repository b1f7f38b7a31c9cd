//! Filter options derived from a catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::product::{Era, Material, Size, Style};

/// Limits of the price slider, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: u64,
    pub max: u64,
    /// Slider granularity.
    pub step: u64,
}

impl PriceBounds {
    pub const DEFAULT: PriceBounds = PriceBounds {
        min: 0,
        max: 30_000,
        step: 1_000,
    };

    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Values a shopper can pick from, per filter dimension.
///
/// Eras are listed chronologically; styles and materials in the order they
/// first appear in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    pub eras: Vec<Era>,
    pub styles: Vec<Style>,
    pub materials: Vec<Material>,
    pub sizes: Vec<Size>,
    pub price: PriceBounds,
}

impl Facets {
    pub fn of(catalog: &Catalog) -> Self {
        let eras: BTreeSet<Era> = catalog.iter().map(|p| p.era().clone()).collect();

        let mut styles: Vec<Style> = Vec::new();
        let mut materials: Vec<Material> = Vec::new();
        for product in catalog {
            if !styles.contains(product.style()) {
                styles.push(product.style().clone());
            }
            if !materials.contains(product.material()) {
                materials.push(product.material().clone());
            }
        }

        Self {
            eras: eras.into_iter().collect(),
            styles,
            materials,
            sizes: Size::ALL.to_vec(),
            price: PriceBounds::DEFAULT,
        }
    }

    pub fn offers_era(&self, era: &Era) -> bool {
        self.eras.contains(era)
    }

    pub fn offers_style(&self, style: &Style) -> bool {
        self.styles.contains(style)
    }

    pub fn offers_material(&self, material: &Material) -> bool {
        self.materials.contains(material)
    }
}
