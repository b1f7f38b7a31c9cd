//! The catalog store: an ordered, read-only list of products.

use std::collections::HashSet;

use archiv_core::{DomainError, DomainResult, ProductId};

use crate::facets::Facets;
use crate::product::{NewProduct, Product};

/// Immutable, ordered product list with unique ids.
///
/// Order is the display order; filtering preserves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from already validated products.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id_typed()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id_typed()
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Filter options offered for this catalog.
    pub fn facets(&self) -> Facets {
        Facets::of(self)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// Append-only catalog assembly.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    products: Vec<Product>,
}

impl CatalogBuilder {
    /// Validate and append a product.
    pub fn product(mut self, fields: NewProduct) -> DomainResult<Self> {
        self.products.push(Product::new(fields)?);
        Ok(self)
    }

    pub fn build(self) -> DomainResult<Catalog> {
        Catalog::new(self.products)
    }
}
