//! Catalog domain module.
//!
//! Products, their categorical tags and the immutable catalog store the
//! storefront filters over. Pure data and validation (no IO).

pub mod catalog;
pub mod facets;
pub mod product;
pub mod seed;

pub use catalog::{Catalog, CatalogBuilder};
pub use facets::{Facets, PriceBounds};
pub use product::{Era, Material, NewProduct, Product, Size, Style};
pub use seed::archive_catalog;
