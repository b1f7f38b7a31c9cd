//! Storefront session domain module.
//!
//! Everything a shopper can change on the single-page storefront (navigation,
//! filters, cart) as deterministic domain logic, plus the derived values a
//! renderer reads back (filtered products, cart total).

pub mod cart;
pub mod filter;
pub mod money;
pub mod section;
pub mod session;

pub use cart::{Cart, CartLine};
pub use filter::{FilterCriteria, PriceRange, Selection, SizeSelection, filter_products};
pub use money::Rubles;
pub use section::Section;
pub use session::{
    CartCleared, FiltersReset, ItemAdded, LineRemoved, PriceRangeChanged, ProductRemoved,
    SectionSelected, SelectionToggled, SizeSelected, StorefrontCommand, StorefrontEvent,
    StorefrontSession, StorefrontView, Toggle,
};
