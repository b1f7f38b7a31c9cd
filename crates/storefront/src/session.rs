use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use archiv_catalog::{Catalog, Era, Facets, Material, Product, Style};
use archiv_core::{Aggregate, AggregateRoot, DomainError, LineItemId, ProductId, SessionId};
use archiv_events::Event;

use crate::cart::{Cart, CartLine};
use crate::filter::{FilterCriteria, PriceRange, SizeSelection, filter_products};
use crate::money::Rubles;
use crate::section::Section;

/// Value checked or unchecked in one of the multi-select filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "snake_case")]
pub enum Toggle {
    Era(Era),
    Style(Style),
    Material(Material),
}

impl core::fmt::Display for Toggle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Toggle::Era(era) => write!(f, "era {era}"),
            Toggle::Style(style) => write!(f, "style {style}"),
            Toggle::Material(material) => write!(f, "material {material}"),
        }
    }
}

/// Shopper actions. `occurred_at` defaults to "now" when a script omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StorefrontCommand {
    SelectSection {
        section: Section,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    SetPriceRange {
        range: PriceRange,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    ToggleEra {
        era: Era,
        checked: bool,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    ToggleStyle {
        style: Style,
        checked: bool,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    ToggleMaterial {
        material: Material,
        checked: bool,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    SelectSize {
        size: SizeSelection,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    ResetFilters {
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    AddToCart {
        product_id: ProductId,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    /// Removes every line of the product.
    RemoveFromCart {
        product_id: ProductId,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    /// Removes a single line.
    RemoveLine {
        line_id: LineItemId,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
    ClearCart {
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
}

impl StorefrontCommand {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StorefrontCommand::SelectSection { occurred_at, .. }
            | StorefrontCommand::SetPriceRange { occurred_at, .. }
            | StorefrontCommand::ToggleEra { occurred_at, .. }
            | StorefrontCommand::ToggleStyle { occurred_at, .. }
            | StorefrontCommand::ToggleMaterial { occurred_at, .. }
            | StorefrontCommand::SelectSize { occurred_at, .. }
            | StorefrontCommand::ResetFilters { occurred_at }
            | StorefrontCommand::AddToCart { occurred_at, .. }
            | StorefrontCommand::RemoveFromCart { occurred_at, .. }
            | StorefrontCommand::RemoveLine { occurred_at, .. }
            | StorefrontCommand::ClearCart { occurred_at } => *occurred_at,
        }
    }
}

/// Event: SectionSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSelected {
    pub from: Section,
    pub to: Section,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PriceRangeChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeChanged {
    pub range: PriceRange,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SelectionToggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionToggled {
    pub toggle: Toggle,
    pub checked: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SizeSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSelected {
    pub size: SizeSelection,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FiltersReset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiltersReset {
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub line: CartLine,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductRemoved (all lines of one product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRemoved {
    pub product_id: ProductId,
    pub lines_removed: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub line_id: LineItemId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub lines_removed: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorefrontEvent {
    SectionSelected(SectionSelected),
    PriceRangeChanged(PriceRangeChanged),
    SelectionToggled(SelectionToggled),
    SizeSelected(SizeSelected),
    FiltersReset(FiltersReset),
    ItemAdded(ItemAdded),
    ProductRemoved(ProductRemoved),
    LineRemoved(LineRemoved),
    CartCleared(CartCleared),
}

impl Event for StorefrontEvent {
    fn event_type(&self) -> &'static str {
        match self {
            StorefrontEvent::SectionSelected(_) => "storefront.nav.section_selected",
            StorefrontEvent::PriceRangeChanged(_) => "storefront.filter.price_range_changed",
            StorefrontEvent::SelectionToggled(_) => "storefront.filter.selection_toggled",
            StorefrontEvent::SizeSelected(_) => "storefront.filter.size_selected",
            StorefrontEvent::FiltersReset(_) => "storefront.filter.reset",
            StorefrontEvent::ItemAdded(_) => "storefront.cart.item_added",
            StorefrontEvent::ProductRemoved(_) => "storefront.cart.product_removed",
            StorefrontEvent::LineRemoved(_) => "storefront.cart.line_removed",
            StorefrontEvent::CartCleared(_) => "storefront.cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            StorefrontEvent::SectionSelected(e) => e.occurred_at,
            StorefrontEvent::PriceRangeChanged(e) => e.occurred_at,
            StorefrontEvent::SelectionToggled(e) => e.occurred_at,
            StorefrontEvent::SizeSelected(e) => e.occurred_at,
            StorefrontEvent::FiltersReset(e) => e.occurred_at,
            StorefrontEvent::ItemAdded(e) => e.occurred_at,
            StorefrontEvent::ProductRemoved(e) => e.occurred_at,
            StorefrontEvent::LineRemoved(e) => e.occurred_at,
            StorefrontEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: one shopper's view state.
///
/// Holds the active section, filter criteria and cart over a shared, read-only
/// catalog. Derived values (filtered products, totals) are computed on read.
#[derive(Debug, Clone)]
pub struct StorefrontSession {
    id: SessionId,
    catalog: Arc<Catalog>,
    facets: Facets,
    section: Section,
    criteria: FilterCriteria,
    cart: Cart,
    version: u64,
}

impl StorefrontSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_id(SessionId::new(), catalog)
    }

    pub fn with_id(id: SessionId, catalog: Arc<Catalog>) -> Self {
        let facets = catalog.facets();
        Self {
            id,
            catalog,
            facets,
            section: Section::default(),
            criteria: FilterCriteria::default(),
            cart: Cart::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn active_section(&self) -> Section {
        self.section
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Catalog products passing the current filters, in catalog order.
    pub fn filtered_products(&self) -> Vec<&Product> {
        filter_products(&self.catalog, &self.criteria)
    }

    /// "Найдено товаров" counter; zero is a normal outcome.
    pub fn result_count(&self) -> usize {
        self.catalog.iter().filter(|p| self.criteria.matches(p)).count()
    }

    pub fn cart_total(&self) -> Rubles {
        Rubles(self.cart.total())
    }

    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    /// Serializable copy of everything a renderer needs.
    pub fn snapshot(&self) -> StorefrontView {
        StorefrontView {
            session_id: self.id,
            version: self.version,
            section: self.section,
            criteria: self.criteria.clone(),
            result_count: self.result_count(),
            products: self.filtered_products().into_iter().cloned().collect(),
            cart: self.cart.lines().to_vec(),
            cart_count: self.cart_count(),
            cart_total: self.cart_total(),
            cart_total_display: self.cart_total().to_string(),
        }
    }
}

/// Derived, read-only view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontView {
    pub session_id: SessionId,
    pub version: u64,
    pub section: Section,
    pub criteria: FilterCriteria,
    pub result_count: usize,
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub cart_count: usize,
    pub cart_total: Rubles,
    pub cart_total_display: String,
}

impl AggregateRoot for StorefrontSession {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for StorefrontSession {
    type Command = StorefrontCommand;
    type Event = StorefrontEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            StorefrontEvent::SectionSelected(e) => {
                self.section = e.to;
            }
            StorefrontEvent::PriceRangeChanged(e) => {
                self.criteria.price_range = e.range;
            }
            StorefrontEvent::SelectionToggled(e) => match &e.toggle {
                Toggle::Era(era) => {
                    self.criteria.eras.set(era.clone(), e.checked);
                }
                Toggle::Style(style) => {
                    self.criteria.styles.set(style.clone(), e.checked);
                }
                Toggle::Material(material) => {
                    self.criteria.materials.set(material.clone(), e.checked);
                }
            },
            StorefrontEvent::SizeSelected(e) => {
                self.criteria.size = e.size;
            }
            StorefrontEvent::FiltersReset(_) => {
                self.criteria = FilterCriteria::default();
            }
            StorefrontEvent::ItemAdded(e) => {
                self.cart.push_line(e.line.clone());
            }
            StorefrontEvent::ProductRemoved(e) => {
                self.cart.remove(e.product_id);
            }
            StorefrontEvent::LineRemoved(e) => {
                self.cart.remove_line(e.line_id);
            }
            StorefrontEvent::CartCleared(_) => {
                self.cart.clear();
            }
        }

        self.version += 1;

        tracing::debug!(
            session = %self.id,
            event_type = event.event_type(),
            version = self.version,
            cart_count = self.cart.len(),
            "applied storefront event"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let at = command.occurred_at();
        match command {
            StorefrontCommand::SelectSection { section, .. } => {
                Ok(vec![StorefrontEvent::SectionSelected(SectionSelected {
                    from: self.section,
                    to: *section,
                    occurred_at: at,
                })])
            }
            StorefrontCommand::SetPriceRange { range, .. } => {
                let bounds = self.facets.price;
                if !range.fits(bounds) {
                    return Err(DomainError::validation(format!(
                        "price range [{}, {}] outside [{}, {}]",
                        range.min(),
                        range.max(),
                        bounds.min,
                        bounds.max
                    )));
                }
                if *range == self.criteria.price_range {
                    return Ok(vec![]);
                }
                Ok(vec![StorefrontEvent::PriceRangeChanged(PriceRangeChanged {
                    range: *range,
                    occurred_at: at,
                })])
            }
            StorefrontCommand::ToggleEra { era, checked, .. } => {
                self.handle_toggle(Toggle::Era(era.clone()), *checked, at)
            }
            StorefrontCommand::ToggleStyle { style, checked, .. } => {
                self.handle_toggle(Toggle::Style(style.clone()), *checked, at)
            }
            StorefrontCommand::ToggleMaterial {
                material, checked, ..
            } => self.handle_toggle(Toggle::Material(material.clone()), *checked, at),
            StorefrontCommand::SelectSize { size, .. } => {
                if *size == self.criteria.size {
                    return Ok(vec![]);
                }
                Ok(vec![StorefrontEvent::SizeSelected(SizeSelected {
                    size: *size,
                    occurred_at: at,
                })])
            }
            StorefrontCommand::ResetFilters { .. } => {
                if self.criteria.is_unconstrained() {
                    return Ok(vec![]);
                }
                Ok(vec![StorefrontEvent::FiltersReset(FiltersReset {
                    occurred_at: at,
                })])
            }
            StorefrontCommand::AddToCart { product_id, .. } => {
                self.handle_add_to_cart(*product_id, at)
            }
            StorefrontCommand::RemoveFromCart { product_id, .. } => {
                let lines_removed = self.cart.count_of(*product_id);
                if lines_removed == 0 {
                    return Ok(vec![]);
                }
                Ok(vec![StorefrontEvent::ProductRemoved(ProductRemoved {
                    product_id: *product_id,
                    lines_removed,
                    occurred_at: at,
                })])
            }
            StorefrontCommand::RemoveLine { line_id, .. } => {
                let line = self
                    .cart
                    .line(*line_id)
                    .ok_or_else(|| DomainError::not_found(format!("cart line {line_id}")))?;
                Ok(vec![StorefrontEvent::LineRemoved(LineRemoved {
                    line_id: *line_id,
                    product_id: line.product_id(),
                    occurred_at: at,
                })])
            }
            StorefrontCommand::ClearCart { .. } => {
                if self.cart.is_empty() {
                    return Ok(vec![]);
                }
                Ok(vec![StorefrontEvent::CartCleared(CartCleared {
                    lines_removed: self.cart.len(),
                    occurred_at: at,
                })])
            }
        }
    }
}

impl StorefrontSession {
    fn handle_toggle(
        &self,
        toggle: Toggle,
        checked: bool,
        at: DateTime<Utc>,
    ) -> Result<Vec<StorefrontEvent>, DomainError> {
        let (offered, currently_checked) = match &toggle {
            Toggle::Era(era) => (
                self.facets.offers_era(era),
                self.criteria.eras.is_checked(era),
            ),
            Toggle::Style(style) => (
                self.facets.offers_style(style),
                self.criteria.styles.is_checked(style),
            ),
            Toggle::Material(material) => (
                self.facets.offers_material(material),
                self.criteria.materials.is_checked(material),
            ),
        };

        if !offered {
            return Err(DomainError::validation(format!(
                "{toggle} is not a filter option of this catalog"
            )));
        }

        if currently_checked == checked {
            return Ok(vec![]);
        }

        Ok(vec![StorefrontEvent::SelectionToggled(SelectionToggled {
            toggle,
            checked,
            occurred_at: at,
        })])
    }

    fn handle_add_to_cart(
        &self,
        product_id: ProductId,
        at: DateTime<Utc>,
    ) -> Result<Vec<StorefrontEvent>, DomainError> {
        let product = self
            .catalog
            .get(product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {product_id}")))?;

        Ok(vec![StorefrontEvent::ItemAdded(ItemAdded {
            line: CartLine {
                line_id: self.cart.next_line_id(),
                product: product.clone(),
            },
            occurred_at: at,
        })])
    }
}
