//! Shopping cart: an ordered list of lines, duplicates allowed.

use serde::{Deserialize, Serialize};

use archiv_catalog::Product;
use archiv_core::{Entity, LineItemId, ProductId};

/// One entry of the cart. Adding the same product twice yields two lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub line_id: LineItemId,
    pub product: Product,
}

impl CartLine {
    pub fn product_id(&self) -> ProductId {
        self.product.id_typed()
    }

    pub fn price(&self) -> u64 {
        self.product.price()
    }
}

impl Entity for CartLine {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.line_id
    }
}

/// Session cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
    next_line_id: LineItemId,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next added line will get.
    pub fn next_line_id(&self) -> LineItemId {
        self.next_line_id
    }

    /// Append `product` at the end. Never fails, never merges.
    pub fn add(&mut self, product: Product) -> LineItemId {
        let line_id = self.next_line_id;
        self.push_line(CartLine { line_id, product });
        line_id
    }

    /// Append a line whose id was allocated beforehand (event replay).
    pub(crate) fn push_line(&mut self, line: CartLine) {
        if line.line_id >= self.next_line_id {
            self.next_line_id = line.line_id.next();
        }
        self.lines.push(line);
    }

    /// Remove every line holding `product_id`. Returns how many went away.
    pub fn remove(&mut self, product_id: ProductId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id() != product_id);
        before - self.lines.len()
    }

    /// Remove exactly the line `line_id`, if present.
    pub fn remove_line(&mut self, line_id: LineItemId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.line_id == line_id)?;
        Some(self.lines.remove(index))
    }

    /// Empty the cart. Line ids keep increasing afterwards.
    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }

    /// Sum of line prices; 0 for an empty cart.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |sum, line| sum.saturating_add(line.price()))
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, line_id: LineItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == line_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.lines.iter().any(|line| line.product_id() == product_id)
    }

    pub fn count_of(&self, product_id: ProductId) -> usize {
        self.lines
            .iter()
            .filter(|line| line.product_id() == product_id)
            .count()
    }

    /// Number of lines (the cart badge).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            next_line_id: LineItemId::new(1),
        }
    }
}
