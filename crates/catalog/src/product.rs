use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use archiv_core::{DomainError, DomainResult, Entity, ProductId};

/// Garment size (closed enumeration, smallest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

impl Size {
    /// Every size, in the order the size picker lists them.
    pub const ALL: [Size; 5] = [Size::XS, Size::S, Size::M, Size::L, Size::XL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
        }
    }
}

impl core::fmt::Display for Size {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation(format!("unknown size: {s:?}")))
    }
}

macro_rules! categorical_tag {
    ($(#[$meta:meta])* $t:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $t(String);

        impl $t {
            pub fn new(value: impl Into<String>) -> DomainResult<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::validation(concat!($label, " cannot be empty")));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl TryFrom<&str> for $t {
            type Error = DomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

categorical_tag!(
    /// Decade a piece comes from (e.g. "1970s").
    Era,
    "era"
);
categorical_tag!(
    /// Cut or occasion of a piece (e.g. "Классика").
    Style,
    "style"
);
categorical_tag!(
    /// Main fabric of a piece (e.g. "Шерсть").
    Material,
    "material"
);

/// Raw product fields, validated by [`Product::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    /// Whole currency units.
    pub price: u64,
    pub era: Era,
    pub style: Style,
    pub material: Material,
    pub sizes: Vec<Size>,
    pub image: String,
}

/// A catalog product. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewProduct")]
pub struct Product {
    id: ProductId,
    name: String,
    price: u64,
    era: Era,
    style: Style,
    material: Material,
    sizes: BTreeSet<Size>,
    image: String,
}

impl Product {
    pub fn new(fields: NewProduct) -> DomainResult<Self> {
        if fields.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                fields.id
            )));
        }

        let sizes: BTreeSet<Size> = fields.sizes.into_iter().collect();
        if sizes.is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: at least one size is required",
                fields.id
            )));
        }

        Ok(Self {
            id: fields.id,
            name: fields.name,
            price: fields.price,
            era: fields.era,
            style: fields.style,
            material: fields.material,
            sizes,
            image: fields.image,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn era(&self) -> &Era {
        &self.era
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Sizes this piece fits, smallest first.
    pub fn sizes(&self) -> &BTreeSet<Size> {
        &self.sizes
    }

    /// Opaque display asset reference.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn fits(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blazer() -> NewProduct {
        NewProduct {
            id: ProductId::new(1),
            name: "Винтажный блейзер".to_string(),
            price: 15000,
            era: Era::new("1970s").unwrap(),
            style: Style::new("Классика").unwrap(),
            material: Material::new("Шерсть").unwrap(),
            sizes: vec![Size::S, Size::M, Size::L],
            image: "/placeholder.svg".to_string(),
        }
    }

    #[test]
    fn new_product_keeps_fields() {
        let product = Product::new(blazer()).unwrap();
        assert_eq!(product.id_typed(), ProductId::new(1));
        assert_eq!(product.price(), 15000);
        assert_eq!(product.era().as_str(), "1970s");
        assert!(product.fits(Size::M));
        assert!(!product.fits(Size::XS));
    }

    #[test]
    fn duplicate_sizes_collapse_into_a_set() {
        let mut fields = blazer();
        fields.sizes = vec![Size::L, Size::S, Size::L];
        let product = Product::new(fields).unwrap();
        let sizes: Vec<Size> = product.sizes().iter().copied().collect();
        assert_eq!(sizes, vec![Size::S, Size::L]);
    }

    #[test]
    fn rejects_empty_name() {
        let mut fields = blazer();
        fields.name = "  ".to_string();
        match Product::new(fields).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_size_set() {
        let mut fields = blazer();
        fields.sizes.clear();
        match Product::new(fields).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("size")),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn tags_reject_blank_values() {
        assert!(Era::new("").is_err());
        assert!(Style::new(" ").is_err());
        assert!(Material::try_from("Лён").is_ok());
    }

    #[test]
    fn size_parses_case_insensitively() {
        assert_eq!("xl".parse::<Size>().unwrap(), Size::XL);
        assert_eq!(" M ".parse::<Size>().unwrap(), Size::M);
        assert!("XXL".parse::<Size>().is_err());
    }

    #[test]
    fn deserializing_validates() {
        let json = r#"{"id":9,"name":"","price":1,"era":"1960s","style":"x","material":"y","sizes":["M"],"image":""}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());

        let json = r#"{"id":9,"name":"Юбка","price":1,"era":"1960s","style":"x","material":"y","sizes":["M"],"image":""}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.fits(Size::M));
    }
}
