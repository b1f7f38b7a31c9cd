//! The АРХИВ storefront's built-in catalog.

use archiv_core::{DomainResult, ProductId};

use crate::catalog::Catalog;
use crate::product::{Era, Material, NewProduct, Size, Style};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

struct SeedRow {
    id: u32,
    name: &'static str,
    price: u64,
    era: &'static str,
    style: &'static str,
    material: &'static str,
    sizes: &'static [Size],
}

const ROWS: [SeedRow; 6] = [
    SeedRow {
        id: 1,
        name: "Винтажный блейзер",
        price: 15_000,
        era: "1970s",
        style: "Классика",
        material: "Шерсть",
        sizes: &[Size::S, Size::M, Size::L],
    },
    SeedRow {
        id: 2,
        name: "Архивное платье",
        price: 22_000,
        era: "1960s",
        style: "Коктейльный",
        material: "Шёлк",
        sizes: &[Size::XS, Size::S, Size::M],
    },
    SeedRow {
        id: 3,
        name: "Ретро пальто",
        price: 28_000,
        era: "1980s",
        style: "Оверсайз",
        material: "Кашемир",
        sizes: &[Size::M, Size::L, Size::XL],
    },
    SeedRow {
        id: 4,
        name: "Винтажные брюки",
        price: 12_000,
        era: "1970s",
        style: "Кэжуал",
        material: "Деним",
        sizes: &[Size::S, Size::M, Size::L, Size::XL],
    },
    SeedRow {
        id: 5,
        name: "Архивная юбка",
        price: 18_000,
        era: "1960s",
        style: "А-силуэт",
        material: "Твид",
        sizes: &[Size::XS, Size::S, Size::M],
    },
    SeedRow {
        id: 6,
        name: "Ретро жакет",
        price: 20_000,
        era: "1980s",
        style: "Деловой",
        material: "Лён",
        sizes: &[Size::M, Size::L],
    },
];

/// Build the six-piece archive catalog shown by the storefront.
pub fn archive_catalog() -> DomainResult<Catalog> {
    ROWS.iter()
        .try_fold(Catalog::builder(), |builder, row| {
            builder.product(NewProduct {
                id: ProductId::new(row.id),
                name: row.name.to_string(),
                price: row.price,
                era: Era::new(row.era)?,
                style: Style::new(row.style)?,
                material: Material::new(row.material)?,
                sizes: row.sizes.to_vec(),
                image: PLACEHOLDER_IMAGE.to_string(),
            })
        })?
        .build()
}
