//! Top-level navigation.

use serde::{Deserialize, Serialize};

use archiv_core::DomainError;

/// Page section shown by the storefront. Any section can follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    Catalog,
    Collections,
    About,
    Contacts,
}

impl Section {
    /// Navigation order.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Catalog,
        Section::Collections,
        Section::About,
        Section::Contacts,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Catalog => "catalog",
            Section::Collections => "collections",
            Section::About => "about",
            Section::Contacts => "contacts",
        }
    }

    /// Navigation label.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Главная",
            Section::Catalog => "Каталог",
            Section::Collections => "Коллекции",
            Section::About => "О проекте",
            Section::Contacts => "Контакты",
        }
    }

    /// Only the catalog section shows the product grid and filters.
    pub fn shows_products(&self) -> bool {
        matches!(self, Section::Catalog)
    }
}

impl core::fmt::Display for Section {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.slug())
    }
}

impl core::str::FromStr for Section {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let slug = s.trim();
        Section::ALL
            .into_iter()
            .find(|section| section.slug().eq_ignore_ascii_case(slug))
            .ok_or_else(|| DomainError::validation(format!("unknown section: {s:?}")))
    }
}
