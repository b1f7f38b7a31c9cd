//! End-to-end session flows over the archive catalog.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use archiv_catalog::{Era, Size, archive_catalog};
use archiv_core::{AggregateRoot, ProductId};
use archiv_events::{Event, EventBus, InMemoryEventBus, execute, execute_and_publish};
use archiv_storefront::{
    PriceRange, Rubles, Section, SizeSelection, StorefrontCommand, StorefrontEvent,
    StorefrontSession,
};

fn at(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, minute, 0).unwrap()
}

fn session() -> StorefrontSession {
    StorefrontSession::new(Arc::new(archive_catalog().unwrap()))
}

#[test]
fn browse_filter_and_buy() {
    let mut session = session();

    // home page call-to-action
    execute(
        &mut session,
        &StorefrontCommand::SelectSection {
            section: Section::Catalog,
            occurred_at: at(0),
        },
    )
    .unwrap();
    assert!(session.active_section().shows_products());

    execute(
        &mut session,
        &StorefrontCommand::SetPriceRange {
            range: PriceRange::new(0, 20_000).unwrap(),
            occurred_at: at(1),
        },
    )
    .unwrap();
    let visible: Vec<u32> = session
        .filtered_products()
        .iter()
        .map(|p| p.id_typed().get())
        .collect();
    assert_eq!(visible, vec![1, 4, 5, 6]);

    for id in [1, 6, 1] {
        execute(
            &mut session,
            &StorefrontCommand::AddToCart {
                product_id: ProductId::new(id),
                occurred_at: at(2),
            },
        )
        .unwrap();
    }
    assert_eq!(session.cart_count(), 3);
    assert_eq!(session.cart_total(), Rubles(50_000));

    execute(
        &mut session,
        &StorefrontCommand::RemoveFromCart {
            product_id: ProductId::new(1),
            occurred_at: at(3),
        },
    )
    .unwrap();
    assert_eq!(session.cart_count(), 1);
    assert_eq!(session.cart_total().to_string(), "20\u{a0}000 ₽");
}

#[test]
fn a_filter_combination_with_no_results_is_not_an_error() {
    let mut session = session();
    execute(
        &mut session,
        &StorefrontCommand::ToggleEra {
            era: Era::new("1960s").unwrap(),
            checked: true,
            occurred_at: at(0),
        },
    )
    .unwrap();
    execute(
        &mut session,
        &StorefrontCommand::SelectSize {
            size: SizeSelection::Only(Size::XL),
            occurred_at: at(1),
        },
    )
    .unwrap();

    assert_eq!(session.result_count(), 0);
    assert!(session.snapshot().products.is_empty());
}

#[test]
fn subscribers_see_every_applied_event_in_order() {
    let bus: InMemoryEventBus<StorefrontEvent> = InMemoryEventBus::new();
    let renderer = bus.subscribe();
    let mut session = session();

    let commands = [
        StorefrontCommand::SelectSection {
            section: Section::Catalog,
            occurred_at: at(0),
        },
        StorefrontCommand::AddToCart {
            product_id: ProductId::new(3),
            occurred_at: at(1),
        },
        // unchecking an unchecked era changes nothing and publishes nothing
        StorefrontCommand::ToggleEra {
            era: Era::new("1980s").unwrap(),
            checked: false,
            occurred_at: at(2),
        },
        StorefrontCommand::ClearCart { occurred_at: at(3) },
    ];
    for cmd in &commands {
        execute_and_publish(&mut session, cmd, &bus).unwrap();
    }

    let seen: Vec<&'static str> = renderer.drain().iter().map(|e| e.event_type()).collect();
    assert_eq!(
        seen,
        vec![
            "storefront.nav.section_selected",
            "storefront.cart.item_added",
            "storefront.cart.cleared",
        ]
    );
    assert_eq!(session.version(), 3);
}

#[test]
fn rejected_commands_publish_nothing() {
    let bus = Arc::new(InMemoryEventBus::<StorefrontEvent>::new());
    let renderer = bus.subscribe();
    let mut session = session();

    let result = execute_and_publish(
        &mut session,
        &StorefrontCommand::AddToCart {
            product_id: ProductId::new(404),
            occurred_at: at(0),
        },
        &bus,
    );

    assert!(result.is_err());
    assert!(renderer.try_recv().is_err());
    assert_eq!(session.version(), 0);
}

#[test]
fn view_serializes_for_a_renderer() {
    let mut session = session();
    execute(
        &mut session,
        &StorefrontCommand::AddToCart {
            product_id: ProductId::new(2),
            occurred_at: at(0),
        },
    )
    .unwrap();

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["section"], "home");
    assert_eq!(json["cart_count"], 1);
    assert_eq!(json["cart_total"], 22_000);
    assert_eq!(json["criteria"]["size"], "all");
    assert_eq!(json["products"].as_array().map(Vec::len), Some(6));
}
