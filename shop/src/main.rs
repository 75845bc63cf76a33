//! Command-line walkthrough of the storefront.
//!
//! Restores the saved cart, loads the catalog, adds the two cheapest
//! products, runs a search and prints the user table. Falls back to a
//! built-in product list when the json-server is not running.

use anyhow::Context;
use shopfront::api::mock::MockProductSource;
use shopfront::api::{ApiClient, ProductSource};
use shopfront::card::CardProps;
use shopfront::cart::{CartStore, FileStorage};
use shopfront::catalog::{
    CatalogAction, CatalogEnvironment, CatalogReducer, CatalogState, FilterUpdate, Product,
    SortBy,
};
use shopfront::search::{SearchAction, SearchEnvironment, SearchReducer, SearchState};
use shopfront::users::render_user_table;
use shopfront::ShopConfig;
use shopfront_core::environment::SystemClock;
use shopfront_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

fn offline_products() -> Vec<Product> {
    vec![
        Product::new(1_u64, "Teclado mecánico", 459.99)
            .with_category("Periféricos")
            .with_stock(12),
        Product::new(2_u64, "Mouse inalámbrico", 89.5)
            .with_category("Periféricos")
            .with_stock(4),
        Product::new(3_u64, "Monitor 27\"", 1299.0)
            .with_category("Pantallas")
            .with_stock(7),
        Product::new(4_u64, "Cable HDMI", 15.0)
            .with_category("Accesorios")
            .with_stock(40),
    ]
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopfront=info,shopfront_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = ShopConfig::from_env().context("invalid configuration")?;
    tracing::info!(api = %config.api_base_url, cart_dir = %config.cart_dir.display(), "Starting");

    // Cart
    let cart = CartStore::open(Arc::new(FileStorage::new(&config.cart_dir))).await?;
    let restored = cart.snapshot().await;
    println!("Restored cart: {} items, ${:.2}", restored.item_count(), restored.total());

    // Catalog
    let client = ApiClient::new(&config.api_base_url);
    let source: Arc<dyn ProductSource> = if client.check_health().await {
        Arc::new(client.clone())
    } else {
        tracing::warn!(api = %config.api_base_url, "API unreachable, using built-in products");
        Arc::new(MockProductSource::new(offline_products()))
    };

    let catalog = Store::new(
        CatalogState::default(),
        CatalogReducer::new(),
        CatalogEnvironment::new(Arc::clone(&source), Arc::new(SystemClock)),
    );
    catalog
        .send(CatalogAction::UpdateFilter(FilterUpdate::SortBy(SortBy::PriceLow)))
        .await?;
    catalog
        .send_and_wait_for(
            CatalogAction::Fetch,
            |action| {
                matches!(
                    action,
                    CatalogAction::Loaded { .. } | CatalogAction::Failed { .. }
                )
            },
            REQUEST_TIMEOUT,
        )
        .await?;

    let state = catalog.state(Clone::clone).await;
    if let Some(error) = &state.error {
        println!("Catalog error: {error}");
    }
    println!("Categories: {}", state.categories().join(", "));

    let visible = state.visible_products();
    for product in &visible {
        let card = CardProps::new(&product.name)
            .subtitle(&product.category)
            .image_url(&product.image)
            .highlighted(product.is_low_stock())
            .body_html(format!("<span class=\"price\">${:.2}</span>", product.price))
            .build();
        println!("{}", card.render()?);
    }

    // Add the two cheapest products, the first one twice
    for product in visible.iter().take(2) {
        cart.add(product.clone()).await?;
    }
    if let Some(cheapest) = visible.first() {
        cart.add(cheapest.clone()).await?;
    }

    let state = cart.snapshot().await;
    println!("\nCart:");
    for item in state.items() {
        println!(
            "  {:>3} x {:<30} ${:>10.2}",
            item.quantity,
            item.name,
            item.subtotal()
        );
    }
    println!("  {} items, total ${:.2}", state.item_count(), state.total());

    // Search
    if let Some(first) = visible.first() {
        let query: String = first.name.chars().take(3).collect();
        let search = Store::new(
            SearchState::default(),
            SearchReducer::new(),
            SearchEnvironment::new(Arc::clone(&source)).with_debounce(config.search_debounce),
        );
        search
            .send_and_wait_for(
                SearchAction::QueryChanged(query.clone()),
                |action| {
                    matches!(
                        action,
                        SearchAction::ResultsLoaded { .. } | SearchAction::SearchFailed { .. }
                    )
                },
                config.search_debounce + REQUEST_TIMEOUT,
            )
            .await?;
        let results = search.state(|s| s.results.len()).await;
        println!("\nSearch {query:?}: {results} results");
    }

    // Users
    match client.fetch_users(&config.users_url).await {
        Ok(users) => println!("\n{}", render_user_table(&users)?),
        Err(error) => println!("\nUsers unavailable: {}", error.user_message()),
    }

    cart.close(Duration::from_secs(5))
        .await
        .context("cart writes did not finish")?;
    Ok(())
}
