//! # Catalog CLI
//!
//! Command line front end over `catalog-client`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► config (file, env, --api-url) ──► AppState                    │
//! │                                                │                        │
//! │                          login(email) ◄────────┤                        │
//! │                          RouteGuard::check     │                        │
//! │                                                ▼                        │
//! │                    list / show / create / update / delete               │
//! │                                                │                        │
//! │                               print store snapshot + page summary       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;

use anyhow::{bail, Context, Result};
use catalog_client::{AppState, ClientConfig, RouteGuard};
use catalog_core::{pagination, ListQuery, Product, ProductListState};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let mut config = ClientConfig::load(cli.config.clone()).context("loading client config")?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    let app = AppState::new(config).context("initializing catalog client")?;

    let email = cli
        .email
        .clone()
        .unwrap_or_else(|| app.auth.allowed_email().to_string());
    let navigation = app.auth.login(&email).await.context("login")?;
    debug!(?navigation, "Logged in");

    let route = cli.command.route();
    if let Some(redirect) = RouteGuard::new().check(&route, &app.auth.snapshot()) {
        bail!(
            "{} needs a session, redirected to {}",
            route.path(),
            redirect.route().path()
        );
    }

    let result = run(&app, &cli.command).await;

    let navigation = app.auth.logout();
    debug!(?navigation, "Session closed");
    result
}

async fn run(app: &AppState, command: &Commands) -> Result<()> {
    let products = &app.products;

    match command {
        Commands::List { page, search } => {
            products.list(ListQuery::new(*page, search.clone())).await?;
            print_list(app);
        }
        Commands::Show { id } => {
            let product = products.get_by_id(id).await?;
            print_product(&product);
        }
        Commands::Create { .. } => {
            let input = match command.create_form() {
                Some(form) => form.parse()?,
                None => bail!("not a create command"),
            };
            let product = products.create(input).await?;
            info!(id = %product.id, "Created");
            print_product(&product);
        }
        Commands::Update { id, .. } => {
            let patch = match command.patch() {
                Some(patch) if !patch.is_empty() => patch,
                _ => bail!("nothing to update, pass at least one field"),
            };
            let product = products.update(id, patch).await?;
            print_product(&product);
        }
        Commands::Delete { id, page } => {
            products.go_to_page(*page).await?;
            products.delete_and_refresh(id).await?;
            println!("Deleted {}", id);
            print_list(app);
        }
    }

    Ok(())
}

// =============================================================================
// Output
// =============================================================================

fn print_list(app: &AppState) {
    let state: ProductListState = app.products.snapshot();

    if let Some(error) = state.error() {
        println!("error: {}", error);
    }
    if state.items().is_empty() {
        println!("No products found");
        return;
    }

    for product in state.items() {
        println!(
            "{:<12} {:<32} {:>10.2}  {}",
            product.id, product.name, product.price, product.category
        );
    }

    println!();
    println!("{}", app.products.page_window().summary());
    if pagination::is_visible(state.total_pages()) {
        println!(
            "Page {} of {} (prev: {}, next: {})",
            state.current_page(),
            state.total_pages(),
            pagination::previous_page(state.current_page()),
            pagination::next_page(state.current_page(), state.total_pages()),
        );
    }
}

fn print_product(product: &Product) {
    println!("id:          {}", product.id);
    println!("name:        {}", product.name);
    println!("price:       {:.2}", product.price);
    println!("category:    {}", product.category);
    if let Some(description) = &product.description {
        println!("description: {}", description);
    }
    if let Some(image_url) = &product.image_url {
        println!("image:       {}", image_url);
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
