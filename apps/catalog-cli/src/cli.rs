//! Command-line definitions.
//!
//! # Commands
//!
//! - **list**: one page of products, optionally filtered by name
//! - **show**: a single product
//! - **create**: a new product from form-style fields
//! - **update**: a partial change to an existing product
//! - **delete**: delete, then re-list the current page

use std::path::PathBuf;

use catalog_client::Route;
use catalog_core::{ProductForm, ProductPatch};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Manage the product catalog")]
pub struct Cli {
    /// Login email (defaults to the configured allowed address)
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Path to client.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overrides config and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List products
    #[command(visible_alias = "ls")]
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Show one product
    Show { id: String },

    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: String,

        #[arg(long)]
        category: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update fields of a product
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a product and refresh the list
    #[command(visible_alias = "rm")]
    Delete {
        id: String,

        /// Page the product is listed on
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

impl Commands {
    /// View the command corresponds to.
    pub fn route(&self) -> Route {
        match self {
            Commands::List { .. } | Commands::Delete { .. } => Route::Products,
            Commands::Show { id } => Route::ProductDetail(id.clone()),
            Commands::Create { .. } => Route::ProductCreate,
            Commands::Update { id, .. } => Route::ProductEdit(id.clone()),
        }
    }

    /// Raw form of a `create` command.
    pub fn create_form(&self) -> Option<ProductForm> {
        match self {
            Commands::Create {
                name,
                price,
                category,
                description,
            } => Some(ProductForm {
                name: name.clone(),
                description: description.clone(),
                price: price.clone(),
                category: category.clone(),
            }),
            _ => None,
        }
    }

    /// Patch of an `update` command.
    pub fn patch(&self) -> Option<ProductPatch> {
        match self {
            Commands::Update {
                name,
                price,
                category,
                description,
                ..
            } => Some(ProductPatch {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                category: category.clone(),
                image_url: None,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_defaults() {
        let cli = Cli::parse_from(["catalog", "list"]);
        match cli.command {
            Commands::List { page, search } => {
                assert_eq!(page, 1);
                assert!(search.is_empty());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_update_builds_partial_patch() {
        let cli = Cli::parse_from(["catalog", "update", "p-1", "--price", "12.5"]);
        let patch = cli.command.patch().unwrap();
        assert_eq!(patch.price, Some(12.5));
        assert_eq!(patch.name, None);
        assert_eq!(cli.command.route(), Route::ProductEdit("p-1".into()));
    }

    #[test]
    fn test_create_form_carries_raw_price() {
        let cli = Cli::parse_from([
            "catalog", "create", "--name", "Lamp", "--price", "0", "--category", "Lighting",
        ]);
        let form = cli.command.create_form().unwrap();
        assert_eq!(form.price, "0");
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["catalog", "show", "p-9", "--api-url", "http://h/api"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://h/api"));
    }
}
