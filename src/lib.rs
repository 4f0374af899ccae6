//! Cloud Foundry API client library.
//!
//! A Rust library for interacting with the Cloud Foundry v2 REST API
//! using a trait-based architecture where each operation (Get, List,
//! Create) is defined as a trait that entity types implement.
//!
//! Collections are paginated by an opaque `next_url` cursor supplied by
//! the server; the list operations walk the cursor chain and hydrate
//! every resource, promoting identity and audit timestamps from the
//! envelope metadata onto the decoded entities.
//!
//! # Quick Start
//!
//! ```no_run
//! use cfapi::{list_apps, App, CfClient, List};
//!
//! #[tokio::main]
//! async fn main() -> cfapi::Result<()> {
//!     // Create client from environment variables
//!     let client = CfClient::from_env()?;
//!
//!     // List all applications (spaces and orgs inlined)
//!     let apps = list_apps(&client).await?;
//!     println!("Found {} apps", apps.len());
//!
//!     // Fetch at most one page
//!     let first_page = App::list_with_page_bound(&client, &Default::default(), 1).await?;
//!     println!("First page has {} apps", first_page.len());
//!
//!     // Get a single application and follow up to its space
//!     if let Some(app) = apps.first() {
//!         let space = app.space().await?;
//!         println!("{} runs in {}", app.name, space.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The library is organized around three core traits:
//!
//! - [`Get`] - Fetch a single entity by guid
//! - [`List`] - Fetch paginated collections of entities
//! - [`Create`] - Provision a new entity
//!
//! Each entity type (like [`App`] or [`Route`]) implements the traits
//! that are supported by its API endpoints. The shared wire shapes are
//! [`Resource`]/[`Metadata`] (metadata/entity envelopes) and
//! [`EpochSeconds`]/[`FlexibleTime`] (the two timestamp encodings used
//! across API versions).
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `CF_API_TOKEN` (required) - OAuth bearer token
//! - `CF_API_URL` (required) - API endpoint (e.g. `https://api.sys.example.com`)

mod client;
mod envelope;
mod error;
mod models;
mod pagination;
mod timestamp;
mod traits;

pub mod cli;
pub mod output;

// Re-export core types
pub use client::CfClient;
pub use envelope::{Hydrate, Metadata, Resource};
pub use error::{CfError, Result};
pub use pagination::PageResponse;
pub use timestamp::{parse_epoch_seconds, parse_free_form, EpochSeconds, FlexibleTime, KNOWN_FORMATS};

// Re-export traits
pub use traits::{Create, Get, List};

// Re-export models
pub use models::{
    // App types
    App,
    AppEnv,
    AppInstance,
    AppListQuery,
    AppStats,
    AppStatsDetail,
    AppUsage,
    // Docker staging types
    DockerAppResponse,
    DockerBuildResponse,
    DockerPackageResponse,
    DropletRef,
    // Organization types
    Organization,
    // Route types
    Route,
    RouteListQuery,
    RouteMapping,
    RouteMappingRequest,
    RouteRequest,
    // Space types
    Space,
};

// Re-export convenience functions
pub use models::{
    assign_droplet, create_docker_app, create_docker_app_with_env, create_docker_build,
    create_docker_package, get_app_env, get_app_instances, get_app_routes, get_app_stats,
    get_build_info, kill_app_instance, list_apps, list_apps_for_route, map_route, start_app,
};
