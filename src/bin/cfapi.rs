//! Cloud Foundry API CLI binary.
//!
//! A command-line interface for interacting with the Cloud Foundry API.

use cfapi::cli::{Cli, Command, Entity, ListEntity};
use cfapi::output::PrettyPrint;
use cfapi::{
    App, AppListQuery, CfClient, Get, List, Organization, Route, RouteListQuery, Space,
};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let client = match CfClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CF_API_TOKEN and CF_API_URL environment variables");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &CfClient, cli: Cli) -> cfapi::Result<()> {
    match cli.command {
        Command::Get { entity, guid } => handle_get(client, entity, &guid, cli.json).await,
        Command::List {
            entity,
            pages,
            filters,
        } => handle_list(client, entity, pages, filters, cli.json).await,
    }
}

async fn handle_get(
    client: &CfClient,
    entity: Entity,
    guid: &str,
    json: bool,
) -> cfapi::Result<()> {
    match entity {
        Entity::App => {
            let app = App::get(client, guid.to_string()).await?;
            output_single(&app, json)
        }
        Entity::Space => {
            let space = Space::get(client, guid.to_string()).await?;
            output_single(&space, json)
        }
        Entity::Organization => {
            let org = Organization::get(client, guid.to_string()).await?;
            output_single(&org, json)
        }
    }
}

async fn handle_list(
    client: &CfClient,
    entity: ListEntity,
    pages: Option<i32>,
    filters: Vec<String>,
    json: bool,
) -> cfapi::Result<()> {
    // A missing --pages walks the whole cursor chain.
    let page_bound = pages.unwrap_or(0);

    match entity {
        ListEntity::Apps => {
            let mut query = AppListQuery::default().inline_relations_depth(2);
            for filter in filters {
                query = query.filter(filter);
            }
            let apps = App::list_with_page_bound(client, &query, page_bound).await?;
            output_list(&apps, json, AppRow::from)
        }
        ListEntity::Routes => {
            let mut query = RouteListQuery::default();
            for filter in filters {
                query = query.filter(filter);
            }
            let routes = Route::list_with_page_bound(client, &query, page_bound).await?;
            output_list(&routes, json, RouteRow::from)
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> cfapi::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> cfapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} items", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct AppRow {
    name: String,
    guid: String,
    state: String,
    instances: i32,
    memory: i64,
    space: String,
}

impl From<&App> for AppRow {
    fn from(app: &App) -> Self {
        Self {
            name: app.name.clone(),
            guid: app.guid.clone(),
            state: app.state.clone(),
            instances: app.instances,
            memory: app.memory,
            space: app
                .embedded_space()
                .map(|space| space.name.clone())
                .unwrap_or_else(|| app.space_guid.clone()),
        }
    }
}

#[derive(Tabled)]
struct RouteRow {
    host: String,
    guid: String,
    domain_guid: String,
    port: String,
}

impl From<&Route> for RouteRow {
    fn from(route: &Route) -> Self {
        Self {
            host: route.host.clone(),
            guid: route.guid.clone(),
            domain_guid: route.domain_guid.clone(),
            port: route
                .port
                .map(|port| port.to_string())
                .unwrap_or_default(),
        }
    }
}
