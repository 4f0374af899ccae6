//! Basic example demonstrating the Cloud Foundry API client.
//!
//! Run with:
//! ```
//! CF_API_TOKEN=your-token CF_API_URL=https://api.sys.example.com cargo run --example basic
//! ```

use cfapi::{list_apps, App, CfClient, List, Route, RouteListQuery};

#[tokio::main]
async fn main() -> cfapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Cloud Foundry client...");
    let client = CfClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // List all applications (walks every page of the collection)
    println!("\n--- Listing Applications ---");
    let apps = list_apps(&client).await?;
    println!("Found {} apps", apps.len());

    for app in &apps {
        let space = app
            .embedded_space()
            .map(|space| space.name.as_str())
            .unwrap_or("?");
        println!("  - {} [{}] in space {}", app.name, app.state, space);
    }

    // Fetch at most one page of routes
    println!("\n--- Listing Routes (first page only) ---");
    let routes = Route::list_with_page_bound(&client, &RouteListQuery::default(), 1).await?;
    for route in &routes {
        println!("  - {} ({})", route.host, route.guid);
    }

    // Follow up from an app to its space and organization
    if let Some(app) = apps.first() {
        println!("\n--- Following Up ---");
        let space = app.space().await?;
        println!("{} runs in space {}", app.name, space.name);

        let org = space.organization().await?;
        println!("Space {} belongs to org {}", space.name, org.name);

        let instances = cfapi::get_app_instances(&client, &app.guid).await?;
        for (index, instance) in &instances {
            println!(
                "Instance {}: {} since {}",
                index,
                instance.state,
                instance.since.0
            );
        }
    }

    // Fetch at most two pages of apps via the page bound
    println!("\n--- Bounded Listing ---");
    let bounded = App::list_with_page_bound(&client, &Default::default(), 2).await?;
    println!("First two pages hold {} apps", bounded.len());

    Ok(())
}
