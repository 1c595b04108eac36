//! Basic example demonstrating the Dependency-Track API client.
//!
//! Run with:
//! ```
//! DTRACK_URL=https://dtrack.example.com DTRACK_API_KEY=your-key \
//!     cargo run --example basic -- <project-uuid>
//! ```

use dtrack::{
    Component, ComponentFilterOptions, ComponentListQuery, DtrackClient, DtrackError, Get, List,
    PageOptions, ServerVersion,
};

#[tokio::main]
async fn main() -> dtrack::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    let project: uuid::Uuid = std::env::args()
        .nth(1)
        .ok_or_else(|| DtrackError::InvalidRequest("usage: basic <project-uuid>".to_string()))?
        .parse()
        .map_err(|e| DtrackError::InvalidRequest(format!("invalid project uuid: {e}")))?;

    // Create client from environment variables
    println!("Creating Dependency-Track client...");
    let client = DtrackClient::from_env()?;
    println!("Connected to: {}", client.base_url());
    println!("Server version: {}", client.server_version().await?);

    // List first page of the project's direct dependencies
    println!("\n--- Listing Components (first page) ---");
    let query = ComponentListQuery {
        project,
        filter: ComponentFilterOptions {
            only_direct: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let page = Component::list_page(&client, &query, PageOptions::new(1, 10)).await?;
    println!("Found {} of {} direct components", page.len(), page.total_count);

    for component in page.iter() {
        let marker = if component.is_outdated() { " (outdated)" } else { "" };
        println!("  - {}{}", component.coordinates(), marker);
    }

    // Get a specific component (using the first one from the list)
    if let Some(uuid) = page.items.first().and_then(|c| c.uuid) {
        println!("\n--- Component Details ---");
        let component = Component::get(&client, uuid).await?;
        println!("Component: {}", component.coordinates());
        println!("  PURL: {}", component.purl.as_deref().unwrap_or("none"));
        for (algorithm, value) in component.hashes() {
            println!("  {algorithm}: {value}");
        }

        // Properties need a newer server
        if client
            .is_version_at_least(ServerVersion::new(4, 11, 0))
            .await?
        {
            let properties = component.properties(&client).await?;
            println!("  Properties: {}", properties.len());
        }
    }

    println!("\nDone!");
    Ok(())
}
