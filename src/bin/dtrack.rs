//! Dependency-Track API CLI binary.
//!
//! A command-line interface for interacting with a Dependency-Track server.

use clap::Parser;
use dtrack::cli::{Cli, Command, ComponentCommand, VexCommand};
use dtrack::output::PrettyPrint;
use dtrack::{
    export_cyclonedx, About, Component, ComponentFilterOptions, ComponentIdentityQuery,
    ComponentListQuery, ComponentProperty, DtrackClient, Get, List, Page, PageOptions,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let client = match DtrackClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set DTRACK_URL and DTRACK_API_KEY environment variables");
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

async fn run(client: &DtrackClient, cli: Cli) -> dtrack::Result<()> {
    match cli.command {
        Command::Version => {
            let about = About::get(client).await?;
            output_single(&about, cli.json)
        }
        Command::Component(command) => handle_component(client, command, cli.json).await,
        Command::Vex(VexCommand::Export { project }) => {
            let document = export_cyclonedx(client, project).await?;
            println!("{document}");
            Ok(())
        }
    }
}

async fn handle_component(
    client: &DtrackClient,
    command: ComponentCommand,
    json: bool,
) -> dtrack::Result<()> {
    match command {
        ComponentCommand::Get { uuid } => {
            let component = Component::get(client, uuid).await?;
            output_single(&component, json)?;
        }
        ComponentCommand::List {
            project,
            page,
            only_direct,
            only_outdated,
        } => {
            let query = ComponentListQuery {
                project,
                filter: ComponentFilterOptions {
                    only_direct,
                    only_outdated,
                },
                ..Default::default()
            };
            let page = PageOptions::from(page);
            let components = Component::list_page(client, &query, page).await?;
            output_page(&components, page, json, |c| ComponentRow::from(c))?;
        }
        ComponentCommand::Hash { hash, page, sort } => {
            let page = PageOptions::from(page);
            let components = Component::get_by_hash(client, &hash, page, &sort.into()).await?;
            output_page(&components, page, json, |c| ComponentRow::from(c))?;
        }
        ComponentCommand::Identity {
            group,
            name,
            component_version,
            purl,
            cpe,
            swid_tag_id,
            project,
            page,
            sort,
        } => {
            let identity = ComponentIdentityQuery {
                group,
                name,
                version: component_version,
                purl,
                cpe,
                swid_tag_id,
                project,
            };
            let page = PageOptions::from(page);
            let components =
                Component::get_by_identity(client, &identity, page, &sort.into()).await?;
            output_page(&components, page, json, |c| ComponentRow::from(c))?;
        }
        ComponentCommand::Properties { uuid } => {
            let properties = ComponentProperty::list(client, uuid).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&properties)?);
            } else {
                let rows: Vec<PropertyRow> = properties.iter().map(PropertyRow::from).collect();
                println!("{}", Table::new(rows));
            }
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> dtrack::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_page<T, R, F>(
    page: &Page<T>,
    options: PageOptions,
    json: bool,
    to_row: F,
) -> dtrack::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&page.items)?);
    } else {
        let rows: Vec<R> = page.items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        let number = options.page_number.unwrap_or(1);
        if page.is_truncated() {
            println!("\nPage {} ({} of {} total items)", number, page.len(), page.total_count);
        } else {
            println!("\n{} items", page.total_count);
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ComponentRow {
    uuid: String,
    component: String,
    purl: String,
    license: String,
}

impl From<&Component> for ComponentRow {
    fn from(c: &Component) -> Self {
        Self {
            uuid: c.uuid.map(|u| u.to_string()).unwrap_or_default(),
            component: c.coordinates(),
            purl: c.purl.clone().unwrap_or_default(),
            license: c
                .resolved_license
                .as_ref()
                .and_then(|l| l.license_id.clone().or_else(|| l.name.clone()))
                .or_else(|| c.license.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct PropertyRow {
    group: String,
    name: String,
    value: String,
    #[tabled(rename = "type")]
    property_type: String,
}

impl From<&ComponentProperty> for PropertyRow {
    fn from(p: &ComponentProperty) -> Self {
        Self {
            group: p.group.clone().unwrap_or_default(),
            name: p.name.clone().unwrap_or_default(),
            value: p.value.clone().unwrap_or_default(),
            property_type: format!("{:?}", p.property_type),
        }
    }
}
