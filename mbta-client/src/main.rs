//! Command-line front end for the MBTA V3 API.
//!
//! Reads `MBTA_API_KEY` (and optionally `MBTA_BASE_URL`) from the
//! environment or a `.env` file.

use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mbta_client::{
    Alert, ClientConfig, Facility, Filter, Line, LiveFacility, MbtaClient, Prediction,
    QueryParams, Record, ResourceKind, Route, RoutePattern, Schedule, Service, Shape, Stop,
    Trip, Vehicle,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mbta")]
#[command(about = "Query the MBTA V3 transit API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List resources of one kind
    List {
        /// Resource kind, e.g. `stops` or `route_pattern`
        kind: ResourceKind,

        /// Filter as `name=value[,value...]`, e.g. `-f route=Red,Orange`
        #[arg(short, long = "filter", value_name = "NAME=VALUES", value_parser = parse_filter)]
        filters: Vec<(Filter, String)>,

        /// Page offset
        #[arg(long)]
        offset: Option<u32>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Sort attribute; prefix with `-` for descending
        #[arg(long)]
        sort: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Fetch one resource by id
    Get {
        kind: ResourceKind,

        id: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Comma-separated relationships to side-load
    #[arg(long, value_delimiter = ',')]
    include: Vec<String>,

    /// Comma-separated attributes to return for the queried kind (implies --raw)
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,

    /// Print the JSON document instead of record summaries
    #[arg(long, default_value_t = false)]
    raw: bool,
}

impl CommonArgs {
    fn apply(&self, kind: ResourceKind, mut params: QueryParams) -> QueryParams {
        if !self.include.is_empty() {
            params = params.include(&self.include);
        }
        if !self.fields.is_empty() {
            params = params.fields(kind, &self.fields);
        }
        params
    }

    /// Typed records need every attribute, so a sparse fieldset prints raw.
    fn raw(&self) -> bool {
        self.raw || !self.fields.is_empty()
    }
}

fn parse_filter(s: &str) -> Result<(Filter, String), String> {
    let (name, values) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUES, got {s:?}"))?;
    let filter = name.parse::<Filter>().map_err(|e| e.to_string())?;
    Ok((filter, values.to_string()))
}

/// Call a generic function with the record type for a runtime kind.
macro_rules! with_record {
    ($kind:expr, $func:ident($($arg:expr),*)) => {
        match $kind {
            ResourceKind::Alert => $func::<Alert, _>($($arg),*).await,
            ResourceKind::Facility => $func::<Facility, _>($($arg),*).await,
            ResourceKind::Line => $func::<Line, _>($($arg),*).await,
            ResourceKind::LiveFacility => $func::<LiveFacility, _>($($arg),*).await,
            ResourceKind::Prediction => $func::<Prediction, _>($($arg),*).await,
            ResourceKind::Route => $func::<Route, _>($($arg),*).await,
            ResourceKind::RoutePattern => $func::<RoutePattern, _>($($arg),*).await,
            ResourceKind::Schedule => $func::<Schedule, _>($($arg),*).await,
            ResourceKind::Service => $func::<Service, _>($($arg),*).await,
            ResourceKind::Shape => $func::<Shape, _>($($arg),*).await,
            ResourceKind::Stop => $func::<Stop, _>($($arg),*).await,
            ResourceKind::Trip => $func::<Trip, _>($($arg),*).await,
            ResourceKind::Vehicle => $func::<Vehicle, _>($($arg),*).await,
        }
    };
}

async fn print_list<R, T>(client: &MbtaClient<T>, params: &QueryParams) -> Result<()>
where
    R: Record + Display,
    T: mbta_client::Transport,
{
    let records: Vec<R> = client.list(params).await?;
    info!(kind = %R::KIND, count = records.len(), "listed");
    for record in &records {
        println!("{record}");
    }
    Ok(())
}

async fn print_one<R, T>(client: &MbtaClient<T>, id: &str, params: &QueryParams) -> Result<()>
where
    R: Record + Display,
    T: mbta_client::Transport,
{
    let record: R = client.get(id, params).await?;
    println!("{record}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env().context("loading configuration")?;
    let client = MbtaClient::new(config)?;

    match cli.command {
        Commands::List {
            kind,
            filters,
            offset,
            limit,
            sort,
            common,
        } => {
            let mut params = QueryParams::new();
            if let Some(offset) = offset {
                params = params.offset(offset);
            }
            if let Some(limit) = limit {
                params = params.limit(limit);
            }
            if let Some(sort) = sort {
                params = params.sort(sort);
            }
            for (filter, values) in filters {
                params = params.filter_value(filter, values);
            }
            let params = common.apply(kind, params);

            if common.raw() {
                let document = client.list_raw(kind, &params).await?;
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                with_record!(kind, print_list(&client, &params))?;
            }
        }
        Commands::Get { kind, id, common } => {
            let params = common.apply(kind, QueryParams::new());

            if common.raw() {
                let document = client.get_raw(kind, &id, &params).await?;
                println!("{}", serde_json::to_string_pretty(&document)?);
            } else {
                with_record!(kind, print_one(&client, &id, &params))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn common(args: &[&str]) -> CommonArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::List { common, .. } | Commands::Get { common, .. } => common,
        }
    }

    #[test]
    fn fields_imply_raw() {
        assert!(common(&["mbta", "list", "stops", "--fields", "name,latitude"]).raw());
        assert!(common(&["mbta", "get", "stop", "70061", "--fields", "name"]).raw());
        assert!(!common(&["mbta", "list", "stops"]).raw());
        assert!(common(&["mbta", "list", "stops", "--raw"]).raw());
    }

    #[test]
    fn parses_filters() {
        let cli = Cli::try_parse_from(["mbta", "list", "schedules", "-f", "route=Red,Orange"]).unwrap();
        match cli.command {
            Commands::List { kind, filters, .. } => {
                assert_eq!(kind, ResourceKind::Schedule);
                assert_eq!(filters, vec![(Filter::Route, "Red,Orange".to_string())]);
            }
            Commands::Get { .. } => panic!("expected list"),
        }

        assert!(parse_filter("route").is_err());
        assert!(parse_filter("colour=red").is_err());
    }
}
