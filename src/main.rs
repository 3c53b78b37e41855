use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use serde_json::Value;
use std::error::Error;
use subletmatch::{
    config::{API_BASE_URL_VAR, DEFAULT_API_BASE_URL},
    services::ListingClient,
    ApiConfig,
};

#[derive(Parser)]
#[command(name = "subletmatch", about = "Work with SubletMatch listings from the shell")]
struct Cli {
    #[arg(
        long,
        env = API_BASE_URL_VAR,
        default_value = DEFAULT_API_BASE_URL,
        help = "Base URL of the listing API"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a listing from a JSON document
    Create {
        #[arg(long, value_parser = parse_json, help = "Listing body as JSON")]
        data: Value,
    },
    /// List listings, optionally filtered
    List {
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_val, action = clap::ArgAction::Append, help = "Query filter")]
        params: Vec<(String, String)>,
    },
    /// Fetch one listing
    Get { id: String },
    /// Replace a listing's fields
    Update {
        id: String,
        #[arg(long, value_parser = parse_json, help = "Updated fields as JSON")]
        data: Value,
    },
    /// Delete a listing
    Delete { id: String },
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {}", e))
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got `{}`", s)),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let client = ListingClient::new(&ApiConfig::new(cli.base_url));

    let response = match cli.command {
        Command::Create { data } => client.create_listing(&data).await?,
        Command::List { params } => client.get_listings(&params).await?,
        Command::Get { id } => client.get_listing(&id).await?,
        Command::Update { id, data } => client.update_listing(&id, &data).await?,
        Command::Delete { id } => client.delete_listing(&id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_val_pairs() {
        assert_eq!(
            parse_key_val("city=Boston").unwrap(),
            ("city".to_string(), "Boston".to_string())
        );
        assert_eq!(
            parse_key_val("q=a=b").unwrap(),
            ("q".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("city").is_err());
        assert!(parse_key_val("=Boston").is_err());
    }

    #[test]
    fn list_command_collects_params() {
        let cli = Cli::try_parse_from([
            "subletmatch",
            "--base-url",
            "http://api.test",
            "list",
            "--param",
            "city=Boston",
            "--param",
            "beds=2",
        ])
        .unwrap();

        assert_eq!(cli.base_url, "http://api.test");
        match cli.command {
            Command::List { params } => assert_eq!(params.len(), 2),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn create_rejects_invalid_json() {
        assert!(Cli::try_parse_from(["subletmatch", "create", "--data", "{oops"]).is_err());
    }
}
