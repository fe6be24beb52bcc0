use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "ping-cli")]
#[command(about = "Client for a running ping server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "PING_SERVER_TOKEN")]
    token: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether hosts are reachable
    Ping {
        /// Hosts to probe, answered in this order
        #[arg(required = true)]
        hosts: Vec<String>,

        /// Probe every host now instead of using cached results
        #[arg(long)]
        no_cache: bool,
    },
    /// Show server version and cache size
    Status,
    /// Dump config, cache contents and redacted tokens
    Debug,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.token))?,
    );

    let request = match &cli.command {
        Commands::Ping { hosts, no_cache } => {
            let mut query: Vec<(&str, &str)> = hosts.iter().map(|h| ("addr", h.as_str())).collect();
            if *no_cache {
                query.push(("cache", "false"));
            }
            client.get(format!("{}/ping", cli.url)).query(&query)
        }
        Commands::Status => client.get(format!("{}/status", cli.url)),
        Commands::Debug => client.get(format!("{}/debug", cli.url)),
    };

    let res = request.headers(headers).send().await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
