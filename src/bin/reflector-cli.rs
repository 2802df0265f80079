use std::io::Read;

use clap::{Parser, Subcommand};
use flate2::read::GzDecoder;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "reflector-cli")]
#[command(about = "Query a running http-reflector", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the address the service sees
    Ip,
    /// Show the request headers the service received
    Headers,
    /// Reflect a GET request, with optional query arguments (key=value)
    Get {
        args: Vec<String>,
    },
    /// Print each streamed object as it arrives
    Stream {
        n: u64,
    },
    /// Fetch and decompress the gzip endpoint
    Gzip,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Ip => {
            let res = client.get(format!("{}/ip", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Headers => {
            let res = client.get(format!("{}/headers", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Get { args } => {
            let query: Vec<(&str, &str)> = args
                .iter()
                .map(|arg| arg.split_once('=').unwrap_or((arg.as_str(), "")))
                .collect();
            let res = client
                .get(format!("{}/get", cli.url))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Stream { n } => {
            let mut res = client.get(format!("{}/stream/{}", cli.url, n)).send().await?;
            if !res.status().is_success() {
                return report_failure(res).await;
            }
            while let Some(chunk) = res.chunk().await? {
                for line in chunk.split(|&b| b == b'\n').filter(|l| !l.is_empty()) {
                    let json: Value = serde_json::from_slice(line)?;
                    println!("{}", serde_json::to_string(&json)?);
                }
            }
        }
        Commands::Gzip => {
            // Ask for identity so the raw gzip bytes reach us untouched.
            let res = client
                .get(format!("{}/gzip", cli.url))
                .header(reqwest::header::ACCEPT_ENCODING, "identity")
                .send()
                .await?;
            if !res.status().is_success() {
                return report_failure(res).await;
            }
            let compressed = res.bytes().await?;
            let mut text = String::new();
            GzDecoder::new(&compressed[..]).read_to_string(&mut text)?;
            let json: Value = serde_json::from_str(&text)?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

async fn report_failure(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Error: service returned status {}", res.status());
    if let Ok(text) = res.text().await {
        eprintln!("Response: {}", text);
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        return report_failure(res).await;
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
