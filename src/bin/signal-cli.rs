use std::io::Read;

use clap::{Parser, Subcommand};
use reqwest::{StatusCode, Url};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "signal-cli")]
#[command(about = "Command-line client for the signalling relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    url: String,

    #[arg(long, default_value = "sig")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish an offer (reads stdin when PAYLOAD is omitted)
    PutOffer { room: String, payload: Option<String> },
    /// Print the offer stored for a room
    GetOffer { room: String },
    /// Publish an answer (reads stdin when PAYLOAD is omitted)
    PutAnswer { room: String, payload: Option<String> },
    /// Print and consume the answer stored for a room
    TakeAnswer { room: String },
    /// Check relay liveness, optionally for a room
    Health { room: Option<String> },
}

/// `base` with `segments` appended, each percent-encoded as one path segment.
fn relay_url(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("relay URL cannot take a path: {base}"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn payload_or_stdin(payload: Option<String>) -> Result<String, std::io::Error> {
    match payload {
        Some(p) => Ok(p),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');
    let prefix = cli.prefix.as_str();
    let resource = |room: &str, kind: &str| relay_url(base, &[prefix, room, kind]);

    let res = match cli.command {
        Commands::PutOffer { room, payload } => {
            client
                .put(resource(&room, "offer")?)
                .body(payload_or_stdin(payload)?)
                .send()
                .await?
        }
        Commands::GetOffer { room } => client.get(resource(&room, "offer")?).send().await?,
        Commands::PutAnswer { room, payload } => {
            client
                .put(resource(&room, "answer")?)
                .body(payload_or_stdin(payload)?)
                .send()
                .await?
        }
        Commands::TakeAnswer { room } => client.delete(resource(&room, "answer")?).send().await?,
        Commands::Health { room } => {
            let url = match room {
                Some(room) => relay_url(base, &[prefix, room.as_str(), "health"])?,
                None => relay_url(base, &["health"])?,
            };
            let res = client.get(url).send().await?;
            return print_json(res).await;
        }
    };

    print_payload(res).await
}

async fn print_payload(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(());
    }
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }
    print!("{}", text);
    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
