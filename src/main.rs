// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Seedgate CLI - diagnostics for torrent web API authentication

use std::env;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use seedgate::{
    classify, extract_cookie_value, ClassifiedResponse, HeaderEntry, ResponseDescriptor,
    ServerSettings,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seedgate=info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "pattern" => {
            if args.len() < 3 {
                eprintln!("Usage: seedgate pattern <server-url>");
                return ExitCode::from(1);
            }
            show_pattern(&args[2])
        }
        "cookie" => {
            if args.len() < 4 {
                eprintln!("Usage: seedgate cookie <set-cookie-value> <key>");
                return ExitCode::from(1);
            }
            show_cookie(&args[2], &args[3])
        }
        "probe" => {
            if args.len() < 3 {
                eprintln!("Usage: seedgate probe <url> [username] [password]");
                return ExitCode::from(1);
            }
            probe(&args[2], args.get(3), args.get(4)).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("seedgate {}", seedgate::VERSION);
            return ExitCode::SUCCESS;
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            return ExitCode::from(1);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Seedgate - Torrent Web API Authentication Diagnostics

USAGE:
    seedgate <COMMAND> [OPTIONS]

COMMANDS:
    pattern <server-url>                 Show the listener scope for a server
    cookie <set-cookie-value> <key>      Extract a session cookie value
    probe <url> [username] [password]    GET a URL and classify the response
    help                                 Show this help message
    version                              Show version information

EXAMPLES:
    seedgate pattern http://localhost:8080/
    seedgate cookie "SID=abc123; HttpOnly; path=/" SID
    seedgate probe http://localhost:8080/api/v2/app/version admin adminadmin
"#
    );
}

fn show_pattern(server_url: &str) -> anyhow::Result<()> {
    let settings = ServerSettings::from_url(server_url)?;
    println!("Host:    {}", settings.hostname);
    println!("Pattern: {}", settings.url_pattern()?);
    if let Some(ref creds) = settings.credentials {
        println!("User:    {}", creds.username);
    }
    Ok(())
}

fn show_cookie(header: &str, key: &str) -> anyhow::Result<()> {
    let headers = vec![HeaderEntry::new("Set-Cookie", header)];
    match extract_cookie_value(&headers, key)? {
        Some(value) => println!("{}={}", key, value),
        None => println!("No Set-Cookie header"),
    }
    Ok(())
}

async fn probe(url: &str, username: Option<&String>, password: Option<&String>) -> anyhow::Result<()> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let mut request = client.get(url);
    if let Some(user) = username {
        request = request.basic_auth(user, password);
    }

    tracing::info!(url = %url, "Probing");
    let response = request.send().await.context("Request failed")?;

    let set_cookies: Vec<String> = response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok().map(String::from))
        .collect();

    println!("Status: {}", response.status());
    for cookie in &set_cookies {
        let name = cookie.split('=').next().unwrap_or("").trim();
        println!("Set-Cookie: {}=<redacted>", name);
    }

    match classify(ResponseDescriptor::from_reqwest(response)).await? {
        ClassifiedResponse::Success(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ClassifiedResponse::Failure { kind, detail } => {
            println!("Failure: {:?}", kind);
            if let Some(detail) = detail {
                println!("Detail:  {}", detail);
            }
        }
    }

    Ok(())
}
