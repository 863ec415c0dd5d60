// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! kirje CLI
//!
//! Sends one request, or parses a saved raw capture, and prints a summary.

use std::env;
use std::process::ExitCode;

use anyhow::{bail, Context};
use serde::Serialize;

use kirje::{Headers, Method, Request, Response};

#[derive(Serialize)]
struct Summary<'a> {
    status: u16,
    headers: &'a Headers,
    media_type: Option<&'a str>,
    body_bytes: usize,
    title: Option<String>,
}

impl<'a> Summary<'a> {
    fn of(response: &'a Response) -> Self {
        Self {
            status: response.status_code(),
            headers: response.headers(),
            media_type: response.media_type(),
            body_bytes: response.raw_body().len(),
            title: response.parsed_body().and_then(|doc| doc.title()),
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kirje=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "fetch" => fetch(&args[2..]),
        "parse" => parse(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "--version" | "-v" | "version" => {
            println!("kirje {}", kirje::VERSION);
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
        r#"kirje - minimal blocking HTTP client

USAGE:
    kirje <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>     Send one request and summarize the response
    parse <file>    Parse a saved raw response capture
    help            Show this help message
    version         Show version information

FETCH OPTIONS:
    --post              Use POST instead of GET
    --insecure          Skip TLS certificate validation (debugging only)
    --timeout <secs>    Connect and total timeout (default 30)
    --query <k=v>       Add a query parameter (repeatable)
    --data <k=v>        Add a POST parameter (repeatable)
    --json              Print the summary as JSON

EXAMPLES:
    kirje fetch https://example.com
    kirje fetch https://example.com/search --query q=rust --json
    kirje fetch https://example.com/form --post --data name=kirje
    kirje parse capture.txt
"#
    );
}

fn fetch(args: &[String]) -> anyhow::Result<()> {
    let mut args = args.iter();
    let url = args.next().context("Usage: kirje fetch <url> [OPTIONS]")?;

    let mut request = Request::new();
    request.set_url(url.as_str())?;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--post" => {
                request.set_method(Method::Post)?;
            }
            "--insecure" => {
                request.set_validate_tls(false);
            }
            "--timeout" => {
                let value = args.next().context("--timeout needs a value")?;
                request.set_timeout(value.as_str())?;
            }
            "--query" => {
                let (key, value) = key_value(args.next(), "--query")?;
                request.add_query_parameter(key, value);
            }
            "--data" => {
                let (key, value) = key_value(args.next(), "--data")?;
                request.add_post_parameter(key, value);
            }
            "--json" => json = true,
            other => bail!("Unknown option: {}", other),
        }
    }

    let target = request.request_url().unwrap_or_default();
    tracing::info!(method = %request.method(), url = %target, "Fetching");

    let response = request.send()?;
    print_summary(response, json)
}

fn parse(args: &[String]) -> anyhow::Result<()> {
    let path = args.first().context("Usage: kirje parse <file> [--json]")?;
    let json = args.iter().skip(1).any(|a| a == "--json");

    let response = Response::from_file(path)
        .with_context(|| format!("Failed to read capture {}", path))?;
    print_summary(&response, json)
}

fn key_value<'a>(arg: Option<&'a String>, option: &str) -> anyhow::Result<(&'a str, &'a str)> {
    let arg = arg.with_context(|| format!("{} needs a key=value argument", option))?;
    arg.split_once('=')
        .with_context(|| format!("{} expects key=value, got '{}'", option, arg))
}

fn print_summary(response: &Response, json: bool) -> anyhow::Result<()> {
    let summary = Summary::of(response);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("\n=== Response ===");
    println!("Status: {}", summary.status);
    println!("Content-Type: {}", summary.media_type.unwrap_or("(none)"));
    println!("Size: {} bytes", summary.body_bytes);

    if !summary.headers.is_empty() {
        println!("\n=== Headers ({}) ===", summary.headers.len());
        for (name, value) in summary.headers.iter() {
            println!("  {}: {}", name, value);
        }
    }

    if let Some(title) = summary.title {
        println!("\n=== Page ===");
        println!("Title: {}", title);
    }

    Ok(())
}
