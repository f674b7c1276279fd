use std::io::{self, Read};

use anyhow::{Context, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use curlpaste::{CurlRequest, ParsedCurlCommand, parse_curl_command};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CurlPart {
    Url,
    Method,
    Header,
    Body,
}

fn cli() -> Command {
    Command::new("curlpaste")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a pasted \"copy as cURL\" command into url, method, headers and body")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log parsing details to stderr (credentials are redacted)"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parses a curl command")
                .arg(
                    Arg::new("command")
                        .help("The curl command string; omit or pass - to read it from stdin")
                        .required(false)
                        .index(1),
                )
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Print only one part of the command (url, method, header, body)")
                        .required(false)
                        .value_parser(clap::value_parser!(CurlPart)),
                )
                .arg(
                    Arg::new("check")
                        .long("check")
                        .action(ArgAction::SetTrue)
                        .help("Fail unless the command has a valid target url"),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .action(ArgAction::SetTrue)
                        .help("Print JSON on a single line"),
                ),
        )
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

fn verbose(matches: &ArgMatches) -> bool {
    matches.get_flag("verbose")
        || matches
            .subcommand()
            .is_some_and(|(_, sub_matches)| sub_matches.get_flag("verbose"))
}

fn read_command(sub_matches: &ArgMatches) -> anyhow::Result<String> {
    match sub_matches.get_one::<String>("command") {
        Some(command) if command != "-" => Ok(command.clone()),
        _ => {
            let mut command = String::new();
            io::stdin()
                .read_to_string(&mut command)
                .context("failed to read the curl command from stdin")?;
            Ok(command)
        }
    }
}

fn print_part(parsed: &ParsedCurlCommand, part: CurlPart) {
    match part {
        CurlPart::Url => println!("{}", parsed.url),
        CurlPart::Method => println!("{}", parsed.method),
        CurlPart::Header => {
            for (name, value) in &parsed.headers {
                println!("{name}: {value}");
            }
        }
        CurlPart::Body => {
            if let Some(body) = &parsed.body {
                println!("{body}");
            }
        }
    }
}

fn run_parse(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let command = read_command(sub_matches)?;
    let parsed = parse_curl_command(&command);

    if sub_matches.get_flag("check") {
        CurlRequest::try_from(parsed.clone()).context("unusable curl command")?;
    }

    if let Some(part) = sub_matches.get_one::<CurlPart>("part") {
        print_part(&parsed, *part);
        return Ok(());
    }

    let json = if sub_matches.get_flag("compact") {
        serde_json::to_string(&parsed)
    } else {
        serde_json::to_string_pretty(&parsed)
    }
    .context("failed to serialize the parsed command")?;
    println!("{json}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_logging(verbose(&matches));

    match matches.subcommand() {
        Some(("parse", sub_matches)) => run_parse(sub_matches),
        Some((name, _)) => bail!("unknown subcommand: {name}"),
        None => {
            cli().print_help()?;
            println!();
            Ok(())
        }
    }
}
