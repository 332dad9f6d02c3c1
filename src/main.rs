use std::{net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Context};
use clap::{command, Arg, ArgMatches, Command};
use journal::{default_root, Journal};
use log::warn;
use wonder::DateSource;

mod error;
mod front_matter;
mod journal;
mod markdown;
mod page;
mod render;
mod server;
mod wonder;

fn journal_from(matches: &ArgMatches) -> anyhow::Result<Journal> {
    let root = match matches.get_one::<PathBuf>("journal_dir") {
        Some(dir) => dir.to_owned(),
        None => default_root(std::env::var_os("HOME")),
    };
    if !root.is_dir() {
        warn!("journal directory {root:?} does not exist. the journal will look empty.");
    }

    let date_source: DateSource = matches
        .get_one::<String>("date_source")
        .context("date_source")?
        .parse()
        .map_err(|e: String| anyhow!(e))?;

    Ok(Journal::new(root).with_date_source(date_source))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("journal_dir")
                .long("journal-dir")
                .help("Directory of wonder markdown files [default: $HOME/clawd/memory/daily-wonders]")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("date_source")
                .long("date-source")
                .help("Which date orders the wonders")
                .global(true)
                .value_parser(["filename", "front-matter"])
                .default_value("filename"),
        ])
        .subcommand_required(true)
        .subcommands([
            Command::new("list").about("Print every wonder as JSON, newest first"),
            Command::new("latest").about("Print the newest wonder as JSON"),
            Command::new("show")
                .about("Print a single wonder as JSON")
                .arg(Arg::new("slug").help("File name without .md").required(true)),
            Command::new("render")
                .about("Write the pages as static HTML")
                .arg(
                    Arg::new("out_dir")
                        .help("Directory path of output. Existing contents will be removed.")
                        .value_parser(clap::value_parser!(PathBuf))
                        .default_value("out"),
                ),
            Command::new("serve")
                .about("Serve the pages over HTTP, reading the journal on every request")
                .arg(
                    Arg::new("addr")
                        .long("addr")
                        .help("Address to listen on")
                        .value_parser(clap::value_parser!(SocketAddr))
                        .default_value("127.0.0.1:3000"),
                ),
        ])
        .get_matches();

    let journal = journal_from(&matches)?;

    match matches.subcommand() {
        Some(("list", _)) => {
            let wonders = journal.list_all();
            println!("{}", serde_json::to_string_pretty(&wonders)?);
        }
        Some(("latest", _)) => match journal.latest() {
            Some(wonder) => println!("{}", serde_json::to_string_pretty(&wonder)?),
            None => anyhow::bail!("no wonders found in {:?}", journal.root()),
        },
        Some(("show", sub)) => {
            let slug = sub.get_one::<String>("slug").context("slug")?;
            let wonder = journal
                .get_by_slug(slug)
                .with_context(|| format!("while loading {slug:?}"))?;
            println!("{}", serde_json::to_string_pretty(&wonder)?);
        }
        Some(("render", sub)) => {
            let out_dir = sub.get_one::<PathBuf>("out_dir").context("out_dir")?;
            if out_dir.exists() && !out_dir.is_dir() {
                anyhow::bail!("if out_dir exists, it must be directory.");
            }
            render::render_site(&journal, out_dir)?;
        }
        Some(("serve", sub)) => {
            let addr = *sub.get_one::<SocketAddr>("addr").context("addr")?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(journal, addr))?;
        }
        _ => unreachable!("a subcommand is required"),
    }

    Ok(())
}
