//! circledb: find the thana number and circle of a Bihar village
//!
//! Loads one district and answers lookups against it from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - List the districts
//!   $ circledb districts
//!
//! - Search by (misspelled) village name, or by thana number
//!   $ circledb --district Patna search Ramnagr
//!   $ circledb search 12
//!
//! - Show what the suggestion list offers, then expand one pick
//!   $ circledb suggest Sultan
//!   $ circledb select Sultan --pick 1
//!
//! - Browse circles
//!   $ circledb circles
//!   $ circledb circle Bihta --filter pur --sort thana
//!
//! Data source
//! -----------
//!
//! By default districts come from the sample data bundled with
//! `circledb-core`. Use `--data-dir` (or `CIRCLEDB_DATA_DIR`) for a directory
//! of `<district>.json[.gz]` files. `--remote` fetches them from the public
//! district repository, `--remote-url` (or `CIRCLEDB_REMOTE_URL`) from another
//! content API; `CIRCLEDB_TOKEN` adds a bearer token to either.
//! Set `RUST_LOG` or pass `--verbose` for logs on stderr.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use circledb_cli::render;
use circledb_core::circle::{circles, villages_in_circle};
use circledb_core::query::{classify, QueryKind};
use circledb_core::{
    is_known_district, DirectorySource, DistrictSource, SearchPolicy, Session, DISTRICTS,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let mut policy = SearchPolicy::default();
    if let Some(t) = args.threshold {
        policy.fuzzy = policy.fuzzy.with_threshold(t);
    }
    match &args.command {
        Commands::Search { limit: Some(n), .. } => policy.result_limit = *n,
        Commands::Suggest { limit: Some(n), .. } => policy.suggestion_limit = *n,
        _ => {}
    }

    let mut session: Session = Session::new(policy);
    if !matches!(args.command, Commands::Districts) {
        if !is_known_district(&args.district) {
            tracing::warn!(district = %args.district, "not one of the published districts");
        }
        let source = district_source(&args)?;
        session
            .load_with(&*source, &args.district)
            .with_context(|| format!("loading district {}", args.district))?;
    }

    let out = match args.command {
        Commands::Districts => {
            if args.json {
                render::to_json(&DISTRICTS[..])?
            } else {
                render::lines_text(&DISTRICTS[..])
            }
        }

        Commands::Stats => {
            let stats = session.store().stats();
            if args.json {
                render::to_json(&stats)?
            } else {
                render::stats_text(&args.district, &stats)
            }
        }

        Commands::Search { query, .. } => {
            match classify(&query) {
                QueryKind::Number => session.type_number(&query),
                QueryKind::Name => session.type_name(&query),
            }
            let groups = session.results();
            if args.json {
                render::to_json(&groups)?
            } else {
                render::groups_text(&groups)
            }
        }

        Commands::Suggest { query, .. } => {
            let rows = match classify(&query) {
                QueryKind::Number => {
                    session.type_number(&query);
                    session.thana_suggestions()
                }
                QueryKind::Name => {
                    session.type_name(&query);
                    session.village_suggestions()
                }
            };
            if args.json {
                render::to_json(&rows)?
            } else {
                render::records_text(&rows)
            }
        }

        Commands::Thana { number } => {
            session.type_number(&number);
            let groups = session.results();
            if args.json {
                render::to_json(&groups)?
            } else {
                render::groups_text(&groups)
            }
        }

        Commands::Select { query, pick } => {
            session.type_name(&query);
            let picked = session.pick_village_suggestion(pick).with_context(|| {
                format!("no suggestion #{pick} for {query:?}; try `circledb suggest {query}`")
            })?;
            tracing::info!(village = %picked.village_name, thana = %picked.thana_no, "picked");
            let groups = session.results();
            if args.json {
                render::to_json(&groups)?
            } else {
                render::groups_text(&groups)
            }
        }

        Commands::Circles => {
            let names = circles(session.store());
            if args.json {
                render::to_json(&names)?
            } else {
                render::lines_text(&names[..])
            }
        }

        Commands::Circle { name, filter, sort } => {
            let rows = villages_in_circle(session.store(), &name, filter.as_deref(), sort);
            if args.json {
                render::to_json(&rows)?
            } else {
                render::records_text(&rows)
            }
        }
    };

    print!("{out}");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "circledb=debug,circledb_core=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn district_source(args: &CliArgs) -> anyhow::Result<Box<dyn DistrictSource>> {
    if args.remote || args.remote_url.is_some() {
        return remote_source(args.remote_url.as_deref(), args.token.as_deref());
    }
    let source = match &args.data_dir {
        Some(dir) => DirectorySource::new(dir),
        None => DirectorySource::bundled(),
    };
    tracing::debug!(dir = %source.dir().display(), "reading districts from directory");
    Ok(Box::new(source))
}

#[cfg(feature = "fetch")]
fn remote_source(url: Option<&str>, token: Option<&str>) -> anyhow::Result<Box<dyn DistrictSource>> {
    let mut source = match url {
        Some(url) => circledb_core::RemoteSource::new(url)?,
        None => circledb_core::RemoteSource::public()?,
    };
    tracing::debug!(base = %source.base_url(), "fetching districts over HTTP");
    if let Some(token) = token {
        source = source.with_token(token);
    }
    Ok(Box::new(source))
}

#[cfg(not(feature = "fetch"))]
fn remote_source(_url: Option<&str>, _token: Option<&str>) -> anyhow::Result<Box<dyn DistrictSource>> {
    anyhow::bail!("this build has no remote support; rebuild with the `fetch` feature")
}
