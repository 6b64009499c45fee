use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use release_range::aggregator::ReleaseAggregator;
use release_range::cancel::RequestTracker;
use release_range::config::{self, Config};
use release_range::domain::{FilterState, PinnedRange};
use release_range::filter::{apply_filters, filter_selectable_versions};
use release_range::provider::{Credential, GitHubClient};
use release_range::repo_url::{parse_repo_url, RepoRef};
use release_range::{ui, ReleaseRangeError};

#[derive(clap::Parser)]
#[command(
    name = "release-range",
    version,
    about = "Show GitHub release notes between two versions of a repository"
)]
struct Args {
    #[arg(help = "Repository URL, e.g. https://github.com/facebook/react-native")]
    url: String,

    #[arg(short, long, help = "Oldest version to include (prompted if omitted)")]
    from: Option<String>,

    #[arg(short, long, help = "Newest version to include (prompted if omitted)")]
    to: Option<String>,

    #[arg(long, help = "Hide major releases (X.0.0)")]
    no_major: bool,

    #[arg(long, help = "Hide minor releases (X.Y.0)")]
    no_minor: bool,

    #[arg(long, help = "Hide patch releases (X.Y.Z, Z > 0)")]
    no_patch: bool,

    #[arg(long, help = "Hide beta pre-releases")]
    no_beta: bool,

    #[arg(long, help = "Hide release candidates")]
    no_rc: bool,

    #[arg(long, help = "GitHub token (overrides GITHUB_TOKEN and the config file)")]
    token: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "List selectable versions and exit")]
    list_tags: bool,

    #[arg(short = 'v', action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,
}

impl Args {
    /// Config-file toggles with command-line exclusions applied on top
    fn filters(&self, defaults: FilterState) -> FilterState {
        FilterState {
            include_major: defaults.include_major && !self.no_major,
            include_minor: defaults.include_minor && !self.no_minor,
            include_patch: defaults.include_patch && !self.no_patch,
            include_beta: defaults.include_beta && !self.no_beta,
            include_rc: defaults.include_rc && !self.no_rc,
        }
    }
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,release_range=info".to_string(),
            2 => "info,release_range=debug".to_string(),
            _ => "debug,release_range=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Reports a failed request and exits
fn exit_with(err: ReleaseRangeError, authenticated: bool) -> ! {
    match err {
        ReleaseRangeError::Cancelled => {
            eprintln!("Operation cancelled by user.");
            std::process::exit(130);
        }
        ReleaseRangeError::RateLimited { .. } => {
            ui::display_error(&err.to_string());
            if !authenticated {
                ui::display_rate_limit_notice();
            }
        }
        other => ui::display_error(&other.to_string()),
    }
    std::process::exit(1);
}

/// Runs the blocking stdin prompt off the async workers
async fn prompt_version(label: &'static str, versions: Vec<String>, default_index: usize) -> Result<String> {
    tokio::task::spawn_blocking(move || ui::select_version(label, &versions, default_index)).await?
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config: Config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let RepoRef { owner, repo } = match parse_repo_url(&args.url) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let filters = args.filters(config.filters);
    let credential = config
        .resolve_token(args.token.as_deref())
        .and_then(Credential::new);
    let authenticated = credential.is_some();
    if !authenticated {
        ui::display_rate_limit_notice();
    }

    let client = GitHubClient::new(&config.github, credential)?;
    let aggregator = ReleaseAggregator::new(client)
        .with_page_size(config.github.effective_per_page())
        .with_max_pages(config.github.max_pages);

    let tracker = Arc::new(RequestTracker::new());
    {
        let tracker = Arc::clone(&tracker);
        tokio::spawn(async move {
            // Ctrl-C cancels the live request; with none live (prompt, second press) it exits
            while tokio::signal::ctrl_c().await.is_ok() {
                if !tracker.cancel_current() {
                    exit_with(ReleaseRangeError::Cancelled, authenticated);
                }
            }
        });
    }

    let (from, to) = match (args.from.clone(), args.to.clone()) {
        (Some(from), Some(to)) if !args.list_tags => (from, to),
        (from, to) => {
            ui::display_status(&format!("Fetching available versions of {}/{}...", owner, repo));
            let cancel = tracker.begin();
            let tags = match aggregator.available_versions(&owner, &repo, &cancel).await {
                Ok(tags) => tags,
                Err(e) => exit_with(e, authenticated),
            };
            tracker.finish(&cancel);
            let selectable =
                filter_selectable_versions(&tags, filters, &config.selection.hide_patterns);

            if args.list_tags {
                ui::display_available_versions(&selectable);
                return Ok(());
            }

            // Tags come newest first, so the oldest is the natural default for the lower end
            let from = match from {
                Some(from) => from,
                None => {
                    let default_index = selectable.len();
                    prompt_version("from version", selectable.clone(), default_index).await?
                }
            };
            let to = match to {
                Some(to) => to,
                None => prompt_version("to version", selectable.clone(), 1).await?,
            };
            (from, to)
        }
    };

    ui::display_status(&format!(
        "Fetching releases of {}/{} from {} to {}...",
        owner, repo, from, to
    ));
    let cancel = tracker.begin();
    let report = match aggregator
        .get_release_report(&owner, &repo, &from, &to, &cancel)
        .await
    {
        Ok(report) => report,
        Err(e) => exit_with(e, authenticated),
    };
    tracker.finish(&cancel);

    for warning in report.warnings() {
        ui::display_boundary_warning(&warning);
    }

    let pinned = PinnedRange::new(from, to);
    let shown = apply_filters(report.releases, filters, &pinned);
    ui::display_release_notes(&shown);

    Ok(())
}
