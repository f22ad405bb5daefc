#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use timetrack::net::types::{EntryFilter, IssueFilter, NewTimeEntry};
use timetrack::routes::Resolution;
use timetrack::{ApiClient, ApiError, ClientConfig, GuardMode, NavigationGuard, Router};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "timetrack", about = "Time tracker API CLI")]
struct Cli {
    /// Backend origin, e.g. `https://tracker.example.com`.
    /// Overrides `TIMETRACK_ORIGIN` and `TIMETRACK_HOST`.
    #[arg(long)]
    origin: Option<String>,

    /// Front-end hostname the origin is derived from. Ignored when
    /// `--origin` is set.
    #[arg(long)]
    host: Option<String>,

    /// Label stripped from the host, default `app.` or `TIMETRACK_STRIP_PREFIX`.
    #[arg(long)]
    strip_prefix: Option<String>,

    /// Value of the `user_id` session cookie.
    #[arg(long, env = "TIMETRACK_SESSION_TOKEN")]
    session_token: Option<String>,

    /// Skip the identity check in `nav`.
    #[arg(long, default_value_t = false)]
    no_guard: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the backend is up.
    Health,
    /// Show the user the session belongs to.
    Me,
    /// Print the GitHub login URL.
    LoginUrl,
    Users,
    Projects,
    Issues(IssuesCommand),
    Timer(TimerCommand),
    Entries(EntriesCommand),
    Report(ReportCommand),
    /// Resolve client routes through the login guard, in order.
    Nav {
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct IssuesCommand {
    #[command(subcommand)]
    command: IssuesSubcommand,
}

#[derive(Subcommand, Debug)]
enum IssuesSubcommand {
    List(IssueFilterArgs),
    Get {
        id: i64,
    },
    /// Look an issue up by its GitHub coordinates.
    Gh {
        owner: String,
        repo: String,
        number: i64,
    },
    /// Re-import issues from GitHub.
    Refresh,
}

#[derive(Args, Debug, Default)]
struct IssueFilterArgs {
    #[arg(long)]
    project_id: Option<i64>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    assignee: Option<String>,
}

#[derive(Args, Debug)]
struct TimerCommand {
    #[command(subcommand)]
    command: TimerSubcommand,
}

#[derive(Subcommand, Debug)]
enum TimerSubcommand {
    Start {
        issue_id: i64,
    },
    Stop {
        #[arg(long)]
        notes: Option<String>,
    },
    Status,
}

#[derive(Args, Debug)]
struct EntriesCommand {
    #[command(subcommand)]
    command: EntriesSubcommand,
}

#[derive(Subcommand, Debug)]
enum EntriesSubcommand {
    List(EntryFilterArgs),
    Add {
        issue_id: i64,
        #[arg(long)]
        minutes: i64,
        /// `YYYY-MM-DD`; the server defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
struct EntryFilterArgs {
    #[arg(long)]
    week_start: Option<String>,
    #[arg(long)]
    project_id: Option<i64>,
    #[arg(long)]
    user_id: Option<i64>,
    #[arg(long)]
    label: Option<String>,
    #[arg(long)]
    assignee: Option<String>,
}

#[derive(Args, Debug)]
struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportSubcommand {
    Week(EntryFilterArgs),
    /// Print the printable report URL without fetching it.
    PdfUrl(EntryFilterArgs),
}

impl From<IssueFilterArgs> for IssueFilter {
    fn from(args: IssueFilterArgs) -> Self {
        Self { project_id: args.project_id, state: args.state, label: args.label, assignee: args.assignee }
    }
}

impl From<EntryFilterArgs> for EntryFilter {
    fn from(args: EntryFilterArgs) -> Self {
        Self {
            week_start: args.week_start,
            project_id: args.project_id,
            user_id: args.user_id,
            label: args.label,
            assignee: args.assignee,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = build_config(&cli, |key| std::env::var(key).ok())?;
    let client = ApiClient::new(&config)?;
    tracing::debug!(origin = client.origin(), "client ready");

    match cli.command {
        Command::Health => print_json(&client.health().await?),
        Command::Me => print_json(&client.me().await?),
        Command::LoginUrl => {
            println!("{}", client.github_login_url()?);
            Ok(())
        }
        Command::Users => print_json(&client.users().await?),
        Command::Projects => print_json(&client.projects().await?),
        Command::Issues(issues) => run_issues(&client, issues).await,
        Command::Timer(timer) => run_timer(&client, timer).await,
        Command::Entries(entries) => run_entries(&client, entries).await,
        Command::Report(report) => run_report(&client, report).await,
        Command::Nav { paths } => run_nav(client, config.guard, &paths).await,
    }
}

/// Read the client config from `env`, with command-line flags standing in
/// for the variables they override.
fn build_config<F>(cli: &Cli, env: F) -> Result<ClientConfig, ApiError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ClientConfig::from_lookup(|key| match key {
        // An explicit host on the command line beats an origin from the environment.
        "TIMETRACK_ORIGIN" if cli.origin.is_some() || cli.host.is_some() => cli.origin.clone(),
        "TIMETRACK_HOST" if cli.host.is_some() => cli.host.clone(),
        "TIMETRACK_STRIP_PREFIX" if cli.strip_prefix.is_some() => cli.strip_prefix.clone(),
        "TIMETRACK_SESSION_TOKEN" if cli.session_token.is_some() => cli.session_token.clone(),
        _ => env(key),
    })?;
    if cli.no_guard {
        config.guard = GuardMode::Disabled;
    }
    Ok(config)
}

async fn run_issues(client: &ApiClient, issues: IssuesCommand) -> Result<(), CliError> {
    match issues.command {
        IssuesSubcommand::List(args) => {
            let query = IssueFilter::from(args).to_query();
            print_json(&client.issues(&query).await?)
        }
        IssuesSubcommand::Get { id } => print_json(&client.issue(id).await?),
        IssuesSubcommand::Gh { owner, repo, number } => {
            print_json(&client.issue_by_github(&owner, &repo, number).await?)
        }
        IssuesSubcommand::Refresh => print_json(&client.refresh_issues().await?),
    }
}

async fn run_timer(client: &ApiClient, timer: TimerCommand) -> Result<(), CliError> {
    match timer.command {
        TimerSubcommand::Start { issue_id } => print_json(&client.start_timer(issue_id).await?),
        TimerSubcommand::Stop { notes } => print_json(&client.stop_timer(notes.as_deref()).await?),
        TimerSubcommand::Status => print_json(&client.timer_status().await?),
    }
}

async fn run_entries(client: &ApiClient, entries: EntriesCommand) -> Result<(), CliError> {
    match entries.command {
        EntriesSubcommand::List(args) => {
            let query = EntryFilter::from(args).to_query();
            print_json(&client.time_entries(&query).await?)
        }
        EntriesSubcommand::Add { issue_id, minutes, date, notes } => {
            let body = NewTimeEntry { duration_minutes: minutes, date, notes };
            print_json(&client.add_time(issue_id, &body).await?)
        }
        EntriesSubcommand::Delete { id } => print_json(&client.delete_time_entry(id).await?),
    }
}

async fn run_report(client: &ApiClient, report: ReportCommand) -> Result<(), CliError> {
    match report.command {
        ReportSubcommand::Week(args) => {
            let query = EntryFilter::from(args).to_query();
            print_json(&client.report_week(&query).await?)
        }
        ReportSubcommand::PdfUrl(args) => {
            let query = EntryFilter::from(args).to_query();
            println!("{}", client.report_pdf_url(&query)?);
            Ok(())
        }
    }
}

async fn run_nav(client: ApiClient, mode: GuardMode, paths: &[String]) -> Result<(), CliError> {
    let router = Router::new(NavigationGuard::new(client, mode));
    for path in paths {
        let resolution = router.navigate(path).await;
        println!("{}", describe_resolution(path, &resolution));
    }
    Ok(())
}

fn describe_resolution(path: &str, resolution: &Resolution) -> String {
    match resolution {
        Resolution::Render(route) => format!("{path} -> render {route}"),
        Resolution::Redirect(route) => format!("{path} -> redirect {route}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
