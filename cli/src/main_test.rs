use super::*;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["timetrack"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

// =============================================================================
// build_config
// =============================================================================

fn no_env(_: &str) -> Option<String> {
    None
}

fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key: &str| pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| (*v).to_owned())
}

#[test]
fn origin_flag_overrides_env_config() {
    let cli = parse(&["--origin", "https://tracker.test/", "me"]);
    let config = build_config(&cli, env(&[("TIMETRACK_ORIGIN", "https://other.test")])).unwrap();
    assert_eq!(config.origin, "https://tracker.test");
}

#[test]
fn host_flag_derives_origin() {
    let cli = parse(&["--host", "app.tracker.test", "me"]);
    let config = build_config(&cli, no_env).unwrap();
    assert_eq!(config.origin, "https://tracker.test");
}

#[test]
fn host_flag_beats_env_origin() {
    let cli = parse(&["--host", "app.tracker.test", "me"]);
    let config = build_config(&cli, env(&[("TIMETRACK_ORIGIN", "https://other.test")])).unwrap();
    assert_eq!(config.origin, "https://tracker.test");
}

#[test]
fn host_flag_uses_env_strip_prefix() {
    let vars = env(&[("TIMETRACK_HOST", "web.tracker.test"), ("TIMETRACK_STRIP_PREFIX", "web.")]);
    let from_env = ClientConfig::from_lookup(&vars).unwrap();
    assert_eq!(from_env.origin, "https://tracker.test");

    let cli = parse(&["--host", "web.tracker.test", "me"]);
    assert_eq!(build_config(&cli, &vars).unwrap().origin, from_env.origin);
}

#[test]
fn strip_prefix_flag_overrides_env() {
    let cli = parse(&["--host", "web.tracker.test", "--strip-prefix", "web.", "me"]);
    let config = build_config(&cli, env(&[("TIMETRACK_STRIP_PREFIX", "api.")])).unwrap();
    assert_eq!(config.origin, "https://tracker.test");
}

#[test]
fn origin_wins_over_host() {
    let cli = parse(&["--origin", "http://127.0.0.1:9000", "--host", "app.tracker.test", "me"]);
    let config = build_config(&cli, no_env).unwrap();
    assert_eq!(config.origin, "http://127.0.0.1:9000");
}

#[test]
fn invalid_origin_flag_is_error() {
    let cli = parse(&["--origin", "tracker", "me"]);
    assert!(matches!(build_config(&cli, no_env), Err(ApiError::InvalidOrigin(_))));
}

#[test]
fn session_token_and_no_guard_flags() {
    let cli = parse(&["--session-token", "3", "--no-guard", "nav", "/"]);
    let config = build_config(&cli, env(&[("TIMETRACK_SESSION_TOKEN", "9")])).unwrap();
    assert_eq!(config.session_token.as_deref(), Some("3"));
    assert_eq!(config.guard, GuardMode::Disabled);
}

#[test]
fn no_flags_keep_env_config() {
    let vars = env(&[
        ("TIMETRACK_HOST", "app.tracker.test"),
        ("TIMETRACK_SESSION_TOKEN", "9"),
        ("TIMETRACK_GUARD", "off"),
    ]);
    let cli = parse(&["projects"]);
    assert_eq!(build_config(&cli, &vars).unwrap(), ClientConfig::from_lookup(&vars).unwrap());
}

#[test]
fn bad_env_guard_is_config_error() {
    let cli = parse(&["me"]);
    assert!(matches!(build_config(&cli, env(&[("TIMETRACK_GUARD", "maybe")])), Err(ApiError::Config(_))));
}

// =============================================================================
// argument parsing
// =============================================================================

#[test]
fn nav_requires_a_path() {
    assert!(Cli::try_parse_from(["timetrack", "nav"]).is_err());
}

#[test]
fn issue_filter_args_map_to_filter() {
    let cli = parse(&["issues", "list", "--state", "open", "--project-id", "2"]);
    let Command::Issues(IssuesCommand { command: IssuesSubcommand::List(args) }) = cli.command else {
        panic!("expected issues list");
    };
    let query = IssueFilter::from(args).to_query();
    let pairs: Vec<_> = query.iter().collect();
    assert_eq!(pairs, vec![("project_id", "2"), ("state", "open")]);
}

#[test]
fn report_pdf_url_args_map_to_entry_filter() {
    let cli = parse(&["report", "pdf-url", "--week-start", "2024-01-01"]);
    let Command::Report(ReportCommand { command: ReportSubcommand::PdfUrl(args) }) = cli.command else {
        panic!("expected report pdf-url");
    };
    assert_eq!(EntryFilter::from(args).week_start.as_deref(), Some("2024-01-01"));
}

// =============================================================================
// output
// =============================================================================

#[test]
fn describe_render_and_redirect() {
    use timetrack::Route;
    assert_eq!(describe_resolution("/issue/4", &Resolution::Render(Route::Issue(4))), "/issue/4 -> render /issue/4");
    assert_eq!(describe_resolution("/reports", &Resolution::Redirect(Route::Login)), "/reports -> redirect /login");
}
