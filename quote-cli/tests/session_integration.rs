//! Scripted interactive sessions.

use pretty_assertions::assert_eq;
use quote_cli::{AppConfig, Session};
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn run_script<'a>(
    config: &'a AppConfig,
    script: &str,
) -> (String, Session<'a>) {
    let mut session = Session::new(config);
    let mut out = Vec::new();
    session.run(script.as_bytes(), &mut out).unwrap();
    (String::from_utf8(out).unwrap(), session)
}

#[test]
fn business_website_walkthrough() {
    let config = AppConfig::default();
    let script = "\
show
project business
feature auth
complexity simple
maintenance on
show
quit
";

    let (text, session) = run_script(&config, script);

    assert!(text.contains("Select a project type to see your estimate"));
    assert!(text.contains("Total: $8,498"));
    assert!(text.contains("Total: $10,198"));
    assert!(text.contains("First Year Maintenance"));
    assert_eq!(session.estimator().estimate().total, dec!(10198));
}

#[test]
fn toggling_twice_restores_total() {
    let config = AppConfig::default();
    let script = "\
project landing
integration cloud
integration cloud
";

    let (text, session) = run_script(&config, script);

    assert!(text.contains("Total: $4,298"));
    assert!(session.estimator().selection().integrations.is_empty());
    assert_eq!(session.estimator().estimate().total, dec!(2999));
}

#[test]
fn errors_do_not_end_the_session() {
    let config = AppConfig::default();
    let script = "\
fly away
project castle
project mobile
";

    let (text, session) = run_script(&config, script);

    assert!(text.contains("error: unknown command 'fly'"));
    assert!(text.contains("error: unknown project type 'castle'"));
    assert_eq!(
        session.estimator().selection().project_type.as_deref(),
        Some("mobile")
    );
}

#[test]
fn export_writes_quote_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("acme.txt");
    let config = AppConfig::default();
    let script = format!(
        "project business\nfeature auth\ncomplexity simple\nexport {}\n",
        path.display()
    );

    let (text, _) = run_script(&config, &script);

    assert!(text.contains("Quote saved to"));
    let saved = std::fs::read_to_string(&path).unwrap();
    assert!(saved.contains("Business Website"));
    assert!(saved.contains("User Authentication"));
    assert!(saved.contains("Integrations: None"));
    assert!(saved.contains("Estimated Total: $8,498"));
}

#[test]
fn reset_clears_everything() {
    let config = AppConfig::default();
    let script = "\
project custom
feature chat
maintenance yes
reset
";

    let (_, session) = run_script(&config, script);

    assert!(session.estimator().selection().is_empty());
    assert!(!session.estimator().estimate().ready);
}

#[test]
fn end_of_input_ends_the_session() {
    let config = AppConfig::default();

    let (text, _) = run_script(&config, "project landing");

    assert!(text.contains("Total: $2,999"));
}
