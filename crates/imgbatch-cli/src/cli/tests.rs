use super::commands::BatchArgs;
use super::*;
use imgbatch_core::config::ImgbatchConfig;

fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["imgbatch", "fetch", "jobs.json"]) {
        CliCommand::Fetch {
            jobs,
            dest,
            concurrency,
            json,
        } => {
            assert_eq!(jobs, PathBuf::from("jobs.json"));
            assert!(dest.is_none());
            assert!(concurrency.is_none());
            assert!(!json);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_flags() {
    match parse(&[
        "imgbatch", "fetch", "j.json", "--dest", "/srv/img", "-j", "4", "--json",
    ]) {
        CliCommand::Fetch {
            dest,
            concurrency,
            json,
            ..
        } => {
            assert_eq!(dest, Some(PathBuf::from("/srv/img")));
            assert_eq!(concurrency, Some(4));
            assert!(json);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_negative_concurrency() {
    match parse(&["imgbatch", "fetch", "j.json", "--concurrency", "-3"]) {
        CliCommand::Fetch { concurrency, .. } => assert_eq!(concurrency, Some(-3)),
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_get() {
    match parse(&[
        "imgbatch",
        "get",
        "https://example.com/cat.png",
        "--subdir",
        "cats",
        "--name",
        "c.png",
    ]) {
        CliCommand::Get {
            url, subdir, name, ..
        } => {
            assert_eq!(url, "https://example.com/cat.png");
            assert_eq!(subdir, "cats");
            assert_eq!(name.as_deref(), Some("c.png"));
        }
        _ => panic!("expected Get"),
    }
}

#[test]
fn cli_parse_probe() {
    match parse(&["imgbatch", "probe", "/tmp/a.webp"]) {
        CliCommand::Probe { path } => assert_eq!(path, PathBuf::from("/tmp/a.webp")),
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_rejects_missing_job_file() {
    assert!(Cli::try_parse_from(["imgbatch", "fetch"]).is_err());
}

#[test]
fn batch_args_clamp_and_fallbacks() {
    let mut cfg = ImgbatchConfig::default();
    cfg.destination = Some(PathBuf::from("/cfg/dest"));

    let a = BatchArgs::resolve(&cfg, None, Some(-5), false).unwrap();
    assert_eq!(a.concurrency, 1);
    assert_eq!(a.dest, PathBuf::from("/cfg/dest"));

    let b = BatchArgs::resolve(&cfg, Some(PathBuf::from("/flag")), Some(0), true).unwrap();
    assert_eq!(b.concurrency, 1);
    assert_eq!(b.dest, PathBuf::from("/flag"));
    assert!(b.json);

    let c = BatchArgs::resolve(&cfg, None, None, false).unwrap();
    assert_eq!(c.concurrency, cfg.concurrency);
}
