use super::*;
use linkfile_render::OutputType;
use linkfile_url::{DedupeMode, PrivacyMode};
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_plan() {
    let cli = parse(&["linkfile", "plan", "-i", "batch.txt", "--dedupe-mode", "loose", "--json"]);
    assert!(!cli.verbose);
    match cli.command {
        Command::Plan { batch, json } => {
            assert_eq!(batch.input.as_deref(), Some(Path::new("batch.txt")));
            assert_eq!(batch.dedupe_mode, Some(DedupeMode::Loose));
            assert!(json);
        },
        _ => panic!("expected Plan"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse(&["linkfile", "session", "--config", "linkfile.yaml", "-v", "-o", "batch.json"]);
    assert!(cli.verbose);
    assert_eq!(cli.config.as_deref(), Some(Path::new("linkfile.yaml")));
    match cli.command {
        Command::Session { output, .. } => assert_eq!(output.output.as_deref(), Some(Path::new("batch.json"))),
        _ => panic!("expected Session"),
    }
}

#[test]
fn cli_parse_import() {
    match parse(&["linkfile", "import", "bookmarks.html", "--into", "batch.txt", "--append"]).command {
        Command::Import(args) => {
            assert_eq!(args.file, Path::new("bookmarks.html"));
            assert_eq!(args.into.as_deref(), Some(Path::new("batch.txt")));
            assert_eq!(args.merge_mode(), linkfile_batch::MergeMode::Append);
        },
        _ => panic!("expected Import"),
    }
}

#[test]
fn cli_parse_append_requires_into() {
    assert!(Cli::try_parse_from(["linkfile", "import", "bookmarks.html", "--append"]).is_err());
}

#[test]
fn cli_parse_single() {
    let cli = parse(&["linkfile", "single", "example.com", "-t", "webloc", "--privacy", "strip-all", "--stdout"]);
    match cli.command {
        Command::Single(args) => {
            assert_eq!(args.url, "example.com");
            assert_eq!(args.output_type, Some(OutputType::Webloc));
            assert_eq!(args.privacy, Some(PrivacyMode::StripAll));
            assert!(args.stdout);
        },
        _ => panic!("expected Single"),
    }
}

#[test]
fn cli_parse_single_rejects_unknown_type() {
    assert!(Cli::try_parse_from(["linkfile", "single", "example.com", "--type", "pdf"]).is_err());
}

#[test]
fn cli_parse_export() {
    match parse(&["linkfile", "export", "--format", "json", "--fields", "raw,host,dedupeKey"]).command {
        Command::Export(args) => {
            assert_eq!(args.format, ExportFormat::Json);
            assert_eq!(args.fields, vec!["raw", "host", "dedupeKey"]);
            assert!(args.batch.input.is_none());
        },
        _ => panic!("expected Export"),
    }
}

#[test]
fn cli_parse_archive() {
    match parse(&["linkfile", "archive", "--name", "reading list", "--no-dedupe", "-o", "out.zip"]).command {
        Command::Archive { batch, output } => {
            assert_eq!(batch.name.as_deref(), Some("reading list"));
            assert!(batch.no_dedupe);
            assert_eq!(output.as_deref(), Some(Path::new("out.zip")));
        },
        _ => panic!("expected Archive"),
    }
}
