use super::*;
use pitchcoach_coaching::{Difficulty, Personality, SalesMethodology};
use pitchcoach_core::{PriorityFilter, PriorityLevel};

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["pitchcoach", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["pitchcoach", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pitchcoach"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn recommend_defaults() {
    let cli = Cli::try_parse_from(["pitchcoach", "recommend", "--user", "u-1"]).unwrap();
    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };

    assert_eq!(args.user, "u-1");
    assert_eq!(args.limit, 10);
    assert_eq!(args.min_score, 6);
    assert_eq!(args.priority, PriorityFilter::All);
    assert!(!args.include_engaged);
}

#[test]
fn recommend_accepts_priority_and_flags() {
    let cli = Cli::try_parse_from([
        "pitchcoach",
        "recommend",
        "--user",
        "u-1",
        "--limit",
        "3",
        "--min-score",
        "8",
        "--priority",
        "high",
        "--include-engaged",
    ])
    .unwrap();
    let Some(Commands::Recommend(args)) = cli.command else {
        panic!("expected recommend command");
    };

    assert_eq!(args.limit, 3);
    assert_eq!(args.min_score, 8);
    assert_eq!(args.priority, PriorityFilter::Only(PriorityLevel::High));
    assert!(args.include_engaged);
}

#[test]
fn recommend_rejects_unknown_priority() {
    let result = Cli::try_parse_from([
        "pitchcoach",
        "recommend",
        "--user",
        "u-1",
        "--priority",
        "urgent",
    ]);
    assert!(result.is_err());
}

#[test]
fn icp_rescore_requires_domains() {
    assert!(Cli::try_parse_from(["pitchcoach", "icp", "rescore"]).is_err());

    let cli = Cli::try_parse_from(["pitchcoach", "icp", "rescore", "a.io", "b.io"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Icp {
            command: IcpCommands::Rescore { ref domains }
        }) if domains.len() == 2
    ));
}

#[test]
fn coach_collects_repeated_keywords() {
    let cli = Cli::try_parse_from([
        "pitchcoach",
        "coach",
        "--transcript",
        "[]",
        "--scenario",
        "pricing-pushback",
        "--message",
        "hello",
        "--keyword",
        "stealth mode",
        "--keyword",
        "session replay",
    ])
    .unwrap();
    let Some(Commands::Coach(args)) = cli.command else {
        panic!("expected coach command");
    };

    assert_eq!(args.keywords, vec!["stealth mode", "session replay"]);
    assert_eq!(args.turn, None);
}

#[test]
fn intent_limit_defaults_to_ten() {
    let cli = Cli::try_parse_from(["pitchcoach", "intent"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Intent { limit: 10 })));
}

#[test]
fn inline_json_is_passed_through() {
    assert_eq!(read_json_arg(" {\"a\":1}").unwrap(), " {\"a\":1}");
    assert!(read_json_arg("/definitely/missing/file.json").is_err());
}

#[test]
fn parses_track_command() {
    let cli = Cli::try_parse_from([
        "pitchcoach",
        "track",
        "--user",
        "u-1",
        "--domain",
        "acme.io",
        "--kind",
        "contacted",
    ])
    .unwrap();

    assert!(matches!(
        cli.command,
        Some(Commands::Track { ref user, ref domain, ref kind })
            if user == "u-1" && domain == "acme.io" && kind == "contacted"
    ));
}

#[test]
fn respond_defaults_and_overrides() {
    let base = [
        "pitchcoach",
        "respond",
        "--transcript",
        "[]",
        "--scenario",
        "pricing-pushback",
        "--message",
        "hello",
    ];
    let cli = Cli::try_parse_from(base).unwrap();
    let Some(Commands::Respond(args)) = cli.command else {
        panic!("expected respond command");
    };
    assert_eq!(args.difficulty, Difficulty::Medium);
    assert_eq!(args.personality, Personality::Professional);
    assert_eq!(args.methodology, None);

    let cli = Cli::try_parse_from(base.iter().copied().chain([
        "--difficulty",
        "expert",
        "--personality",
        "hostile",
        "--methodology",
        "spin",
    ]))
    .unwrap();
    let Some(Commands::Respond(args)) = cli.command else {
        panic!("expected respond command");
    };
    assert_eq!(args.difficulty, Difficulty::Expert);
    assert_eq!(args.personality, Personality::Hostile);
    assert_eq!(args.methodology, Some(SalesMethodology::Spin));

    assert!(Cli::try_parse_from(base.iter().copied().chain(["--personality", "sleepy"])).is_err());
}
