use std::fs;
use std::path::Path;
use tempfile::tempdir;
use worldcup_stats::analysis::AnalysisError;
use worldcup_stats::charts::ChartData;
use worldcup_stats::data::{FixedDir, LoaderError, ProcessorError};
use worldcup_stats::report::PlayersSection;
use worldcup_stats::stats::CountMethod;
use worldcup_stats::{analyze, Settings};

const WORLD_CUPS: &str = "\
Year,Country,Winner,Runners-Up,Third,Fourth,GoalsScored,QualifiedTeams,MatchesPlayed,Attendance
1954,Switzerland,Germany FR,Hungary,Austria,Uruguay,140,16,26,943.000
1950,Brazil,Uruguay,Brazil,Sweden,Spain,88,13,22,1.337.000
";

const PLAYERS: &str = "\
RoundID,MatchID,Team Initials,Coach Name,Line-up,Shirt Number,Player Name,Position,Event
201,1096,FRA,CAUDRON Raoul (FRA),S,0,Alex THEPOT,GK,
201,1096,MEX,LUQUE Juan (MEX),S,0,Oscar BONFIGLIO,GK,
201,1096,FRA,CAUDRON Raoul (FRA),S,0,Lucien LAURENT,,G19'
201,1096,FRA,CAUDRON Raoul (FRA),N,0,Marcel LANGILLER,,G40' G87'
201,1090,FRA,CAUDRON Raoul (FRA),S,0,Lucien LAURENT,,Y45'
201,1090,ARG,OLAZAR Francisco (ARG),S,0,Guillermo STABILE,,G90+1'
";

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

fn run(dir: &Path) -> Result<worldcup_stats::Report, AnalysisError> {
    let settings = Settings::for_data_dir(dir);
    analyze(&settings, &FixedDir(dir.to_path_buf()))
}

#[test]
fn full_dataset_report() {
    let dir = tempdir().unwrap();
    write(dir.path(), "WorldCups.csv", WORLD_CUPS);
    write(dir.path(), "WorldCupPlayers.csv", PLAYERS);

    let report = run(dir.path()).unwrap();

    assert_eq!(report.goals_per_year, vec![(1950, 88), (1954, 140)]);
    assert_eq!(report.attendance_per_year, vec![(1950, 1_337_000), (1954, 943_000)]);

    let winners = &report.finishers[0];
    assert_eq!(winners.column, "Winner");
    assert_eq!(winners.get("Uruguay"), Some(1));
    assert_eq!(winners.get("Germany FR"), Some(1));
    assert_eq!(winners.total(), 2);
    assert_eq!(report.finishers.len(), 4);

    let players = report.players_report().expect("players file was present");
    assert_eq!(players.appearances.method, CountMethod::PerMatch);
    assert_eq!(players.appearances.total, 6);

    let lineup = players.lineup.as_ref().expect("Line-up header resolves");
    assert_eq!(lineup.column, "Line-up");
    assert_eq!(lineup.get("S"), Some(5));
    assert_eq!(lineup.get("N"), Some(1));

    let goals = players.goal_minutes.as_ref().unwrap();
    assert_eq!(goals.extraction.minutes, vec![19, 40, 90]);
    assert_eq!(goals.extraction.dropped, 0);
    assert_eq!(goals.histogram.counts.len(), 9);
    assert_eq!(goals.histogram.total(), 3);

    let coaches = players.top_coaches.as_ref().unwrap();
    assert_eq!(coaches.entries[0].value, "CAUDRON Raoul (FRA)");
    assert_eq!(coaches.entries[0].count, 4);

    let top_players = players.top_players.as_ref().unwrap();
    assert_eq!(top_players.entries[0].value, "Lucien LAURENT");
    assert_eq!(top_players.entries[0].count, 2);

    let ids: Vec<&str> = ChartData::from_report(&report).iter().map(|c| c.id).collect();
    assert_eq!(
        ids,
        vec!["goals_per_year", "attendance_per_year", "lineup", "goal_minutes"]
    );

    let mut text = Vec::new();
    report.write_text(&mut text).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.contains("Using lineup column: 'Line-up'"));
    assert!(text.contains("Number of total players : 6"));
}

#[test]
fn missing_players_file_degrades() {
    let dir = tempdir().unwrap();
    write(dir.path(), "WorldCups.csv", WORLD_CUPS);

    let report = run(dir.path()).unwrap();

    assert_eq!(report.total_players(), 0);
    match &report.players {
        PlayersSection::Missing { candidates } => {
            assert_eq!(candidates[0], dir.path().join("WorldCupPlayers.csv"));
            assert!(candidates.len() >= 2);
        }
        PlayersSection::Loaded(_) => panic!("players file should be missing"),
    }
    assert_eq!(ChartData::from_report(&report).len(), 2);
}

#[test]
fn missing_tournaments_file_is_fatal() {
    let dir = tempdir().unwrap();
    write(dir.path(), "WorldCupPlayers.csv", PLAYERS);

    match run(dir.path()) {
        Err(AnalysisError::Loader(LoaderError::MissingFile {
            file, candidates, ..
        })) => {
            assert_eq!(file, "WorldCups.csv");
            assert_eq!(candidates[0], dir.path().join("WorldCups.csv"));
        }
        other => panic!("expected MissingFile, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn players_without_expected_columns_fall_back() {
    let dir = tempdir().unwrap();
    write(dir.path(), "WorldCups.csv", WORLD_CUPS);
    write(
        dir.path(),
        "WorldCupPlayers.csv",
        "Player Name,Shirt Number\nPELE,10\nPELE,10\nGARRINCHA,7\n",
    );

    let report = run(dir.path()).unwrap();
    let players = report.players_report().unwrap();

    assert_eq!(players.appearances.method, CountMethod::DistinctNames);
    assert_eq!(players.appearances.total, 2);
    assert!(players.lineup.is_none());
    assert!(players.goal_minutes.is_none());
    assert!(players.top_coaches.is_none());
    assert_eq!(players.columns, vec!["Player Name", "Shirt Number"]);

    let ids: Vec<&str> = ChartData::from_report(&report).iter().map(|c| c.id).collect();
    assert_eq!(ids, vec!["goals_per_year", "attendance_per_year"]);
}

#[test]
fn malformed_attendance_stops_the_run() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "WorldCups.csv",
        "Year,GoalsScored,Attendance,Winner\n1930,70,590.549,Uruguay\n1934,70,n/a,Italy\n",
    );

    match run(dir.path()) {
        Err(AnalysisError::Processor(ProcessorError::Attendance { row, source })) => {
            assert_eq!(row, 2);
            assert_eq!(source.value, "n/a");
        }
        other => panic!("expected attendance error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn missing_data_dir_is_reported_not_replaced() {
    let dir = tempdir().unwrap();
    let typo = dir.path().join("typo_dir");

    match run(&typo) {
        Err(AnalysisError::Loader(err @ LoaderError::MissingFile { .. })) => {
            let message = err.to_string();
            let LoaderError::MissingFile {
                candidates,
                dataset_root,
                ..
            } = err
            else {
                unreachable!()
            };
            assert_eq!(dataset_root, typo);
            assert_eq!(candidates[0], typo.join("WorldCups.csv"));
            assert!(message.contains("typo_dir"));
        }
        other => panic!("expected MissingFile, got {:?}", other.map(|_| ())),
    }
}
