mod helpers;

use helpers::{clear_config_env, run_cli};
use serial_test::serial;

#[test]
fn help_lists_every_command() {
    let res = run_cli(&["--help"], "");
    assert_eq!(res.code, 0);
    for cmd in ["play", "sim", "stats", "cfg"] {
        assert!(res.stdout.contains(cmd), "help is missing {cmd}");
    }
}

#[test]
fn unknown_command_prints_usage() {
    let res = run_cli(&["deal"], "");
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Usage: blackjack <command> [options]"));
    assert!(res.stderr.contains("  stats"));
}

#[test]
fn out_of_range_player_count_is_a_parse_error() {
    let res = run_cli(&["sim", "--rounds", "3", "--players", "8"], "");
    assert_eq!(res.code, 2);
    assert!(res.stdout.is_empty());
}

#[test]
#[serial]
fn cfg_reports_defaults_and_env_overrides() {
    clear_config_env();
    std::env::set_var("BLACKJACK_DECKS", "4");
    let res = run_cli(&["cfg"], "");
    clear_config_env();

    assert_eq!(res.code, 0);
    let v: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(v["players"]["value"], 1);
    assert_eq!(v["players"]["source"], "default");
    assert_eq!(v["decks"]["value"], 4);
    assert_eq!(v["decks"]["source"], "env");
    assert_eq!(v["ace_rule"]["value"], "single-pass");
}

#[test]
#[serial]
fn cfg_reads_the_config_file() {
    clear_config_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    std::fs::write(&path, "players = 5\nace_rule = \"as-needed\"\n").unwrap();
    std::env::set_var("BLACKJACK_CONFIG", &path);
    let res = run_cli(&["cfg"], "");
    clear_config_env();

    assert_eq!(res.code, 0);
    let v: serde_json::Value = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(v["players"]["value"], 5);
    assert_eq!(v["players"]["source"], "file");
    assert_eq!(v["ace_rule"]["value"], "as-needed");
    assert_eq!(v["decks"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_is_a_config_error() {
    clear_config_env();
    std::env::set_var("BLACKJACK_PLAYERS", "12");
    let res = run_cli(&["sim", "--rounds", "3", "--seed", "1"], "");
    clear_config_env();

    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Invalid configuration"));
    assert!(res.stderr.contains("players must be between 1 and 7"));
}

#[test]
#[serial]
fn sim_prints_tallies_for_every_seat() {
    clear_config_env();
    let res = run_cli(
        &["sim", "--rounds", "25", "--players", "3", "--seed", "42"],
        "",
    );
    assert_eq!(res.code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("sim: rounds=25 players=3 decks=1 seed=42"));
    for seat in ["Player 1:", "Player 2:", "Player 3:"] {
        assert!(res.stdout.contains(seat));
    }
    assert!(res.stdout.contains("Simulated: 25 rounds"));
}

#[test]
#[serial]
fn sim_is_reproducible_with_a_seed() {
    clear_config_env();
    let args = ["sim", "--rounds", "40", "--players", "2", "--seed", "7"];
    let a = run_cli(&args, "");
    let b = run_cli(&args, "");
    assert_eq!(a.code, 0);
    assert_eq!(a.stdout, b.stdout);
}

#[test]
#[serial]
fn sim_rejects_unknown_strategy() {
    clear_config_env();
    let res = run_cli(&["sim", "--rounds", "5", "--strategy", "counting"], "");
    assert_eq!(res.code, 2);
    assert!(res.stderr.contains("Unknown strategy 'counting'"));
}
