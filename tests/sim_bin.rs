use std::process::Command;

fn run_sim(args: &[&str]) -> serde_json::Value {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(args)
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    serde_json::from_str(stdout.trim()).expect("invalid json")
}

#[test]
fn sim_binary_smoke() {
    let v = run_sim(&["1", "small"]);
    assert!(v["winner"].is_string());
    assert_eq!(v["preset"], "small");
    let winner = v["winner"].as_str().unwrap();
    let loser = if winner == "player1" { "player2" } else { "player1" };
    assert_eq!(v[loser]["ships_lost"], 4);
}

#[test]
fn sim_is_reproducible() {
    assert_eq!(run_sim(&["7"]), run_sim(&["7"]));
}

#[test]
fn sim_rejects_unknown_preset() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "huge"])
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
