//! Integration tests for the WeatherBuddy CLI

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        // Make sure no ambient key turns these into live-network tests
        .env_remove("WEATHERBUDDY_WEATHER_API_KEY")
        .output()
        .expect("Failed to execute command")
}

/// The CLI shows help with the project name and description
#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("weather-buddy"));
    assert!(stdout.contains("Professional weather intelligence"));
    assert!(stdout.contains("report"));
    assert!(stdout.contains("serve"));
}

/// Without an API key the report command still succeeds on demo data -
/// the fallback contract holds end to end
#[test]
fn test_report_without_api_key_serves_demo_data() {
    let output = run(&["report", "--location", "Berlin"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "report command failed: {stdout}{stderr}"
    );
    assert!(stdout.contains("Weather Report for Berlin"));
    assert!(stdout.contains("demo data"));
    assert!(stdout.contains("Outlook:"));
}

/// Empty location input is rejected with a human-readable message
#[test]
fn test_report_empty_location_error() {
    let output = run(&["report", "--location", ""]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid input") || stderr.contains("Location cannot be empty"));
}

/// The professional briefing renders every insight section
#[test]
fn test_brief_renders_insights() {
    let output = run(&["brief", "--location", "Berlin"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "brief command failed: {stdout}");
    assert!(stdout.contains("Professional Briefing for Berlin"));
    assert!(stdout.contains("Commute:"));
    assert!(stdout.contains("Outdoor workability:"));
    assert!(stdout.contains("Travel:"));
    assert!(stdout.contains("Air quality index:"));
}

/// The assistant answers one-shot questions
#[test]
fn test_ask_answers_with_context() {
    let output = run(&["ask", "What's the weather?", "--location", "Berlin"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "ask command failed: {stdout}");
    assert!(stdout.contains("Aria:"));
    assert!(stdout.contains("Berlin"));
}
