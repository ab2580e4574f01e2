//! buscacep - resolve a Brazilian postal code to a street address.
//!
//! Thin shell around [`buscacep_providers::lookup`]: parse arguments, run
//! one race, print the outcome, map it to an exit status. All concurrency
//! and network behavior lives in the providers crate; this binary only
//! renders results and terminates the process.

use buscacep_providers::LookupConfig;
use buscacep_types::{Address, PostalCode, RaceOutcome};
use clap::Parser;
use std::fmt::Write as _;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "buscacep")]
#[command(about = "Race multiple CEP lookup services and print the first answer")]
struct Cli {
    /// Postal code (CEP) to look up, e.g. 01001000 or 01001-000
    cep: String,

    /// Overall race deadline in milliseconds
    #[arg(long, default_value_t = 1000)]
    deadline_ms: u64,

    /// Per-request timeout for each source in milliseconds
    #[arg(long, default_value_t = 1000)]
    request_timeout_ms: u64,

    /// Print the outcome as JSON instead of the plain-text report
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Diagnostics go to stderr so stdout stays clean for the report.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let postal_code = match PostalCode::new(&cli.cep) {
        Ok(cep) => cep,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let config = LookupConfig::default()
        .with_deadline(Duration::from_millis(cli.deadline_ms))
        .with_request_timeout(Duration::from_millis(cli.request_timeout_ms));

    let outcome = buscacep_providers::lookup(&postal_code, &config).await;

    if cli.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize outcome: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render(&postal_code, &outcome));
    }

    exit_code(&outcome)
}

/// Human-readable report for one lookup.
fn render(postal_code: &PostalCode, outcome: &RaceOutcome) -> String {
    match outcome {
        RaceOutcome::Success(address) => render_address(address),
        RaceOutcome::Empty => format!("No address found for CEP: {postal_code}\n"),
        RaceOutcome::Timeout => {
            format!("Timed out waiting for a response for CEP: {postal_code}\n")
        }
    }
}

fn render_address(address: &Address) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Address found using: {}", address.source);
    let _ = writeln!(out, "CEP:          {}", address.postal_code);
    let optional = [
        ("Street:       ", address.street.as_deref()),
        ("Complement:   ", address.complement.as_deref()),
        ("Neighborhood: ", address.neighborhood.as_deref()),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}{value}");
        }
    }
    let _ = writeln!(out, "City:         {}", address.city);
    let _ = writeln!(out, "State:        {}", address.state_code);
    let trailing = [
        ("IBGE:         ", address.municipality_code.as_deref()),
        ("GIA:          ", address.tax_area_code.as_deref()),
        ("Unit:         ", address.extra_unit.as_deref()),
    ];
    for (label, value) in trailing {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}{value}");
        }
    }
    out
}

/// Found-and-displayed is success; so is a clean "no address" answer.
/// Only a timed-out race (and argument errors, handled above) are
/// reported as process failure.
fn exit_code(outcome: &RaceOutcome) -> ExitCode {
    match outcome {
        RaceOutcome::Success(_) | RaceOutcome::Empty => ExitCode::SUCCESS,
        RaceOutcome::Timeout => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, exit_code, render};
    use buscacep_types::{Address, PostalCode, RaceOutcome};
    use clap::CommandFactory;
    use std::process::ExitCode;

    fn cep() -> PostalCode {
        PostalCode::new("01001000").unwrap()
    }

    fn full_address() -> Address {
        Address {
            postal_code: "01001-000".to_string(),
            street: Some("Praça da Sé".to_string()),
            complement: Some("lado ímpar".to_string()),
            neighborhood: Some("Sé".to_string()),
            city: "São Paulo".to_string(),
            state_code: "SP".to_string(),
            municipality_code: Some("3550308".to_string()),
            tax_area_code: Some("1004".to_string()),
            extra_unit: None,
            source: "viacep".to_string(),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn renders_every_present_field() {
        let report = render(&cep(), &RaceOutcome::Success(full_address()));
        assert!(report.starts_with("Address found using: viacep\n"));
        assert!(report.contains("Street:       Praça da Sé\n"));
        assert!(report.contains("Complement:   lado ímpar\n"));
        assert!(report.contains("IBGE:         3550308\n"));
        assert!(report.contains("GIA:          1004\n"));
        assert!(!report.contains("Unit:"));
    }

    #[test]
    fn renders_a_minimal_address_without_blank_lines() {
        let address = Address {
            street: None,
            complement: None,
            neighborhood: None,
            municipality_code: None,
            tax_area_code: None,
            ..full_address()
        };
        let report = render(&cep(), &RaceOutcome::Success(address));
        assert!(report.contains("CEP:          01001-000\n"));
        assert!(report.contains("City:         São Paulo\n"));
        assert!(!report.contains("Street:"));
        assert!(!report.contains("Neighborhood:"));
    }

    #[test]
    fn renders_empty_and_timeout_messages() {
        assert_eq!(
            render(&cep(), &RaceOutcome::Empty),
            "No address found for CEP: 01001000\n"
        );
        assert!(render(&cep(), &RaceOutcome::Timeout).contains("Timed out"));
    }

    #[test]
    fn only_timeout_maps_to_a_failing_exit() {
        // ExitCode has no PartialEq; compare through the debug formatting.
        let success = format!("{:?}", exit_code(&RaceOutcome::Success(full_address())));
        let empty = format!("{:?}", exit_code(&RaceOutcome::Empty));
        let timeout = format!("{:?}", exit_code(&RaceOutcome::Timeout));
        assert_eq!(success, format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(empty, format!("{:?}", ExitCode::SUCCESS));
        assert_eq!(timeout, format!("{:?}", ExitCode::FAILURE));
    }
}
