//! Demand simulator entry point: CLI wiring and config-driven model runs.

use std::path::Path;
use std::process;

use ev_demand_sim::config::ScenarioConfig;
use ev_demand_sim::io::export::export_csv;
use ev_demand_sim::population::ArchetypeTable;
use ev_demand_sim::sim::DemandModel;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    archetypes_path: Option<String>,
    population_override: Option<u32>,
    seed_override: Option<u64>,
    jitter_override: Option<f32>,
    summary_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("ev-demand-sim — population-scale EV charging demand simulator");
    eprintln!();
    eprintln!("Usage: ev-demand-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>      Load scenario from TOML config file");
    eprintln!("  --preset <name>        Use a built-in preset (baseline)");
    eprintln!("  --archetypes <path>    Load the archetype table from CSV");
    eprintln!("  --population <n>       Override population size");
    eprintln!("  --seed <u64>           Override random seed");
    eprintln!("  --jitter <minutes>     Override plug-in time jitter std dev");
    eprintln!("  --summary-out <path>   Export the hourly summary to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                Start REST API server after simulation");
        eprintln!("  --port <u16>           API server port (default: 3000)");
    }
    eprintln!("  --help                 Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        archetypes_path: None,
        population_override: None,
        seed_override: None,
        jitter_override: None,
        summary_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--archetypes" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --archetypes requires a path argument");
                    process::exit(1);
                }
                cli.archetypes_path = Some(args[i].clone());
            }
            "--population" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --population requires a u32 argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<u32>() {
                    cli.population_override = Some(n);
                } else {
                    eprintln!("error: --population value \"{}\" is not a valid u32", args[i]);
                    process::exit(1);
                }
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--jitter" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --jitter requires a minutes argument");
                    process::exit(1);
                }
                match args[i].parse::<f32>() {
                    Ok(j) if j.is_finite() && j >= 0.0 => cli.jitter_override = Some(j),
                    _ => {
                        eprintln!(
                            "error: --jitter value \"{}\" is not a valid non-negative number",
                            args[i]
                        );
                        process::exit(1);
                    }
                }
            }
            "--summary-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --summary-out requires a path argument");
                    process::exit(1);
                }
                cli.summary_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply CLI overrides
    if let Some(ref path) = cli.archetypes_path {
        scenario.archetypes.csv_path = Some(path.clone());
    }
    if let Some(n) = cli.population_override {
        scenario.simulation.population_size = n;
    }
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(jitter) = cli.jitter_override {
        scenario.simulation.time_jitter_std_minutes = jitter;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Load the archetype table
    let table = match scenario.archetypes.csv_path {
        Some(ref path) => match ArchetypeTable::from_csv_path(Path::new(path)) {
            Ok(table) => table,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        None => ArchetypeTable::uk_default(),
    };

    // Build and run
    let model = DemandModel::new(table, scenario.simulation.to_params());
    let summary = match model.run() {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{summary}");

    // Export CSV if requested
    if let Some(ref path) = cli.summary_out {
        if let Err(e) = export_csv(&summary, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Summary written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ev_demand_sim::api::AppState {
            params: model.params().clone(),
            summary,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(ev_demand_sim::api::serve(state, addr));
    }
}
