// Orbital Impact - command line entry point
// Runs one route and prints its JSON response on stdout

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Orbital mechanics, impact effects and deflection estimates"
)]
struct Cli {
    /// Route name, e.g. `impact` or `keplerian-orbit`
    #[arg(required_unless_present = "list")]
    route: Option<String>,

    /// Request parameters as a JSON object; omitted fields take defaults
    #[arg(long, default_value = "{}")]
    params: String,

    /// NASA API key (overrides NASA_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Print the available routes and exit
    #[arg(long, default_value_t = false)]
    list: bool,
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for route in orbital_impact::ROUTES {
            println!("{}", route);
        }
        return ExitCode::SUCCESS;
    }
    let Some(route) = cli.route else {
        return ExitCode::FAILURE;
    };

    let params: serde_json::Value = match serde_json::from_str(&cli.params) {
        Ok(params) => params,
        Err(err) => {
            let message = format!("--params is not valid JSON: {}", err);
            print_json(&json!({ "error": message, "status": 400 }));
            return ExitCode::FAILURE;
        }
    };

    match orbital_impact::run(&route, params, cli.api_key).await {
        Ok(response) => {
            print_json(&response);
            ExitCode::SUCCESS
        }
        Err(err) => {
            print_json(&json!({ "error": err.to_string(), "status": err.status_code() }));
            ExitCode::FAILURE
        }
    }
}
