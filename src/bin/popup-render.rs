use mykomap_popup::{render_popup_with, PopupConfig, PopupError, PopupResult, Record};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: popup-render <config.yaml> <record.yaml>...");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  popup-render demos/config.yaml demos/record-full.yaml");
        eprintln!("  RUST_LOG=debug popup-render demos/config.yaml demos/*.yaml");
        process::exit(1);
    }

    let config = match PopupConfig::from_path(&args[1]) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {} has errors:", args[1]);
            print_error(&e);
            process::exit(1);
        }
    };
    let (services, settings) = config.into_services();

    let mut exit_code = 0;
    for file_path in &args[2..] {
        match render_file(file_path, &services, &settings) {
            Ok(html) => {
                println!("<!-- {} -->", file_path);
                println!("{}", html);
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", file_path);
                print_error(&e);
                exit_code = 1;
            }
        }
    }

    process::exit(exit_code);
}

fn render_file(
    path: &str,
    services: &mykomap_popup::StaticDataServices,
    settings: &mykomap_popup::PopupSettings,
) -> PopupResult<String> {
    let content = fs::read_to_string(path).map_err(|e| PopupError::Io {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    let record = Record::from_yaml_str(&content)?;
    render_popup_with(&record, services, settings)
}

fn print_error(error: &PopupError) {
    match error {
        PopupError::InvalidPropertyKind { property } => {
            eprintln!("  Property '{}' is not a vocabulary property:", property);
            eprintln!("    check the 'fields' section of the configuration");
        }
        PopupError::InvalidPropertyValue { property, value } => {
            eprintln!("  Invalid value for vocabulary property '{}':", property);
            eprintln!("    {}", value);
        }
        PopupError::Yaml(msg) => {
            eprintln!("  YAML error:");
            eprintln!("    {}", msg);
        }
        e => {
            eprintln!("  {}", e);
        }
    }
}
