use clap::{Arg, Command};
use health_verify::verification::{Reliability, VerificationResult};
use health_verify::{Config, HealthVerifyEngine, Server};
use std::process;

#[tokio::main]
async fn main() {
    let matches = Command::new("health-verify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Health information verification engine and assistant")
        .long_about("health-verify - heuristic reliability checks for health content:\n\
                    • Trusted-domain lookup for source URLs\n\
                    • Misleading-phrase lexicon scanning\n\
                    • Rule-based assistant for verification, consultation and news requests\n\
                    • Newline-delimited JSON service on a Unix socket")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("/etc/health-verify.yaml"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Generate a default configuration file")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Test configuration validity")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .value_name("TEXT")
                .help("Classify a piece of text or a URL and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("with-file")
                .long("with-file")
                .help("Treat the --verify request as having an attached file")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the verification result as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("chat")
                .long("chat")
                .value_name("MESSAGE")
                .help("Answer a single assistant message and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("list-registries")
                .long("list-registries")
                .help("List trusted domains and misleading phrases")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config_path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("/etc/health-verify.yaml");

    // Config is read before the logger exists so its level can shape the filter
    let config_found = std::path::Path::new(config_path).exists();
    let config = if config_found {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading configuration: {e:#}");
                process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level(matches.get_flag("verbose")))
        .init();

    if !config_found {
        log::warn!("Configuration file '{config_path}' not found, using default configuration");
    }
    if let Some(logging) = config.logging.as_ref() {
        if logging.level_filter().is_none() {
            log::warn!("Unknown logging level '{}', using info", logging.level);
        }
    }

    let engine = match HealthVerifyEngine::new(&config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e:#}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        println!("🔍 Testing configuration...");
        println!();
        println!(
            "Trusted domains: {}",
            engine.registries().trusted_domains.len()
        );
        println!("Misleading phrases: {}", engine.registries().lexicon.len());
        println!("Intent rules: {}", engine.router().rules().len());
        println!("Socket path: {}", config.server.socket_path);
        println!("✅ Configuration validated");
        return;
    }

    if matches.get_flag("list-registries") {
        println!("📋 Trusted Health Domains");
        println!("═══════════════════════════════════════");
        for domain in engine.registries().trusted_domains.sorted() {
            println!("  • {}", domain);
        }
        println!();
        println!("⚠️  Misleading Phrases");
        println!("═══════════════════════════════════════");
        for phrase in engine.registries().lexicon.phrases() {
            println!("  • {}", phrase);
        }
        return;
    }

    let with_file = matches.get_flag("with-file");
    if matches.contains_id("verify") || with_file {
        let text = matches.get_one::<String>("verify").map(String::as_str);
        let result = engine.classify_content(text, with_file);
        if matches.get_flag("json") {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("❌ Failed to encode result: {e}");
                    process::exit(1);
                }
            }
        } else {
            print_result(&result);
        }
        return;
    }

    if let Some(message) = matches.get_one::<String>("chat") {
        println!("{}", engine.respond_to_message(message));
        return;
    }

    log::info!("Starting health-verify service...");
    let socket_path = config.server.socket_path.clone();
    let server = Server::new(engine, &config.server);
    if let Err(e) = server.run(&socket_path).await {
        log::error!("Service error: {e}");
        process::exit(1);
    }
}

fn generate_default_config(path: &str) {
    let config = Config::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default configuration written to: {path}");
            println!("Please edit the configuration file to suit your needs.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e:#}");
            process::exit(1);
        }
    }
}

fn print_result(result: &VerificationResult) {
    let verdict = match (result.verified, result.is_reliable) {
        (false, _) => "❔ Not verified",
        (true, Reliability::Reliable) => "✅ Reliable",
        (true, Reliability::Unreliable) => "❌ Unreliable",
        (true, Reliability::Unknown) => "❔ Unknown",
    };
    println!("{verdict} (confidence {:.2})", result.confidence);
    println!("{}", result.message);
    for detail in &result.details {
        println!("  • {detail}");
    }
}
