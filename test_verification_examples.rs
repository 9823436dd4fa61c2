#![allow(clippy::uninlined_format_args)]

use health_verify::{Config, HealthVerifyEngine};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let engine = HealthVerifyEngine::new(&Config::default())?;

    println!("🧪 Running sample verification requests...");
    println!();

    let samples: &[(Option<&str>, bool)] = &[
        (Some("https://www.who.int/health-topics"), false),
        (Some("https://health.harvard.edu/blog"), false),
        (Some("http://example.com/wellness"), false),
        (Some("This miracle cure is what big pharma hides!"), false),
        (Some("Drink more water"), false),
        (None, true),
        (Some(""), false),
    ];

    for (text, has_file) in samples {
        let result = engine.classify_content(*text, *has_file);
        println!("Input: {:?} (file: {})", text, has_file);
        println!("{}", serde_json::to_string_pretty(&result)?);
        println!();
    }

    println!("💬 Running sample assistant messages...");
    println!();

    let messages = [
        "Hello, can you help?",
        "Is this article true? http://example.com",
        "https://www.cdc.gov/flu",
        "Check this: natural cure for diabetes",
        "I need to consult a doctor",
        "What is the latest news?",
        "random gibberish xyz",
    ];

    for message in messages {
        println!("> {}", message);
        println!("[{}] {}", engine.router().route(message), engine.respond_to_message(message));
        println!();
    }

    Ok(())
}
