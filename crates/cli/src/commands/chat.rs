//! `switchboard chat` — Interactive or single-message chat mode.

use std::io::Write;
use switchboard_config::AppConfig;
use switchboard_core::llm::LlmClient;
use switchboard_core::turn::SessionId;
use switchboard_providers::OllamaClient;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check Ollama early — give a clear error before any prompt is typed
    let probe = OllamaClient::new(&config.ollama.base_url, &config.ollama.embedding_model);
    if !probe.health_check().await.unwrap_or(false) {
        eprintln!();
        eprintln!("  ERROR: Cannot reach Ollama at {}", config.ollama.base_url);
        eprintln!();
        eprintln!("  Make sure Ollama is running and the models are pulled:");
        eprintln!("    ollama serve");
        eprintln!("    ollama pull {}", config.ollama.chat_model);
        eprintln!("    ollama pull {}", config.ollama.embedding_model);
        eprintln!();
        eprintln!("  Or point at another instance:");
        eprintln!("    export SWITCHBOARD_OLLAMA_URL=http://host:11434");
        eprintln!();
        return Err("Ollama is not reachable. See above for setup instructions.".into());
    }

    let pipeline = super::build_pipeline(&config).await?;
    let session = SessionId::new();

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let reply = pipeline.handle(&session, &msg).await?;
        eprint!("\r              \r");
        println!("{}", reply.text);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Switchboard — Interactive Mode");
    println!();
    println!("  Ollama:     {}", config.ollama.base_url);
    println!("  Chat model: {}", config.ollama.chat_model);
    println!("  Embedding:  {}", config.ollama.embedding_model);
    println!("  Session:    {session}");
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        eprint!("  ...");
        match pipeline.handle(&session, input).await {
            Ok(reply) => {
                eprint!("\r     \r");
                println!();
                for line in reply.text.lines() {
                    println!("  [{}] > {line}", reply.domain);
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye!");
    println!();

    Ok(())
}
