use anyhow::Result;
use std::io::{self, BufRead, Write};

use dialogue_agent::{Agent, Context, Intent, PreferenceStore, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::load("Config")?;
    let agent = Agent::from_settings(&settings)?;
    let store = PreferenceStore::new(&settings.data.preferences_file);

    let mut prefs = store.load();
    log::info!("Loaded user preferences: {:?}", prefs);

    let was_welcomed = prefs.has_been_welcomed;
    let opening = agent.opening_message(&mut prefs);
    for line in opening.lines() {
        println!("Agent: {}", line);
    }
    if !was_welcomed {
        store.save(&prefs)?;
    }
    println!("\nType 'bye' or 'exit' to quit.");

    let mut ctx = Context::new();
    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("You: ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            store.save(&prefs)?;
            println!();
            break;
        }
        let text = input.trim();
        if text.is_empty() {
            continue;
        }

        let before = prefs.clone();
        let outcome = agent.handle_turn(&mut ctx, &mut prefs, text).await;
        println!("Agent: {}", outcome.response);

        if outcome.intent == Intent::Exit {
            store.save(&prefs)?;
            println!("User data saved. Goodbye!");
            break;
        }
        if prefs != before {
            if let Err(e) = store.save(&prefs) {
                log::error!("{}", e);
                println!("Agent: I couldn't save your preferences this time.");
            }
        }
    }
    Ok(())
}
