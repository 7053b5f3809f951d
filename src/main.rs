//! Professor Code CLI
//!
//! Usage:
//!   profcode --serve                         # HTTP + WebSocket soul server
//!   profcode --connect ws://localhost:4000/ws  # Terminal client
//!   profcode --interactive                   # In-process chat demo
//!   profcode --text "hello professor"        # Single evaluation
//!   profcode --text "hello" --json           # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use profcode::core::{classify, run_client, run_server, PersonaResponder, RelayConfig};
use profcode::types::{Exchange, HistoryLog, PersonaState, ReplyCategory};
use profcode::{DEFAULT_PORT, RESPONSE_DELAY_MS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "profcode",
    version = VERSION,
    about = "Professor Code local soul engine - persona responder and turn relay",
    long_about = "A local soul engine for the Professor Code persona.\n\n\
                  The server relays each chat message into an internal monologue\n\
                  followed by a staged response over WebSocket, and serves the\n\
                  persona and conversation history over HTTP.\n\n\
                  Modes:\n  \
                  --serve        HTTP + WebSocket server\n  \
                  --connect URL  Terminal client for a running server\n  \
                  --interactive  In-process chat demo (no server)\n  \
                  --text MSG     Single evaluation"
)]
struct Args {
    /// Run the HTTP + WebSocket server
    #[arg(short, long)]
    serve: bool,

    /// Connect to a running server as a terminal client
    #[arg(short, long, value_name = "URL")]
    connect: Option<String>,

    /// Interactive chat demo - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Message to evaluate (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Listener port (falls back to $PORT, then 4000)
    #[arg(long)]
    port: Option<u16>,

    /// Delay between monologue and response in server mode (milliseconds)
    #[arg(long, default_value_t = RESPONSE_DELAY_MS)]
    response_delay_ms: u64,

    /// Seed the reply selection for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref url) = args.connect {
        if let Err(e) = run_client(url).await {
            eprintln!("Client error: {}", e);
            std::process::exit(1);
        }
    } else if let Some(ref text) = args.text {
        run_single(text, &args);
    } else {
        // Default to the interactive demo if no mode specified
        run_interactive(&args);
    }
}

fn make_responder(args: &Args) -> PersonaResponder {
    match args.seed {
        Some(seed) => PersonaResponder::with_seed(seed),
        None => PersonaResponder::new(),
    }
}

/// Run single text evaluation
fn run_single(text: &str, args: &Args) {
    let mut responder = make_responder(args);
    let category = classify(text);
    let (thought, response) = responder.respond(text);

    if args.json {
        let out = serde_json::json!({
            "category": category,
            "thought": thought,
            "response": response,
        });
        println!("{}", serde_json::to_string_pretty(&out).unwrap());
    } else {
        println!("{}", format!("💭 {}", thought).dimmed());
        println!("{}", format!("🎓 {}", response).green());
    }
}

/// Run the interactive in-process demo: assess, think, maybe joke, respond.
fn run_interactive(args: &Args) {
    let persona = PersonaState::professor_code();
    let mut responder = make_responder(args);
    let mut history = HistoryLog::new();

    print_header(&persona);

    // Opening greeting, same staging as a real turn
    let thought = responder.monologue("a student just joined office hours");
    println!("{}", format!("💭 {}", thought).dimmed());
    let greeting = responder.pick_reply(ReplyCategory::Greeting);
    println!("{}", format!("🎓 {}: {}", persona.name, greeting).green());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", "💬 You: ".bold());
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if ["quit", "exit", "bye"]
            .iter()
            .any(|cmd| line.eq_ignore_ascii_case(cmd))
        {
            println!("\n👋 Thanks for chatting! Keep coding and stay curious!");
            break;
        }
        if line.eq_ignore_ascii_case("joke") {
            tell_joke(&mut responder, &persona);
            continue;
        }

        handle_turn(line, &mut responder, &persona, &mut history);
    }

    println!("Session ended. Exchanges: {}", history.len());
}

/// One demo turn with the full cognitive trace.
fn handle_turn(
    message: &str,
    responder: &mut PersonaResponder,
    persona: &PersonaState,
    history: &mut HistoryLog,
) {
    let analysis = responder.assess(message);
    println!(
        "{}",
        format!(
            "🔍 topic: {} | enthusiasm: {} | joke: {} | teaching: {}",
            analysis.topic,
            analysis.enthusiasm,
            if analysis.tell_joke { "yes" } else { "no" },
            if analysis.teaching_opportunity { "yes" } else { "no" },
        )
        .dimmed()
    );

    let thought = responder.monologue(message);
    println!("{}", format!("💭 {}", thought).dimmed());

    // Eligible turns joke ~70% of the time
    if analysis.tell_joke && responder.joke_gate() {
        tell_joke(responder, persona);
    }

    let response = responder.pick_reply(classify(message));
    println!("{}", format!("🎓 {}: {}", persona.name, response).green());
    println!();

    history.append(Exchange::new(message, thought, response));
}

fn tell_joke(responder: &mut PersonaResponder, persona: &PersonaState) {
    let joke = responder.pick_joke();
    println!("{}", format!("😂 {}: {}", persona.name, joke.joke).yellow());
    if let Some(explanation) = joke.explanation {
        println!("{}", format!("   ({})", explanation).dimmed());
    }
}

/// Print demo header
fn print_header(persona: &PersonaState) {
    println!("{}", "=====================================================".bold());
    println!(
        "{}",
        format!("  {} v{} - {}", persona.name, VERSION, persona.role).bold()
    );
    println!("{}", "=====================================================".bold());
    println!("Type 'quit', 'exit', or 'bye' to end the conversation");
    println!("Type 'joke' if you want to hear a programming joke!");
    println!();
}

/// Run the HTTP + WebSocket server
async fn run_serve(args: &Args) {
    let port = args.port.unwrap_or_else(|| {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    });
    let addr = format!("127.0.0.1:{}", port);
    let config = RelayConfig {
        response_delay: std::time::Duration::from_millis(args.response_delay_ms),
    };

    println!("🚀 Professor Code's Local Soul Engine starting...");
    if let Err(e) = run_server(&addr, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
