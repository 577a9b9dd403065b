use clap::{Parser, Subcommand};
use concierge_rs::concierge::config::Config;
use concierge_rs::concierge::tools::build_registry;
use concierge_rs::contract::dispatch::Dispatcher;
use dotenv::dotenv;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered tool with its selection description
    Tools,
    /// Invoke a single tool by name, as the orchestrator would
    Invoke {
        /// Tool name, e.g. 'currency_converter'
        #[arg(short, long)]
        tool: String,

        /// Input: a JSON object for structured tools, plain text otherwise
        #[arg(short, long, default_value = "")]
        input: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let config = Config::from_env();
    let registry = build_registry(&config);

    match args.command {
        Commands::Tools => {
            for tool in registry.iter() {
                println!("{:<20} {}", tool.name(), tool.description());
            }
        }
        Commands::Invoke { tool, input } => {
            // Structured tools take a JSON object; anything else rides as
            // free text and is coerced by the contract layer.
            let input: Value = serde_json::from_str(&input)
                .unwrap_or_else(|_| Value::String(input.clone()));

            let dispatcher = Dispatcher::new(registry);
            let reply = dispatcher.invoke(&tool, input).await;

            println!("{}", reply.text);
            if !reply.ok {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
