use clap::{Parser, Subcommand};
use console_underscore::animation::Animation;
use console_underscore::config::{self, SiteConfig};
use console_underscore::document::MemoryDocument;
use console_underscore::terminal::{self, TerminalDocument};
use console_underscore::{markup, output};
use std::path::PathBuf;
use std::time::Duration;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "console-underscore")]
#[command(about = "Typing title animation with a blinking console cursor")]
#[command(long_about = "\
Typing title animation with a blinking console cursor

The site name is typed out one character per tick, rests, is erased back
down to a short prefix, rests again, and repeats. A cursor next to it
blinks on its own timer.

  $>s_  →  $>swift build blog_  →  $>swi_  →  …

Run 'console-underscore gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play the animation in this terminal
    Play {
        /// Stop after this many milliseconds (default: run until interrupted)
        #[arg(long)]
        duration_ms: Option<u64>,
    },
    /// Print the events of a run in virtual time, without waiting
    Trace {
        /// Virtual milliseconds to simulate
        #[arg(long, default_value_t = 10_000)]
        duration_ms: u64,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the config and the title against it
    Check,
    /// Print the header fragment with the title, cursor, and script tag
    Markup,
    /// Print the browser script with configured values filled in
    Script,
    /// Write header.html and the browser script into a directory
    Export {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let load = || config::load_config(&cli.config);

    match cli.command {
        Command::Play { duration_ms } => {
            let site_config = load()?;
            let targets = &site_config.targets;
            let document = TerminalDocument::new(
                std::io::stdout(),
                targets.title(),
                &site_config.site.name,
                targets.cursor(),
                &targets.cursor_class,
                &targets.hidden_class,
            );
            let mut animation = Animation::start(document, &site_config.animation, targets)?;
            animation.document_mut().redraw();
            terminal::play(&mut animation, duration_ms.map(Duration::from_millis))?;
            println!();
        }
        Command::Trace { duration_ms, json } => {
            let site_config = load()?;
            let mut animation = start_in_memory(&site_config)?;
            let events = animation.advance(Duration::from_millis(duration_ms));
            animation.stop();
            if json {
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                output::print_trace(&events);
            }
        }
        Command::Check => {
            let site_config = load()?;
            output::print_check(&site_config);
            println!("==> Config is valid");
        }
        Command::Markup => {
            let site_config = load()?;
            println!("{}", markup::render_header(&site_config).into_string());
        }
        Command::Script => {
            let site_config = load()?;
            print!("{}", markup::script_asset(&site_config)?);
        }
        Command::Export { output } => {
            let site_config = load()?;
            for path in markup::write_assets(&site_config, &output)? {
                println!("Wrote {}", path.display());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Start against an in-memory copy of the header the site renders.
fn start_in_memory(
    site_config: &SiteConfig,
) -> Result<Animation<MemoryDocument>, console_underscore::animator::AnimationError> {
    let targets = &site_config.targets;
    let document = MemoryDocument::header(
        &targets.title_class,
        &site_config.site.name,
        &targets.cursor_id,
        &targets.cursor_class,
    );
    Animation::start(document, &site_config.animation, targets)
}
