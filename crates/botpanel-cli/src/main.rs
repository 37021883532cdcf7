// Pawz Bot Panel — command-line admin panel
//
// Reads the token and command parameters from flags/env, performs one Bot
// API operation through botpanel-core, and prints the payload as JSON.

mod commands;
mod render;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use botpanel_core::ChatTarget;

#[derive(Parser, Debug)]
#[command(name = "pawz-botpanel", version, about = "Admin panel for a Telegram bot")]
pub struct Cli {
    /// Bot token from @BotFather
    #[arg(long, env = "PAW_BOT_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Config file (default: ~/.paw/botpanel.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the bot's identity (getMe)
    Me,
    /// List chats and contacts found in recent updates
    Discover {
        /// Updates to read (1-100, default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
        limit: Option<u32>,
        /// Only groups, supergroups and channels
        #[arg(long)]
        groups_only: bool,
    },
    /// Show a chat (getChat)
    Chat {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
    },
    /// Send a text message
    Send {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
        #[arg(long)]
        text: String,
        /// Markdown, MarkdownV2 or HTML
        #[arg(long)]
        parse_mode: Option<String>,
        /// Deliver without notification
        #[arg(long)]
        silent: bool,
        #[arg(long)]
        reply_to: Option<i64>,
    },
    /// Send a photo from a local file or a URL / file_id
    Photo {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        file: Option<PathBuf>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Change a group's title
    Title {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
        #[arg(long)]
        title: String,
    },
    /// Change a group's description (empty clears it)
    Description {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Change a group's photo
    ChatPhoto {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
        #[arg(long)]
        file: PathBuf,
    },
    /// Export a new primary invite link
    InviteLink {
        #[arg(long, value_parser = parse_chat)]
        chat: ChatTarget,
    },
    /// Change the bot's display name
    SetName {
        #[arg(long)]
        name: String,
    },
    /// Change the bot's description (empty clears it)
    SetDescription {
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Change the bot's profile photo
    SetPhoto {
        #[arg(long)]
        file: PathBuf,
    },
    /// Call any endpoint: -p key=value for fields, --file key=path for uploads
    Raw {
        endpoint: String,
        #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        #[arg(long = "file", value_parser = parse_key_path)]
        files: Vec<(String, PathBuf)>,
    },
    /// Build a WhatsApp click-to-chat link
    WaLink {
        /// International number (default from config)
        #[arg(long)]
        number: Option<String>,
        /// Pre-filled message (default from config)
        #[arg(long)]
        message: Option<String>,
    },
}

fn parse_chat(raw: &str) -> Result<ChatTarget, String> {
    ChatTarget::parse(raw).map_err(|e| e.to_string())
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

fn parse_key_path(raw: &str) -> Result<(String, PathBuf), String> {
    parse_key_value(raw).map(|(k, v)| (k, PathBuf::from(v)))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(Some(env_logger::fmt::TimestampPrecision::Millis))
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", render::error_kind(&e), e);
            ExitCode::from(render::exit_code(&e))
        }
    }
}
