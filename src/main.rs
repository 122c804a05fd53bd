use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bigbluebutton_client::{
    ApiError, BigBlueButtonClient, CreateMeetingParams, JoinParams,
};

#[derive(Parser)]
#[command(name = "bbb-client", version, about = "BigBlueButton API client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a meeting
    Create(CreateArgs),
    /// Print a signed join URL
    Join {
        #[arg(long)]
        meeting_id: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Check whether a meeting is running
    Running {
        #[arg(long)]
        meeting_id: String,
    },
    /// Show meeting details and attendees
    Info {
        #[arg(long)]
        meeting_id: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// End a meeting
    End {
        #[arg(long)]
        meeting_id: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// List meetings on the server
    List,
    /// Show the server API version
    Version,
}

#[derive(Args)]
struct CreateArgs {
    /// Meeting id, generated when omitted
    #[arg(long)]
    meeting_id: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    attendee_pw: Option<String>,
    #[arg(long)]
    moderator_pw: Option<String>,
    /// Send record=true; omitted otherwise so the server default applies
    #[arg(long)]
    record: bool,
    #[arg(long)]
    max_participants: Option<u32>,
    /// Duration in minutes
    #[arg(long)]
    duration: Option<u32>,
    #[arg(long)]
    logout_url: Option<String>,
    #[arg(long)]
    welcome: Option<String>,
    /// Metadata as key=value, repeatable
    #[arg(long = "meta", value_parser = parse_key_value)]
    metadata: Vec<(String, String)>,
}

impl From<CreateArgs> for CreateMeetingParams {
    fn from(args: CreateArgs) -> Self {
        CreateMeetingParams {
            meeting_id: args.meeting_id,
            name: args.name,
            attendee_pw: args.attendee_pw,
            moderator_pw: args.moderator_pw,
            record: args.record.then_some(true),
            max_participants: args.max_participants,
            duration: args.duration,
            logout_url: args.logout_url,
            welcome: args.welcome,
            metadata: args.metadata,
            ..Default::default()
        }
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {}", s))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Client(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

async fn run(command: Command) -> Result<(), ApiError> {
    let client = BigBlueButtonClient::from_env()?;

    match command {
        Command::Create(args) => {
            let params = CreateMeetingParams::from(args);
            let result = client.create_meeting(&params).await?;
            info!("Meeting {} is ready", result.meeting_id);
            print_json(&result)
        }
        Command::Join {
            meeting_id,
            full_name,
            password,
            user_id,
        } => {
            let mut params = JoinParams::new(full_name, meeting_id, password);
            params.user_id = user_id;
            println!("{}", client.join_url(&params));
            Ok(())
        }
        Command::Running { meeting_id } => {
            let running = client.is_meeting_running(&meeting_id).await?;
            print_json(&serde_json::json!({ "meeting_id": meeting_id, "running": running }))
        }
        Command::Info {
            meeting_id,
            password,
        } => {
            let info = client
                .get_meeting_info(&meeting_id, password.as_deref())
                .await?;
            print_json(&info)
        }
        Command::End {
            meeting_id,
            password,
        } => {
            let result = client.end_meeting(&meeting_id, password.as_deref()).await?;
            print_json(&result)
        }
        Command::List => {
            let meetings = client.get_meetings().await?;
            info!("Found {} meetings", meetings.len());
            print_json(&meetings)
        }
        Command::Version => {
            let version = client.api_version().await?;
            print_json(&serde_json::json!({ "version": version }))
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing for logging, RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
