//! # Main Entry Point
//!
//! Initializes the bot:
//! - Domain: configuration
//! - Infrastructure: Matrix, LLM
//! - Application: registry, dispatcher
//! - Interface: demo skill catalog

use anyhow::{Context, Result};
use clap::Parser;
use matrix_sdk::{
    Client, RoomMemberships,
    config::SyncSettings,
    room::Room,
    ruma::events::room::{
        member::{MembershipState, StrippedRoomMemberEvent},
        message::SyncRoomMessageEvent,
    },
};
use std::fs;
use std::sync::Arc;

use skillkit::application::dispatcher::{DispatcherSettings, SkillDispatcher, preview};
use skillkit::application::registry::SkillRegistry;
use skillkit::domain::config::AppConfig;
use skillkit::domain::context::{HandlerContext, Member, Sender};
use skillkit::domain::traits::LlmProvider;
use skillkit::infrastructure::llm::LlmClient;
use skillkit::infrastructure::matrix::MatrixService;
use skillkit::interface::catalog::build_catalog;

#[derive(Parser, Debug)]
#[command(about = "Skill-based chat bot")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let config = AppConfig::load(&args.config)?;

    // 2. Logging Setup
    if !std::path::Path::new("data").exists() {
        fs::create_dir("data").context("Failed to create data directory")?;
    }

    // Clear previous session log
    let log_path = std::path::Path::new("data/session.log");
    if log_path.exists() {
        let _ = fs::remove_file(log_path);
    }

    let file_appender = tracing_appender::rolling::never("data", "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            "info,matrix_sdk=warn,matrix_sdk_base=warn,matrix_sdk_crypto=error,ruma=warn,hyper=warn",
        )
    });

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("Starting skillkit bot...");
    if config.agent.api_key.is_some() {
        tracing::warn!("agent.api_key is set in the config file; prefer api_key_env");
    }

    // 3. LLM (optional: the agent skill is skipped when unavailable)
    let llm: Option<Arc<dyn LlmProvider>> = match LlmClient::from_config(&config.agent) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::warn!("LLM disabled: {}", e);
            None
        }
    };

    // 4. Skill Catalog
    let catalog = build_catalog(llm);
    let registry = SkillRegistry::new(catalog).context("Invalid skill catalog")?;
    if registry.skill_count() == 0 {
        tracing::warn!("No skills registered; the bot will not respond to commands");
    } else {
        tracing::info!("Registered {} skills", registry.skill_count());
    }

    let dispatcher = Arc::new(SkillDispatcher::new(
        registry,
        DispatcherSettings {
            admins: config.system.admin.clone(),
            verbose_log: config.system.verbose_log,
        },
    ));

    // 5. Matrix Setup
    let client = Client::builder()
        .homeserver_url(&config.services.matrix.homeserver)
        .build()
        .await?;

    client
        .matrix_auth()
        .login_username(
            &config.services.matrix.username,
            &config.services.matrix.password,
        )
        .send()
        .await?;

    tracing::info!("Logged in as {}", config.services.matrix.username);

    // 6. Event Loop
    let start_time = std::time::SystemTime::now();
    let loop_dispatcher = dispatcher.clone();

    client.add_event_handler(move |ev: SyncRoomMessageEvent, room: Room| {
        let dispatcher = loop_dispatcher.clone();

        async move {
            let Some(original_msg) = ev.as_original() else {
                return;
            };

            // Ignore events older than start_time
            let ts = ev.origin_server_ts();
            let event_time =
                std::time::UNIX_EPOCH + std::time::Duration::from_millis(ts.get().into());
            if event_time < start_time {
                return;
            }

            let matrix_sdk::ruma::events::room::message::MessageType::Text(text_content) =
                &original_msg.content.msgtype
            else {
                return;
            };

            if original_msg.sender == room.own_user_id() {
                return;
            }

            let body = text_content.body.clone();
            let sender_id = original_msg.sender.to_string();
            tracing::info!("Received message from {}: {}", sender_id, preview(&body));

            let members = match room.members(RoomMemberships::JOIN).await {
                Ok(list) => list
                    .iter()
                    .map(|m| Member {
                        address: m.user_id().to_string(),
                        display_name: m.display_name().map(|n| n.to_string()),
                    })
                    .collect(),
                Err(e) => {
                    tracing::warn!("Failed to fetch members for {}: {}", room.room_id(), e);
                    Vec::new()
                }
            };

            let sender = Sender {
                address: sender_id.clone(),
                display_name: members
                    .iter()
                    .find(|m| m.address == sender_id)
                    .and_then(|m| m.display_name.clone()),
            };

            let chat = Arc::new(MatrixService::new(room));
            let ctx = HandlerContext::new(chat, sender, members, body.clone());

            if let Err(e) = dispatcher.dispatch(&body, ctx).await {
                tracing::error!("Failed to dispatch message: {}", e);
            }
        }
    });

    // Handle Invites
    client.add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
        if ev.content.membership == MembershipState::Invite {
            let _ = room.join().await;
        }
    });

    // 7. Sync
    client.sync(SyncSettings::default()).await?;

    Ok(())
}
