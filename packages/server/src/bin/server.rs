//! TutorLink chat and call-signaling relay.
//!
//! Run with:
//! ```not_rust
//! JWT_SECRET=dev-secret cargo run --bin tutorlink-server
//! cargo run --bin tutorlink-server -- --jwt-secret dev-secret --fixtures fixtures/demo.json
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use tokio::sync::Mutex;

use tutorlink_server::{
    config::ServerConfig,
    infrastructure::{
        auth::JwtCredentialVerifier,
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryConnectionRegistry,
        repository::{
            Fixtures, InMemoryConversationRepository, InMemoryMessageRepository,
            InMemoryUserDirectory,
        },
    },
    ui::{AppState, Server, state::Dependencies},
};
use tutorlink_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Repositories (seeded from fixtures when given)
    // 2. Connection registry and MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repositories
    let (profiles, conversations) = match &config.fixtures {
        Some(path) => match Fixtures::load(path).and_then(Fixtures::into_parts) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::error!("Failed to load fixtures: {}", e);
                std::process::exit(1);
            }
        },
        None => (Vec::new(), Vec::new()),
    };
    tracing::info!(
        "Seeded {} user(s) and {} request(s)",
        profiles.len(),
        conversations.len()
    );

    // 2. Create Registry and MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let deps = Dependencies {
        verifier: Arc::new(JwtCredentialVerifier::new(&config.jwt_secret)),
        conversations: Arc::new(InMemoryConversationRepository::with_conversations(
            conversations,
        )),
        messages: Arc::new(InMemoryMessageRepository::new()),
        users: Arc::new(InMemoryUserDirectory::new(profiles)),
        registry: Arc::new(InMemoryConnectionRegistry::new()),
        message_pusher: Arc::new(WebSocketMessagePusher::new(message_pusher_clients)),
        clock: Arc::new(SystemClock),
    };

    // 3. Create UseCases
    let state = Arc::new(AppState::new(deps));

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
