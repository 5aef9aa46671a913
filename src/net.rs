use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::llt::{Comparison, LoadReport};
use crate::state::SharedSessionState;
use crate::vehicle::{Vehicle, VehicleConfig};

fn empty_object() -> Value {
    Value::Object(Map::new())
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    Ping,
    Load {
        slot: String,
        #[serde(default = "empty_object")]
        config: Value,
    },
    Update {
        slot: String,
        #[serde(default = "empty_object")]
        config: Value,
    },
    Report {
        slot: String,
    },
    Remove {
        slot: String,
    },
    Compare {
        baseline: String,
        candidate: String,
    },
    Evaluate {
        #[serde(default = "empty_object")]
        config: Value,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    Welcome {
        session_id: String,
    },
    Pong,
    Loaded {
        slot: String,
        config: VehicleConfig,
    },
    Report {
        slot: Option<String>,
        report: LoadReport,
    },
    Removed {
        slot: String,
    },
    Comparison {
        baseline: String,
        candidate: String,
        comparison: Comparison,
    },
    Error {
        message: String,
    },
}

impl ServerMessage {
    fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error { message: message.into() }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"type":"error","message":"serialization failed: {e}"}}"#))
    }
}

/// Apply one text frame to the session and build the reply.
pub async fn handle_text(state: &Mutex<SharedSessionState>, session_id: &str, text: &str) -> ServerMessage {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(m) => m,
        Err(e) => return ServerMessage::error(format!("bad message: {e}")),
    };

    let mut st = state.lock().await;
    let reply = match msg {
        ClientMessage::Ping => Ok(ServerMessage::Pong),

        ClientMessage::Load { slot, config } => st
            .load(session_id, &slot, &config)
            .map(|info| ServerMessage::Loaded { slot: info.slot, config: info.config }),

        ClientMessage::Update { slot, config } => st
            .update(session_id, &slot, &config)
            .map(|info| ServerMessage::Loaded { slot: info.slot, config: info.config }),

        ClientMessage::Report { slot } => st
            .report(session_id, &slot)
            .map(|report| ServerMessage::Report { slot: Some(slot), report }),

        ClientMessage::Remove { slot } => st
            .remove(session_id, &slot)
            .map(|()| ServerMessage::Removed { slot }),

        ClientMessage::Compare { baseline, candidate } => st
            .compare(session_id, &baseline, &candidate)
            .map(|comparison| ServerMessage::Comparison { baseline, candidate, comparison }),

        ClientMessage::Evaluate { config } => {
            let result = VehicleConfig::from_value(config)
                .and_then(Vehicle::new)
                .and_then(|mut v| v.report());
            match result {
                Ok(report) => {
                    st.evaluations += 1;
                    Ok(ServerMessage::Report { slot: None, report })
                }
                Err(e) => Err(e.to_string()),
            }
        }
    };

    reply.unwrap_or_else(|message| {
        warn!(session = session_id, %message, "request rejected");
        ServerMessage::Error { message }
    })
}

pub async fn start_websocket_server(state: Arc<Mutex<SharedSessionState>>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("WebSocket listening on ws://{}", listener.local_addr()?);

    loop {
        let (raw, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("accept failed: {e}");
                continue;
            }
        };
        tokio::spawn(handle_connection(Arc::clone(&state), raw, peer));
    }
}

async fn handle_connection(state: Arc<Mutex<SharedSessionState>>, raw: TcpStream, peer: SocketAddr) {
    let ws = match accept_async(raw).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!(%peer, "WebSocket handshake failed: {e}");
            return;
        }
    };
    let (mut write, mut read) = ws.split();

    // -------------------------------
    // 1) Outgoing message channel + send loop
    // -------------------------------
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if write.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // -------------------------------
    // 2) Session
    // -------------------------------
    let session_id = state.lock().await.add_session();
    info!(%peer, session = %session_id, "client connected");
    let _ = tx.send(ServerMessage::Welcome { session_id: session_id.clone() }.to_json());

    // -------------------------------
    // 3) Receive loop
    // -------------------------------
    while let Some(msg) = read.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(_) => break,
        };
        if !msg.is_text() {
            continue;
        }
        let text = match msg.to_text() {
            Ok(t) => t,
            Err(_) => continue,
        };

        let reply = handle_text(&state, &session_id, text).await;
        debug!(session = %session_id, "reply ready");
        if tx.send(reply.to_json()).is_err() {
            break;
        }
    }

    info!(session = %session_id, "client disconnected");
    state.lock().await.remove_session(&session_id);
}
