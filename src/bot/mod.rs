//! Chat bot answering `/start` and `/list` via Telegram long polling.

pub mod commands;
pub mod telegram;

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::catalog::BranchDirectory;
use crate::error::Result;

pub use telegram::{BotTransport, TelegramApi, Update};

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Answers a single update; failures are logged and never stop the bot
pub async fn handle_update(
    transport: &dyn BotTransport,
    directory: &dyn BranchDirectory,
    update: &Update,
) {
    let Some(message) = &update.message else {
        return;
    };
    let Some(text) = message.text.as_deref() else {
        return;
    };
    let Some(reply) = commands::reply_for(text, directory) else {
        debug!(update_id = update.update_id, "Ignoring non-command message");
        return;
    };
    if let Err(e) = transport.send_message(message.chat.id, &reply).await {
        warn!(chat_id = message.chat.id, error = %e, "Failed to send reply");
    }
}

/// Polls for updates forever, handling each one on its own task
pub async fn run(
    transport: Arc<dyn BotTransport>,
    directory: Arc<dyn BranchDirectory>,
    poll_timeout: Duration,
) -> Result<()> {
    info!("Bot Ready.");
    let mut offset = 0;
    loop {
        let updates = match transport.get_updates(offset, poll_timeout).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, "Polling for updates failed, retrying in {}s", RETRY_DELAY.as_secs());
                tokio::time::sleep(RETRY_DELAY).await;
                continue;
            }
        };
        offset = next_offset(offset, &updates);
        for update in updates {
            let transport = Arc::clone(&transport);
            let directory = Arc::clone(&directory);
            tokio::spawn(async move {
                handle_update(transport.as_ref(), directory.as_ref(), &update).await;
            });
        }
    }
}

/// Offset acknowledging every update in `updates`
fn next_offset(current: i64, updates: &[Update]) -> i64 {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .map_or(current, |next| next.max(current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticBranchDirectory;
    use crate::error::StockError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use super::telegram::{Chat, Message};

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<(i64, String)>>,
        fail_sends: bool,
    }

    #[async_trait]
    impl BotTransport for RecordingTransport {
        async fn get_updates(&self, _offset: i64, _timeout: Duration) -> Result<Vec<Update>> {
            Ok(Vec::new())
        }

        async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
            if self.fail_sends {
                return Err(StockError::Bot {
                    message: "blocked".to_string(),
                });
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn update(id: i64, text: Option<&str>) -> Update {
        Update {
            update_id: id,
            message: Some(Message {
                message_id: id,
                chat: Chat { id: 99 },
                text: text.map(str::to_string),
            }),
        }
    }

    #[tokio::test]
    async fn answers_commands_in_same_chat() {
        let transport = RecordingTransport::default();
        let directory = StaticBranchDirectory::default();
        handle_update(&transport, &directory, &update(1, Some("/list"))).await;

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 99);
        assert!(sent[0].1.contains("Gohlis"));
    }

    #[tokio::test]
    async fn ignores_plain_text_and_empty_messages() {
        let transport = RecordingTransport::default();
        let directory = StaticBranchDirectory::default();
        handle_update(&transport, &directory, &update(1, Some("hallo"))).await;
        handle_update(&transport, &directory, &update(2, None)).await;
        handle_update(&transport, &directory, &Update { update_id: 3, message: None }).await;
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn send_failures_do_not_panic() {
        let transport = RecordingTransport {
            fail_sends: true,
            ..Default::default()
        };
        handle_update(&transport, &StaticBranchDirectory::default(), &update(1, Some("/start"))).await;
    }

    #[test]
    fn offset_moves_past_latest_update() {
        assert_eq!(next_offset(0, &[]), 0);
        assert_eq!(next_offset(5, &[update(7, None), update(9, None)]), 10);
        assert_eq!(next_offset(20, &[update(7, None)]), 20);
    }
}
