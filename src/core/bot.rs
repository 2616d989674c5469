//! Conversation handling: `/start`, file uploads and the top-N reply.

use crate::core::engine::FancyEngine;
use crate::core::ingest::FileKind;
use crate::core::render::{remainder_file, Replies, REMAINDER_FILE_NAME};
use crate::core::session::SessionStore;
use crate::core::{Candidate, ChatApi, ConfigProvider};
use crate::domain::chat::{Document, Message, Update};
use crate::utils::error::{FancyError, Result};
use chrono::Utc;
use std::future::Future;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_secs(5);

pub struct FancyBot<A: ChatApi, C: ConfigProvider> {
    api: A,
    config: C,
    engine: FancyEngine,
    sessions: SessionStore,
    replies: Replies,
}

impl<A: ChatApi, C: ConfigProvider> FancyBot<A, C> {
    pub fn new(api: A, config: C) -> Self {
        Self {
            engine: FancyEngine::new(config.scoring_policy())
                .with_max_part_bytes(config.max_upload_bytes()),
            sessions: SessionStore::new(config.pending_ttl_secs()),
            replies: Replies::new(config.footer()),
            api,
            config,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Long-polls until `shutdown` resolves. Transport errors are retried.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut offset = 0;

        tracing::info!("🤖 Bot polling started");
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Bot polling stopped");
                    break;
                }
                result = self.poll_once(offset) => match result {
                    Ok(next) => offset = next,
                    Err(e) => {
                        tracing::warn!(
                            "❌ Polling failed: {} (Category: {:?}); retrying in {:?}",
                            e,
                            e.category(),
                            RETRY_DELAY
                        );
                        tokio::select! {
                            _ = &mut shutdown => {
                                tracing::info!("Bot polling stopped during retry delay");
                                break;
                            }
                            _ = tokio::time::sleep(RETRY_DELAY) => {}
                        }
                    }
                },
            }
        }
    }

    /// Fetches and handles one batch of updates, returning the next offset.
    pub async fn poll_once(&self, offset: i64) -> Result<i64> {
        let updates = self
            .api
            .get_updates(offset, self.config.poll_timeout_secs())
            .await?;

        let purged = self.sessions.purge_expired(Utc::now());
        if purged > 0 {
            tracing::debug!("Purged {} expired pending requests", purged);
        }

        let mut next = offset;
        for update in updates {
            next = next.max(update.update_id + 1);
            let update_id = update.update_id;
            if let Err(e) = self.handle_update(update).await {
                tracing::error!("Failed to handle update {}: {}", update_id, e);
            }
        }
        Ok(next)
    }

    pub async fn handle_update(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            return Ok(());
        };

        if let Some(document) = &message.document {
            return self.handle_document(&message, document).await;
        }

        match message.text.as_deref().map(str::trim) {
            Some(text) if is_start_command(text) => {
                self.api
                    .send_message(message.chat.id, &self.replies.welcome(), true)
                    .await
            }
            Some(text) => self.handle_text(&message, text).await,
            None => Ok(()),
        }
    }

    async fn handle_document(&self, message: &Message, document: &Document) -> Result<()> {
        let chat_id = message.chat.id;
        let user_id = message.user_id();
        tracing::info!(
            "📥 Document from user {}: {:?}",
            user_id,
            document.file_name
        );

        self.api
            .send_message(chat_id, &self.replies.processing(), false)
            .await?;

        match self.ingest_document(document).await {
            Ok(candidates) if candidates.is_empty() => {
                self.api
                    .send_message(chat_id, &self.replies.no_numbers(), false)
                    .await
            }
            Ok(candidates) => {
                let count = candidates.len();
                self.sessions.insert(user_id, candidates, Utc::now());
                self.api
                    .send_message(chat_id, &self.replies.numbers_found(count), true)
                    .await
            }
            Err(FancyError::UnsupportedFileError { file_name }) => {
                tracing::info!("Rejected unsupported file {}", file_name);
                self.api
                    .send_message(chat_id, &self.replies.unsupported_file(), false)
                    .await
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Processing failed for user {}: {} (Severity: {:?})",
                    user_id,
                    e,
                    e.severity()
                );
                self.api
                    .send_message(chat_id, &self.replies.error(&e.user_friendly_message()), false)
                    .await
            }
        }
    }

    async fn ingest_document(&self, document: &Document) -> Result<Vec<Candidate>> {
        let file_name = document.file_name.clone().unwrap_or_default();
        if !FileKind::from_file_name(&file_name).is_supported() {
            return Err(FancyError::UnsupportedFileError { file_name });
        }

        let limit = self.config.max_upload_bytes();
        if let Some(size) = document.file_size {
            check_size(size, limit)?;
        }

        let data = self.api.get_file_bytes(&document.file_id).await?;
        check_size(data.len() as u64, limit)?;

        self.engine.ingest(&file_name, &data)
    }

    async fn handle_text(&self, message: &Message, text: &str) -> Result<()> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(());
        }

        let user_id = message.user_id();
        let Some(candidates) = self.sessions.take(user_id, Utc::now()) else {
            tracing::debug!("Ignoring count from user {} without a pending file", user_id);
            return Ok(());
        };

        // 超出 usize 範圍視為全部
        let count = text.parse::<usize>().unwrap_or(usize::MAX);
        let chat_id = message.chat.id;

        self.api
            .send_message(chat_id, &self.replies.sorting(), false)
            .await?;

        let split = self.engine.select(&candidates, count);
        if split.selected.is_empty() && split.remainder.is_empty() {
            return self
                .api
                .send_message(chat_id, &self.replies.no_fancy(), false)
                .await;
        }

        for reply in self.replies.top_messages(&split.selected) {
            self.api.send_message(chat_id, &reply, true).await?;
        }

        if !split.remainder.is_empty() {
            tracing::info!(
                "📄 Sending {} remaining numbers to user {}",
                split.remainder.len(),
                user_id
            );
            self.api
                .send_document(
                    chat_id,
                    REMAINDER_FILE_NAME,
                    remainder_file(&split.remainder).into_bytes(),
                    &self.replies.remainder_caption(),
                )
                .await?;
        }

        Ok(())
    }
}

fn is_start_command(text: &str) -> bool {
    text == "/start" || text.starts_with("/start ") || text.starts_with("/start@")
}

fn check_size(size: u64, limit: u64) -> Result<()> {
    if size > limit {
        return Err(FancyError::FileTooLargeError { size, limit });
    }
    Ok(())
}
