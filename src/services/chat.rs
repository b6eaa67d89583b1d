//! Chat store collaborator and its observer interface

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::models::ChatMessage;

/// Destination for outgoing messages
///
/// The selection session only hands off a fully formed message; rendering,
/// persistence and delivery are the store's concern.
#[async_trait]
pub trait ChatStore: Send + Sync {
    async fn append_message(&self, friend: &str, message: ChatMessage) -> AppResult<()>;
}

/// Notified after a message has been stored
#[async_trait]
pub trait ChatObserver: Send + Sync {
    async fn on_message(&self, friend: &str, message: &ChatMessage);
}

/// Per-friend message lists kept in memory
#[derive(Default)]
pub struct InMemoryChatStore {
    messages: RwLock<HashMap<String, Vec<ChatMessage>>>,
    observers: RwLock<Vec<Arc<dyn ChatObserver>>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, observer: Arc<dyn ChatObserver>) {
        self.observers.write().await.push(observer);
    }

    /// Messages exchanged with `friend`, oldest first
    pub async fn messages(&self, friend: &str) -> Vec<ChatMessage> {
        self.messages
            .read()
            .await
            .get(friend)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn friends(&self) -> Vec<String> {
        let mut friends: Vec<String> = self.messages.read().await.keys().cloned().collect();
        friends.sort();
        friends
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn append_message(&self, friend: &str, message: ChatMessage) -> AppResult<()> {
        let friend = friend.trim();
        if friend.is_empty() {
            return Err(AppError::chat_store("friend name must not be empty"));
        }

        self.messages
            .write()
            .await
            .entry(friend.to_string())
            .or_default()
            .push(message.clone());
        debug!("Stored {:?} message for {}", message.kind, friend);

        // Snapshot so observers may subscribe others without deadlocking.
        let observers: Vec<Arc<dyn ChatObserver>> = self.observers.read().await.clone();
        for observer in observers {
            observer.on_message(friend, &message).await;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingObserver {
        seen: AtomicUsize,
    }

    #[async_trait]
    impl ChatObserver for CountingObserver {
        async fn on_message(&self, _friend: &str, message: &ChatMessage) {
            if message.kind == MessageKind::Sent {
                self.seen.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn test_messages_are_kept_per_friend_in_order() {
        let store = InMemoryChatStore::new();
        store
            .append_message("Ana", ChatMessage::sent_text("hola", "10:00"))
            .await
            .unwrap();
        store
            .append_message("Luis", ChatMessage::sent_text("buenas", "10:01"))
            .await
            .unwrap();
        store
            .append_message("Ana", ChatMessage::sent_text("¿qué tal?", "10:02"))
            .await
            .unwrap();

        let ana = store.messages("Ana").await;
        assert_eq!(ana.len(), 2);
        assert_eq!(ana[0].content, "hola");
        assert_eq!(ana[1].content, "¿qué tal?");
        assert_eq!(store.friends().await, vec!["Ana", "Luis"]);
        assert!(store.messages("Nadie").await.is_empty());
    }

    #[tokio::test]
    async fn test_observers_are_notified() {
        let store = InMemoryChatStore::new();
        let observer = Arc::new(CountingObserver::default());
        store.subscribe(observer.clone()).await;

        store
            .append_message("Ana", ChatMessage::sent_text("hola", "10:00"))
            .await
            .unwrap();
        store
            .append_message(
                "Ana",
                ChatMessage::sent_pictograms("casa", "10:01", vec!["https://img/1".into()]),
            )
            .await
            .unwrap();

        assert_eq!(observer.seen.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_blank_friend_is_rejected() {
        let store = InMemoryChatStore::new();
        let result = store
            .append_message("  ", ChatMessage::sent_text("hola", "10:00"))
            .await;
        assert!(matches!(result, Err(AppError::ChatStore { .. })));
    }

    #[test]
    fn test_message_serializes_with_type_field() {
        let message =
            ChatMessage::sent_pictograms("casa agua", "12:30", vec!["https://img/1".into()]);
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "sent");
        assert_eq!(value["image_urls"][0], "https://img/1");

        let text = serde_json::to_value(ChatMessage::sent_text("hola", "12:31")).unwrap();
        assert!(text.get("image_urls").is_none());
    }
}
