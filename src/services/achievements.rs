//! In-memory achievement tracking driven by chat store notifications

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

use super::chat::ChatObserver;
use crate::models::{ChatMessage, MessageKind};
use crate::utils::Clock;

/// Two sent messages closer than this count towards `SpeedTyper`
const SPEED_WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AchievementId {
    FirstMessage,
    PictogramMaster,
    SocialButterfly,
    SpeedTyper,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub progress: u32,
    pub target: u32,
    pub unlocked: bool,
}

impl Achievement {
    fn new(
        id: AchievementId,
        title: &'static str,
        description: &'static str,
        icon: &'static str,
        target: u32,
    ) -> Self {
        Self {
            id,
            title,
            description,
            icon,
            progress: 0,
            target,
            unlocked: false,
        }
    }

    /// Add progress; returns true if this call unlocked it
    fn advance(&mut self, by: u32) -> bool {
        if self.unlocked || by == 0 {
            return false;
        }
        self.progress = self.progress.saturating_add(by).min(self.target);
        if self.progress >= self.target {
            self.unlocked = true;
        }
        self.unlocked
    }
}

fn catalogue() -> Vec<Achievement> {
    vec![
        Achievement::new(
            AchievementId::FirstMessage,
            "¡Primer Mensaje!",
            "Enviaste tu primer mensaje",
            "💬",
            1,
        ),
        Achievement::new(
            AchievementId::PictogramMaster,
            "Maestro de Pictogramas",
            "Usaste 10 pictogramas diferentes",
            "🎨",
            10,
        ),
        Achievement::new(
            AchievementId::SocialButterfly,
            "Mariposa Social",
            "Chateaste con 3 amigos diferentes",
            "🦋",
            3,
        ),
        Achievement::new(
            AchievementId::SpeedTyper,
            "Escritor Veloz",
            "Enviaste 5 mensajes en menos de 1 minuto",
            "⚡",
            5,
        ),
    ]
}

#[derive(Debug)]
struct TrackerState {
    achievements: Vec<Achievement>,
    last_sent: Option<DateTime<Local>>,
    friends: HashSet<String>,
    pictograms: HashSet<String>,
}

pub struct AchievementTracker {
    clock: Arc<dyn Clock>,
    state: Mutex<TrackerState>,
}

impl AchievementTracker {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(TrackerState {
                achievements: catalogue(),
                last_sent: None,
                friends: HashSet::new(),
                pictograms: HashSet::new(),
            }),
        }
    }

    pub async fn achievements(&self) -> Vec<Achievement> {
        self.state.lock().await.achievements.clone()
    }

    pub async fn is_unlocked(&self, id: AchievementId) -> bool {
        self.state
            .lock()
            .await
            .achievements
            .iter()
            .any(|a| a.id == id && a.unlocked)
    }

    /// Record a sent message; returns achievements unlocked by it
    pub async fn record_sent(&self, friend: &str, message: &ChatMessage) -> Vec<AchievementId> {
        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let mut progress: Vec<(AchievementId, u32)> = vec![(AchievementId::FirstMessage, 1)];

        if let Some(previous) = state.last_sent {
            let elapsed = now.signed_duration_since(previous).to_std().unwrap_or_default();
            if elapsed < SPEED_WINDOW {
                progress.push((AchievementId::SpeedTyper, 1));
            }
        }
        state.last_sent = Some(now);

        if state.friends.insert(friend.to_string()) {
            progress.push((AchievementId::SocialButterfly, 1));
        }

        let mut new_pictograms = 0;
        for url in message.image_urls.iter().flatten() {
            if state.pictograms.insert(url.clone()) {
                new_pictograms += 1;
            }
        }
        progress.push((AchievementId::PictogramMaster, new_pictograms));

        let mut unlocked = Vec::new();
        for (id, by) in progress {
            if let Some(achievement) = state.achievements.iter_mut().find(|a| a.id == id) {
                if achievement.advance(by) {
                    info!(
                        "Achievement unlocked: {} {}",
                        achievement.icon, achievement.title
                    );
                    unlocked.push(id);
                }
            }
        }
        unlocked
    }
}

#[async_trait]
impl ChatObserver for AchievementTracker {
    async fn on_message(&self, friend: &str, message: &ChatMessage) {
        if message.kind == MessageKind::Sent {
            self.record_sent(friend, message).await;
        }
    }
}
