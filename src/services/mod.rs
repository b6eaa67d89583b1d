//! Service layer for the pictogram messenger core
//!
//! Services own the behaviour of the crate and talk to the outside world
//! only through injected collaborators:
//!
//! - [`PictogramClient`] queries the remote catalogue through an
//!   [`HttpClient`](crate::utils::HttpClient)
//! - [`SelectionSession`] debounces queries and hands the picked pictograms
//!   to a [`ChatStore`]
//! - [`AchievementTracker`] listens to the chat store as a [`ChatObserver`]
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use picto_amigos::config::Config;
//! use picto_amigos::services::{
//!     InMemoryChatStore, PictogramClient, SelectionSession, SessionSettings,
//! };
//! use picto_amigos::utils::SystemClock;
//!
//! # async fn example() -> picto_amigos::errors::AppResult<()> {
//! let config = Config::default();
//! let client = Arc::new(PictogramClient::from_config(&config)?);
//! let (session, mut events) = SelectionSession::new(
//!     client,
//!     Arc::new(InMemoryChatStore::new()),
//!     Arc::new(SystemClock),
//!     SessionSettings::from_config(&config),
//! );
//!
//! session.on_query_input("comer").await;
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod achievements;
pub mod chat;
pub mod pictogram_client;
pub mod search_cache;
pub mod selection;
pub mod session;

pub use achievements::{Achievement, AchievementId, AchievementTracker};
pub use chat::{ChatObserver, ChatStore, InMemoryChatStore};
pub use pictogram_client::PictogramClient;
pub use search_cache::SearchCache;
pub use selection::{SelectionSet, Toggle};
pub use session::{SelectionSession, SessionEvent, SessionSettings};
