use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::config::Config;
use crate::models::content::canonical_steps;
use crate::models::AttemptLog;

use history_service::{HistoryService, HistoryStore};
use hint_service::HintPolicy;
use session_service::SessionService;

pub mod hint_service;
pub mod history_service;
pub mod scoring_service;
pub mod session_service;

/// The active session together with the attempt history it records into.
pub struct Game {
    pub session: SessionService<StdRng>,
    pub attempts: AttemptLog,
}

pub struct AppState {
    pub config: Config,
    pub game: Mutex<Game>,
    pub history: HistoryService,
}

impl AppState {
    pub async fn new(config: Config, store: Arc<dyn HistoryStore>) -> anyhow::Result<Self> {
        let history = HistoryService::new(store, config.history_key.clone());
        let attempts = history.load().await?;

        let rng = match config.shuffle_seed {
            Some(seed) => {
                tracing::info!("Using fixed shuffle seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };

        let steps = canonical_steps();
        let policy = HintPolicy::new(config.max_hints, steps.len());
        let session = SessionService::new(steps, policy, rng);

        tracing::info!(
            "Puzzle ready: {} attempts in history, up to {} hints per session",
            attempts.len(),
            policy.max_hints()
        );

        Ok(Self {
            config,
            game: Mutex::new(Game { session, attempts }),
            history,
        })
    }
}
