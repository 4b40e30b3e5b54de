use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, warn};

use crate::{
    model::{
        credential::Credential,
        game::{CurrentGameInfo, PlayerGameUpdate, UpdateType},
        region::Region,
    },
    service::data_manager::DataManager,
};

const UPDATE_BUFFER: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Pause between two polls of the live game endpoint.
    pub interval: Duration,
    /// Pause after a poll failed.
    pub error_backoff: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            error_backoff: Duration::from_millis(60_000),
        }
    }
}

/// Turns consecutive live game snapshots into enter and leave transitions.
#[derive(Debug, Default)]
pub struct GameStateTracker {
    in_game: bool,
}

impl GameStateTracker {
    pub fn observe(&mut self, snapshot: Option<&CurrentGameInfo>, summoner_id: &str) -> Option<PlayerGameUpdate> {
        match (snapshot, self.in_game) {
            (Some(game), false) => {
                self.in_game = true;
                Some(PlayerGameUpdate {
                    update_type: UpdateType::EnteredGame,
                    summoner_id: summoner_id.to_string(),
                    game_id: Some(game.game_id.clone()),
                    champion: game.participant(summoner_id).map(|p| p.champion.clone()),
                    timestamp: Utc::now(),
                })
            }
            (None, true) => {
                self.in_game = false;
                Some(PlayerGameUpdate {
                    update_type: UpdateType::LeftGame,
                    summoner_id: summoner_id.to_string(),
                    game_id: None,
                    champion: None,
                    timestamp: Utc::now(),
                })
            }
            _ => None,
        }
    }
}

/// Polls the summoner's live game and yields every transition in or out of a game.
///
/// The stream never ends on its own. Dropping it stops the polling task at its next
/// await point, abandoning a poll that is still in flight.
pub fn watch_player(
    manager: Arc<DataManager>,
    credential: Credential,
    region: Region,
    summoner_id: String,
    settings: PollSettings,
) -> ReceiverStream<PlayerGameUpdate> {
    let (tx, rx) = mpsc::channel(UPDATE_BUFFER);

    tokio::spawn(async move {
        info!(%region, %summoner_id, "watching player");
        let mut tracker = GameStateTracker::default();

        loop {
            let poll = tokio::select! {
                _ = tx.closed() => break,
                poll = manager.current_game(&credential, region, &summoner_id) => poll,
            };

            let pause = match poll {
                Ok(game) => {
                    if let Some(update) = tracker.observe(game.as_ref(), &summoner_id) {
                        debug!(%summoner_id, update = ?update.update_type, "game state changed");
                        if tx.send(update).await.is_err() {
                            break;
                        }
                    }
                    settings.interval
                }
                Err(err) => {
                    warn!(%summoner_id, error = %err, "live game poll failed, backing off");
                    settings.error_backoff
                }
            };

            tokio::select! {
                _ = tx.closed() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!(%region, %summoner_id, "stopped watching player");
    });

    ReceiverStream::new(rx)
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;
    use tokio_stream::StreamExt;

    use super::*;
    use crate::service::{
        cache::ResponseCache,
        gameapi::fake::{self, FakeRiotSource, LiveStep},
        lookup::LookupService,
        rate_limiter::RateLimiter,
    };

    fn watch(source: FakeRiotSource) -> (ReceiverStream<PlayerGameUpdate>, Arc<FakeRiotSource>) {
        let source = Arc::new(source);
        let manager = DataManager::new(
            source.clone(),
            Arc::new(LookupService::bundled().unwrap()),
            ResponseCache::new(),
            RateLimiter::default(),
        );
        let stream = watch_player(
            Arc::new(manager),
            Credential::from("RGAPI-test"),
            Region::Na1,
            "me".into(),
            PollSettings::default(),
        );
        (stream, source)
    }

    fn in_game(game_id: &str) -> LiveStep {
        LiveStep::InGame(fake::full_lobby(game_id, "me", 103))
    }

    #[test]
    fn tracker_only_reports_changes() {
        let game = CurrentGameInfo {
            game_id: "1".into(),
            game_type: "MATCHED".into(),
            game_start_time: Utc::now(),
            map_id: 11,
            game_length: 0,
            game_mode: "CLASSIC".into(),
            participants: Vec::new(),
        };
        let mut tracker = GameStateTracker::default();

        assert_eq!(tracker.observe(None, "me"), None);
        let entered = tracker.observe(Some(&game), "me").unwrap();
        assert_eq!(entered.update_type, UpdateType::EnteredGame);
        assert_eq!(entered.game_id.as_deref(), Some("1"));
        assert_eq!(entered.champion, None);

        assert_eq!(tracker.observe(Some(&game), "me"), None);
        let left = tracker.observe(None, "me").unwrap();
        assert_eq!(left.update_type, UpdateType::LeftGame);
        assert_eq!(left.game_id, None);
        assert_eq!(tracker.observe(None, "me"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn reports_enter_leave_enter() {
        let source = FakeRiotSource::default();
        source.push_live(in_game("100"));
        source.push_live(LiveStep::NotInGame);
        source.push_live(in_game("101"));
        let (mut stream, _) = watch(source);

        let first = stream.next().await.unwrap();
        assert_eq!(first.update_type, UpdateType::EnteredGame);
        assert_eq!(first.game_id.as_deref(), Some("100"));
        assert_eq!(first.summoner_id, "me");
        assert_eq!(first.champion.unwrap().name, "Ahri");

        let second = stream.next().await.unwrap();
        assert_eq!(second.update_type, UpdateType::LeftGame);

        let third = stream.next().await.unwrap();
        assert_eq!(third.update_type, UpdateType::EnteredGame);
        assert_eq!(third.game_id.as_deref(), Some("101"));
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_polls_emit_nothing() {
        let source = FakeRiotSource::default();
        for _ in 0..3 {
            source.push_live(in_game("100"));
        }
        let (mut stream, source) = watch(source);
        let start = Instant::now();

        assert_eq!(stream.next().await.unwrap().update_type, UpdateType::EnteredGame);
        // polls at 30s and 60s still see the game, the one at 90s finds nothing
        assert_eq!(stream.next().await.unwrap().update_type, UpdateType::LeftGame);
        assert!(start.elapsed() >= Duration::from_secs(90) && start.elapsed() < Duration::from_secs(91));
        assert_eq!(source.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn never_in_game_stays_silent() {
        let (mut stream, source) = watch(FakeRiotSource::default());

        let waited = tokio::time::timeout(Duration::from_secs(600), stream.next()).await;
        assert!(waited.is_err());
        assert!(source.calls() >= 20);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_poll_backs_off_and_keeps_going() {
        let source = FakeRiotSource::default();
        source.push_live(LiveStep::Fail);
        source.push_live(in_game("100"));
        let (mut stream, _) = watch(source);
        let start = Instant::now();

        let update = stream.next().await.unwrap();
        assert_eq!(update.update_type, UpdateType::EnteredGame);
        assert!(start.elapsed() >= Duration::from_secs(60) && start.elapsed() < Duration::from_secs(61));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_stream_stops_polling() {
        let source = FakeRiotSource::default();
        source.push_live(in_game("100"));
        let (mut stream, source) = watch(source);

        stream.next().await.unwrap();
        drop(stream);
        let calls = source.calls();

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_stream_abandons_a_poll_in_flight() {
        let mut source = FakeRiotSource::default();
        source.delays.insert("live:me".into(), Duration::from_secs(10));
        source.push_live(in_game("100"));
        let (stream, source) = watch(source);

        // the first poll is now waiting on the slow upstream
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(source.calls(), 1);
        drop(stream);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.calls(), 1);
        // the call never got to consume its answer
        assert_eq!(source.live_steps.lock().unwrap().len(), 1);
    }
}
