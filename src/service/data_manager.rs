use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use itertools::Itertools;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error, warn};

use crate::{
    model::{
        champion::Champion,
        credential::Credential,
        game::{CurrentGameInfo, CurrentGameParticipant, Match, Participant},
        ids::ChampionId,
        partial::PartialResult,
        region::Region,
        riot::{LeagueItemDto, SummonerDto},
        summoner::{LeagueEntry, Player, Tier, UNKNOWN_SUMMONER},
    },
    service::{
        cache::ResponseCache,
        gameapi::riot_api_client::{RiotApiRequestError, RiotDataSource},
        lookup::{IdNotFoundError, LookupService},
        rate_limiter::{EndpointClass, RateLimitDecision, RateLimiter},
    },
};

pub const LEADERBOARD_TTL: Duration = Duration::from_millis(300_000);
pub const PLAYER_TTL: Duration = Duration::from_millis(60_000);

const SOLO_QUEUE: &str = "RANKED_SOLO_5x5";
const LEADERBOARD_SIZE: usize = 10;
const RECENT_MATCH_IDS: u32 = 10;
const DETAILED_MATCHES: usize = 5;

/// Responses kept in the shared cache.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Leaderboard(Vec<Player>),
    Player(Box<Player>),
}

/// Answers the stats queries from the Riot API, going through the response cache and the
/// local rate limiter.
pub struct DataManager {
    riot_api_client: Arc<dyn RiotDataSource>,
    lookup: Arc<LookupService>,
    cache: ResponseCache<CachedPayload>,
    rate_limiter: RateLimiter,
}

impl DataManager {
    pub fn new(
        riot_api_client: Arc<dyn RiotDataSource>,
        lookup: Arc<LookupService>,
        cache: ResponseCache<CachedPayload>,
        rate_limiter: RateLimiter,
    ) -> Self {
        Self {
            riot_api_client,
            lookup,
            cache,
            rate_limiter,
        }
    }

    /// Top ten of the challenger ladder, by league points.
    pub async fn top_players(&self, credential: &Credential, region: Region) -> DataRetrievalResult<Vec<Player>> {
        let cache_key = format!("topPlayers:{}", region);
        if let Some(CachedPayload::Leaderboard(players)) = self.cache.get(&cache_key) {
            debug!(%region, "leaderboard served from cache");
            return Ok(players);
        }

        self.admit(credential, EndpointClass::LeagueListing)?;

        let listing = self
            .riot_api_client
            .challenger_league(credential, region, SOLO_QUEUE)
            .await?;

        let Some(listing) = listing else {
            debug!(%region, "no challenger listing");
            return Ok(Vec::new());
        };

        let top_entries = listing
            .entries
            .iter()
            .sorted_by(|a, b| b.league_points.cmp(&a.league_points))
            .take(LEADERBOARD_SIZE)
            .collect_vec();

        let results = join_all(
            top_entries
                .iter()
                .map(|entry| self.leaderboard_player(credential, region, listing.tier, entry)),
        )
        .await;

        // A player whose summoner can't be resolved is left off the board
        let leaderboard: PartialResult<Player, DataRetrievalError> = results.into_iter().collect();
        for (index, err) in &leaderboard.failures {
            warn!(%region, summoner_id = %top_entries[*index].summoner_id, error = %err, "dropping leaderboard entry");
        }

        self.cache.set_with_ttl(
            cache_key,
            CachedPayload::Leaderboard(leaderboard.items.clone()),
            LEADERBOARD_TTL,
        );
        Ok(leaderboard.items)
    }

    async fn leaderboard_player(
        &self,
        credential: &Credential,
        region: Region,
        tier: Tier,
        entry: &LeagueItemDto,
    ) -> DataRetrievalResult<Player> {
        let summoner = self
            .riot_api_client
            .summoner_by_id(credential, region, &entry.summoner_id)
            .await?
            .ok_or_else(|| DataRetrievalError::NotFound(format!("summoner {}", entry.summoner_id)))?;

        let (summoner_name, last_champion) = tokio::join!(
            self.display_name(credential, region, &summoner.puuid),
            self.last_played_champion(credential, region, &summoner),
        );

        let last_champion_played = last_champion.unwrap_or_else(|err| {
            warn!(summoner_id = %entry.summoner_id, error = %err, "could not resolve last played champion");
            None
        });

        let mut player = Player::new(summoner, summoner_name, region);
        player.league_entry = Some(LeagueEntry::from_listing(tier, entry));
        player.last_champion_played = last_champion_played;
        Ok(player)
    }

    /// Summoner profile with solo queue standing and the last few ranked games.
    pub async fn player(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> DataRetrievalResult<Player> {
        let cache_key = format!("player:{}:{}", region, summoner_id);
        if let Some(CachedPayload::Player(player)) = self.cache.get(&cache_key) {
            debug!(%region, summoner_id, "player served from cache");
            return Ok(*player);
        }

        self.admit(credential, EndpointClass::SummonerDetail)?;

        let summoner = self
            .riot_api_client
            .summoner_by_id(credential, region, summoner_id)
            .await?
            .ok_or_else(|| DataRetrievalError::NotFound(format!("summoner {}", summoner_id)))?;

        let summoner_name = self.display_name(credential, region, &summoner.puuid).await;

        // Unranked summoners have no entries at all
        let league_entries = self
            .riot_api_client
            .league_entries(credential, region, summoner_id)
            .await?
            .unwrap_or_default();
        let solo_queue = league_entries.iter().find(|e| e.queue_type == SOLO_QUEUE);

        let recent_matches = self.recent_matches(credential, region, &summoner, &summoner_name).await;
        let last_champion_played = recent_matches
            .first()
            .and_then(|m| m.participants.first())
            .map(|p| p.champion.clone());

        let mut player = Player::new(summoner, summoner_name, region);
        player.league_entry = solo_queue.map(LeagueEntry::from_entry);
        player.recent_matches = recent_matches;
        player.last_champion_played = last_champion_played;

        self.cache
            .set_with_ttl(cache_key, CachedPayload::Player(Box::new(player.clone())), PLAYER_TTL);
        Ok(player)
    }

    /// Up to five of the latest games, newest first. Games that fail to load are skipped.
    async fn recent_matches(
        &self,
        credential: &Credential,
        region: Region,
        summoner: &SummonerDto,
        summoner_name: &str,
    ) -> Vec<Match> {
        let match_ids = match self
            .riot_api_client
            .match_ids(credential, region, &summoner.puuid, RECENT_MATCH_IDS)
            .await
        {
            Ok(ids) => ids.unwrap_or_default(),
            Err(err) => {
                warn!(summoner_id = %summoner.id, error = %err, "could not fetch match history");
                return Vec::new();
            }
        };

        let results = join_all(
            match_ids
                .iter()
                .take(DETAILED_MATCHES)
                .map(|match_id| self.recent_match(credential, region, summoner, summoner_name, match_id)),
        )
        .await;

        let matches: PartialResult<Match, DataRetrievalError> = results.into_iter().collect();
        for (index, err) in &matches.failures {
            warn!(match_id = %match_ids[*index], error = %err, "skipping match");
        }
        matches.items
    }

    async fn recent_match(
        &self,
        credential: &Credential,
        region: Region,
        summoner: &SummonerDto,
        summoner_name: &str,
        match_id: &str,
    ) -> DataRetrievalResult<Match> {
        let game = self
            .riot_api_client
            .match_by_id(credential, region, match_id)
            .await?
            .ok_or_else(|| DataRetrievalError::NotFound(format!("match {}", match_id)))?;

        let stats = game
            .participant(&summoner.puuid)
            .ok_or_else(|| DataRetrievalError::NotFound(format!("{} in match {}", summoner.id, match_id)))?;
        let champion = self.champion(stats.champion_id)?;

        Ok(Match {
            participants: vec![Participant::new(stats, summoner_name.to_string(), champion)],
            match_id: game.match_id,
            game_creation: game.game_creation,
            game_duration: game.game_duration,
            game_mode: game.game_mode,
            game_type: game.game_type,
            queue_id: game.queue_id,
        })
    }

    /// The game the summoner is playing right now, or `None` when they aren't in one.
    /// Never cached.
    pub async fn current_game(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> DataRetrievalResult<Option<CurrentGameInfo>> {
        self.admit(credential, EndpointClass::LiveGame)?;

        let Some(game) = self
            .riot_api_client
            .current_game(credential, region, summoner_id)
            .await?
        else {
            return Ok(None);
        };

        let participants = game
            .participants
            .iter()
            .map(|p| {
                Ok(CurrentGameParticipant {
                    team_id: p.team_id,
                    champion_id: p.champion_id.0,
                    champion: self.champion(p.champion_id)?,
                    summoner_id: p.summoner_id.clone(),
                    summoner_name: p.summoner_name.clone(),
                    perks: p.perks.clone(),
                })
            })
            .collect::<DataRetrievalResult<Vec<_>>>()?;

        Ok(Some(CurrentGameInfo {
            game_id: game.game_id,
            game_type: game.game_type,
            game_start_time: game.game_start_time,
            map_id: game.map_id,
            game_length: game.game_length,
            game_mode: game.game_mode,
            participants,
        }))
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    fn admit(&self, credential: &Credential, endpoint: EndpointClass) -> DataRetrievalResult<()> {
        match self.rate_limiter.check_limit(credential, endpoint) {
            RateLimitDecision::Admitted { remaining } => {
                debug!(%endpoint, remaining, "request admitted");
                Ok(())
            }
            RateLimitDecision::Denied { reset_at } => Err(DataRetrievalError::RateLimited {
                endpoint,
                retry_after: reset_at.saturating_duration_since(Instant::now()),
            }),
        }
    }

    /// Riot ID of the account, or the placeholder name when it can't be resolved.
    async fn display_name(&self, credential: &Credential, region: Region, puuid: &str) -> String {
        let riot_id = match self.riot_api_client.account_by_puuid(credential, region, puuid).await {
            Ok(account) => account.and_then(|a| a.riot_id()),
            Err(err) => {
                warn!(puuid, error = %err, "account lookup failed");
                None
            }
        };
        riot_id.unwrap_or_else(|| UNKNOWN_SUMMONER.to_string())
    }

    async fn last_played_champion(
        &self,
        credential: &Credential,
        region: Region,
        summoner: &SummonerDto,
    ) -> DataRetrievalResult<Option<Champion>> {
        let match_ids = self
            .riot_api_client
            .match_ids(credential, region, &summoner.puuid, 1)
            .await?
            .unwrap_or_default();

        let Some(latest) = match_ids.first() else {
            return Ok(None);
        };

        let Some(game) = self.riot_api_client.match_by_id(credential, region, latest).await? else {
            return Ok(None);
        };

        game.participant(&summoner.puuid)
            .map(|p| self.champion(p.champion_id))
            .transpose()
    }

    fn champion(&self, id: ChampionId) -> DataRetrievalResult<Champion> {
        self.lookup.get_champion(id).map_err(|err| {
            error!(error = %err, "champion table is missing an id");
            DataRetrievalError::from(err)
        })
    }
}

pub type DataRetrievalResult<T> = Result<T, DataRetrievalError>;

#[derive(Debug, Error)]
pub enum DataRetrievalError {
    #[error("Rate limit exceeded for {endpoint}, retry in {}ms", retry_after.as_millis())]
    RateLimited { endpoint: EndpointClass, retry_after: Duration },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Riot API client error: {0}")]
    RiotApiClient(#[from] RiotApiRequestError),
    #[error("Lookup error: {0}")]
    Lookup(#[from] IdNotFoundError),
}

impl DataRetrievalError {
    /// Machine readable error code exposed to API callers.
    pub fn code(&self) -> &'static str {
        match self {
            DataRetrievalError::RateLimited { .. } => "RATE_LIMITED",
            DataRetrievalError::NotFound(_) => "NOT_FOUND",
            DataRetrievalError::RiotApiClient(_) => "RIOT_API_ERROR",
            DataRetrievalError::Lookup(_) => "DATA_INTEGRITY",
        }
    }
}
