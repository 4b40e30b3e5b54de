//! In-memory stand-in for the Riot API used by the service and schema tests.

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::model::{
    credential::Credential,
    game::Perks,
    region::Region,
    riot::{
        AccountDto, CurrentGameDto, CurrentGameParticipantDto, LeagueEntryDto, LeagueItemDto, LeagueListDto,
        MatchDto, MatchParticipantDto, SummonerDto,
    },
    summoner::{Division, Tier},
};

use super::riot_api_client::{RiotApiRequestError, RiotApiResult, RiotDataSource};

pub enum LiveStep {
    InGame(CurrentGameDto),
    NotInGame,
    Fail,
}

#[derive(Default)]
pub struct FakeRiotSource {
    pub summoners: HashMap<String, SummonerDto>,
    pub accounts: HashMap<String, AccountDto>,
    pub league_entries: HashMap<String, Vec<LeagueEntryDto>>,
    pub challenger: Option<LeagueListDto>,
    pub match_ids: HashMap<String, Vec<String>>,
    pub matches: HashMap<String, MatchDto>,
    pub live_steps: Mutex<VecDeque<LiveStep>>,
    /// Call keys (`"summoner:{id}"`, `"match:{id}"`, ...) that answer with a 500.
    pub failing: HashSet<String>,
    /// Call keys that take this long to answer.
    pub delays: HashMap<String, Duration>,
    calls: AtomicUsize,
}

impl FakeRiotSource {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail(&mut self, call: impl Into<String>) {
        self.failing.insert(call.into());
    }

    /// Registers a summoner with an account and a single most recent match on `champion_id`.
    pub fn add_player(&mut self, summoner_id: &str, champion_id: i32) {
        let summoner = summoner(summoner_id);
        let match_id = format!("NA1_{}", summoner_id);
        self.accounts.insert(
            summoner.puuid.clone(),
            account(&summoner.puuid, &format!("Player {}", summoner_id), "NA1"),
        );
        self.match_ids.insert(summoner.puuid.clone(), vec![match_id.clone()]);
        self.matches.insert(
            match_id.clone(),
            ranked_match(&match_id, &summoner.puuid, summoner_id, champion_id, (4, 2, 2)),
        );
        self.summoners.insert(summoner_id.to_string(), summoner);
    }

    pub fn push_live(&self, step: LiveStep) {
        self.live_steps.lock().unwrap().push_back(step);
    }

    async fn enter(&self, call: String) -> RiotApiResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&call) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&call) {
            return Err(RiotApiRequestError::InvalidResponse(500, format!("{} failed", call)));
        }
        Ok(())
    }
}

#[async_trait]
impl RiotDataSource for FakeRiotSource {
    async fn summoner_by_id(
        &self,
        _credential: &Credential,
        _region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<SummonerDto>> {
        self.enter(format!("summoner:{}", summoner_id)).await?;
        Ok(self.summoners.get(summoner_id).cloned())
    }

    async fn league_entries(
        &self,
        _credential: &Credential,
        _region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<Vec<LeagueEntryDto>>> {
        self.enter(format!("league:{}", summoner_id)).await?;
        Ok(self.league_entries.get(summoner_id).cloned())
    }

    async fn challenger_league(
        &self,
        _credential: &Credential,
        _region: Region,
        _queue: &str,
    ) -> RiotApiResult<Option<LeagueListDto>> {
        self.enter("challenger".to_string()).await?;
        Ok(self.challenger.clone())
    }

    async fn current_game(
        &self,
        _credential: &Credential,
        _region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<CurrentGameDto>> {
        self.enter(format!("live:{}", summoner_id)).await?;
        let step = self.live_steps.lock().unwrap().pop_front();
        match step {
            Some(LiveStep::InGame(game)) => Ok(Some(game)),
            Some(LiveStep::Fail) => Err(RiotApiRequestError::InvalidResponse(503, "spectator down".into())),
            Some(LiveStep::NotInGame) | None => Ok(None),
        }
    }

    async fn match_ids(
        &self,
        _credential: &Credential,
        _region: Region,
        puuid: &str,
        count: u32,
    ) -> RiotApiResult<Option<Vec<String>>> {
        self.enter(format!("match_ids:{}", puuid)).await?;
        Ok(self
            .match_ids
            .get(puuid)
            .map(|ids| ids.iter().take(count as usize).cloned().collect()))
    }

    async fn match_by_id(
        &self,
        _credential: &Credential,
        _region: Region,
        match_id: &str,
    ) -> RiotApiResult<Option<MatchDto>> {
        self.enter(format!("match:{}", match_id)).await?;
        Ok(self.matches.get(match_id).cloned())
    }

    async fn account_by_puuid(
        &self,
        _credential: &Credential,
        _region: Region,
        puuid: &str,
    ) -> RiotApiResult<Option<AccountDto>> {
        self.enter(format!("account:{}", puuid)).await?;
        Ok(self.accounts.get(puuid).cloned())
    }
}

pub fn summoner(summoner_id: &str) -> SummonerDto {
    SummonerDto {
        id: summoner_id.to_string(),
        account_id: format!("acc-{}", summoner_id),
        puuid: format!("puuid-{}", summoner_id),
        profile_icon_id: 29,
        summoner_level: 412,
    }
}

pub fn account(puuid: &str, game_name: &str, tag_line: &str) -> AccountDto {
    AccountDto {
        puuid: puuid.to_string(),
        game_name: Some(game_name.to_string()),
        tag_line: Some(tag_line.to_string()),
    }
}

pub fn league_item(summoner_id: &str, league_points: i32) -> LeagueItemDto {
    LeagueItemDto {
        summoner_id: summoner_id.to_string(),
        rank: Division::One,
        league_points,
        wins: 60,
        losses: 40,
        hot_streak: false,
        veteran: true,
        fresh_blood: false,
        inactive: false,
    }
}

pub fn challenger_listing(items: Vec<LeagueItemDto>) -> LeagueListDto {
    LeagueListDto {
        tier: Tier::Challenger,
        entries: items,
    }
}

pub fn league_entry(queue_type: &str, tier: Tier, wins: i32, losses: i32) -> LeagueEntryDto {
    LeagueEntryDto {
        queue_type: queue_type.to_string(),
        tier,
        rank: Division::Two,
        league_points: 55,
        wins,
        losses,
        hot_streak: true,
        veteran: false,
        fresh_blood: false,
        inactive: false,
    }
}

pub fn ranked_match(
    match_id: &str,
    puuid: &str,
    summoner_id: &str,
    champion_id: i32,
    (kills, deaths, assists): (i32, i32, i32),
) -> MatchDto {
    let player = MatchParticipantDto {
        puuid: puuid.to_string(),
        summoner_id: summoner_id.to_string(),
        champion_id: champion_id.into(),
        team_id: 100,
        win: true,
        kills,
        deaths,
        assists,
        gold_earned: 11_000,
        total_damage_dealt_to_champions: 23_000,
        vision_score: 20,
        items: vec![3157, 3020, 0, 0, 0, 0, 3364],
    };
    let opponent = MatchParticipantDto {
        puuid: format!("{}-opponent", puuid),
        summoner_id: format!("{}-opponent", summoner_id),
        champion_id: 1.into(),
        team_id: 200,
        win: false,
        ..player.clone()
    };

    MatchDto {
        match_id: match_id.to_string(),
        game_creation: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        game_duration: 1800,
        game_mode: "CLASSIC".into(),
        game_type: "MATCHED_GAME".into(),
        queue_id: 420,
        participants: vec![player, opponent],
    }
}

/// Active game whose roster is `(summoner id, champion id)` pairs, first half on team 100.
pub fn live_game(game_id: &str, roster: &[(&str, i32)]) -> CurrentGameDto {
    let half = roster.len() / 2;
    CurrentGameDto {
        game_id: game_id.to_string(),
        game_type: "MATCHED".into(),
        game_start_time: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        map_id: 11,
        game_length: 420,
        game_mode: "CLASSIC".into(),
        participants: roster
            .iter()
            .enumerate()
            .map(|(index, (summoner_id, champion_id))| CurrentGameParticipantDto {
                team_id: if index < half { 100 } else { 200 },
                champion_id: (*champion_id).into(),
                summoner_id: summoner_id.to_string(),
                summoner_name: format!("Player {}", summoner_id),
                perks: Perks {
                    perk_ids: vec![8005, 9111, 9104, 8299],
                    perk_style: 8000,
                    perk_sub_style: 8400,
                },
            })
            .collect(),
    }
}

/// Ten players on well known champions, `focus` first.
pub fn full_lobby(game_id: &str, focus: &str, focus_champion: i32) -> CurrentGameDto {
    let others = ["b", "c", "d", "e", "f", "g", "h", "i", "j"];
    let champions = [1, 22, 51, 99, 103, 157, 222, 236, 266];
    let mut roster = vec![(focus, focus_champion)];
    roster.extend(others.iter().copied().zip(champions));
    live_game(game_id, &roster)
}
