use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};

use super::{champion::Champion, riot::MatchParticipantDto};

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct Match {
    pub match_id: String,
    pub game_creation: DateTime<Utc>,
    pub game_duration: i32,
    pub game_mode: String,
    pub game_type: String,
    pub queue_id: i32,
    pub participants: Vec<Participant>,
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct Participant {
    pub summoner_id: String,
    pub summoner_name: String,
    pub champion_id: i32,
    pub champion: Champion,
    pub team_id: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub kda: f64,
    pub gold_earned: i32,
    pub total_damage_dealt_to_champions: i32,
    pub vision_score: i32,
    pub items: Vec<i32>,
}

impl Participant {
    pub fn new(stats: &MatchParticipantDto, summoner_name: String, champion: Champion) -> Self {
        Self {
            summoner_id: stats.summoner_id.clone(),
            summoner_name,
            champion_id: stats.champion_id.0,
            champion,
            team_id: stats.team_id,
            win: stats.win,
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            kda: kda(stats.kills, stats.deaths, stats.assists),
            gold_earned: stats.gold_earned,
            total_damage_dealt_to_champions: stats.total_damage_dealt_to_champions,
            vision_score: stats.vision_score,
            items: stats.items.clone(),
        }
    }
}

/// Kills plus assists per death. A deathless game counts every takedown.
pub fn kda(kills: i32, deaths: i32, assists: i32) -> f64 {
    let takedowns = (kills + assists) as f64;
    if deaths == 0 {
        takedowns
    } else {
        takedowns / deaths as f64
    }
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct CurrentGameInfo {
    pub game_id: String,
    pub game_type: String,
    pub game_start_time: DateTime<Utc>,
    pub map_id: i32,
    pub game_length: i32,
    pub game_mode: String,
    pub participants: Vec<CurrentGameParticipant>,
}

impl CurrentGameInfo {
    pub fn participant(&self, summoner_id: &str) -> Option<&CurrentGameParticipant> {
        self.participants.iter().find(|p| p.summoner_id == summoner_id)
    }
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct CurrentGameParticipant {
    pub team_id: i32,
    pub champion_id: i32,
    pub champion: Champion,
    pub summoner_id: String,
    pub summoner_name: String,
    pub perks: Perks,
}

#[derive(SimpleObject, Debug, Clone, Default, PartialEq)]
pub struct Perks {
    pub perk_ids: Vec<i32>,
    pub perk_style: i32,
    pub perk_sub_style: i32,
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    EnteredGame,
    LeftGame,
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct PlayerGameUpdate {
    #[graphql(name = "type")]
    pub update_type: UpdateType,
    pub summoner_id: String,
    pub game_id: Option<String>,
    pub champion: Option<Champion>,
    pub timestamp: DateTime<Utc>,
}
