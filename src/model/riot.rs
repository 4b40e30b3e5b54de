//! Records as returned by the Riot API, after parsing but before enrichment.

use chrono::{DateTime, Utc};

use super::{
    game::Perks,
    ids::ChampionId,
    summoner::{Division, Tier},
};

#[derive(Debug, Clone, PartialEq)]
pub struct SummonerDto {
    pub id: String,
    pub account_id: String,
    pub puuid: String,
    pub profile_icon_id: i32,
    pub summoner_level: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

impl AccountDto {
    /// `gameName#tagLine`, if the account has a game name.
    pub fn riot_id(&self) -> Option<String> {
        let game_name = self.game_name.as_deref().filter(|n| !n.is_empty())?;
        Some(format!("{}#{}", game_name, self.tag_line.as_deref().unwrap_or_default()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: Tier,
    pub rank: Division,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
    pub inactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueListDto {
    pub tier: Tier,
    pub entries: Vec<LeagueItemDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeagueItemDto {
    pub summoner_id: String,
    pub rank: Division,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
    pub inactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchDto {
    pub match_id: String,
    pub game_creation: DateTime<Utc>,
    pub game_duration: i32,
    pub game_mode: String,
    pub game_type: String,
    pub queue_id: i32,
    pub participants: Vec<MatchParticipantDto>,
}

impl MatchDto {
    pub fn participant(&self, puuid: &str) -> Option<&MatchParticipantDto> {
        self.participants.iter().find(|p| p.puuid == puuid)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchParticipantDto {
    pub puuid: String,
    pub summoner_id: String,
    pub champion_id: ChampionId,
    pub team_id: i32,
    pub win: bool,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub gold_earned: i32,
    pub total_damage_dealt_to_champions: i32,
    pub vision_score: i32,
    pub items: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentGameDto {
    pub game_id: String,
    pub game_type: String,
    pub game_start_time: DateTime<Utc>,
    pub map_id: i32,
    pub game_length: i32,
    pub game_mode: String,
    pub participants: Vec<CurrentGameParticipantDto>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentGameParticipantDto {
    pub team_id: i32,
    pub champion_id: ChampionId,
    pub summoner_id: String,
    pub summoner_name: String,
    pub perks: Perks,
}
