use async_graphql::{Enum, SimpleObject};

use super::{
    champion::Champion,
    game::Match,
    region::Region,
    riot::{LeagueEntryDto, LeagueItemDto, SummonerDto},
};

pub const UNKNOWN_SUMMONER: &str = "Unknown Summoner";

#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(complex)]
pub struct Player {
    pub id: String,
    pub account_id: String,
    pub puuid: String,
    pub profile_icon_id: i32,
    pub summoner_level: i32,
    pub summoner_name: String,
    pub region: Region,
    pub league_entry: Option<LeagueEntry>,
    pub recent_matches: Vec<Match>,
    pub last_champion_played: Option<Champion>,
}

impl Player {
    pub fn new(summoner: SummonerDto, summoner_name: String, region: Region) -> Self {
        Self {
            id: summoner.id,
            account_id: summoner.account_id,
            puuid: summoner.puuid,
            profile_icon_id: summoner.profile_icon_id,
            summoner_level: summoner.summoner_level,
            summoner_name,
            region,
            league_entry: None,
            recent_matches: Vec::new(),
            last_champion_played: None,
        }
    }
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct LeagueEntry {
    pub tier: Tier,
    pub division: Division,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub win_rate: f64,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
    pub inactive: bool,
}

impl LeagueEntry {
    pub fn from_entry(entry: &LeagueEntryDto) -> Self {
        Self {
            tier: entry.tier,
            division: entry.rank,
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
            win_rate: win_rate(entry.wins, entry.losses),
            hot_streak: entry.hot_streak,
            veteran: entry.veteran,
            fresh_blood: entry.fresh_blood,
            inactive: entry.inactive,
        }
    }

    /// Leaderboard items don't carry their tier, it comes from the enclosing listing.
    pub fn from_listing(tier: Tier, item: &LeagueItemDto) -> Self {
        Self {
            tier,
            division: item.rank,
            league_points: item.league_points,
            wins: item.wins,
            losses: item.losses,
            win_rate: win_rate(item.wins, item.losses),
            hot_streak: item.hot_streak,
            veteran: item.veteran,
            fresh_blood: item.fresh_blood,
            inactive: item.inactive,
        }
    }
}

/// Percentage of games won. Zero games played counts as 0%.
pub fn win_rate(wins: i32, losses: i32) -> f64 {
    let games = wins + losses;
    if games == 0 {
        return 0.0;
    }
    wins as f64 / games as f64 * 100.0
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Challenger,
    Grandmaster,
    Master,
    Diamond,
    Emerald,
    Platinum,
    Gold,
    Silver,
    Bronze,
    Iron,
}

impl Tier {
    pub fn from_api(value: &str) -> Option<Tier> {
        match value {
            "CHALLENGER" => Some(Tier::Challenger),
            "GRANDMASTER" => Some(Tier::Grandmaster),
            "MASTER" => Some(Tier::Master),
            "DIAMOND" => Some(Tier::Diamond),
            "EMERALD" => Some(Tier::Emerald),
            "PLATINUM" => Some(Tier::Platinum),
            "GOLD" => Some(Tier::Gold),
            "SILVER" => Some(Tier::Silver),
            "BRONZE" => Some(Tier::Bronze),
            "IRON" => Some(Tier::Iron),
            _ => None,
        }
    }
}

#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    #[graphql(name = "I")]
    One,
    #[graphql(name = "II")]
    Two,
    #[graphql(name = "III")]
    Three,
    #[graphql(name = "IV")]
    Four,
}

impl Division {
    pub fn from_api(value: &str) -> Option<Division> {
        match value {
            "I" => Some(Division::One),
            "II" => Some(Division::Two),
            "III" => Some(Division::Three),
            "IV" => Some(Division::Four),
            _ => None,
        }
    }
}
