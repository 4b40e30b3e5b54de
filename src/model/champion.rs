use async_graphql::SimpleObject;

use super::ids::ChampionId;

pub const DDRAGON_VERSION: &str = "14.24.1";
const DDRAGON_CDN: &str = "https://ddragon.leagueoflegends.com/cdn";

/// Row of the bundled champion reference table.
#[derive(Debug, Clone)]
pub struct ChampionRecord {
    pub id: ChampionId,
    pub key: String,
    pub name: String,
    pub title: String,
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct Champion {
    pub id: i32,
    pub key: String,
    pub name: String,
    pub title: String,
    pub image: ChampionImage,
}

#[derive(SimpleObject, Debug, Clone, PartialEq)]
pub struct ChampionImage {
    pub full: String,
    pub sprite: String,
    pub group: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub url: String,
}

impl Champion {
    pub fn from_record(record: &ChampionRecord) -> Self {
        Self {
            id: record.id.0,
            key: record.key.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            image: ChampionImage::for_key(&record.key),
        }
    }
}

impl ChampionImage {
    pub fn for_key(key: &str) -> Self {
        Self {
            full: format!("{}.png", key),
            sprite: "champion0.png".into(),
            group: "champion".into(),
            x: 0,
            y: 0,
            w: 48,
            h: 48,
            url: format!("{}/{}/img/champion/{}.png", DDRAGON_CDN, DDRAGON_VERSION, key),
        }
    }
}

pub fn profile_icon_url(icon_id: i32) -> String {
    format!("{}/{}/img/profileicon/{}.png", DDRAGON_CDN, DDRAGON_VERSION, icon_id)
}
