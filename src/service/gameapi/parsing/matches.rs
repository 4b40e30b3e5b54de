use chrono::{DateTime, TimeZone, Utc};
use json::JsonValue;

use crate::model::riot::{MatchDto, MatchParticipantDto};

use super::ParsingError;

const ITEM_SLOTS: usize = 7;

pub fn parse_match_ids(json: &JsonValue) -> Result<Vec<String>, ParsingError> {
    if let JsonValue::Array(ids_array) = json {
        return ids_array
            .iter()
            .map(|id| {
                id.as_str()
                    .map(String::from)
                    .ok_or(ParsingError::InvalidType("match id".into()))
            })
            .collect();
    }

    Err(ParsingError::InvalidType("root (expected array)".into()))
}

pub fn parse_match(json: &JsonValue) -> Result<MatchDto, ParsingError> {
    if let JsonValue::Object(obj) = json {
        let match_id = obj["metadata"]["matchId"]
            .as_str()
            .ok_or(ParsingError::InvalidType("metadata/matchId".into()))?
            .to_string();

        let info = &obj["info"];
        if !info.is_object() {
            return Err(ParsingError::InvalidType("info".into()));
        }

        let game_creation = info["gameCreation"]
            .as_i64()
            .and_then(timestamp_millis)
            .ok_or(ParsingError::InvalidType("gameCreation".into()))?;

        let game_duration = info["gameDuration"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("gameDuration".into()))?;

        let game_mode = info["gameMode"]
            .as_str()
            .ok_or(ParsingError::InvalidType("gameMode".into()))?
            .to_string();

        let game_type = info["gameType"]
            .as_str()
            .ok_or(ParsingError::InvalidType("gameType".into()))?
            .to_string();

        let queue_id = info["queueId"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("queueId".into()))?;

        let participants = parse_participants(&info["participants"])?;

        return Ok(MatchDto {
            match_id,
            game_creation,
            game_duration,
            game_mode,
            game_type,
            queue_id,
            participants,
        });
    }

    Err(ParsingError::InvalidType("root".into()))
}

fn parse_participants(json: &JsonValue) -> Result<Vec<MatchParticipantDto>, ParsingError> {
    let mut participants = Vec::new();

    if let JsonValue::Array(participants_array) = json {
        for participant_json in participants_array {
            if let JsonValue::Object(p) = participant_json {
                let puuid = p["puuid"]
                    .as_str()
                    .ok_or(ParsingError::InvalidType("puuid".into()))?
                    .to_string();

                let champion_id = p["championId"]
                    .as_i32()
                    .ok_or(ParsingError::InvalidType("championId".into()))?;

                let stat = |field: &str| p[field].as_i32().ok_or(ParsingError::InvalidType(field.into()));

                let items = (0..ITEM_SLOTS)
                    .map(|slot| p[format!("item{}", slot).as_str()].as_i32().unwrap_or(0))
                    .collect();

                participants.push(MatchParticipantDto {
                    puuid,
                    summoner_id: p["summonerId"].as_str().unwrap_or_default().to_string(),
                    champion_id: champion_id.into(),
                    team_id: stat("teamId")?,
                    win: p["win"].as_bool().ok_or(ParsingError::InvalidType("win".into()))?,
                    kills: stat("kills")?,
                    deaths: stat("deaths")?,
                    assists: stat("assists")?,
                    gold_earned: stat("goldEarned")?,
                    total_damage_dealt_to_champions: stat("totalDamageDealtToChampions")?,
                    vision_score: p["visionScore"].as_i32().unwrap_or(0),
                    items,
                });
            } else {
                return Err(ParsingError::InvalidType("participants entry".into()));
            }
        }
        Ok(participants)
    } else {
        Err(ParsingError::InvalidType("participants".into()))
    }
}

pub(super) fn timestamp_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
