use json::JsonValue;

use crate::model::{
    game::Perks,
    riot::{CurrentGameDto, CurrentGameParticipantDto},
};

use super::{matches::timestamp_millis, ParsingError};

pub fn parse_current_game(json: &JsonValue) -> Result<CurrentGameDto, ParsingError> {
    if let JsonValue::Object(obj) = json {
        // Game ids exceed the GraphQL Int range, they are passed on as strings
        let game_id = obj["gameId"]
            .as_i64()
            .ok_or(ParsingError::InvalidType("gameId".into()))?
            .to_string();

        let game_type = obj["gameType"]
            .as_str()
            .ok_or(ParsingError::InvalidType("gameType".into()))?
            .to_string();

        let game_start_time = obj["gameStartTime"]
            .as_i64()
            .and_then(timestamp_millis)
            .ok_or(ParsingError::InvalidType("gameStartTime".into()))?;

        let map_id = obj["mapId"].as_i32().ok_or(ParsingError::InvalidType("mapId".into()))?;

        let game_length = obj["gameLength"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("gameLength".into()))?;

        let game_mode = obj["gameMode"]
            .as_str()
            .ok_or(ParsingError::InvalidType("gameMode".into()))?
            .to_string();

        let mut participants = Vec::new();
        if let JsonValue::Array(players_array) = &obj["participants"] {
            for player_json in players_array {
                participants.push(parse_participant(player_json)?);
            }
        } else {
            return Err(ParsingError::InvalidType("participants".into()));
        }

        return Ok(CurrentGameDto {
            game_id,
            game_type,
            game_start_time,
            map_id,
            game_length,
            game_mode,
            participants,
        });
    }

    Err(ParsingError::InvalidType("root".into()))
}

fn parse_participant(json: &JsonValue) -> Result<CurrentGameParticipantDto, ParsingError> {
    if let JsonValue::Object(player) = json {
        let team_id = player["teamId"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("teamId".into()))?;

        let champion_id = player["championId"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("championId".into()))?;

        let summoner_id = player["summonerId"].as_str().unwrap_or_default().to_string();

        // Newer payloads only carry the riot id
        let summoner_name = player["summonerName"]
            .as_str()
            .or_else(|| player["riotId"].as_str())
            .unwrap_or_default()
            .to_string();

        let perks_json = &player["perks"];
        let perks = Perks {
            perk_ids: perks_json["perkIds"].members().filter_map(|id| id.as_i32()).collect(),
            perk_style: perks_json["perkStyle"].as_i32().unwrap_or(0),
            perk_sub_style: perks_json["perkSubStyle"].as_i32().unwrap_or(0),
        };

        return Ok(CurrentGameParticipantDto {
            team_id,
            champion_id: champion_id.into(),
            summoner_id,
            summoner_name,
            perks,
        });
    }

    Err(ParsingError::InvalidType("participant entry".into()))
}
