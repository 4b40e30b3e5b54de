use json::JsonValue;

use crate::model::riot::{AccountDto, SummonerDto};

use super::ParsingError;

pub fn parse_summoner(json: &JsonValue) -> Result<SummonerDto, ParsingError> {
    if let JsonValue::Object(obj) = json {
        let id = obj["id"].as_str().ok_or(ParsingError::InvalidType("id".into()))?;
        let puuid = obj["puuid"].as_str().ok_or(ParsingError::InvalidType("puuid".into()))?;
        let account_id = obj["accountId"].as_str().unwrap_or_default();

        // Missing icon or level is shown as the defaults
        let profile_icon_id = obj["profileIconId"].as_i32().unwrap_or(1);
        let summoner_level = obj["summonerLevel"].as_i32().unwrap_or(1);

        return Ok(SummonerDto {
            id: id.to_string(),
            account_id: account_id.to_string(),
            puuid: puuid.to_string(),
            profile_icon_id,
            summoner_level,
        });
    }

    Err(ParsingError::InvalidType("root".into()))
}

pub fn parse_account(json: &JsonValue) -> Result<AccountDto, ParsingError> {
    if let JsonValue::Object(obj) = json {
        let puuid = obj["puuid"].as_str().ok_or(ParsingError::InvalidType("puuid".into()))?;
        let game_name = obj["gameName"].as_str().map(String::from);
        let tag_line = obj["tagLine"].as_str().map(String::from);

        return Ok(AccountDto {
            puuid: puuid.to_string(),
            game_name,
            tag_line,
        });
    }

    Err(ParsingError::InvalidType("root".into()))
}
