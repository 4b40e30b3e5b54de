use json::JsonValue;
use tracing::warn;

use crate::model::{
    riot::{LeagueEntryDto, LeagueItemDto, LeagueListDto},
    summoner::{Division, Tier},
};

use super::ParsingError;

/// Entries the API returns for queues this service doesn't model (e.g. arena rows without a
/// tier) are skipped, so one odd entry never hides the others.
pub fn parse_league_entries(json: &JsonValue) -> Result<Vec<LeagueEntryDto>, ParsingError> {
    if let JsonValue::Array(entries_array) = json {
        let entries = entries_array
            .iter()
            .filter_map(|entry_json| match parse_league_entry(entry_json) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(queue = entry_json["queueType"].as_str().unwrap_or("?"), error = %err, "skipping league entry");
                    None
                }
            })
            .collect();

        return Ok(entries);
    }

    Err(ParsingError::InvalidType("root (expected array)".into()))
}

fn parse_league_entry(json: &JsonValue) -> Result<LeagueEntryDto, ParsingError> {
    if let JsonValue::Object(entry) = json {
        let queue_type = entry["queueType"]
            .as_str()
            .ok_or(ParsingError::InvalidType("queueType".into()))?
            .to_string();

        let tier = entry["tier"]
            .as_str()
            .and_then(Tier::from_api)
            .ok_or(ParsingError::InvalidType("tier".into()))?;

        let rank = entry["rank"]
            .as_str()
            .and_then(Division::from_api)
            .ok_or(ParsingError::InvalidType("rank".into()))?;

        let league_points = entry["leaguePoints"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("leaguePoints".into()))?;

        let wins = entry["wins"].as_i32().ok_or(ParsingError::InvalidType("wins".into()))?;

        let losses = entry["losses"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("losses".into()))?;

        return Ok(LeagueEntryDto {
            queue_type,
            tier,
            rank,
            league_points,
            wins,
            losses,
            hot_streak: entry["hotStreak"].as_bool().unwrap_or(false),
            veteran: entry["veteran"].as_bool().unwrap_or(false),
            fresh_blood: entry["freshBlood"].as_bool().unwrap_or(false),
            inactive: entry["inactive"].as_bool().unwrap_or(false),
        });
    }

    Err(ParsingError::InvalidType("league entry".into()))
}

/// Ladder rows that can't be read are left out of the listing.
pub fn parse_league_list(json: &JsonValue) -> Result<LeagueListDto, ParsingError> {
    if let JsonValue::Object(obj) = json {
        let tier = obj["tier"]
            .as_str()
            .and_then(Tier::from_api)
            .ok_or(ParsingError::InvalidType("tier".into()))?;

        let JsonValue::Array(entries_array) = &obj["entries"] else {
            return Err(ParsingError::InvalidType("entries".into()));
        };

        let entries = entries_array
            .iter()
            .filter_map(|item_json| match parse_league_item(item_json) {
                Ok(item) => Some(item),
                Err(err) => {
                    warn!(summoner_id = item_json["summonerId"].as_str().unwrap_or("?"), error = %err, "skipping ladder row");
                    None
                }
            })
            .collect();

        return Ok(LeagueListDto { tier, entries });
    }

    Err(ParsingError::InvalidType("root".into()))
}

fn parse_league_item(json: &JsonValue) -> Result<LeagueItemDto, ParsingError> {
    if let JsonValue::Object(item) = json {
        let summoner_id = item["summonerId"]
            .as_str()
            .ok_or(ParsingError::InvalidType("summonerId".into()))?
            .to_string();

        // Apex tiers have a single division
        let rank = match item["rank"].as_str() {
            Some(rank) => Division::from_api(rank).ok_or(ParsingError::InvalidType("rank".into()))?,
            None => Division::One,
        };

        let league_points = item["leaguePoints"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("leaguePoints".into()))?;
        let wins = item["wins"].as_i32().ok_or(ParsingError::InvalidType("wins".into()))?;
        let losses = item["losses"]
            .as_i32()
            .ok_or(ParsingError::InvalidType("losses".into()))?;

        return Ok(LeagueItemDto {
            summoner_id,
            rank,
            league_points,
            wins,
            losses,
            hot_streak: item["hotStreak"].as_bool().unwrap_or(false),
            veteran: item["veteran"].as_bool().unwrap_or(false),
            fresh_blood: item["freshBlood"].as_bool().unwrap_or(false),
            inactive: item["inactive"].as_bool().unwrap_or(false),
        });
    }

    Err(ParsingError::InvalidType("league item".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_of_all_queues() {
        let json = json::parse(
            r#"[
                {"queueType":"RANKED_FLEX_SR","tier":"GOLD","rank":"II","leaguePoints":40,"wins":10,"losses":12},
                {"queueType":"RANKED_SOLO_5x5","tier":"DIAMOND","rank":"IV","leaguePoints":75,"wins":120,"losses":100,"hotStreak":true}
            ]"#,
        )
        .unwrap();

        let entries = parse_league_entries(&json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].queue_type, "RANKED_SOLO_5x5");
        assert_eq!(entries[1].tier, Tier::Diamond);
        assert_eq!(entries[1].rank, Division::Four);
        assert!(entries[1].hot_streak);
        assert!(!entries[0].veteran);
    }

    #[test]
    fn unreadable_side_queue_entry_keeps_solo_queue() {
        let json = json::parse(
            r#"[
                {"queueType":"CHERRY","leaguePoints":0,"wins":12,"losses":8},
                {"queueType":"RANKED_FLEX_SR","tier":"WOOD","rank":"I","leaguePoints":0,"wins":0,"losses":0},
                {"queueType":"RANKED_SOLO_5x5","tier":"DIAMOND","rank":"IV","leaguePoints":75,"wins":120,"losses":100}
            ]"#,
        )
        .unwrap();

        let entries = parse_league_entries(&json).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].queue_type, "RANKED_SOLO_5x5");
        assert_eq!(entries[0].tier, Tier::Diamond);
        assert_eq!(entries[0].league_points, 75);
    }

    #[test]
    fn entries_must_be_an_array() {
        let json = json::parse(r#"{"queueType":"RANKED_SOLO_5x5"}"#).unwrap();
        assert!(parse_league_entries(&json).is_err());
    }

    #[test]
    fn unreadable_ladder_row_is_left_out() {
        let json = json::parse(
            r#"{"tier":"CHALLENGER","queue":"RANKED_SOLO_5x5","entries":[
                {"summonerId":"a","leaguePoints":1200,"rank":"I","wins":300,"losses":250},
                {"leaguePoints":1700,"wins":10,"losses":2},
                {"summonerId":"c","leaguePoints":1100,"rank":"VI","wins":1,"losses":1}
            ]}"#,
        )
        .unwrap();

        let list = parse_league_list(&json).unwrap();
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].summoner_id, "a");
    }

    #[test]
    fn parses_challenger_listing() {
        let json = json::parse(
            r#"{"tier":"CHALLENGER","queue":"RANKED_SOLO_5x5","entries":[
                {"summonerId":"a","leaguePoints":1200,"rank":"I","wins":300,"losses":250,"veteran":true},
                {"summonerId":"b","leaguePoints":1500,"wins":280,"losses":200}
            ]}"#,
        )
        .unwrap();

        let list = parse_league_list(&json).unwrap();
        assert_eq!(list.tier, Tier::Challenger);
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[0].summoner_id, "a");
        assert!(list.entries[0].veteran);
        assert_eq!(list.entries[1].rank, Division::One);
    }
}
