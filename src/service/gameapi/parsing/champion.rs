use json::{object::Object, JsonValue};

use crate::model::champion::ChampionRecord;

use super::ParsingError;

pub fn parse_champions(json: &JsonValue) -> Result<Vec<ChampionRecord>, ParsingError> {
    if let JsonValue::Array(array) = json {
        let mut champions = Vec::new();

        for champ_entry in array {
            if let JsonValue::Object(champ_obj) = &champ_entry {
                champions.push(parse_champ_obj(champ_obj)?);
            } else {
                return Err(ParsingError::InvalidType("champ entry".into()));
            }
        }

        return Ok(champions);
    }

    Err(ParsingError::InvalidType("root".into()))
}

fn parse_champ_obj(obj: &Object) -> Result<ChampionRecord, ParsingError> {
    let champ_id = obj["id"].as_i32().ok_or(ParsingError::InvalidType("id".into()))?;
    let key = obj["key"].as_str().ok_or(ParsingError::InvalidType("key".into()))?;
    let name = obj["name"].as_str().ok_or(ParsingError::InvalidType("name".into()))?;
    let title = obj["title"].as_str().ok_or(ParsingError::InvalidType("title".into()))?;

    Ok(ChampionRecord {
        id: champ_id.into(),
        key: key.to_string(),
        name: name.to_string(),
        title: title.to_string(),
    })
}
