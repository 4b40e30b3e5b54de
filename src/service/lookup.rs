use std::collections::HashMap;

use once_cell::sync::OnceCell;
use thiserror::Error;

use crate::{
    model::{
        champion::{Champion, ChampionRecord},
        ids::ChampionId,
    },
    service::gameapi::parsing::{champion::parse_champions, ParsingError},
};

const BUNDLED_CHAMPIONS: &str = include_str!("../../data/champions.json");

static BUNDLED_TABLE: OnceCell<Vec<ChampionRecord>> = OnceCell::new();

/// Champion reference rows shipped with the binary, parsed on first use.
pub fn bundled_champions() -> Result<&'static [ChampionRecord], ParsingError> {
    BUNDLED_TABLE
        .get_or_try_init(|| parse_champions(&json::parse(BUNDLED_CHAMPIONS)?))
        .map(Vec::as_slice)
}

pub struct LookupService {
    champs: HashMap<ChampionId, Champion>,
}

impl LookupService {
    pub fn new(champions: &[ChampionRecord]) -> Self {
        Self {
            champs: champions
                .iter()
                .map(|c| (c.id, Champion::from_record(c)))
                .collect(),
        }
    }

    pub fn bundled() -> Result<Self, ParsingError> {
        Ok(Self::new(bundled_champions()?))
    }

    pub fn get_champion(&self, id: ChampionId) -> Result<Champion, IdNotFoundError> {
        match self.champs.get(&id) {
            Some(champ) => Ok(champ.clone()),
            None => Err(IdNotFoundError::Champ(id)),
        }
    }

    pub fn len(&self) -> usize {
        self.champs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.champs.is_empty()
    }
}

/// A reference id missing from the bundled tables. The tables cover every live id, so this
/// points at stale data rather than bad input.
#[derive(Debug, Error)]
pub enum IdNotFoundError {
    #[error("Champion ID not found: {0}")]
    Champ(ChampionId),
}
