use std::time::Duration;

use async_trait::async_trait;
use json::JsonValue;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    model::{
        credential::Credential,
        region::Region,
        riot::{AccountDto, CurrentGameDto, LeagueEntryDto, LeagueListDto, MatchDto, SummonerDto},
    },
    service::gameapi::parsing::{
        league::{parse_league_entries, parse_league_list},
        matches::{parse_match, parse_match_ids},
        spectator::parse_current_game,
        summoner::{parse_account, parse_summoner},
        ParsingError,
    },
};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";
const RIOT_API_DOMAIN: &str = "api.riotgames.com";

pub type RiotApiResult<T> = Result<T, RiotApiRequestError>;

/// Read access to the Riot API resources the stats pages are built from.
///
/// Every method resolves to `Ok(None)` when the API answers 404, so absence is never an error.
#[async_trait]
pub trait RiotDataSource: Send + Sync {
    async fn summoner_by_id(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<SummonerDto>>;

    async fn league_entries(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<Vec<LeagueEntryDto>>>;

    async fn challenger_league(
        &self,
        credential: &Credential,
        region: Region,
        queue: &str,
    ) -> RiotApiResult<Option<LeagueListDto>>;

    async fn current_game(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<CurrentGameDto>>;

    async fn match_ids(
        &self,
        credential: &Credential,
        region: Region,
        puuid: &str,
        count: u32,
    ) -> RiotApiResult<Option<Vec<String>>>;

    async fn match_by_id(
        &self,
        credential: &Credential,
        region: Region,
        match_id: &str,
    ) -> RiotApiResult<Option<MatchDto>>;

    async fn account_by_puuid(
        &self,
        credential: &Credential,
        region: Region,
        puuid: &str,
    ) -> RiotApiResult<Option<AccountDto>>;
}

#[derive(Clone)]
pub struct RiotApiClient {
    client: Client,
    base_url: Option<String>,
}

impl RiotApiClient {
    pub fn new(timeout: Duration) -> Result<Self, RiotApiClientInitError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: None })
    }

    /// Sends every request to `base_url` instead of the regional Riot hosts.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn endpoint_url(&self, host: &str, path: &str) -> String {
        match &self.base_url {
            Some(base_url) => format!("{}{}", base_url.trim_end_matches('/'), path),
            None => format!("https://{}.{}{}", host, RIOT_API_DOMAIN, path),
        }
    }

    fn platform_url(&self, region: Region, path: &str) -> String {
        self.endpoint_url(region.platform(), path)
    }

    fn cluster_url(&self, region: Region, path: &str) -> String {
        self.endpoint_url(region.cluster().host(), path)
    }

    async fn fetch(&self, credential: &Credential, url: &str) -> RiotApiResult<Option<JsonValue>> {
        let response = self
            .client
            .get(url)
            .header(RIOT_TOKEN_HEADER, credential.as_str())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url, "riot api returned 404");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!(url, status = status.as_u16(), "riot api request failed");
            return Err(RiotApiRequestError::InvalidResponse(status.as_u16(), body));
        }

        let text = response.text().await?;
        let json = json::parse(&text)?;
        Ok(Some(json))
    }

    async fn fetch_parsed<T>(
        &self,
        credential: &Credential,
        url: &str,
        parse: fn(&JsonValue) -> Result<T, ParsingError>,
    ) -> RiotApiResult<Option<T>> {
        match self.fetch(credential, url).await? {
            Some(json) => Ok(Some(parse(&json)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl RiotDataSource for RiotApiClient {
    async fn summoner_by_id(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<SummonerDto>> {
        let path = format!("/lol/summoner/v4/summoners/{}", urlencoding::encode(summoner_id));
        self.fetch_parsed(credential, &self.platform_url(region, &path), parse_summoner)
            .await
    }

    async fn league_entries(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<Vec<LeagueEntryDto>>> {
        let path = format!(
            "/lol/league/v4/entries/by-summoner/{}",
            urlencoding::encode(summoner_id)
        );
        self.fetch_parsed(credential, &self.platform_url(region, &path), parse_league_entries)
            .await
    }

    async fn challenger_league(
        &self,
        credential: &Credential,
        region: Region,
        queue: &str,
    ) -> RiotApiResult<Option<LeagueListDto>> {
        let path = format!("/lol/league/v4/challengerleagues/by-queue/{}", urlencoding::encode(queue));
        self.fetch_parsed(credential, &self.platform_url(region, &path), parse_league_list)
            .await
    }

    async fn current_game(
        &self,
        credential: &Credential,
        region: Region,
        summoner_id: &str,
    ) -> RiotApiResult<Option<CurrentGameDto>> {
        let path = format!(
            "/lol/spectator/v4/active-games/by-summoner/{}",
            urlencoding::encode(summoner_id)
        );
        self.fetch_parsed(credential, &self.platform_url(region, &path), parse_current_game)
            .await
    }

    async fn match_ids(
        &self,
        credential: &Credential,
        region: Region,
        puuid: &str,
        count: u32,
    ) -> RiotApiResult<Option<Vec<String>>> {
        let path = format!(
            "/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}",
            urlencoding::encode(puuid),
            count
        );
        self.fetch_parsed(credential, &self.cluster_url(region, &path), parse_match_ids)
            .await
    }

    async fn match_by_id(
        &self,
        credential: &Credential,
        region: Region,
        match_id: &str,
    ) -> RiotApiResult<Option<MatchDto>> {
        let path = format!("/lol/match/v5/matches/{}", urlencoding::encode(match_id));
        self.fetch_parsed(credential, &self.cluster_url(region, &path), parse_match)
            .await
    }

    async fn account_by_puuid(
        &self,
        credential: &Credential,
        region: Region,
        puuid: &str,
    ) -> RiotApiResult<Option<AccountDto>> {
        let path = format!("/riot/account/v1/accounts/by-puuid/{}", urlencoding::encode(puuid));
        let url = self.endpoint_url(region.cluster().for_accounts().host(), &path);
        self.fetch_parsed(credential, &url, parse_account).await
    }
}

#[derive(Debug, Error)]
pub enum RiotApiClientInitError {
    #[error("Failed to create HTTP client: {0}")]
    HttpClientCreation(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum RiotApiRequestError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
    #[error("Riot API returned error {0}: {1}")]
    InvalidResponse(u16, String),
    #[error("Failed to parse JSON response: {0}")]
    JsonParseError(#[from] json::Error),
    #[error("Unexpected response shape: {0}")]
    Parsing(#[from] ParsingError),
}
