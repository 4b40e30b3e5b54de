use std::sync::Arc;

use async_graphql::{
    ComplexObject, Context, EmptyMutation, Error, ErrorExtensions, Object, Result, Schema, Subscription,
};
use futures::Stream;
use tracing::debug;

use crate::{
    model::{
        champion::profile_icon_url,
        credential::{Credential, UserIdentity},
        game::{CurrentGameInfo, PlayerGameUpdate},
        region::Region,
        summoner::Player,
    },
    service::{
        data_manager::{DataManager, DataRetrievalError},
        live_updates::{watch_player, PollSettings},
    },
};

pub type LeagueSchema = Schema<QueryRoot, EmptyMutation, SubscriptionRoot>;

/// Schema serving the stats queries. The upstream credential and poll settings are shared by
/// every request.
pub fn build_schema(manager: Arc<DataManager>, credential: Credential, poll_settings: PollSettings) -> LeagueSchema {
    Schema::build(QueryRoot, EmptyMutation, SubscriptionRoot)
        .data(manager)
        .data(credential)
        .data(poll_settings)
        .finish()
}

impl ErrorExtensions for DataRetrievalError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            if let DataRetrievalError::RateLimited { retry_after, .. } = self {
                ext.set("retryAfterMs", retry_after.as_millis() as u64);
            }
        })
    }
}

fn services<'a>(ctx: &Context<'a>) -> Result<(&'a DataManager, &'a Credential)> {
    let manager = ctx.data::<Arc<DataManager>>()?;
    let credential = ctx.data::<Credential>()?;
    Ok((manager.as_ref(), credential))
}

fn caller<'a>(ctx: &Context<'a>) -> &'a str {
    ctx.data_opt::<UserIdentity>()
        .map(|user| user.0.as_str())
        .unwrap_or("anonymous")
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Ten best players of the region's challenger ladder.
    async fn top_players(&self, ctx: &Context<'_>, region: Region) -> Result<Vec<Player>> {
        let (manager, credential) = services(ctx)?;
        debug!(user = caller(ctx), %region, "topPlayers");
        manager.top_players(credential, region).await.map_err(|err| err.extend())
    }

    /// A single summoner, or null when the summoner doesn't exist.
    async fn player(&self, ctx: &Context<'_>, region: Region, summoner_id: String) -> Result<Option<Player>> {
        let (manager, credential) = services(ctx)?;
        debug!(user = caller(ctx), %region, %summoner_id, "player");
        match manager.player(credential, region, &summoner_id).await {
            Ok(player) => Ok(Some(player)),
            Err(DataRetrievalError::NotFound(what)) => {
                debug!(%what, "player not found");
                Ok(None)
            }
            Err(err) => Err(err.extend()),
        }
    }

    /// The game the summoner is in right now, null when not in game.
    async fn current_game(
        &self,
        ctx: &Context<'_>,
        region: Region,
        summoner_id: String,
    ) -> Result<Option<CurrentGameInfo>> {
        let (manager, credential) = services(ctx)?;
        debug!(user = caller(ctx), %region, %summoner_id, "currentGame");
        manager
            .current_game(credential, region, &summoner_id)
            .await
            .map_err(|err| err.extend())
    }
}

#[ComplexObject]
impl Player {
    async fn profile_icon_url(&self) -> String {
        profile_icon_url(self.profile_icon_id)
    }

    /// Fetched on demand, never cached.
    async fn current_game(&self, ctx: &Context<'_>) -> Result<Option<CurrentGameInfo>> {
        let (manager, credential) = services(ctx)?;
        manager
            .current_game(credential, self.region, &self.id)
            .await
            .map_err(|err| err.extend())
    }
}

pub struct SubscriptionRoot;

#[Subscription]
impl SubscriptionRoot {
    /// Emits whenever the summoner enters or leaves a game. Runs until the client unsubscribes.
    async fn player_game_update(
        &self,
        ctx: &Context<'_>,
        summoner_id: String,
        #[graphql(default)] region: Region,
    ) -> Result<impl Stream<Item = PlayerGameUpdate>> {
        let manager = ctx.data::<Arc<DataManager>>()?.clone();
        let credential = ctx.data::<Credential>()?.clone();
        let poll_settings = *ctx.data::<PollSettings>()?;
        debug!(user = caller(ctx), %region, %summoner_id, "playerGameUpdate");

        Ok(watch_player(manager, credential, region, summoner_id, poll_settings))
    }
}
