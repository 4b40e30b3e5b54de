use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, GraphQLSubscription};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{graphql::LeagueSchema, model::credential::UserIdentity};

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Clone)]
struct AppState {
    schema: LeagueSchema,
}

pub fn router(schema: LeagueSchema) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route_service("/graphql/ws", GraphQLSubscription::new(schema.clone()))
        .route("/heartbeat", get(heartbeat))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(AppState { schema })
}

async fn graphql_handler(State(state): State<AppState>, headers: HeaderMap, request: GraphQLRequest) -> GraphQLResponse {
    let mut request = request.into_inner();
    if let Some(user) = user_identity(&headers) {
        request = request.data(user);
    }
    state.schema.execute(request).await.into()
}

fn user_identity(headers: &HeaderMap) -> Option<UserIdentity> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(|value| UserIdentity(value.to_string()))
}

async fn graphiql() -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint("/graphql")
            .subscription_endpoint("/graphql/ws")
            .finish(),
    )
}

async fn heartbeat() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
