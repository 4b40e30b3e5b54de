use std::fmt::Display;

use async_graphql::Enum;

/// Platform regions the leaderboard and player pages can be browsed in.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    #[graphql(name = "NA1")]
    Na1,
    #[graphql(name = "EUW1")]
    Euw1,
    #[graphql(name = "EUN1")]
    Eun1,
    #[graphql(name = "KR")]
    Kr,
    #[graphql(name = "BR1")]
    Br1,
    #[graphql(name = "JP1")]
    Jp1,
    #[graphql(name = "LA1")]
    La1,
    #[graphql(name = "LA2")]
    La2,
    #[graphql(name = "OC1")]
    Oc1,
    #[graphql(name = "TR1")]
    Tr1,
    #[graphql(name = "RU")]
    Ru,
}

impl Region {
    /// Lowercase platform code, used as host prefix for platform-scoped endpoints.
    pub fn platform(&self) -> &'static str {
        match self {
            Region::Na1 => "na1",
            Region::Euw1 => "euw1",
            Region::Eun1 => "eun1",
            Region::Kr => "kr",
            Region::Br1 => "br1",
            Region::Jp1 => "jp1",
            Region::La1 => "la1",
            Region::La2 => "la2",
            Region::Oc1 => "oc1",
            Region::Tr1 => "tr1",
            Region::Ru => "ru",
        }
    }

    pub fn cluster(&self) -> RoutingCluster {
        routing_cluster(self.platform())
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.platform().to_uppercase())
    }
}

/// Continental hosts serving match history and account lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingCluster {
    Americas,
    Europe,
    Asia,
    Sea,
}

impl RoutingCluster {
    pub fn host(&self) -> &'static str {
        match self {
            RoutingCluster::Americas => "americas",
            RoutingCluster::Europe => "europe",
            RoutingCluster::Asia => "asia",
            RoutingCluster::Sea => "sea",
        }
    }

    /// The account endpoint is not deployed on `sea`.
    pub fn for_accounts(self) -> RoutingCluster {
        match self {
            RoutingCluster::Sea => RoutingCluster::Asia,
            other => other,
        }
    }
}

impl Display for RoutingCluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.host())
    }
}

/// Maps a platform code (case insensitive) to its routing cluster. Unknown codes fall back to
/// `americas`.
pub fn routing_cluster(platform: &str) -> RoutingCluster {
    match platform.to_lowercase().as_str() {
        "na1" | "br1" | "la1" | "la2" => RoutingCluster::Americas,
        "euw1" | "eun1" | "tr1" | "ru" => RoutingCluster::Europe,
        "kr" | "jp1" => RoutingCluster::Asia,
        "oc1" => RoutingCluster::Sea,
        _ => RoutingCluster::Americas,
    }
}
