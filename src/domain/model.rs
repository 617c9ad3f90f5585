use serde::{Deserialize, Deserializer, Serialize};

/// One catalog item from the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub name: String,
    #[serde(rename = "url")]
    pub detail_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    pub results: Vec<ListingEntry>,
}

/// Full detail record for one catalog item. `id` is the aggregate sort key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub id: i64,
    #[serde(rename = "base_experience", deserialize_with = "null_as_zero")]
    pub base_score: i64,
    pub order: i64,
    pub stats: Vec<StatEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireStat", into = "WireStat")]
pub struct StatEntry {
    pub base_value: i64,
    pub effort: i64,
    pub stat_name: String,
}

// `{"base_stat": 45, "effort": 0, "stat": {"name": "hp"}}`
#[derive(Serialize, Deserialize)]
struct WireStat {
    base_stat: i64,
    effort: i64,
    stat: WireStatName,
}

#[derive(Serialize, Deserialize)]
struct WireStatName {
    name: String,
}

impl From<WireStat> for StatEntry {
    fn from(wire: WireStat) -> Self {
        Self {
            base_value: wire.base_stat,
            effort: wire.effort,
            stat_name: wire.stat.name,
        }
    }
}

impl From<StatEntry> for WireStat {
    fn from(stat: StatEntry) -> Self {
        Self {
            base_stat: stat.base_value,
            effort: stat.effort,
            stat: WireStatName {
                name: stat.stat_name,
            },
        }
    }
}

// Some catalog entries publish `"base_experience": null`.
fn null_as_zero<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}
