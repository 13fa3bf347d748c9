use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scraping model requested by the caller; decides how long a query may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Model {
    #[default]
    Nova,
    Orbit,
    Horizon,
}

impl Model {
    pub fn max_execution_time(&self) -> Duration {
        match self {
            Model::Nova => Duration::from_secs(10),
            Model::Orbit => Duration::from_secs(30),
            Model::Horizon => Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateFilter {
    #[serde(rename = "PAST_24_HOURS")]
    Past24Hours,
    #[serde(rename = "PAST_2_DAYS")]
    Past2Days,
    #[default]
    #[serde(rename = "PAST_WEEK")]
    PastWeek,
    #[serde(rename = "PAST_2_WEEKS")]
    Past2Weeks,
    #[serde(rename = "PAST_MONTH")]
    PastMonth,
    #[serde(rename = "PAST_2_MONTHS")]
    Past2Months,
    #[serde(rename = "PAST_YEAR")]
    PastYear,
    #[serde(rename = "PAST_2_YEARS")]
    Past2Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseOrder {
    #[default]
    LinksFirst,
    SummaryFirst,
}
