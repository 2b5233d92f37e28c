//! Contribution calendar query and response shapes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{SkylineError, SkylineResult};
use crate::model::{contribution_level, ContributionDay, ContributionSeries};

#[derive(Debug, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
}

/// Build the calendar query for `login` over `[from 00:00:00Z, to 23:59:59Z]`.
pub fn contribution_query(login: &str, from: NaiveDate, to: NaiveDate) -> String {
    // JSON string escaping is valid GraphQL string escaping
    let login = serde_json::Value::String(login.to_string()).to_string();
    let from = format!("{}T00:00:00Z", from.format("%Y-%m-%d"));
    let to = format!("{}T23:59:59Z", to.format("%Y-%m-%d"));
    format!(
        r#"{{
  user(login: {login}) {{
    contributionsCollection(from: "{from}", to: "{to}") {{
      contributionCalendar {{
        totalContributions
        weeks {{
          contributionDays {{
            date
            contributionCount
            contributionLevel
          }}
        }}
      }}
    }}
  }}
}}"#
    )
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionCalendar {
    #[serde(default)]
    pub total_contributions: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Week {
    pub contribution_days: Vec<Day>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub date: NaiveDate,
    pub contribution_count: u32,
    pub contribution_level: String,
}

impl GraphQlResponse {
    pub fn parse(body: &str) -> SkylineResult<Self> {
        serde_json::from_str(body).map_err(|e| SkylineError::decode(e.to_string()))
    }

    /// Validate and flatten. `login` is only used for the not-found message.
    pub fn into_series(self, login: &str) -> SkylineResult<ContributionSeries> {
        if let Some(first) = self.errors.as_ref().and_then(|errs| errs.first()) {
            return Err(SkylineError::Api(first.message.clone()));
        }

        let user = self
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| SkylineError::NotFound(login.to_string()))?;

        Ok(user.contributions_collection.contribution_calendar.flatten())
    }
}

impl ContributionCalendar {
    /// Week-then-day order, one record per day.
    pub fn flatten(self) -> ContributionSeries {
        let days = self
            .weeks
            .into_iter()
            .flat_map(|w| w.contribution_days)
            .map(|d| ContributionDay {
                date: d.date,
                count: d.contribution_count,
                level: contribution_level(&d.contribution_level),
            })
            .collect();
        ContributionSeries::new(days, self.total_contributions)
    }
}
