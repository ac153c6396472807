// Mapper to convert wire issue records into domain issues
use crate::application::issue_repository::FetchError;
use crate::domain::issue::{Issue, IssueType, Location};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

/// Issue object as served by the remote issue API.
#[derive(Debug, Deserialize)]
pub struct IssueRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    pub location: LocationRecord,
    pub status: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationRecord {
    pub lat: f64,
    pub lng: f64,
}

/// Decode a JSON array of issue records. Any malformed record fails the whole payload.
pub fn issues_from_json(body: &str) -> Result<Vec<Issue>, FetchError> {
    let records: Vec<IssueRecord> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    records.into_iter().map(record_to_issue).collect()
}

pub fn record_to_issue(record: IssueRecord) -> Result<Issue, FetchError> {
    let issue_type = record.issue_type.parse::<IssueType>().map_err(|_| {
        FetchError::Decode(format!(
            "issue {} has unknown type {:?}",
            record.id, record.issue_type
        ))
    })?;

    let reported_at = parse_reported_at(&record.date).ok_or_else(|| {
        FetchError::Decode(format!("issue {} has unparseable date {:?}", record.id, record.date))
    })?;

    // Empty strings are treated the same as a missing image
    let image_url = record.image_url.filter(|url| !url.trim().is_empty());

    Ok(Issue {
        id: record.id,
        issue_type,
        title: record.title,
        description: record.description,
        image_url,
        location: Location::new(record.location.lat, record.location.lng),
        status: record.status,
        reported_at,
    })
}

/// Naive timestamp layouts, taken as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Accepts RFC 3339, ISO 8601 with a basic-format offset, naive timestamps (UTC)
/// and bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_reported_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.with_timezone(&Utc));
    }

    if let Ok(time) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(time.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
