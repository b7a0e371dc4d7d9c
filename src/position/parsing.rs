use serde::Deserialize;

use super::error::FetchError;
use super::sample::Sample;

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct IssNowResponse {
    message: String,
    #[serde(default)]
    timestamp: Option<i64>,
    #[serde(default)]
    iss_position: Option<IssPosition>,
}

// open-notify sends coordinates as decimal strings
#[derive(Debug, Deserialize)]
struct IssPosition {
    latitude: String,
    longitude: String,
}

pub fn parse_position(body: &str) -> Result<Sample, FetchError> {
    let response: IssNowResponse = serde_json::from_str(body)?;
    if response.message != SUCCESS {
        return Err(FetchError::Unsuccessful(response.message));
    }

    let (Some(timestamp), Some(position)) = (response.timestamp, response.iss_position) else {
        return Err(FetchError::Unsuccessful(
            "success without timestamp or position".to_string(),
        ));
    };

    Ok(Sample {
        timestamp,
        latitude: parse_coordinate("latitude", &position.latitude)?,
        longitude: parse_coordinate("longitude", &position.longitude)?,
    })
}

fn parse_coordinate(axis: &'static str, value: &str) -> Result<f64, FetchError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::Coordinate {
            axis,
            value: value.to_string(),
        })
}
