use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// One match from the location search endpoints. The `woeid` is the
/// identifier accepted by the weather endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub title: String,
    pub location_type: String,
    pub woeid: i64,
    /// Comma-separated "latitude,longitude" as returned by the service.
    pub latt_long: String,
}

/// Location match from a coordinate search, annotated with the distance
/// in meters between the query point and the location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationWithDistance {
    pub title: String,
    pub location_type: String,
    pub woeid: i64,
    pub latt_long: String,
    pub distance: i64,
}

/// Full weather report for one location.
///
/// Every field is defaulted: for an unknown woeid the service answers
/// with a body carrying none of these keys, which decodes into a report
/// whose `title` is empty. Callers detect "not found" that way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    pub consolidated_weather: Vec<WeatherSample>,
    pub time: Option<DateTime<FixedOffset>>,
    pub sun_rise: Option<DateTime<FixedOffset>>,
    pub sun_set: Option<DateTime<FixedOffset>>,
    pub timezone_name: String,
    pub parent: ParentLocation,
    pub sources: Vec<WeatherSource>,
    pub title: String,
    pub location_type: String,
    pub woeid: i64,
    pub latt_long: String,
    pub timezone: String,
}

/// One day's consolidated reading for a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSample {
    pub id: i64,
    pub weather_state_name: String,
    pub weather_state_abbr: String,
    pub wind_direction_compass: String,
    pub created: DateTime<Utc>,
    /// "YYYY-MM-DD" day the reading applies to.
    pub applicable_date: String,
    pub min_temp: f64,
    pub max_temp: f64,
    pub the_temp: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub air_pressure: f64,
    pub humidity: i64,
    pub visibility: f64,
    pub predictability: i64,
}

/// Broader region containing the queried location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParentLocation {
    pub title: String,
    pub location_type: String,
    pub woeid: i64,
    pub latt_long: String,
}

/// Upstream data source credited in a weather report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSource {
    pub title: String,
    pub slug: String,
    pub url: String,
    pub crawl_rate: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_array_decodes_element_for_element() {
        let body = r#"[
            {"title": "London", "location_type": "City", "woeid": 44418, "latt_long": "51.506321,-0.12714"},
            {"title": "Londrina", "location_type": "City", "woeid": 455917, "latt_long": "-23.30399,-51.169899"}
        ]"#;

        let locations: Vec<Location> = serde_json::from_str(body).expect("valid location array");

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].title, "London");
        assert_eq!(locations[0].location_type, "City");
        assert_eq!(locations[0].woeid, 44418);
        assert_eq!(locations[0].latt_long, "51.506321,-0.12714");
        assert_eq!(locations[1].woeid, 455917);
    }

    #[test]
    fn empty_array_decodes_to_empty_vec() {
        let locations: Vec<Location> = serde_json::from_str("[]").expect("empty array is valid");
        assert!(locations.is_empty());
    }

    #[test]
    fn distance_search_variant_carries_distance() {
        let body = r#"[
            {"title": "Bristol", "location_type": "City", "woeid": 13963, "latt_long": "51.453732,-2.591560", "distance": 1092}
        ]"#;

        let locations: Vec<LocationWithDistance> =
            serde_json::from_str(body).expect("valid lattlong array");

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].distance, 1092);
        assert_eq!(locations[0].title, "Bristol");
    }

    #[test]
    fn weather_report_decodes_samples_and_timestamps() {
        let body = r#"{
            "consolidated_weather": [{
                "id": 5094734942437376,
                "weather_state_name": "Light Rain",
                "weather_state_abbr": "lr",
                "wind_direction_compass": "WSW",
                "created": "2021-04-07T18:32:32.215752Z",
                "applicable_date": "2021-04-07",
                "min_temp": 3.35,
                "max_temp": 10.06,
                "the_temp": 9.04,
                "wind_speed": 5.55,
                "wind_direction": 243.0,
                "air_pressure": 1011.0,
                "humidity": 60,
                "visibility": 13.53,
                "predictability": 75
            }],
            "time": "2021-04-07T20:08:12.316163+01:00",
            "sun_rise": "2021-04-07T06:24:43.428921+01:00",
            "sun_set": "2021-04-07T19:45:22.180794+01:00",
            "timezone_name": "LMT",
            "parent": {
                "title": "England",
                "location_type": "Region / State / Province",
                "woeid": 24554868,
                "latt_long": "52.883560,-1.974060"
            },
            "sources": [{
                "title": "BBC",
                "slug": "bbc",
                "url": "http://www.bbc.co.uk/weather/",
                "crawl_rate": 360
            }],
            "title": "London",
            "location_type": "City",
            "woeid": 44418,
            "latt_long": "51.506321,-0.12714",
            "timezone": "Europe/London"
        }"#;

        let report: WeatherReport = serde_json::from_str(body).expect("valid weather report");

        assert_eq!(report.title, "London");
        assert_eq!(report.woeid, 44418);
        assert_eq!(report.parent.title, "England");
        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.sources[0].crawl_rate, 360);
        assert!(report.time.is_some());
        assert!(report.sun_rise.is_some());

        assert_eq!(report.consolidated_weather.len(), 1);
        let sample = &report.consolidated_weather[0];
        assert_eq!(sample.weather_state_name, "Light Rain");
        assert_eq!(sample.wind_direction_compass, "WSW");
        assert_eq!(sample.humidity, 60);
        assert!((sample.the_temp - 9.04).abs() < f64::EPSILON);
    }

    #[test]
    fn not_found_body_decodes_to_empty_titled_report() {
        // Shape the service actually returns for an unknown woeid.
        let report: WeatherReport =
            serde_json::from_str(r#"{"detail": "Not found."}"#).expect("unknown keys are ignored");

        assert_eq!(report.title, "");
        assert!(report.consolidated_weather.is_empty());
        assert!(report.time.is_none());
        assert_eq!(report.parent.woeid, 0);
    }
}
