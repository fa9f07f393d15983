use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use tasteboard_scrape::RawReview;

use crate::records::NewReview;

/// Map one raw scraped record into a canonical review.
///
/// Text fields default to empty strings, optional scalars to absent, and an
/// unparsable date becomes absent; normalization never fails. Ratings are
/// deliberately NOT range-checked here: ingestion trusts the upstream
/// scraper's shape, unlike the direct-submission path.
pub fn normalize(raw: &RawReview) -> NewReview {
    NewReview {
        google_maps_id: raw.google_maps_place_id.clone(),
        place_name: raw.place_name.clone().unwrap_or_default(),
        place_url: raw.place_url.clone().unwrap_or_default(),
        place_address: raw.place_address.clone().unwrap_or_default(),
        provider: raw.provider.clone().unwrap_or_default(),
        review_title: raw.review_title.clone().unwrap_or_default(),
        review_text: raw.review_text.clone(),
        review_date: parse_review_date(raw.review_date.as_deref()),
        review_rating: raw.review_rating,
        author_name: raw.author_name.clone().unwrap_or_default(),
    }
}

/// Strict timestamp parse. Accepts RFC 3339 with offsets or a trailing "Z"
/// UTC marker, plus bare `YYYY-MM-DD` dates (taken as UTC midnight).
fn parse_review_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let s = raw?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(json: &str) -> RawReview {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn trailing_z_marker_is_accepted() {
        let review = normalize(&raw(r#"{"reviewDate": "2025-11-09T00:48:43.566Z"}"#));
        let expected = Utc.with_ymd_and_hms(2025, 11, 9, 0, 48, 43).unwrap()
            + chrono::Duration::milliseconds(566);
        assert_eq!(review.review_date, Some(expected));
    }

    #[test]
    fn explicit_offsets_are_converted_to_utc() {
        let review = normalize(&raw(r#"{"reviewDate": "2025-11-09T02:00:00+02:00"}"#));
        assert_eq!(
            review.review_date,
            Some(Utc.with_ymd_and_hms(2025, 11, 9, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn bare_dates_become_utc_midnight() {
        let review = normalize(&raw(r#"{"reviewDate": "2025-10-20"}"#));
        assert_eq!(
            review.review_date,
            Some(Utc.with_ymd_and_hms(2025, 10, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_dates_become_absent_never_an_error() {
        for bad in ["three days ago", "20/10/2025", "2025-13-01", "", "   "] {
            let review = normalize(&raw(&format!(r#"{{"reviewDate": {bad:?}}}"#)));
            assert_eq!(review.review_date, None, "{bad:?} should normalize to None");
        }
        let review = normalize(&raw(r#"{"reviewDate": null}"#));
        assert_eq!(review.review_date, None);
    }

    #[test]
    fn missing_fields_take_safe_defaults() {
        let review = normalize(&raw("{}"));
        assert_eq!(review.google_maps_id, None);
        assert_eq!(review.place_name, "");
        assert_eq!(review.place_url, "");
        assert_eq!(review.provider, "");
        assert_eq!(review.review_title, "");
        assert_eq!(review.review_text, None);
        assert_eq!(review.review_rating, None);
        assert_eq!(review.author_name, "");
    }

    #[test]
    fn null_review_text_stays_null() {
        let review = normalize(&raw(
            r#"{"placeName": "Maison Selby", "reviewText": null, "reviewRating": 5}"#,
        ));
        assert_eq!(review.place_name, "Maison Selby");
        assert_eq!(review.review_text, None);
        assert_eq!(review.review_rating, Some(5));
    }

    #[test]
    fn ratings_pass_through_without_range_validation() {
        let review = normalize(&raw(r#"{"reviewRating": 6}"#));
        assert_eq!(review.review_rating, Some(6));
    }
}
