use serde::Deserialize;

use crate::records::NewReview;

/// Provider label stamped on directly submitted reviews.
pub const HOUSE_PROVIDER: &str = "house";

const MAX_PLACE_ID_LEN: usize = 128;
const MAX_TITLE_LEN: usize = 255;
const MAX_AUTHOR_LEN: usize = 128;

/// Raw fields of a user-submitted review, before validation. Everything
/// arrives as a string; missing fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SubmissionInput {
    pub google_maps_id: String,
    pub place_name: String,
    pub review_title: String,
    pub review_text: String,
    pub review_rating: String,
    pub author_name: String,
}

/// Validate a direct submission.
///
/// Unlike ingestion, this path is strict: the place identifier is required,
/// the rating must be an integer in [1, 5], and length limits apply. All
/// failures are collected and returned together rather than stopping at the
/// first one.
pub fn validate(input: &SubmissionInput) -> Result<NewReview, Vec<String>> {
    let mut errors = Vec::new();

    let google_maps_id = input.google_maps_id.trim();
    if google_maps_id.is_empty() {
        errors.push("google_maps_id is required".to_string());
    } else if google_maps_id.len() > MAX_PLACE_ID_LEN {
        errors.push(format!(
            "google_maps_id must be {MAX_PLACE_ID_LEN} characters or less"
        ));
    }

    let rating_raw = input.review_rating.trim();
    let mut rating = None;
    if rating_raw.is_empty() {
        errors.push("review_rating is required".to_string());
    } else {
        match rating_raw.parse::<i16>() {
            Ok(value) if (1..=5).contains(&value) => rating = Some(value),
            Ok(_) => errors.push("review_rating must be between 1 and 5".to_string()),
            Err(_) => errors.push("review_rating must be a valid integer".to_string()),
        }
    }

    let review_title = input.review_title.trim();
    if review_title.len() > MAX_TITLE_LEN {
        errors.push(format!(
            "review_title must be {MAX_TITLE_LEN} characters or less"
        ));
    }

    let author_name = input.author_name.trim();
    if author_name.len() > MAX_AUTHOR_LEN {
        errors.push(format!(
            "author_name must be {MAX_AUTHOR_LEN} characters or less"
        ));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let review_text = input.review_text.trim();
    Ok(NewReview {
        google_maps_id: Some(google_maps_id.to_string()),
        place_name: input.place_name.trim().to_string(),
        place_url: String::new(),
        place_address: String::new(),
        provider: HOUSE_PROVIDER.to_string(),
        review_title: review_title.to_string(),
        review_text: (!review_text.is_empty()).then(|| review_text.to_string()),
        review_date: None,
        review_rating: rating,
        author_name: author_name.to_string(),
    })
}
