use chrono::{DateTime, Utc};

/// A review row staged for insertion.
///
/// The four curation flags are not carried here: they always start false and
/// the store sets them at insert time. `date_updated` is likewise owned by
/// the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub google_maps_id: Option<String>,
    pub place_name: String,
    pub place_url: String,
    pub place_address: String,
    pub provider: String,
    pub review_title: String,
    pub review_text: Option<String>,
    pub review_date: Option<DateTime<Utc>>,
    pub review_rating: Option<i16>,
    pub author_name: String,
}

/// A (place, type) association staged for insertion. The same physical
/// place may be tracked under several type tags, one row each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub google_maps_id: String,
    pub place_name: String,
    pub place_address: String,
    pub restaurant_type: String,
}
