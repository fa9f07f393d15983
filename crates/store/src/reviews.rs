use sqlx::PgConnection;

use tasteboard_ingest::records::NewReview;

/// Insert one review row and return its id. Curation flags always start
/// false; `date_updated` is stamped here.
pub async fn insert(conn: &mut PgConnection, review: &NewReview) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO reviews (google_maps_id, place_name, place_url, place_address, provider, \
         review_title, review_text, review_date, review_rating, author_name, \
         ignore_for_quality, ignore_for_rating, ignore_for_insufficient, selected_as_top_rating, \
         date_updated) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, FALSE, FALSE, FALSE, FALSE, now()) \
         RETURNING id",
    )
    .bind(&review.google_maps_id)
    .bind(&review.place_name)
    .bind(&review.place_url)
    .bind(&review.place_address)
    .bind(&review.provider)
    .bind(&review.review_title)
    .bind(&review.review_text)
    .bind(review.review_date)
    .bind(review.review_rating)
    .bind(&review.author_name)
    .fetch_one(conn)
    .await?;
    Ok(row.0)
}
