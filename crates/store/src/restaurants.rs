use sqlx::PgConnection;

use tasteboard_ingest::records::NewRestaurant;

/// Insert the (place, type) row unless the pair already exists.
///
/// The composite primary key plus ON CONFLICT DO NOTHING makes the dedup
/// atomic: two concurrent ingestions over the same pair cannot both insert.
/// Returns true when a row was added, false when the pair was already there.
pub async fn insert_if_absent(
    conn: &mut PgConnection,
    restaurant: &NewRestaurant,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO restaurants (google_maps_id, place_name, place_address, restaurant_type) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (google_maps_id, restaurant_type) DO NOTHING",
    )
    .bind(&restaurant.google_maps_id)
    .bind(&restaurant.place_name)
    .bind(&restaurant.place_address)
    .bind(&restaurant.restaurant_type)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
