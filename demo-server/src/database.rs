use sqlx::sqlite::SqlitePool;
use sqlx::Row;

pub async fn setup(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create items table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            name TEXT,
            qty INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create drivers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS drivers (
            name TEXT NOT NULL,
            license_no TEXT UNIQUE,
            rating REAL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create trips table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS trips (
            driver TEXT,
            origin TEXT,
            destination TEXT,
            fare REAL,
            started_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    seed(pool).await
}

async fn seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Seed only once
    let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM drivers")
        .fetch_one(pool)
        .await?
        .try_get("count")?;
    if count > 0 {
        return Ok(());
    }

    sqlx::query("INSERT INTO items (name, qty) VALUES ('pen', 3), ('notebook', 12)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO drivers (name, license_no, rating) VALUES
            ('Ayşe Demir', 'DL-1042', 4.8),
            ('Marcus Webb', 'DL-2210', 4.5)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO trips (driver, origin, destination, fare) VALUES
            ('Ayşe Demir', 'Airport', 'Harbor', 23.50),
            ('Marcus Webb', 'Station', 'Old Town', 11.00)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
