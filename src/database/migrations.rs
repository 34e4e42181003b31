use log::info;
use tokio_postgres::Client;

// Creates the messages table and its listing index if they are missing.
pub async fn apply_migrations(client: &Client) -> Result<(), String> {
    let create_messages_table_query = "
        CREATE TABLE IF NOT EXISTS messages (
            id BIGSERIAL PRIMARY KEY,
            body TEXT NOT NULL CHECK (body <> ''),
            username TEXT NOT NULL CHECK (username <> ''),
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            CHECK (updated_at >= created_at)
        )
    ";
    client
        .execute(create_messages_table_query, &[])
        .await
        .map_err(|e| format!("Error creating messages table: {}", e))?;

    let create_listing_index_query = "
        CREATE INDEX IF NOT EXISTS messages_created_at_id_idx
        ON messages (created_at, id)
    ";
    client
        .execute(create_listing_index_query, &[])
        .await
        .map_err(|e| format!("Error creating messages index: {}", e))?;

    info!("Schema for 'messages' is up to date");
    Ok(())
}
