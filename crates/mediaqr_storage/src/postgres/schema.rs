//! Diesel table definitions.

diesel::table! {
    media_store (id) {
        id -> Uuid,
        #[max_length = 32]
        short_id -> Varchar,
        file_data -> Bytea,
        #[max_length = 100]
        content_type -> Varchar,
        #[max_length = 255]
        filename -> Nullable<Varchar>,
        file_size -> Int8,
        access_count -> Int8,
        created_at -> Timestamptz,
    }
}
