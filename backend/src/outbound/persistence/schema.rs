//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key, assigned by a `BIGSERIAL` sequence.
        id -> Int8,
        /// Unique login name (max 50 characters).
        username -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Salted password hash in PHC string format.
        password_hash -> Varchar,
        /// Row creation time, defaulted by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only history of evaluated operations.
    calculations (id) {
        id -> Int8,
        /// One of `add`, `subtract`, `multiply`, `divide`.
        operation -> Varchar,
        operand_a -> Float8,
        operand_b -> Float8,
        result -> Float8,
        timestamp -> Timestamptz,
        /// Owning user; rows cascade away with the user.
        user_id -> Int8,
    }
}

diesel::joinable!(calculations -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(calculations, users);
