//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations/` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lowercased.
    users (id) {
        id -> Int4,
        email -> Varchar,
        /// bcrypt hash of the account password.
        password -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user containers. The SQL name is the reserved word `box`.
    #[sql_name = "box"]
    boxes (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Pokémon rows. `species_id` references `species`.
    box_species (id) {
        id -> Int4,
        user_id -> Int4,
        box_id -> Int4,
        species_id -> Int4,
        level -> Int4,
        nature -> Varchar,
        ability -> Varchar,
    }
}

diesel::table! {
    /// Ordered move slots, `slot` in `0..4`.
    pokemon_moves (pokemon_id, slot) {
        pokemon_id -> Int4,
        slot -> Int4,
        move_id -> Int4,
    }
}

diesel::table! {
    species (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    moves (id) {
        id -> Int4,
        name -> Varchar,
        move_type -> Varchar,
        power -> Nullable<Int4>,
        accuracy -> Nullable<Int4>,
        pp -> Int4,
    }
}

diesel::table! {
    /// Live sessions keyed by the SHA-256 digest of the cookie token.
    sessions (digest) {
        digest -> Varchar,
        user_id -> Int4,
        expires_at -> Timestamptz,
    }
}

diesel::joinable!(boxes -> users (user_id));
diesel::joinable!(box_species -> boxes (box_id));
diesel::joinable!(box_species -> species (species_id));
diesel::joinable!(pokemon_moves -> box_species (pokemon_id));
diesel::joinable!(pokemon_moves -> moves (move_id));
diesel::joinable!(sessions -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    boxes,
    box_species,
    pokemon_moves,
    species,
    moves,
    sessions,
);
