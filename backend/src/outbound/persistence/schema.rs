//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Registered accounts. `email` carries a unique index.
    users (id) {
        id -> Integer,
        email -> Text,
        password_hash -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    /// The landmark catalogue.
    landmarks (id) {
        id -> Integer,
        name -> Text,
        description -> Nullable<Text>,
    }
}

diesel::table! {
    /// Per-user landmark scores. `(user_id, landmark_id)` carries a unique
    /// index; repeat submissions update the row in place.
    ratings (id) {
        id -> Integer,
        user_id -> Integer,
        landmark_id -> Integer,
        score -> Integer,
    }
}

diesel::table! {
    /// Planned walks owned by a user.
    walks (id) {
        id -> Integer,
        user_id -> Integer,
        origin -> Text,
        destination -> Text,
        time_budget -> Text,
    }
}

diesel::table! {
    /// Join table linking walks to the landmarks their route passes through.
    walk_landmarks (walk_id, landmark_id) {
        walk_id -> Integer,
        landmark_id -> Integer,
    }
}

diesel::joinable!(ratings -> users (user_id));
diesel::joinable!(ratings -> landmarks (landmark_id));
diesel::joinable!(walks -> users (user_id));
diesel::joinable!(walk_landmarks -> walks (walk_id));
diesel::joinable!(walk_landmarks -> landmarks (landmark_id));

diesel::allow_tables_to_appear_in_same_query!(users, landmarks, ratings, walks, walk_landmarks);
