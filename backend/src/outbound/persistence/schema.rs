//! Diesel table definitions mirroring `migrations/`.
//!
//! Keep in sync with the SQL by hand or with `diesel print-schema`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Display name.
        name -> Varchar,
        /// Unique email address.
        email -> Varchar,
        /// Unique handle.
        username -> Varchar,
        /// bcrypt hash of the password.
        password_hash -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tweets and replies.
    tweets (id) {
        /// Serial primary key.
        id -> Int4,
        /// Non-blank text.
        content -> Text,
        /// `original` or `reply`.
        kind -> Varchar,
        /// Author; cascades on user deletion.
        author_id -> Int4,
        /// Parent tweet; set exactly for replies.
        reply_to_id -> Nullable<Int4>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Likes, unique per user and tweet.
    likes (id) {
        /// Serial primary key.
        id -> Int4,
        /// User who liked.
        user_id -> Int4,
        /// Liked tweet.
        tweet_id -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Follow edges, unique per ordered pair of distinct users.
    follows (id) {
        /// Serial primary key.
        id -> Int4,
        /// The follower.
        follower_id -> Int4,
        /// The followed user.
        followee_id -> Int4,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tweets -> users (author_id));
diesel::joinable!(likes -> users (user_id));
diesel::joinable!(likes -> tweets (tweet_id));

diesel::allow_tables_to_appear_in_same_query!(users, tweets, likes, follows);
