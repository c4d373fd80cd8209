//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// One profile document per identity.
    ///
    /// Nullable columns hold fields the user has never saved.
    profiles (user_id) {
        /// Provider-issued uid.
        user_id -> Varchar,
        full_name -> Nullable<Varchar>,
        age -> Nullable<Int2>,
        city -> Nullable<Varchar>,
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Latest payment attempt per identity.
    payments (user_id) {
        user_id -> Varchar,
        amount -> Int4,
        /// `initiated`, `completed` or any operator-written value.
        status -> Varchar,
        /// `GPay`, `PhonePe` or `Bank`.
        method -> Varchar,
        recorded_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(profiles, payments);
