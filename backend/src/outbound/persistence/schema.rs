//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When a
//! migration changes the schema, regenerate this file with
//! `diesel print-schema` or update it by hand.

diesel::table! {
    /// Persisted setup flags.
    ///
    /// Composite primary key: one boolean per environment, namespace and key.
    core_store (environment, namespace, flag_key) {
        /// Runtime environment name, e.g. `test`.
        environment -> Varchar,
        /// Flag namespace, e.g. `setup`.
        namespace -> Varchar,
        /// Flag name, e.g. `initHasRun`.
        flag_key -> Varchar,
        /// Flag value.
        value -> Bool,
        /// Last write timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Users-permissions roles.
    roles (id) {
        /// Primary key.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Role type, e.g. `public` or `authenticated`.
        role_type -> Varchar,
    }
}

diesel::table! {
    /// Permission records attached to roles.
    permissions (id) {
        /// Primary key.
        id -> Int8,
        /// Owning role.
        role_id -> Int8,
        /// Plugin or `application` tag.
        permission_type -> Varchar,
        /// Controller or content type name.
        controller -> Varchar,
        /// Action name.
        action -> Varchar,
        /// Whether the role may call the action.
        enabled -> Bool,
    }
}

diesel::table! {
    /// Seeded content records.
    seed_records (id) {
        /// Primary key.
        id -> Int8,
        /// Content type name, e.g. `user-story`.
        resource -> Varchar,
        /// Record fields.
        payload -> Jsonb,
        /// Insert timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(permissions -> roles (role_id));

diesel::allow_tables_to_appear_in_same_query!(core_store, permissions, roles, seed_records);
