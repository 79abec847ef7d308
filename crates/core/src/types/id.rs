//! Newtype IDs for type-safe entity references.
//!
//! The host platform keys its rows with prefixed strings (`prod_01H...`,
//! `store_01H...`), so every ID here wraps a `String`. Use the `define_id!`
//! macro to create wrappers that prevent mixing IDs from different entities.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>` and `From<&str>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// The `prefix = "..."` form additionally adds `generate_at()`, which builds an
/// id of the form `<prefix>_<unix millis>` for values this service mints itself.
///
/// # Example
///
/// ```rust
/// # use commerce_routes_core::define_id;
/// define_id!(CollectionId);
/// define_id!(ExportId, prefix = "export");
///
/// let collection = CollectionId::new("pcol_01");
/// assert_eq!(collection.as_str(), "pcol_01");
///
/// let at = chrono::DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
/// assert_eq!(ExportId::generate_at(at).as_str(), "export_1700000000000");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
    ($name:ident, prefix = $prefix:literal) => {
        $crate::define_id!($name);

        impl $name {
            /// Prefix of ids minted by `generate_at`.
            pub const PREFIX: &'static str = $prefix;

            /// Mint an id from a timestamp: `<prefix>_<unix millis>`.
            #[must_use]
            pub fn generate_at(at: ::chrono::DateTime<::chrono::Utc>) -> Self {
                Self(format!("{}_{}", Self::PREFIX, at.timestamp_millis()))
            }
        }
    };
}

// Platform-owned entities
define_id!(ProductId);
define_id!(StoreId);

// Ids minted by the custom routes
define_id!(FeedbackId, prefix = "feedback");
define_id!(ReportId, prefix = "report");
