//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Storefront IDs are
//! slugs and composite keys rather than database sequences, so the wrappers
//! hold a `String`.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use larq_core::define_id;
/// define_id!(BottleId);
/// define_id!(OrderId);
///
/// let bottle = BottleId::new("bottle-purevis");
/// let order = OrderId::new("bottle-purevis");
///
/// // These are different types, so this won't compile:
/// // let _: BottleId = order;
/// assert_eq!(bottle.as_str(), order.as_str());
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
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(LineId);
define_id!(CategoryId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_inner() {
        let id = ProductId::new("bottle-swig-top");
        assert_eq!(id.to_string(), "bottle-swig-top");
        assert_eq!(id.as_str(), "bottle-swig-top");
    }

    #[test]
    fn test_serde_transparent() {
        let id = LineId::from("bottle-purevis-Black-2L-1700000000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bottle-purevis-Black-2L-1700000000000\"");

        let parsed: LineId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(
            CategoryId::from(String::from("featured")),
            CategoryId::new("featured")
        );
        assert_ne!(CategoryId::new("smart"), CategoryId::new("Smart"));
    }
}
