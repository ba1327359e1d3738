//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Generated enums render and parse in `SCREAMING_SNAKE_CASE`.
///
/// # Example
///
/// ```rust
/// use common::define_kind;
///
/// define_kind! {
///     #[doc = "Payment method."]
///     enum Method {
///         #[doc = "Cash on delivery."]
///         Cash = 1,
///
///         #[doc = "Bank transfer."]
///         Transfer = 2,
///     }
/// }
///
/// assert_eq!(Method::Transfer.to_string(), "TRANSFER");
/// assert_eq!("CASH".parse::<Method>().unwrap(), Method::Cash);
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:expr
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
        )]
        #[doc = $doc]
        #[repr(u8)]
        #[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant = $value,
            )*
        }
    };
}
