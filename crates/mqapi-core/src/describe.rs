//! Human-readable metadata attached to enum variants.
//!
//! Descriptions and display names are declared next to the enum with the
//! [`describe_enum!`](crate::describe_enum) macro, which generates a
//! [`Describe`] implementation. Lookups are plain `match` expressions; a
//! variant declared without a tag yields `None`.

/// Read-only lookup of the descriptive tags declared for an enum variant.
///
/// Both methods default to `None`, so an enum can opt in with an empty
/// `impl Describe for MyEnum {}` and tag nothing.
pub trait Describe {
    /// Description declared for this variant, if any.
    fn description(&self) -> Option<&'static str> {
        None
    }

    /// Display name declared for this variant, if any.
    fn display_name(&self) -> Option<&'static str> {
        None
    }

    /// Display name, falling back to the description.
    fn label(&self) -> Option<&'static str> {
        self.display_name().or_else(|| self.description())
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn description(&self) -> Option<&'static str> {
        (**self).description()
    }

    fn display_name(&self) -> Option<&'static str> {
        (**self).display_name()
    }
}

/// Declare descriptions and display names for the variants of an enum.
///
/// Every variant must be listed. A variant may carry a `description`, a
/// `display_name`, both, or nothing. Variants with fields are matched with
/// `{ .. }`, so tuple and struct variants work too.
///
/// # Syntax
///
/// ```ignore
/// describe_enum! {
///     MyEnum {
///         VariantA => { description: "...", display_name: "..." },
///         VariantB => { display_name: "..." },
///         VariantC,
///     }
/// }
/// ```
///
/// # Example
///
/// ```
/// use mqapi_core::describe::Describe;
/// use mqapi_core::describe_enum;
///
/// enum PaymentState {
///     Pending,
///     Settled,
///     Refunded(u64),
/// }
///
/// describe_enum! {
///     PaymentState {
///         Pending => { description: "Waiting for the gateway", display_name: "Pending" },
///         Settled => { display_name: "Settled" },
///         Refunded,
///     }
/// }
///
/// assert_eq!(PaymentState::Pending.description(), Some("Waiting for the gateway"));
/// assert_eq!(PaymentState::Settled.description(), None);
/// assert_eq!(PaymentState::Settled.display_name(), Some("Settled"));
/// assert_eq!(PaymentState::Refunded(10).display_name(), None);
/// ```
#[macro_export]
macro_rules! describe_enum {
    (@pick description , description : $val:literal $( , $rk:ident : $rv:literal )*) => {
        ::std::option::Option::Some($val)
    };
    (@pick display_name , display_name : $val:literal $( , $rk:ident : $rv:literal )*) => {
        ::std::option::Option::Some($val)
    };
    (@pick $want:ident , $other:ident : $val:literal $( , $rk:ident : $rv:literal )*) => {
        $crate::describe_enum!(@pick $want $( , $rk : $rv )*)
    };
    (@pick $want:ident) => {
        ::std::option::Option::None
    };
    (
        $ty:ty {
            $(
                $variant:ident $( => { $( $key:ident : $val:literal ),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        impl $crate::describe::Describe for $ty {
            fn description(&self) -> ::std::option::Option<&'static str> {
                match *self {
                    $(
                        Self::$variant { .. } => {
                            $crate::describe_enum!(@pick description $( $( , $key : $val )* )?)
                        }
                    )*
                }
            }

            fn display_name(&self) -> ::std::option::Option<&'static str> {
                match *self {
                    $(
                        Self::$variant { .. } => {
                            $crate::describe_enum!(@pick display_name $( $( , $key : $val )* )?)
                        }
                    )*
                }
            }
        }
    };
}
