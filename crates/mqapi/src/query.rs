//! Query strings built from explicitly declared fields.
//!
//! A type opts in by implementing [`QueryString`], normally through the
//! [`query_string!`](crate::query_string) macro, which lists the fields that
//! belong in the query string in the order they should appear. Fields not
//! listed never show up; listed fields whose value is `None` are skipped.

/// A field value that can appear in a query string.
///
/// `None` means "leave this field out".
pub trait QueryValue {
    /// String form of the value, or `None` to omit the field.
    fn to_query_value(&self) -> Option<String>;
}

macro_rules! impl_query_value_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

impl_query_value_display!(
    str, String, bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize,
    f32, f64,
);

impl<T: QueryValue> QueryValue for Option<T> {
    fn to_query_value(&self) -> Option<String> {
        self.as_ref().and_then(QueryValue::to_query_value)
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for Box<T> {
    fn to_query_value(&self) -> Option<String> {
        (**self).to_query_value()
    }
}

impl QueryValue for serde_json::Value {
    fn to_query_value(&self) -> Option<String> {
        match self {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// A type with fields declared for query-string inclusion.
pub trait QueryString {
    /// Declared fields in order, paired with their current value.
    fn query_pairs(&self) -> Vec<(&'static str, Option<String>)>;

    /// Build `path?name=value&...` from the declared fields.
    fn to_query_string(&self, path: &str) -> String {
        build_query_string(path, self)
    }
}

/// Build `path?name1=value1&name2=value2` from the declared, non-null fields
/// of `query`.
///
/// Names and values are percent-encoded; only `A-Z a-z 0-9 - _ . ~` are left
/// as is. With no eligible field the result is `path?`.
///
/// ```
/// use mqapi::query::build_query_string;
/// use mqapi::query_string;
///
/// struct Search {
///     term: String,
///     page: Option<u32>,
///     internal_note: String,
/// }
///
/// query_string! {
///     Search {
///         term => "q",
///         page,
///     }
/// }
///
/// let search = Search {
///     term: "blue shoes".to_string(),
///     page: None,
///     internal_note: "never sent".to_string(),
/// };
///
/// assert_eq!(build_query_string("products", &search), "products?q=blue%20shoes");
/// ```
pub fn build_query_string<Q: QueryString + ?Sized>(path: &str, query: &Q) -> String {
    let pairs = query
        .query_pairs()
        .into_iter()
        .filter_map(|(name, value)| {
            value.map(|v| format!("{}={}", urlencoding::encode(name), urlencoding::encode(&v)))
        })
        .collect::<Vec<_>>()
        .join("&");

    format!("{}?{}", path, pairs)
}

/// Declare which fields of a struct belong in its query string.
///
/// Fields are emitted in the order listed. A field may be given a different
/// wire name with `=> "name"`; otherwise the Rust field name is used. Each
/// listed field's type must implement [`QueryValue`].
///
/// # Syntax
///
/// ```ignore
/// query_string! {
///     MyFilter {
///         field_a,
///         field_b => "fieldB",
///     }
/// }
/// ```
#[macro_export]
macro_rules! query_string {
    (@name $field:ident) => {
        ::std::stringify!($field)
    };
    (@name $field:ident $name:literal) => {
        $name
    };
    (
        $ty:ty {
            $( $field:ident $( => $name:literal )? ),* $(,)?
        }
    ) => {
        impl $crate::query::QueryString for $ty {
            fn query_pairs(
                &self,
            ) -> ::std::vec::Vec<(&'static str, ::std::option::Option<::std::string::String>)> {
                ::std::vec![
                    $(
                        (
                            $crate::query_string!(@name $field $( $name )?),
                            $crate::query::QueryValue::to_query_value(&self.$field),
                        )
                    ),*
                ]
            }
        }
    };
}
