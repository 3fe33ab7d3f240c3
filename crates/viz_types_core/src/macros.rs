/// Implements `From<Self> for Cow<Self>` and `From<&Self> for Cow<Self>`.
///
/// This is what makes it possible to pass either owned values or references to
/// [`crate::Loggable::to_arrow`] without the caller having to care.
#[macro_export]
macro_rules! impl_into_cow {
    ($typ:ident) => {
        impl<'a> From<$typ> for ::std::borrow::Cow<'a, $typ> {
            #[inline]
            fn from(value: $typ) -> Self {
                ::std::borrow::Cow::Owned(value)
            }
        }

        impl<'a> From<&'a $typ> for ::std::borrow::Cow<'a, $typ> {
            #[inline]
            fn from(value: &'a $typ) -> Self {
                ::std::borrow::Cow::Borrowed(value)
            }
        }
    };
}

/// Declares a newtype wrapping a cheaply clonable string, used for the various
/// fully-qualified names of the data model.
///
/// The wrapped string is usually a `&'static str`, in which case no allocation
/// ever happens.
macro_rules! declare_name_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(::std::borrow::Cow<'static, str>);

        impl $name {
            #[inline]
            pub fn new(name: impl Into<::std::borrow::Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// A deterministic 64-bit hash of this name.
            ///
            /// Stable for the lifetime of the process, which is all the
            /// component-type registry needs.
            #[inline]
            pub fn hash64(&self) -> u64 {
                use std::hash::{Hash as _, Hasher as _};
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                self.0.hash(&mut hasher);
                hasher.finish()
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            #[inline]
            fn deref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $name {
            #[inline]
            fn from(name: &'static str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }
    };
}

pub(crate) use declare_name_type;
