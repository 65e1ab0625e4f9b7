//! Helper macro generating port error enums.
//!
//! Each variant names the [`ErrorCode`](crate::domain::ErrorCode) it maps to,
//! so services can lift adapter failures into the domain error with `?`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),* }) => { Self::$variant { .. } };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( {
                    $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
                } )? => $code:ident : $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $( $(#[$field_meta])* $field : $ty ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Domain error code this failure maps to.
            pub const fn code(&self) -> $crate::domain::ErrorCode {
                match self {
                    $(
                        define_port_error!(@pattern $variant $( { $($field : $ty),* } )?) =>
                            $crate::domain::ErrorCode::$code,
                    )*
                }
            }
        }

        impl From<$name> for $crate::domain::Error {
            fn from(err: $name) -> Self {
                Self::new(err.code(), err.to_string())
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::{Error, ErrorCode};

    define_port_error! {
        pub enum SamplePortError {
            Offline => Network: "offline",
            Rejected {
                /// Why the caller was turned away.
                reason: String,
            } => Unauthorized: "rejected: {reason}",
            Quota { used: u32, limit: u32 } => ServiceUnavailable: "quota {used}/{limit}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::rejected("expired");
        assert_eq!(err.to_string(), "rejected: expired");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = SamplePortError::quota(3_u32, 2_u32);
        assert_eq!(err.to_string(), "quota 3/2");
    }

    #[test]
    fn lifts_into_domain_error_with_declared_code() {
        let error: Error = SamplePortError::offline().into();
        assert_eq!(error.code(), ErrorCode::Network);
        assert_eq!(error.message(), "offline");

        let rejected: Error = SamplePortError::rejected("nope").into();
        assert_eq!(rejected.code(), ErrorCode::Unauthorized);
    }
}
