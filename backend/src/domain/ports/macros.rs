//! Helper macro for declaring driven-port error enums.
//!
//! Each variant gets a `thiserror` message and a snake-case constructor whose
//! parameters accept anything convertible into the field type, so adapters
//! can write `BoxRepositoryError::query("timeout")`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum SamplePortError {
            Offline { message: String } => "store offline: {message}",
            Rejected { code: u16 } => "rejected with {code}",
            Mixed { message: String, code: u16 } => "{message} ({code})",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = SamplePortError::offline("refused");
        assert_eq!(err.to_string(), "store offline: refused");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = SamplePortError::rejected(409_u16);
        assert_eq!(err.to_string(), "rejected with 409");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::mixed("duplicate", 409_u16);
        assert_eq!(err, SamplePortError::Mixed {
            message: "duplicate".to_owned(),
            code: 409,
        });
    }
}
