//! Helper macro for generating domain port error enums.
//!
//! Port error types share a shape: a `thiserror` enum with a display message
//! per variant and snake_case constructor helpers that accept `impl Into<T>`
//! for each field. The macro keeps that boilerplate in one place.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
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
            Unit => "unit failure",
            Single { message: String } => "single: {message}",
            Pair { message: String, count: u32 } => "pair: {message} ({count})",
        }
    }

    #[test]
    fn unit_variants_get_argument_free_constructors() {
        assert_eq!(SamplePortError::unit().to_string(), "unit failure");
    }

    #[test]
    fn string_fields_accept_str_arguments() {
        let err = SamplePortError::single("boom");
        assert_eq!(err.to_string(), "single: boom");
    }

    #[test]
    fn mixed_fields_are_threaded_in_order() {
        let err = SamplePortError::pair("boom", 3_u32);
        assert_eq!(err.to_string(), "pair: boom (3)");
    }
}
