//! Internal declarative macros.

/// Declares a style object: a struct of optional overrides with builder
/// setters and a `merged_over` combinator.
macro_rules! define_style {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $name {
            $( pub(crate) $field: Option<$ty>, )*
        }

        impl $name {
            /// Creates a style with no overrides.
            pub fn new() -> Self {
                Self::default()
            }

            $(
                $(#[$field_meta])*
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*

            /// Combines two styles; fields set on `self` take precedence over `base`.
            pub fn merged_over(&self, base: &Self) -> Self {
                Self {
                    $( $field: self.$field.clone().or_else(|| base.$field.clone()), )*
                }
            }
        }
    };
}
