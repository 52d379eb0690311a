//! Integer value object base
//!
//! Value objects are plain immutable wrappers compared by value, with no
//! registry behind them. Types built with [`define_value_object!`] get
//! structural equality, ordering and hashing on the wrapped integer plus its
//! decimal text form; validation stays with each type's own constructor.

macro_rules! define_value_object {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(i32);

        impl $name {
            /// The wrapped value.
            pub fn value(&self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> i32 {
                value.0
            }
        }
    };
}

pub(crate) use define_value_object;
