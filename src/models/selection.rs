// Shared with build.rs through `include!`, so this file must only depend on `std`.

macro_rules! count_items {
    () => { 0 };
    ($head:tt $($tail:tt)*) => { 1 + count_items!($($tail)*) };
}

macro_rules! define_selection {
    (
        $name:ident { $(($variant:ident, $display_name:literal, $key:literal, $slug:literal)),* $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)*
        }

        #[allow(dead_code)]
        impl $name {
            pub const COUNT: usize = count_items!($($variant)*);

            #[must_use]
            pub fn parse(string: &str) -> Option<Self> {
                match string {
                    $($display_name | $key | $slug => Some(Self::$variant),)*
                    _ => None,
                }
            }

            #[must_use]
            pub const fn display_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $display_name,)*
                }
            }

            /// Key used by the asset catalog.
            #[must_use]
            pub const fn key(&self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)*
                }
            }

            /// Short form used to build widget and resolver identifiers.
            #[must_use]
            pub const fn slug(&self) -> &'static str {
                match self {
                    $(Self::$variant => $slug,)*
                }
            }

            #[must_use]
            pub const fn all() -> &'static [Self; Self::COUNT] {
                &[$(Self::$variant,)*]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(formatter, "{display_name}", display_name = self.display_name())
            }
        }
    };
}

define_selection! {
    Scenario {
        (Ssp585, "SSP 585", "SSP585", "585"),
        (Ssp245, "SSP 245", "SSP245", "245"),
    }
}

define_selection! {
    Month {
        (January, "January", "January", "jan"),
        (April, "April", "April", "apr"),
        (July, "July", "July", "jul"),
        (October, "October", "October", "oct"),
    }
}

define_selection! {
    Scale {
        (National, "Country-wise", "National", "country"),
        (Regional, "State-wise", "Regional", "state"),
    }
}
