use camino::{Utf8Path, Utf8PathBuf};

pub const MANIFEST_FILE: &str = "info.json";
pub const DISABLED_MANIFEST_FILE: &str = "info.json.DISABLED";

macro_rules! define_paths {
    ($name:ident { $($field:ident : $default:expr),* $(,)? }) => {
        #[derive(Clone, Debug)]
        pub struct $name {
            $(pub $field: Utf8PathBuf,)*
        }

        impl $name {
            pub fn to_absolute(mut self, base: &Utf8Path) -> Self {
                $(self.$field = base.join(self.$field);)*
                self
            }

            pub fn new(base: &Utf8Path) -> Self {
                Self::default().to_absolute(base)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default.into(),)*
                }
            }
        }
    };
}

// The game decides whether a mod is loaded by which of these two names exists.
define_paths!(ManifestPaths {
    enabled: MANIFEST_FILE,
    disabled: DISABLED_MANIFEST_FILE,
});

define_paths!(StorageVendorPath {
    mods: "ArchivalEugeneNaelstrof/ChurnVector/mods",
});
