use super::prelude::*;

use std::path::{Path, PathBuf};

pub const ASSETS_DIR_OPTION: &str = "assets-dir";
pub const STRICT_ASSETS_OPTION: &str = "strict-assets";
pub const VERBOSE_OPTION: &str = "verbose";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the catalog's relative asset paths resolve against.
    pub assets_root: PathBuf,
    /// Refuse to start when the asset audit finds missing files.
    pub strict_assets: bool,
    pub verbose: bool,
}

impl Config {

    pub fn register_options(application: &adw::Application) {
        application.add_main_option(
            ASSETS_DIR_OPTION,
            glib::Char::from(b'a'),
            glib::OptionFlags::NONE,
            glib::OptionArg::Filename,
            "Directory containing the pre-rendered assets/ folder",
            Some("DIR"),
        );
        application.add_main_option(
            STRICT_ASSETS_OPTION,
            glib::Char::from(b's'),
            glib::OptionFlags::NONE,
            glib::OptionArg::None,
            "Exit instead of starting when catalog assets are missing",
            None,
        );
        application.add_main_option(
            VERBOSE_OPTION,
            glib::Char::from(b'v'),
            glib::OptionFlags::NONE,
            glib::OptionArg::None,
            "Show info and debug messages, including every selection",
            None,
        );
    }

    /// Builds the configuration from parsed command line options.
    /// Relative asset directories are taken relative to `cwd`.
    pub fn from_options(options: &glib::VariantDict, cwd: &Path) -> Result<Self> {
        let assets_dir = Self::lookup::<PathBuf>(options, ASSETS_DIR_OPTION)?;
        let strict_assets = Self::lookup::<bool>(options, STRICT_ASSETS_OPTION)?.unwrap_or(false);
        let verbose = Self::lookup::<bool>(options, VERBOSE_OPTION)?.unwrap_or(false);

        let assets_root = match assets_dir {
            Some(directory) if directory.is_absolute() => directory,
            Some(directory) => cwd.join(directory),
            None => cwd.to_path_buf(),
        };

        Ok(Self { assets_root, strict_assets, verbose })
    }

    fn lookup<T: glib::variant::FromVariant>(options: &glib::VariantDict, key: &str) -> Result<Option<T>> {
        options
            .lookup::<T>(key)
            .map_err(|error| anyhow::anyhow!("Invalid value for --{key}: {error}"))
    }

    pub const fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// GLib's default writer drops info and debug messages unless debug output is enabled.
    pub fn apply_logging(&self) {
        log::set_max_level(self.log_level());
        glib::log_set_debug_enabled(self.verbose);
    }

    /// Whether a session built for `assets_root` no longer matches this configuration.
    pub fn relocates(&self, assets_root: &Path) -> bool {
        self.assets_root != assets_root
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(entries: &[(&str, glib::Variant)]) -> glib::VariantDict {
        let dict = glib::VariantDict::new(None);
        for (key, value) in entries {
            dict.insert_value(key, value);
        }
        dict
    }

    #[test]
    fn defaults_to_the_working_directory() {
        let config = Config::from_options(&options(&[]), Path::new("/home/user/dashboard")).unwrap();

        assert_eq!(config.assets_root, PathBuf::from("/home/user/dashboard"));
        assert!(!config.strict_assets);
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn relative_asset_directories_follow_the_working_directory() {
        let dict = options(&[(ASSETS_DIR_OPTION, PathBuf::from("release").to_variant())]);
        let config = Config::from_options(&dict, Path::new("/opt/dashboard")).unwrap();

        assert_eq!(config.assets_root, PathBuf::from("/opt/dashboard/release"));
    }

    #[test]
    fn absolute_asset_directories_are_kept() {
        let dict = options(&[
            (ASSETS_DIR_OPTION, PathBuf::from("/srv/climate").to_variant()),
            (STRICT_ASSETS_OPTION, true.to_variant()),
            (VERBOSE_OPTION, true.to_variant()),
        ]);
        let config = Config::from_options(&dict, Path::new("/tmp")).unwrap();

        assert_eq!(config.assets_root, PathBuf::from("/srv/climate"));
        assert!(config.strict_assets);
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn verbose_enables_glib_debug_output() {
        let quiet = Config::from_options(&options(&[]), Path::new("/tmp")).unwrap();
        let verbose = Config::from_options(&options(&[(VERBOSE_OPTION, true.to_variant())]), Path::new("/tmp")).unwrap();

        verbose.apply_logging();
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        assert!(glib::log_get_debug_enabled());

        quiet.apply_logging();
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        assert!(!glib::log_get_debug_enabled());
    }

    #[test]
    fn a_different_asset_root_relocates_the_session() {
        let config = Config::from_options(&options(&[]), Path::new("/srv/climate")).unwrap();

        assert!(!config.relocates(Path::new("/srv/climate")));
        assert!(config.relocates(Path::new("/home/user/dashboard")));
    }

    #[test]
    fn mistyped_options_are_rejected() {
        let dict = options(&[(STRICT_ASSETS_OPTION, "yes".to_variant())]);
        let error = Config::from_options(&dict, Path::new("/tmp")).unwrap_err();

        assert!(error.to_string().contains("--strict-assets"));
    }
}
