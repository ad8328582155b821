use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::prelude::*;
use super::audit;
use super::config::Config;
use super::constants;
use super::controllers::{ActionsController, SelectionController};
use super::repository::Repository;
use super::resolver::ResolverSet;
use super::ui::Ui;
use super::widgets::Window;

static GLIB_LOGGER: glib::GlibLogger = glib::GlibLogger::new(
    glib::GlibLoggerFormat::Plain,
    glib::GlibLoggerDomain::CrateTarget,
);

struct Session {
    ui: Ui,
    assets_root: PathBuf,
    _selection: SelectionController,
    _actions: ActionsController,
}

struct ApplicationState {
    application: adw::Application,
    config: RefCell<Option<Config>>,
    session: RefCell<Option<Session>>,
}

pub struct Application {
    state: Rc<ApplicationState>,
}

impl Application {

    pub fn new() -> Self {
        Self::setup_logging();

        let application = adw::Application::new(
            Some(constants::APP_ID),
            adw::gio::ApplicationFlags::HANDLES_COMMAND_LINE
        );
        Config::register_options(&application);

        let state = Rc::new(ApplicationState {
            application,
            config: RefCell::new(None),
            session: RefCell::new(None),
        });

        Self::setup_signals(&state);

        Self { state }
    }

    fn setup_logging() {
        if log::set_logger(&GLIB_LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Info);
        }
    }

    fn setup_signals(state: &Rc<ApplicationState>) {
        Self::setup_startup_event(state);
        Self::setup_command_line_event(state);
        Self::setup_activate_event(state);
    }

    fn setup_startup_event(state: &Rc<ApplicationState>) {
        state.application.connect_startup(move |application| {
            if let Err(error) = Self::setup_resources() {
                log::error!("Failed to load application resources: {error:#}");
                application.quit();
            }
        });
    }

    fn setup_command_line_event(state: &Rc<ApplicationState>) {
        let state_weak = Rc::downgrade(state);
        state.application.connect_command_line(move |application, command_line| {
            let Some(state) = state_weak.upgrade() else { return glib::ExitCode::FAILURE };
            let this = Self { state };

            let cwd = command_line
                .cwd()
                .or_else(|| std::env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));

            match this.configure(&command_line.options_dict(), &cwd) {
                Ok(()) => {
                    application.activate();
                    glib::ExitCode::SUCCESS
                }
                Err(error) => {
                    log::error!("{error:#}");
                    glib::ExitCode::FAILURE
                }
            }
        });
    }

    fn setup_activate_event(state: &Rc<ApplicationState>) {
        let state_weak = Rc::downgrade(state);
        state.application.connect_activate(move |application| {
            let Some(state) = state_weak.upgrade() else { return };
            let this = Self { state };
            if let Err(error) = this.present() {
                log::error!("Failed to open the dashboard: {error:#}");
                application.quit();
            }
        });
    }

    fn configure(&self, options: &glib::VariantDict, cwd: &Path) -> Result<()> {
        let config = Config::from_options(options, cwd)?;
        config.apply_logging();
        audit::check_assets(&config, &constants::APP_CATALOG)?;
        self.state.config.replace(Some(config));
        Ok(())
    }

    fn present(&self) -> Result<()> {
        let assets_root = self.assets_root()?;
        let session = match self.state.session.take() {
            Some(session) if !self.relocates(&session) => session,
            Some(stale) => {
                log::info!("Asset root changed to {root}, rebuilding the window", root = assets_root.display());
                match self.build_session(assets_root) {
                    Ok(session) => {
                        stale.ui.window().destroy();
                        session
                    }
                    Err(error) => {
                        self.state.session.replace(Some(stale));
                        return Err(error);
                    }
                }
            }
            None => self.build_session(assets_root)?,
        };

        session.ui.window().present();
        self.state.session.replace(Some(session));
        Ok(())
    }

    fn assets_root(&self) -> Result<PathBuf> {
        match self.state.config.borrow().as_ref() {
            Some(config) => Ok(config.assets_root.clone()),
            None => std::env::current_dir().context("Failed to determine the working directory"),
        }
    }

    fn relocates(&self, session: &Session) -> bool {
        self.state.config
            .borrow()
            .as_ref()
            .is_some_and(|config| config.relocates(&session.assets_root))
    }

    fn build_session(&self, assets_root: PathBuf) -> Result<Session> {
        let repository = Repository::new(&constants::APP_CATALOG, &assets_root);
        let resolvers = ResolverSet::new(&repository);

        let ui = Ui::new(Window::new(&self.state.application));
        let selection = SelectionController::new(ui.clone(), resolvers);
        let actions = ActionsController::new(self.state.application.clone(), ui.clone());

        Ok(Session { ui, assets_root, _selection: selection, _actions: actions })
    }

    fn setup_resources() -> Result<()> {
        gtk::glib::set_application_name(constants::APP_TITLE);
        gtk::glib::set_prgname(Some(constants::APP_NAME));
        gtk::gio::resources_register_include_impl(constants::APP_RESOURCES)
            .context("Failed to register compiled resources")?;

        let css_provider = gtk::CssProvider::new();
        css_provider.load_from_resource(&format!("{}/style.css", constants::APP_PREFIX));

        let display = gtk::gdk::Display::default().context("Failed to add style provider")?;

        gtk::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );

        Ok(())
    }

    pub fn activate(&self) -> Result<()> {
        let result = self.state.application.run();
        if matches!(result, adw::glib::ExitCode::FAILURE) {
            bail!("Application exited with code {}", result.get());
        }

        Ok(())
    }

}
