use super::super::prelude::*;
use super::super::constants;
use super::super::models::Scenario;
use super::super::ui::Ui;

pub struct Actions {
    application: adw::Application,
    ui: Ui,
}

impl Actions {
    pub fn new(application: adw::Application, ui: Ui) -> Self {
        let this = Self { application, ui };
        this.setup_quit_action();
        this.setup_about_action();
        this.setup_show_scenario_action();
        this
    }

    fn setup_quit_action(&self) {
        let quit_action = gtk::gio::SimpleAction::new("quit", None);
        self.connect_quit_handler(&quit_action);
        self.application.add_action(&quit_action);
        self.application.set_accels_for_action("app.quit", &["<Ctrl>q"]);
    }

    fn connect_quit_handler(&self, quit_action: &gtk::gio::SimpleAction) {
        let application_weak = self.application.downgrade();
        quit_action.connect_activate(move |_action, _| {
            if let Some(application) = application_weak.upgrade() {
                application.quit();
            }
        });
    }

    fn setup_about_action(&self) {
        let about_action = gtk::gio::SimpleAction::new("about", None);
        self.connect_about_handler(&about_action);
        self.application.add_action(&about_action);
    }

    fn connect_about_handler(&self, about_action: &gtk::gio::SimpleAction) {
        let ui_weak = self.ui.downgrade();
        about_action.connect_activate(move |_action, _| {
            if let Some(ui) = ui_weak.upgrade() {
                Self::about_dialog().present(Some(ui.window()));
            }
        });
    }

    fn about_dialog() -> adw::AboutDialog {
        adw::AboutDialog::builder()
            .application_name(constants::APP_TITLE)
            .application_icon(constants::APP_ID)
            .version(constants::APP_VERSION)
            .developer_name(constants::APP_AUTHORS)
            .comments(format!(
                "{description}\n\nProjections from the {model} datasets.",
                description = constants::APP_DESCRIPTION,
                model = constants::APP_MODEL_CREDIT
            ))
            .build()
    }

    fn setup_show_scenario_action(&self) {
        let show_scenario_action = gtk::gio::SimpleAction::new("show-scenario", Some(glib::VariantTy::STRING));
        self.connect_show_scenario_handler(&show_scenario_action);
        self.application.add_action(&show_scenario_action);

        for (index, scenario) in Scenario::all().iter().enumerate() {
            let action_name = format!("app.show-scenario::{slug}", slug = scenario.slug());
            let accel = format!("<Alt>{number}", number = index + 1);
            self.application.set_accels_for_action(&action_name, &[accel.as_str()]);
        }
    }

    fn connect_show_scenario_handler(&self, show_scenario_action: &gtk::gio::SimpleAction) {
        let ui_weak = self.ui.downgrade();
        show_scenario_action.connect_activate(move |_action, parameter| {
            let Some(ui) = ui_weak.upgrade() else { return };
            let scenario = parameter
                .and_then(glib::Variant::str)
                .and_then(Scenario::parse);

            match scenario {
                Some(scenario) => ui.window().show_scenario(scenario),
                None => log::warn!("show-scenario activated without a known scenario: {parameter:?}"),
            }
        });
    }

}
