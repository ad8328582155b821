use crate::prelude::*;
use super::scenario_page::ScenarioPage;
use crate::models::Scenario;

use gtk::gio::{ActionGroup, ActionMap};

mod imp {
    use super::*;

    #[derive(Default, gtk::CompositeTemplate)]
    #[template(resource = "/io/github/climate_dashboard/window.ui")]
    pub struct Window {
        #[template_child(id = "window-toast-overlay")]
        pub toast_overlay: TemplateChild<adw::ToastOverlay>,
        #[template_child(id = "window-menu-button")]
        pub menu_button: TemplateChild<gtk::MenuButton>,
        #[template_child(id = "window-scenario-stack")]
        pub scenario_stack: TemplateChild<adw::ViewStack>,
        #[template_child(id = "window-scenario-page-585")]
        pub scenario_page_585: TemplateChild<ScenarioPage>,
        #[template_child(id = "window-scenario-page-245")]
        pub scenario_page_245: TemplateChild<ScenarioPage>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for Window {
        const NAME: &'static str = "Window";
        type Type = super::Window;
        type ParentType = adw::ApplicationWindow;

        fn class_init(class: &mut Self::Class) {
            ScenarioPage::ensure_type();
            Self::bind_template(class);
        }

        fn instance_init(object: &glib::subclass::InitializingObject<Self>) {
            object.init_template();
        }
    }

    impl ObjectImpl for Window {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_primary_menu();
        }

        fn dispose(&self) {
            self.dispose_template();
        }
    }

    impl WidgetImpl for Window {}
    impl WindowImpl for Window {}
    impl ApplicationWindowImpl for Window {}
    impl AdwApplicationWindowImpl for Window {}
}

glib::wrapper! {
    pub struct Window(ObjectSubclass<imp::Window>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager, ActionMap, ActionGroup;
}

impl Window {
    pub fn new(application: &adw::Application) -> Self {
        glib::Object::builder()
            .property("application", application)
            .build()
    }

    fn setup_primary_menu(&self) {
        let menu = gtk::gio::Menu::new();
        menu.append(Some("_About"), Some("app.about"));
        menu.append(Some("_Quit"), Some("app.quit"));
        self.imp().menu_button.set_menu_model(Some(&menu));
    }

    pub fn scenario_page(&self, scenario: Scenario) -> &ScenarioPage {
        let imp = self.imp();
        match scenario {
            Scenario::Ssp585 => &imp.scenario_page_585,
            Scenario::Ssp245 => &imp.scenario_page_245,
        }
    }

    pub fn show_scenario(&self, scenario: Scenario) {
        self.imp().scenario_stack.set_visible_child_name(scenario.slug());
    }

    pub fn notify(&self, message: &str) {
        let toast = adw::Toast::new(message);
        self.imp().toast_overlay.add_toast(toast);
    }

}
