use super::super::prelude::*;
use super::super::models::{Analysis, Scale};
use super::selection_panel::SelectionPanel;

mod imp {
    use super::*;

    #[derive(Default, gtk::CompositeTemplate)]
    #[template(resource = "/io/github/climate_dashboard/scenario_page.ui")]
    pub struct ScenarioPage {
        #[template_child(id = "scenario-page-seasonal-panel")]
        pub seasonal_panel: TemplateChild<SelectionPanel>,
        #[template_child(id = "scenario-page-country-panel")]
        pub country_panel: TemplateChild<SelectionPanel>,
        #[template_child(id = "scenario-page-state-panel")]
        pub state_panel: TemplateChild<SelectionPanel>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ScenarioPage {
        const NAME: &'static str = "ScenarioPage";
        type Type = super::ScenarioPage;
        type ParentType = adw::Bin;

        fn class_init(class: &mut Self::Class) {
            SelectionPanel::ensure_type();
            Self::bind_template(class);
        }

        fn instance_init(object: &glib::subclass::InitializingObject<Self>) {
            object.init_template();
        }
    }

    impl ObjectImpl for ScenarioPage {
        fn dispose(&self) {
            self.dispose_template();
        }
    }

    impl WidgetImpl for ScenarioPage {}
    impl BinImpl for ScenarioPage {}
}

glib::wrapper! {
    /// Analysis and scale tabs for one scenario.
    pub struct ScenarioPage(ObjectSubclass<imp::ScenarioPage>)
        @extends adw::Bin, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl ScenarioPage {

    pub fn panel(&self, analysis: Analysis) -> &SelectionPanel {
        let imp = self.imp();
        match analysis {
            Analysis::Seasonal => &imp.seasonal_panel,
            Analysis::Global(Scale::National) => &imp.country_panel,
            Analysis::Global(Scale::Regional) => &imp.state_panel,
        }
    }

}
