use super::super::prelude::*;
use super::content_region::ContentRegion;

use std::cell::RefCell;
use std::sync::OnceLock;
use glib::subclass::Signal;

const SELECTION_CHANGED_SIGNAL: &str = "selection-changed";

mod imp {
    use super::*;

    #[derive(Default, gtk::CompositeTemplate, glib::Properties)]
    #[template(resource = "/io/github/climate_dashboard/selection_panel.ui")]
    #[properties(wrapper_type = super::SelectionPanel)]
    pub struct SelectionPanel {
        #[template_child(id = "selection-panel-dropdown")]
        pub dropdown: TemplateChild<gtk::DropDown>,
        #[template_child(id = "selection-panel-region")]
        pub region: TemplateChild<ContentRegion>,

        #[property(get, set)]
        pub prompt: RefCell<String>,
        #[property(get, set)]
        pub caption: RefCell<String>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SelectionPanel {
        const NAME: &'static str = "SelectionPanel";
        type Type = super::SelectionPanel;
        type ParentType = gtk::Box;

        fn class_init(class: &mut Self::Class) {
            ContentRegion::ensure_type();
            Self::bind_template(class);
        }

        fn instance_init(object: &glib::subclass::InitializingObject<Self>) {
            object.init_template();
        }
    }

    #[glib::derived_properties]
    impl ObjectImpl for SelectionPanel {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_dropdown();
        }

        fn signals() -> &'static [Signal] {
            static SIGNALS: OnceLock<[Signal; 1]> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                [
                    Signal::builder(SELECTION_CHANGED_SIGNAL)
                        .param_types([String::static_type()])
                        .build()
                ]
            })
        }

        fn dispose(&self) {
            self.dispose_template();
        }
    }

    impl WidgetImpl for SelectionPanel {}
    impl BoxImpl for SelectionPanel {}
}

glib::wrapper! {
    /// A prompt, the dropdown of one selection control and the region it renders into.
    pub struct SelectionPanel(ObjectSubclass<imp::SelectionPanel>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl SelectionPanel {

    fn setup_dropdown(&self) {
        let this_weak = self.downgrade();
        self.imp().dropdown.connect_selected_item_notify(move |_| {
            if let Some(this) = this_weak.upgrade()
                && let Some(key) = this.selected_key()
            {
                this.emit_by_name::<()>(SELECTION_CHANGED_SIGNAL, &[&key]);
            }
        });
    }

    /// Names the control and its region after the wiring table.
    pub fn set_identifiers(&self, control_id: &str, region_id: &str) {
        let imp = self.imp();
        imp.dropdown.set_widget_name(control_id);
        imp.region.set_widget_name(region_id);
    }

    pub fn control_id(&self) -> glib::GString {
        self.imp().dropdown.widget_name()
    }

    pub fn set_options(&self, options: &[&str]) {
        let model = gtk::StringList::new(options);
        self.imp().dropdown.set_model(Some(&model));
    }

    pub fn selected_key(&self) -> Option<String> {
        self.imp()
            .dropdown
            .selected_item()
            .and_downcast::<gtk::StringObject>()
            .map(|item| item.string().to_string())
    }

    pub fn region(&self) -> &ContentRegion {
        &self.imp().region
    }

    pub fn connect_selection_changed<F>(&self, callback: F) -> glib::SignalHandlerId
    where
        F: Fn(&Self, &str) + 'static
    {
        self.connect_local(SELECTION_CHANGED_SIGNAL, false, move |values| {
            let this = values.first()?.get::<Self>().ok()?;
            let key = values.get(1)?.get::<String>().ok()?;
            callback(&this, &key);
            None
        })
    }

}
