use super::super::resolver::{Resolver, ResolverSet};
use super::super::models::View;
use super::super::ui::Ui;
use super::super::widgets::SelectionPanel;

use std::rc::{Rc, Weak};

struct State {
    ui: Ui,
    resolvers: ResolverSet
}

pub struct WeakSelection {
    state: Weak<State>
}

impl WeakSelection {
    pub fn upgrade(&self) -> Option<Selection> {
        self.state.upgrade().map(|state| Selection { state })
    }
}

/// Wires every selection control to its resolver and render region.
#[derive(Clone)]
pub struct Selection {
    state: Rc<State>
}

impl Selection {

    pub fn new(ui: Ui, resolvers: ResolverSet) -> Self {
        let state = State { ui, resolvers };
        let this = Self { state: Rc::new(state) };
        this.setup_panels();
        this
    }

    fn setup_panels(&self) {
        for resolver in self.state.resolvers.iter() {
            self.populate_panel(resolver);
            self.setup_selection_changed(resolver.view());
            self.render_default(resolver);
        }
    }

    fn populate_panel(&self, resolver: &Resolver) {
        let view = resolver.view();
        let panel = self.state.ui.panel(view);
        panel.set_identifiers(&view.control_id(), &view.region_id());
        panel.set_prompt(view.analysis.prompt());
        panel.set_options(&resolver.options());
    }

    fn setup_selection_changed(&self, view: View) {
        let this_weak = self.downgrade();
        self.state.ui.panel(view).connect_selection_changed(move |panel, key| {
            if let Some(this) = this_weak.upgrade() {
                this.render(panel, key);
            }
        });
    }

    fn render_default(&self, resolver: &Resolver) {
        if let Some(key) = resolver.default_option() {
            self.render(self.state.ui.panel(resolver.view()), key);
        }
    }

    /// The resolver is found through the control's widget name.
    fn render(&self, panel: &SelectionPanel, key: &str) {
        let control_id = panel.control_id();
        let Some(resolver) = self.state.resolvers.by_control_id(&control_id) else {
            log::error!("No resolver is wired to {control_id}");
            return;
        };

        let descriptor = resolver.resolve(key);
        if let Some(error) = descriptor.error() {
            self.state.ui.window().notify(error.title());
        }

        panel.set_caption(resolver.summary(key).unwrap_or_default());
        panel.region().render(&descriptor);
    }

    pub fn downgrade(&self) -> WeakSelection {
        let state = Rc::downgrade(&self.state);
        WeakSelection { state }
    }

}
