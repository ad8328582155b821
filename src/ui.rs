use super::models::View;
use super::widgets::{SelectionPanel, Window};

use std::rc::{Rc, Weak};

pub struct UiWeak {
    window: Weak<Window>
}

impl UiWeak {
    pub fn upgrade(&self) -> Option<Ui> {
        self.window.upgrade().map(|window| Ui { window })
    }
}

#[derive(Clone)]
pub struct Ui {
    window: Rc<Window>
}

impl Ui {

    pub fn new(window: Window) -> Self {
        Self { window: Rc::new(window) }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn panel(&self, view: View) -> &SelectionPanel {
        self.window
            .scenario_page(view.scenario)
            .panel(view.analysis)
    }

    pub fn downgrade(&self) -> UiWeak {
        UiWeak { window: Rc::downgrade(&self.window) }
    }

}
