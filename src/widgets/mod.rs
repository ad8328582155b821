mod content_region;
mod scenario_page;
mod selection_panel;
mod window;

pub use selection_panel::SelectionPanel;
pub use window::Window;
