mod selection;
mod actions;

pub use self::selection::Selection as SelectionController;
pub use self::actions::Actions as ActionsController;
