mod catalog;
mod content;
mod selection;
mod view;

pub use self::catalog::{Catalog, MapEntry};
pub use self::content::{DisplaySize, Length};
pub use self::selection::{Month, Scale, Scenario};
pub use self::view::{Analysis, OutputKind, View};
