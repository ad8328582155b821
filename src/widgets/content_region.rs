use super::super::prelude::*;
use super::super::error::ResolveError;
use super::super::models::{DisplaySize, Length};
use super::super::resolver::ContentDescriptor;

use std::cell::{Cell, RefCell};
use std::path::Path;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ContentRegion {
        pub child: RefCell<Option<gtk::Widget>>,
        pub size: Cell<Option<DisplaySize>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ContentRegion {
        const NAME: &'static str = "ContentRegion";
        type Type = super::ContentRegion;
        type ParentType = gtk::Widget;

        fn class_init(class: &mut Self::Class) {
            class.set_css_name("content-region");
            class.set_accessible_role(gtk::AccessibleRole::Group);
        }
    }

    impl ObjectImpl for ContentRegion {
        fn dispose(&self) {
            if let Some(child) = self.child.take() {
                child.unparent();
            }
        }
    }

    impl WidgetImpl for ContentRegion {
        fn measure(&self, orientation: gtk::Orientation, _for_size: i32) -> (i32, i32, i32, i32) {
            let Some(child) = self.child.borrow().clone() else {
                return (0, 0, -1, -1);
            };

            let (minimum, natural, _, _) = child.measure(orientation, -1);
            let fixed_height = match (orientation, self.size.get()) {
                (gtk::Orientation::Vertical, Some(DisplaySize { height: Length::Pixels(pixels), .. })) => {
                    Some(i32::try_from(pixels).unwrap_or(i32::MAX))
                }
                _ => None,
            };

            match fixed_height {
                Some(height) => (minimum.max(height), minimum.max(height), -1, -1),
                None => (minimum, natural.max(minimum), -1, -1),
            }
        }

        fn size_allocate(&self, width: i32, height: i32, baseline: i32) {
            let Some(child) = self.child.borrow().clone() else {
                return;
            };

            let available = u32::try_from(width).unwrap_or(0);
            let target = self.size
                .get()
                .map_or(available, |size| size.width.resolve(available).min(available));

            let (child_minimum, _, _, _) = child.measure(gtk::Orientation::Horizontal, -1);
            let child_width = i32::try_from(target).unwrap_or(width).max(child_minimum);
            let offset = (width - child_width).max(0) / 2;

            let transform = gtk::gsk::Transform::new()
                .translate(&gtk::graphene::Point::new(offset as f32, 0.0));
            child.allocate(child_width, height, baseline, Some(transform));
        }
    }
}

glib::wrapper! {
    /// Render region that shows whatever a resolver produced for its control.
    pub struct ContentRegion(ObjectSubclass<imp::ContentRegion>)
        @extends gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget;
}

impl ContentRegion {

    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn replace_child(&self, widget: &gtk::Widget, size: Option<DisplaySize>) {
        let imp = self.imp();
        if let Some(previous) = imp.child.replace(Some(widget.clone())) {
            previous.unparent();
        }

        imp.size.set(size);
        widget.set_parent(self);
        self.queue_resize();
    }

    pub fn render(&self, descriptor: &ContentDescriptor) {
        let widget = match descriptor {
            ContentDescriptor::ImageReference { asset, path, .. } => Self::image_widget(asset, path),
            ContentDescriptor::EmbeddedDocument { path, content, .. } => Self::document_widget(path, content),
            ContentDescriptor::Error(error) => Self::error_widget(error.title(), &error.to_string()),
        };

        self.replace_child(&widget, descriptor.size());
    }

    fn image_widget(asset: &str, path: &Path) -> gtk::Widget {
        match gtk::gdk::Texture::from_filename(path) {
            Ok(texture) => {
                let picture = gtk::Picture::for_paintable(&texture);
                picture.set_content_fit(gtk::ContentFit::Fill);
                picture.set_can_shrink(true);
                picture.set_alternative_text(Some(asset));
                picture.upcast()
            }
            Err(error) => {
                log::warn!("Failed to load `{path}`: {error}", path = path.display());
                let error = ResolveError::asset_unreadable(path, std::io::Error::other(error.to_string()));
                Self::error_widget(error.title(), &error.to_string())
            }
        }
    }

    #[cfg(feature = "webkit")]
    fn document_widget(path: &Path, content: &str) -> gtk::Widget {
        use webkit6::prelude::*;

        let web_view = webkit6::WebView::new();
        let base_uri = glib::filename_to_uri(path, None).ok();
        web_view.load_html(content, base_uri.as_ref().map(|uri| uri.as_str()));
        web_view.set_hexpand(true);
        web_view.upcast()
    }

    #[cfg(not(feature = "webkit"))]
    fn document_widget(path: &Path, content: &str) -> gtk::Widget {
        let description = format!(
            "This build has no embedded web view. The map ({size} KiB) opens in your browser.",
            size = content.len().div_ceil(1024)
        );

        let status_page = adw::StatusPage::builder()
            .icon_name("web-browser-symbolic")
            .title("Interactive Map")
            .description(glib::markup_escape_text(&description))
            .build();

        let button = gtk::Button::builder()
            .label("Open in Browser")
            .halign(gtk::Align::Center)
            .build();
        button.add_css_class("pill");
        button.add_css_class("suggested-action");

        match glib::filename_to_uri(path, None) {
            Ok(uri) => {
                button.connect_clicked(move |button| {
                    let window = button.root().and_downcast::<gtk::Window>();
                    gtk::UriLauncher::new(uri.as_str()).launch(window.as_ref(), gtk::gio::Cancellable::NONE, |result| {
                        if let Err(error) = result {
                            log::warn!("Failed to open map in browser: {error}");
                        }
                    });
                });
            }
            Err(error) => {
                log::warn!("No URI for `{path}`: {error}", path = path.display());
                button.set_sensitive(false);
            }
        }

        status_page.set_child(Some(&button));
        status_page.upcast()
    }

    fn error_widget(title: &str, description: &str) -> gtk::Widget {
        let status_page = adw::StatusPage::builder()
            .icon_name("dialog-error-symbolic")
            .title(title)
            .description(glib::markup_escape_text(description))
            .build();
        status_page.add_css_class("compact");
        status_page.upcast()
    }

}

impl Default for ContentRegion {
    fn default() -> Self {
        Self::new()
    }
}
