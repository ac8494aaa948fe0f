use griddom::Surface;

use super::TableView;
use crate::classes;

impl TableView {
    /// Flag the view as overflowing when the table is wider than its
    /// container. No-op before render.
    pub fn on_resize(&self, dom: &mut dyn Surface) {
        let (Some(root), Some(container)) = (self.root, self.container) else {
            return;
        };
        let overflown = dom.scroll_width(container) > dom.client_width(container);
        if overflown {
            dom.add_class(root, classes::OVERFLOW);
        } else {
            dom.remove_class(root, classes::OVERFLOW);
        }
        log::trace!("[table] overflow={overflown}");
    }

    pub fn is_overflown(&self, dom: &dyn Surface) -> bool {
        self.root
            .is_some_and(|root| dom.has_class(root, classes::OVERFLOW))
    }
}
