//! Free list of detached annotation views, searched by reuse identifier.

use crate::annotations::view::{AnnotationView, ViewId};
use crate::prelude::HashMap;

/// Builds a fresh view for one reuse identifier
pub type ViewFactory = Box<dyn Fn() -> AnnotationView>;

/// Recycling pool of annotation views.
///
/// Recycled views are grouped per reuse identifier so a dequeue never scans
/// views of another kind. Factories registered per identifier give callers
/// dequeue-or-create in one call. The pool is unbounded.
#[derive(Default)]
pub struct ViewPool {
    recycled: HashMap<String, Vec<AnnotationView>>,
    factories: HashMap<String, ViewFactory>,
}

impl ViewPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers how to build a view for `reuse_identifier` when none is recycled
    pub fn register<F>(&mut self, reuse_identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> AnnotationView + 'static,
    {
        self.factories
            .insert(reuse_identifier.into(), Box::new(factory));
    }

    pub fn is_registered(&self, reuse_identifier: &str) -> bool {
        self.factories.contains_key(reuse_identifier)
    }

    /// Removes and returns a recycled view with a matching reuse identifier
    pub fn dequeue(&mut self, reuse_identifier: &str) -> Option<AnnotationView> {
        let view = self.recycled.get_mut(reuse_identifier)?.pop();
        if view.is_some() {
            log::trace!("dequeued recycled view for '{}'", reuse_identifier);
        }
        view
    }

    /// Dequeues a recycled view, or builds one with the registered factory
    pub fn dequeue_or_create(&mut self, reuse_identifier: &str) -> Option<AnnotationView> {
        self.dequeue(reuse_identifier).or_else(|| {
            self.factories.get(reuse_identifier).map(|factory| {
                let view = factory();
                debug_assert_eq!(view.reuse_identifier(), reuse_identifier);
                view
            })
        })
    }

    /// Unbinds and detaches `view`, then keeps it for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the view is not bound to an annotation: only visible (or reserved)
    /// views can be recycled.
    pub fn recycle(&mut self, mut view: AnnotationView) {
        assert!(
            view.annotation().is_some(),
            "recycled annotation view {:?} is not bound to an annotation",
            view.id()
        );
        view.unbind();
        view.detach();
        self.recycled
            .entry(view.reuse_identifier().to_string())
            .or_default()
            .push(view);
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.iter().any(|view| view.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotationView> {
        self.recycled.values().flatten()
    }

    /// Number of recycled views for one reuse identifier
    pub fn count(&self, reuse_identifier: &str) -> usize {
        self.recycled.get(reuse_identifier).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.recycled.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every recycled view, keeping the registered factories
    pub fn clear(&mut self) {
        self.recycled.clear();
    }
}

impl std::fmt::Debug for ViewPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPool")
            .field("recycled", &self.len())
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::annotation::AnnotationId;
    use crate::core::geo::Point;

    fn bound_view(reuse_identifier: &str) -> AnnotationView {
        let mut view = AnnotationView::new(reuse_identifier, Point::new(10.0, 10.0));
        view.bind(AnnotationId::new("a"));
        view.attach(1);
        view
    }

    #[test]
    fn test_recycle_then_dequeue_returns_same_view() {
        let mut pool = ViewPool::new();
        let view = bound_view("pin");
        let id = view.id();

        pool.recycle(view);
        assert_eq!(pool.count("pin"), 1);
        assert!(pool.contains(id));

        let reused = pool.dequeue("pin").unwrap();
        assert_eq!(reused.id(), id);
        assert!(reused.annotation().is_none());
        assert!(!reused.is_attached());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_dequeue_respects_reuse_identifier() {
        let mut pool = ViewPool::new();
        pool.recycle(bound_view("pin"));
        assert!(pool.dequeue("flag").is_none());
        assert!(pool.dequeue("pin").is_some());
        assert!(pool.dequeue("pin").is_none());
    }

    #[test]
    fn test_dequeue_or_create_prefers_recycled() {
        let mut pool = ViewPool::new();
        pool.register("pin", || AnnotationView::new("pin", Point::new(20.0, 20.0)));
        let recycled = bound_view("pin");
        let recycled_id = recycled.id();
        pool.recycle(recycled);

        assert_eq!(pool.dequeue_or_create("pin").unwrap().id(), recycled_id);
        let fresh = pool.dequeue_or_create("pin").unwrap();
        assert_ne!(fresh.id(), recycled_id);
        assert_eq!(fresh.size(), Point::new(20.0, 20.0));
        assert!(pool.dequeue_or_create("flag").is_none());
    }

    #[test]
    #[should_panic(expected = "not bound")]
    fn test_recycling_unbound_view_panics() {
        let mut pool = ViewPool::new();
        pool.recycle(AnnotationView::new("pin", Point::new(10.0, 10.0)));
    }
}
