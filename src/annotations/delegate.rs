//! Seams to the embedding application.

use crate::annotations::annotation::Annotation;
use crate::annotations::pool::ViewPool;
use crate::annotations::view::AnnotationView;
use crate::input::events::TapGesture;

/// Supplies the view for an annotation that is about to become visible.
///
/// Implementations usually dequeue from `pool` first and build a new view only
/// when nothing is recycled. Returning `None` leaves the annotation unmaterialized
/// until the next reconciliation pass asks again.
pub trait AnnotationViewProvider {
    fn view_for(&mut self, annotation: &Annotation, pool: &mut ViewPool) -> Option<AnnotationView>;
}

impl<F> AnnotationViewProvider for F
where
    F: FnMut(&Annotation, &mut ViewPool) -> Option<AnnotationView>,
{
    fn view_for(&mut self, annotation: &Annotation, pool: &mut ViewPool) -> Option<AnnotationView> {
        self(annotation, pool)
    }
}

/// Provider that dequeues-or-creates a view for a single reuse identifier
#[derive(Debug, Clone)]
pub struct ReuseIdentifierProvider {
    reuse_identifier: String,
}

impl ReuseIdentifierProvider {
    pub fn new(reuse_identifier: impl Into<String>) -> Self {
        Self {
            reuse_identifier: reuse_identifier.into(),
        }
    }
}

impl AnnotationViewProvider for ReuseIdentifierProvider {
    fn view_for(
        &mut self,
        _annotation: &Annotation,
        pool: &mut ViewPool,
    ) -> Option<AnnotationView> {
        pool.dequeue_or_create(&self.reuse_identifier)
    }
}

type ViewHandler = Option<Box<dyn FnMut(&AnnotationView)>>;
type TapHandler = Option<Box<dyn FnMut(&TapGesture)>>;
type Notification = Option<Box<dyn FnMut()>>;

/// Optional callbacks into the embedding application.
///
/// Every slot defaults to empty; an empty slot is a no-op, except `should_select`
/// which permits the selection.
#[derive(Default)]
pub struct Delegate {
    should_select: Option<Box<dyn FnMut(&AnnotationView) -> bool>>,
    will_appear: ViewHandler,
    did_appear: ViewHandler,
    will_disappear: ViewHandler,
    did_disappear: ViewHandler,
    did_select: ViewHandler,
    did_deselect: ViewHandler,
    single_tap: TapHandler,
    double_tap: TapHandler,
    two_finger_tap: TapHandler,
    did_zoom: Notification,
    did_scroll: Notification,
}

impl Delegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_should_select(mut self, f: impl FnMut(&AnnotationView) -> bool + 'static) -> Self {
        self.should_select = Some(Box::new(f));
        self
    }

    pub fn on_will_appear(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.will_appear = Some(Box::new(f));
        self
    }

    pub fn on_did_appear(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.did_appear = Some(Box::new(f));
        self
    }

    pub fn on_will_disappear(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.will_disappear = Some(Box::new(f));
        self
    }

    pub fn on_did_disappear(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.did_disappear = Some(Box::new(f));
        self
    }

    pub fn on_did_select(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.did_select = Some(Box::new(f));
        self
    }

    pub fn on_did_deselect(mut self, f: impl FnMut(&AnnotationView) + 'static) -> Self {
        self.did_deselect = Some(Box::new(f));
        self
    }

    pub fn on_single_tap(mut self, f: impl FnMut(&TapGesture) + 'static) -> Self {
        self.single_tap = Some(Box::new(f));
        self
    }

    pub fn on_double_tap(mut self, f: impl FnMut(&TapGesture) + 'static) -> Self {
        self.double_tap = Some(Box::new(f));
        self
    }

    pub fn on_two_finger_tap(mut self, f: impl FnMut(&TapGesture) + 'static) -> Self {
        self.two_finger_tap = Some(Box::new(f));
        self
    }

    pub fn on_did_zoom(mut self, f: impl FnMut() + 'static) -> Self {
        self.did_zoom = Some(Box::new(f));
        self
    }

    pub fn on_did_scroll(mut self, f: impl FnMut() + 'static) -> Self {
        self.did_scroll = Some(Box::new(f));
        self
    }

    pub(crate) fn should_select(&mut self, view: &AnnotationView) -> bool {
        self.should_select.as_mut().map_or(true, |f| f(view))
    }

    pub(crate) fn will_appear(&mut self, view: &AnnotationView) {
        notify(&mut self.will_appear, view);
    }

    pub(crate) fn did_appear(&mut self, view: &AnnotationView) {
        notify(&mut self.did_appear, view);
    }

    pub(crate) fn will_disappear(&mut self, view: &AnnotationView) {
        notify(&mut self.will_disappear, view);
    }

    pub(crate) fn did_disappear(&mut self, view: &AnnotationView) {
        notify(&mut self.did_disappear, view);
    }

    pub(crate) fn did_select(&mut self, view: &AnnotationView) {
        notify(&mut self.did_select, view);
    }

    pub(crate) fn did_deselect(&mut self, view: &AnnotationView) {
        notify(&mut self.did_deselect, view);
    }

    pub(crate) fn did_receive_single_tap(&mut self, tap: &TapGesture) {
        if let Some(f) = self.single_tap.as_mut() {
            f(tap);
        }
    }

    pub(crate) fn did_receive_double_tap(&mut self, tap: &TapGesture) {
        if let Some(f) = self.double_tap.as_mut() {
            f(tap);
        }
    }

    pub(crate) fn did_receive_two_finger_tap(&mut self, tap: &TapGesture) {
        if let Some(f) = self.two_finger_tap.as_mut() {
            f(tap);
        }
    }

    pub(crate) fn did_zoom(&mut self) {
        if let Some(f) = self.did_zoom.as_mut() {
            f();
        }
    }

    pub(crate) fn did_scroll(&mut self) {
        if let Some(f) = self.did_scroll.as_mut() {
            f();
        }
    }
}

fn notify(slot: &mut ViewHandler, view: &AnnotationView) {
    if let Some(f) = slot.as_mut() {
        f(view);
    }
}

impl std::fmt::Debug for Delegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delegate")
            .field("should_select", &self.should_select.is_some())
            .field("will_appear", &self.will_appear.is_some())
            .field("did_appear", &self.did_appear.is_some())
            .field("will_disappear", &self.will_disappear.is_some())
            .field("did_disappear", &self.did_disappear.is_some())
            .field("did_select", &self.did_select.is_some())
            .field("did_deselect", &self.did_deselect.is_some())
            .finish_non_exhaustive()
    }
}
