use crate::animation::fade::FadeAnimation;
use crate::annotations::annotation::AnnotationId;
use crate::core::bounds::Bounds;
use crate::core::geo::Point;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an annotation view instance, stable across recycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

/// The on-screen marker for an annotation.
///
/// The engine decides where the view goes and when it is attached; the host draws
/// it. A live view is either recycled (no annotation, detached, pooled) or visible
/// (bound to one annotation, attached).
#[derive(Debug, Clone)]
pub struct AnnotationView {
    id: ViewId,
    reuse_identifier: String,
    size: Point,
    position: Point,
    center_offset: Point,
    center: Point,
    annotation: Option<AnnotationId>,
    attached: bool,
    z_order: u64,
    animation: Option<FadeAnimation>,
    needs_display: bool,
}

impl AnnotationView {
    pub fn new(reuse_identifier: impl Into<String>, size: Point) -> Self {
        Self {
            id: ViewId::next(),
            reuse_identifier: reuse_identifier.into(),
            size,
            position: Point::zero(),
            center_offset: Point::zero(),
            center: Point::zero(),
            annotation: None,
            attached: false,
            z_order: 0,
            animation: None,
            needs_display: false,
        }
    }

    /// Sets the anchor adjustment, e.g. to put a pin's tip rather than its center on the position
    pub fn with_center_offset(mut self, offset: Point) -> Self {
        self.set_center_offset(offset);
        self
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn reuse_identifier(&self) -> &str {
        &self.reuse_identifier
    }

    /// The annotation this view currently represents
    pub fn annotation(&self) -> Option<&AnnotationId> {
        self.annotation.as_ref()
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Screen-space position of the annotation
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        if position != self.position {
            self.position = position;
            self.recenter();
        }
    }

    pub fn center_offset(&self) -> Point {
        self.center_offset
    }

    pub fn set_center_offset(&mut self, offset: Point) {
        if offset != self.center_offset {
            self.center_offset = offset;
            self.recenter();
        }
    }

    /// Screen-space center of the view (`position + center_offset`)
    pub fn center(&self) -> Point {
        self.center
    }

    /// Screen-space rectangle covered by the view
    pub fn frame(&self) -> Bounds {
        Bounds::from_center_and_size(self.center, self.size.x, self.size.y)
    }

    /// Whether the view is currently on screen
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stacking order among attached views; higher is on top
    pub fn z_order(&self) -> u64 {
        self.z_order
    }

    /// The appear animation the host should play, if it has not been taken yet
    pub fn pending_animation(&self) -> Option<&FadeAnimation> {
        self.animation.as_ref()
    }

    pub fn take_animation(&mut self) -> Option<FadeAnimation> {
        self.animation.take()
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    /// Called by the host once it has redrawn the view
    pub fn clear_needs_display(&mut self) {
        self.needs_display = false;
    }

    fn recenter(&mut self) {
        self.center = self.position.add(&self.center_offset);
    }

    pub(crate) fn bind(&mut self, annotation: AnnotationId) {
        self.annotation = Some(annotation);
    }

    pub(crate) fn unbind(&mut self) -> Option<AnnotationId> {
        self.annotation.take()
    }

    pub(crate) fn attach(&mut self, z_order: u64) {
        self.attached = true;
        self.z_order = z_order;
    }

    pub(crate) fn detach(&mut self) {
        self.attached = false;
        self.animation = None;
    }

    pub(crate) fn set_animation(&mut self, animation: FadeAnimation) {
        self.animation = Some(animation);
    }
}
