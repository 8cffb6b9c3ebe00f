//! Keeps the set of on-screen annotation views in step with the viewport.
//!
//! Each pass looks at every registered annotation (or a named subset), maps its
//! content position to screen space and applies one of four transitions:
//!
//! | has view | in viewport + margin | action                                  |
//! |----------|----------------------|-----------------------------------------|
//! | yes      | yes                  | move the view                           |
//! | yes      | no                   | disappear, recycle the view             |
//! | no       | yes                  | obtain a view, attach, appear, fade in  |
//! | no       | no                   | nothing                                 |
//!
//! While the surface is bouncing back from a zoom overshoot, or while updates are
//! muted (and no zoom gesture is running), passes only reposition the views that are
//! already visible.

use crate::animation::fade::FadeAnimation;
use crate::annotations::annotation::{Annotation, AnnotationId};
use crate::annotations::delegate::{AnnotationViewProvider, Delegate};
use crate::annotations::pool::ViewPool;
use crate::annotations::view::{AnnotationView, ViewId};
use crate::core::constants::{FADE_IN_DURATION_MS, VISIBILITY_MARGIN};
use crate::core::geo::Point;
use crate::core::viewport::ViewportFrame;
use crate::input::handler::Selection;
use crate::prelude::HashMap;
use crate::{Error, Result};
use instant::Instant;
use std::time::Duration;

/// Collaborators a pass may call out to
pub struct Hooks<'a> {
    pub provider: &'a mut dyn AnnotationViewProvider,
    pub delegate: &'a mut Delegate,
    pub selection: &'a mut Selection,
}

/// What a pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub appeared: usize,
    pub disappeared: usize,
    pub moved: usize,
    /// The pass only repositioned already-visible views
    pub reposition_only: bool,
}

impl ReconcileReport {
    /// True when views were added to or removed from the screen
    pub fn changed_membership(&self) -> bool {
        self.appeared > 0 || self.disappeared > 0
    }
}

pub struct Reconciler {
    registry: HashMap<AnnotationId, Annotation>,
    visible: HashMap<AnnotationId, AnnotationView>,
    owners: HashMap<ViewId, AnnotationId>,
    /// Views obtained ahead of time by `reserve_view`, bound but not yet on screen
    reserved: HashMap<AnnotationId, AnnotationView>,
    pool: ViewPool,
    margin: f64,
    fade_in_duration: Duration,
    muted_until: Option<Instant>,
    next_z_order: u64,
}

impl Reconciler {
    pub fn new(margin: f64, fade_in_duration: Duration) -> Self {
        Self {
            registry: HashMap::default(),
            visible: HashMap::default(),
            owners: HashMap::default(),
            reserved: HashMap::default(),
            pool: ViewPool::new(),
            margin,
            fade_in_duration,
            muted_until: None,
            next_z_order: 0,
        }
    }

    pub fn margin(&self) -> f64 {
        self.margin
    }

    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    pub fn set_fade_in_duration(&mut self, duration: Duration) {
        self.fade_in_duration = duration;
    }

    // Mute window

    /// Restricts passes to repositioning until `now + duration`.
    ///
    /// A later call replaces the deadline of an earlier one.
    pub fn mute_for(&mut self, duration: Duration, now: Instant) {
        log::debug!("annotation updates muted for {:?}", duration);
        self.muted_until = Some(now + duration);
    }

    pub fn is_muted(&self) -> bool {
        self.muted_until.is_some()
    }

    pub fn muted_until(&self) -> Option<Instant> {
        self.muted_until
    }

    /// Ends the mute window if its deadline has passed, then runs one full pass
    pub fn resume_if_due(
        &mut self,
        now: Instant,
        frame: &ViewportFrame,
        hooks: &mut Hooks<'_>,
    ) -> Option<ReconcileReport> {
        match self.muted_until {
            Some(until) if now >= until => Some(self.unmute(frame, hooks)),
            _ => None,
        }
    }

    /// Ends the mute window immediately and runs one full pass
    pub fn unmute(&mut self, frame: &ViewportFrame, hooks: &mut Hooks<'_>) -> ReconcileReport {
        log::debug!("annotation updates resumed");
        self.muted_until = None;
        self.reconcile(frame, None, hooks)
    }

    // Passes

    /// Runs one pass over every annotation, or only over `limited_to`
    pub fn reconcile(
        &mut self,
        frame: &ViewportFrame,
        limited_to: Option<&[AnnotationId]>,
        hooks: &mut Hooks<'_>,
    ) -> ReconcileReport {
        if (frame.zoom_bouncing || self.is_muted()) && !frame.zooming {
            return ReconcileReport {
                moved: self.reposition_visible(frame),
                reposition_only: true,
                ..Default::default()
            };
        }

        let mut ids: Vec<AnnotationId> = match limited_to {
            Some(subset) => subset
                .iter()
                .filter(|id| self.registry.contains_key(*id))
                .cloned()
                .collect(),
            None => self.registry.keys().cloned().collect(),
        };
        // Stable order keeps attach order, and with it z-order, deterministic
        ids.sort();

        let mut report = ReconcileReport::default();
        for id in &ids {
            self.update_annotation(id, frame, hooks, &mut report);
        }

        log::trace!(
            "reconciled {} annotations: {} appeared, {} disappeared, {} moved",
            ids.len(),
            report.appeared,
            report.disappeared,
            report.moved
        );
        report
    }

    /// Moves visible views to their current screen positions, nothing else
    pub fn reposition_visible(&mut self, frame: &ViewportFrame) -> usize {
        let mut moved = 0;
        for (id, view) in self.visible.iter_mut() {
            if let Some(annotation) = self.registry.get(id) {
                let position = frame.transform.to_screen(&annotation.content_position());
                if position != view.position() {
                    view.set_position(position);
                    moved += 1;
                }
            }
        }
        moved
    }

    fn update_annotation(
        &mut self,
        id: &AnnotationId,
        frame: &ViewportFrame,
        hooks: &mut Hooks<'_>,
        report: &mut ReconcileReport,
    ) {
        let Some(annotation) = self.registry.get(id) else {
            return;
        };
        let position = frame.transform.to_screen(&annotation.content_position());
        let in_viewport = frame.is_within(&position, self.margin);

        match (self.visible.contains_key(id), in_viewport) {
            (true, true) => {
                if let Some(view) = self.visible.get_mut(id) {
                    if view.position() != position {
                        view.set_position(position);
                        report.moved += 1;
                    }
                }
            }
            (true, false) => {
                self.disappear(id, hooks);
                report.disappeared += 1;
            }
            (false, true) => {
                if self.materialize(id, position, hooks) {
                    report.appeared += 1;
                }
            }
            (false, false) => {}
        }
    }

    fn materialize(&mut self, id: &AnnotationId, position: Point, hooks: &mut Hooks<'_>) -> bool {
        let Some(annotation) = self.registry.get(id) else {
            return false;
        };

        let mut view = match self.reserved.remove(id) {
            Some(view) => view,
            None => match hooks.provider.view_for(annotation, &mut self.pool) {
                Some(view) => {
                    assert!(
                        view.annotation().is_none(),
                        "view {:?} supplied for '{}' is already bound to '{}'",
                        view.id(),
                        id,
                        view.annotation().map(AnnotationId::as_str).unwrap_or_default()
                    );
                    view
                }
                None => {
                    log::trace!("no view supplied for annotation '{}'", id);
                    return false;
                }
            },
        };
        assert!(
            !self.owners.contains_key(&view.id()),
            "view {:?} is already visible",
            view.id()
        );

        view.bind(id.clone());
        view.set_position(position);
        hooks.delegate.will_appear(&view);

        self.next_z_order += 1;
        view.attach(self.next_z_order);
        view.set_animation(FadeAnimation::fade_in(self.fade_in_duration));
        self.owners.insert(view.id(), id.clone());
        let view = self.visible.entry(id.clone()).or_insert(view);
        hooks.delegate.did_appear(view);

        log::debug!("annotation '{}' appeared at {:?}", id, position);
        true
    }

    fn disappear(&mut self, id: &AnnotationId, hooks: &mut Hooks<'_>) {
        self.deselect_if_selected(id, hooks);
        let Some(mut view) = self.visible.remove(id) else {
            return;
        };
        self.owners.remove(&view.id());

        hooks.delegate.will_disappear(&view);
        view.detach();
        hooks.delegate.did_disappear(&view);
        self.pool.recycle(view);

        log::debug!("annotation '{}' disappeared", id);
    }

    fn deselect_if_selected(&mut self, id: &AnnotationId, hooks: &mut Hooks<'_>) {
        if hooks.selection.selected_annotation() == Some(id) {
            hooks.selection.take();
            if let Some(view) = self.visible.get(id) {
                hooks.delegate.did_deselect(view);
            }
        }
    }

    // Registry

    /// Registers `annotation` and immediately checks its visibility.
    ///
    /// The check applies the full transition table even while muted. An annotation
    /// with an already-registered identifier replaces the old one.
    pub fn add_annotation(
        &mut self,
        annotation: Annotation,
        frame: &ViewportFrame,
        hooks: &mut Hooks<'_>,
    ) -> ReconcileReport {
        let id = annotation.identifier().clone();
        self.registry.insert(id.clone(), annotation);

        let mut report = ReconcileReport::default();
        self.update_annotation(&id, frame, hooks, &mut report);
        report
    }

    /// Unregisters an annotation, recycling its view without disappear callbacks.
    ///
    /// Unknown identifiers are ignored.
    pub fn remove_annotation(
        &mut self,
        id: &AnnotationId,
        hooks: &mut Hooks<'_>,
    ) -> Option<Annotation> {
        let annotation = self.registry.remove(id)?;

        self.deselect_if_selected(id, hooks);
        if let Some(mut view) = self.visible.remove(id) {
            self.owners.remove(&view.id());
            view.detach();
            self.pool.recycle(view);
        }
        if let Some(view) = self.reserved.remove(id) {
            self.pool.recycle(view);
        }

        log::debug!("annotation '{}' removed", id);
        Some(annotation)
    }

    pub fn remove_all(&mut self, hooks: &mut Hooks<'_>) -> Vec<Annotation> {
        let ids: Vec<AnnotationId> = self.registry.keys().cloned().collect();
        ids.iter()
            .filter_map(|id| self.remove_annotation(id, hooks))
            .collect()
    }

    /// Moves an annotation in content space and re-checks only that annotation
    pub fn set_annotation_position(
        &mut self,
        id: &AnnotationId,
        position: Point,
        frame: &ViewportFrame,
        hooks: &mut Hooks<'_>,
    ) -> Result<ReconcileReport> {
        let annotation = self
            .registry
            .get_mut(id)
            .ok_or_else(|| Error::UnknownAnnotation(id.to_string()))?;
        annotation.set_content_position(position);

        let mut report = ReconcileReport::default();
        self.update_annotation(id, frame, hooks, &mut report);
        Ok(report)
    }

    /// Obtains the view an annotation will use before it becomes visible.
    ///
    /// Returns the visible view if there is one, otherwise a previously reserved
    /// view, otherwise asks the provider once and holds the result so the next pass
    /// that materializes the annotation reuses it instead of asking again.
    pub fn reserve_view(
        &mut self,
        id: &AnnotationId,
        provider: &mut dyn AnnotationViewProvider,
    ) -> Result<&AnnotationView> {
        let annotation = self
            .registry
            .get(id)
            .ok_or_else(|| Error::UnknownAnnotation(id.to_string()))?;

        if !self.visible.contains_key(id) && !self.reserved.contains_key(id) {
            let mut view = provider
                .view_for(annotation, &mut self.pool)
                .ok_or_else(|| Error::ViewUnavailable(id.to_string()))?;
            assert!(
                view.annotation().is_none(),
                "view {:?} supplied for '{}' is already bound",
                view.id(),
                id
            );
            view.bind(id.clone());
            self.reserved.insert(id.clone(), view);
            log::debug!("reserved a view for annotation '{}'", id);
        }

        self.visible
            .get(id)
            .or_else(|| self.reserved.get(id))
            .ok_or_else(|| Error::ViewUnavailable(id.to_string()))
    }

    /// Marks visible views (all, or those of `limited_to`) for redraw
    pub fn mark_needs_display(&mut self, limited_to: Option<&[AnnotationId]>) {
        match limited_to {
            Some(ids) => {
                for id in ids {
                    if let Some(view) = self.visible.get_mut(id) {
                        view.set_needs_display();
                    }
                }
            }
            None => self
                .visible
                .values_mut()
                .for_each(AnnotationView::set_needs_display),
        }
    }

    /// Topmost visible view whose frame contains the screen-space `point`
    pub fn hit_test(&self, point: &Point) -> Option<&AnnotationView> {
        self.visible
            .values()
            .filter(|view| view.is_attached() && view.frame().contains(point))
            .max_by_key(|view| view.z_order())
    }

    // Queries

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.registry.get(id)
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.registry.values()
    }

    pub fn contains(&self, id: &AnnotationId) -> bool {
        self.registry.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn is_visible(&self, id: &AnnotationId) -> bool {
        self.visible.contains_key(id)
    }

    pub fn visible_view(&self, id: &AnnotationId) -> Option<&AnnotationView> {
        self.visible.get(id)
    }

    pub fn visible_view_mut(&mut self, id: &AnnotationId) -> Option<&mut AnnotationView> {
        self.visible.get_mut(id)
    }

    pub fn visible_views(&self) -> impl Iterator<Item = &AnnotationView> {
        self.visible.values()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// The annotation a visible view is bound to
    pub fn annotation_for_view(&self, view: ViewId) -> Option<&AnnotationId> {
        self.owners.get(&view)
    }

    /// Looks up a visible view by its identity
    pub fn view(&self, view: ViewId) -> Option<&AnnotationView> {
        self.owners.get(&view).and_then(|id| self.visible.get(id))
    }

    pub fn reserved_view(&self, id: &AnnotationId) -> Option<&AnnotationView> {
        self.reserved.get(id)
    }

    pub fn pool(&self) -> &ViewPool {
        &self.pool
    }

    pub fn pool_mut(&mut self) -> &mut ViewPool {
        &mut self.pool
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(
            VISIBILITY_MARGIN,
            Duration::from_millis(FADE_IN_DURATION_MS),
        )
    }
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("annotations", &self.registry.len())
            .field("visible", &self.visible.len())
            .field("reserved", &self.reserved.len())
            .field("pool", &self.pool)
            .field("margin", &self.margin)
            .field("muted_until", &self.muted_until)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::delegate::ReuseIdentifierProvider;
    use crate::core::transform::ViewportTransform;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn frame(zoom_scale: f64, offset: Point) -> ViewportFrame {
        ViewportFrame::new(
            ViewportTransform::new(zoom_scale, offset),
            Point::new(500.0, 500.0),
        )
    }

    fn reconciler() -> Reconciler {
        let mut reconciler = Reconciler::default();
        reconciler
            .pool_mut()
            .register("pin", || AnnotationView::new("pin", Point::new(20.0, 20.0)));
        reconciler
    }

    struct Fixture {
        provider: ReuseIdentifierProvider,
        delegate: Delegate,
        selection: Selection,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Fixture {
        fn new() -> Self {
            let log = Rc::new(RefCell::new(Vec::new()));
            let (a, b, c, d) = (log.clone(), log.clone(), log.clone(), log.clone());
            let name = |view: &AnnotationView| {
                view.annotation()
                    .map(|id| id.to_string())
                    .unwrap_or_default()
            };
            let delegate = Delegate::new()
                .on_will_appear(move |v| a.borrow_mut().push(format!("will_appear {}", name(v))))
                .on_did_appear(move |v| b.borrow_mut().push(format!("did_appear {}", name(v))))
                .on_will_disappear(move |v| {
                    c.borrow_mut().push(format!("will_disappear {}", name(v)))
                })
                .on_did_disappear(move |v| {
                    d.borrow_mut().push(format!("did_disappear {}", name(v)))
                });
            Self {
                provider: ReuseIdentifierProvider::new("pin"),
                delegate,
                selection: Selection::default(),
                log,
            }
        }

        fn hooks(&mut self) -> Hooks<'_> {
            Hooks {
                provider: &mut self.provider,
                delegate: &mut self.delegate,
                selection: &mut self.selection,
            }
        }

        fn events(&self) -> Vec<String> {
            self.log.borrow_mut().drain(..).collect()
        }
    }

    #[test]
    fn test_transition_table() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        let id = AnnotationId::new("a");

        // no view, visible → appear
        let report = reconciler.add_annotation(
            Annotation::new("a", Point::new(100.0, 100.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        assert_eq!(report.appeared, 1);
        assert_eq!(fixture.events(), vec!["will_appear a", "did_appear a"]);
        let view = reconciler.visible_view(&id).unwrap();
        assert!(view.is_attached());
        assert!(view.pending_animation().is_some());

        // view, visible → move
        let report =
            reconciler.reconcile(&frame(1.0, Point::new(50.0, 0.0)), None, &mut fixture.hooks());
        assert_eq!(report.moved, 1);
        assert_eq!(
            reconciler.visible_view(&id).unwrap().position(),
            Point::new(50.0, 100.0)
        );
        assert!(fixture.events().is_empty());

        // view, not visible → disappear + recycle
        let away = frame(1.0, Point::new(1000.0, 0.0));
        let report = reconciler.reconcile(&away, None, &mut fixture.hooks());
        assert_eq!(report.disappeared, 1);
        assert_eq!(fixture.events(), vec!["will_disappear a", "did_disappear a"]);
        assert!(!reconciler.is_visible(&id));
        assert_eq!(reconciler.pool().count("pin"), 1);

        // no view, not visible → nothing
        let report = reconciler.reconcile(&away, None, &mut fixture.hooks());
        assert_eq!(report, ReconcileReport::default());
    }

    #[test]
    fn test_margin_prestages_views() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        reconciler.add_annotation(
            Annotation::new("edge", Point::new(520.0, 250.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        reconciler.add_annotation(
            Annotation::new("beyond", Point::new(526.0, 250.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        assert!(reconciler.is_visible(&AnnotationId::new("edge")));
        assert!(!reconciler.is_visible(&AnnotationId::new("beyond")));
    }

    #[test]
    fn test_missing_view_is_retried() {
        let mut fixture = Fixture::new();
        let mut reconciler = Reconciler::default();
        reconciler.add_annotation(
            Annotation::new("a", Point::new(10.0, 10.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        assert!(!reconciler.is_visible(&AnnotationId::new("a")));

        reconciler
            .pool_mut()
            .register("pin", || AnnotationView::new("pin", Point::new(20.0, 20.0)));
        let report = reconciler.reconcile(&frame(1.0, Point::zero()), None, &mut fixture.hooks());
        assert_eq!(report.appeared, 1);
    }

    #[test]
    fn test_muted_pass_only_repositions() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        let start = Instant::now();
        reconciler.add_annotation(
            Annotation::new("a", Point::new(100.0, 100.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        reconciler.registry.insert(
            AnnotationId::new("b"),
            Annotation::new("b", Point::new(200.0, 200.0)),
        );
        fixture.events();

        reconciler.mute_for(Duration::from_millis(100), start);
        let report = reconciler.reconcile(&frame(2.0, Point::zero()), None, &mut fixture.hooks());
        assert!(report.reposition_only);
        assert_eq!(report.moved, 1);
        assert!(!reconciler.is_visible(&AnnotationId::new("b")));

        // An active zoom gesture overrides the mute
        let mut zooming = frame(2.0, Point::zero());
        zooming.zooming = true;
        assert!(!reconciler.reconcile(&zooming, None, &mut fixture.hooks()).reposition_only);
    }

    #[test]
    fn test_mute_resumes_with_full_pass() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        let start = Instant::now();
        reconciler.registry.insert(
            AnnotationId::new("a"),
            Annotation::new("a", Point::new(100.0, 100.0)),
        );

        reconciler.mute_for(Duration::from_millis(100), start);
        reconciler.mute_for(Duration::from_millis(100), start + Duration::from_millis(50));
        let viewport = frame(1.0, Point::zero());

        assert!(reconciler
            .resume_if_due(start + Duration::from_millis(120), &viewport, &mut fixture.hooks())
            .is_none());
        let report = reconciler
            .resume_if_due(start + Duration::from_millis(150), &viewport, &mut fixture.hooks())
            .unwrap();
        assert_eq!(report.appeared, 1);
        assert!(!reconciler.is_muted());
    }

    #[test]
    fn test_limited_refresh_only_touches_subset() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        for (name, x) in [("a", 10.0), ("b", 20.0)] {
            reconciler
                .registry
                .insert(AnnotationId::new(name), Annotation::new(name, Point::new(x, 10.0)));
        }
        let subset = [AnnotationId::new("b"), AnnotationId::new("missing")];
        let viewport = frame(1.0, Point::zero());
        let report = reconciler.reconcile(&viewport, Some(&subset[..]), &mut fixture.hooks());
        assert_eq!(report.appeared, 1);
        assert!(reconciler.is_visible(&AnnotationId::new("b")));
        assert!(!reconciler.is_visible(&AnnotationId::new("a")));
    }

    #[test]
    fn test_remove_recycles_silently() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        reconciler.add_annotation(
            Annotation::new("a", Point::new(10.0, 10.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );
        fixture.events();

        assert!(reconciler
            .remove_annotation(&AnnotationId::new("a"), &mut fixture.hooks())
            .is_some());
        assert!(fixture.events().is_empty());
        assert_eq!(reconciler.visible_count(), 0);
        assert_eq!(reconciler.pool().len(), 1);
        assert!(reconciler
            .remove_annotation(&AnnotationId::new("a"), &mut fixture.hooks())
            .is_none());
    }

    #[test]
    fn test_reserved_view_is_used_on_appear() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        let id = AnnotationId::new("far");
        reconciler.add_annotation(
            Annotation::new("far", Point::new(1500.0, 1500.0)),
            &frame(1.0, Point::zero()),
            &mut fixture.hooks(),
        );

        let reserved = reconciler.reserve_view(&id, &mut fixture.provider).unwrap().id();
        // Reserving again hands back the same view without asking the provider
        let mut refusing = |_: &Annotation, _: &mut ViewPool| -> Option<AnnotationView> { None };
        assert_eq!(reconciler.reserve_view(&id, &mut refusing).unwrap().id(), reserved);

        let mut hooks = Hooks {
            provider: &mut refusing,
            delegate: &mut fixture.delegate,
            selection: &mut fixture.selection,
        };
        let report =
            reconciler.reconcile(&frame(1.0, Point::new(1200.0, 1200.0)), None, &mut hooks);
        assert_eq!(report.appeared, 1);
        assert_eq!(reconciler.visible_view(&id).unwrap().id(), reserved);
        assert!(reconciler.reserved_view(&id).is_none());
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut fixture = Fixture::new();
        let mut reconciler = reconciler();
        let viewport = frame(1.0, Point::zero());
        let under = Annotation::new("under", Point::new(100.0, 100.0));
        reconciler.add_annotation(under, &viewport, &mut fixture.hooks());
        let over = Annotation::new("over", Point::new(105.0, 105.0));
        reconciler.add_annotation(over, &viewport, &mut fixture.hooks());

        let hit = reconciler.hit_test(&Point::new(103.0, 103.0)).unwrap();
        assert_eq!(hit.annotation(), Some(&AnnotationId::new("over")));
        assert!(reconciler.hit_test(&Point::new(300.0, 300.0)).is_none());
    }

    #[test]
    #[should_panic(expected = "already bound")]
    fn test_bound_view_from_provider_panics() {
        let mut fixture = Fixture::new();
        let mut reconciler = Reconciler::default();
        let mut provider = |_: &Annotation, _: &mut ViewPool| -> Option<AnnotationView> {
            let mut view = AnnotationView::new("pin", Point::new(1.0, 1.0));
            view.bind(AnnotationId::new("someone-else"));
            Some(view)
        };
        let mut hooks = Hooks {
            provider: &mut provider,
            delegate: &mut fixture.delegate,
            selection: &mut fixture.selection,
        };
        let viewport = frame(1.0, Point::zero());
        let annotation = Annotation::new("a", Point::new(1.0, 1.0));
        reconciler.add_annotation(annotation, &viewport, &mut hooks);
    }
}
