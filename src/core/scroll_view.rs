//! The tiled scroll view: one object wiring the surface, the annotation engine,
//! gesture handling and tiled drawing together.
//!
//! The host forwards its scroll/zoom notifications ([`TiledScrollView::did_scroll`],
//! [`TiledScrollView::did_zoom`]), raw touches and a periodic
//! [`TiledScrollView::tick`]; it renders whatever the engine leaves in the visible
//! set.

use crate::{
    annotations::{
        Annotation, AnnotationId, AnnotationView, AnnotationViewProvider, Delegate, Hooks,
        ReconcileReport, Reconciler,
    },
    core::{
        bounds::Bounds,
        config::TiledScrollConfig,
        geo::Point,
        transform::{zoom_scale_by_zooming_in, zoom_scale_by_zooming_out},
        viewport::{ScrollableSurface, ViewportFrame},
    },
    input::{
        events::{TapGesture, TapKind, TapOutcome, TouchEvent},
        gestures::{TapConfig, TapRecognizer},
        handler::{GestureContext, GestureResolver, Selection},
    },
    tiles::{
        source::TileImageSource,
        surface::{DrawReport, TileCanvas, TiledSurface},
    },
    Error, Result,
};
use instant::Instant;
use std::time::Duration;

/// What a [`TiledScrollView::tick`] did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Full pass run because the mute window ended
    pub resumed: Option<ReconcileReport>,
    /// A held single tap released by the tap recognizer
    pub tap: Option<TapOutcome>,
}

pub struct TiledScrollView<S, P>
where
    S: ScrollableSurface,
    P: AnnotationViewProvider,
{
    surface: S,
    provider: P,
    delegate: Delegate,
    config: TiledScrollConfig,
    reconciler: Reconciler,
    resolver: GestureResolver,
    recognizer: TapRecognizer,
    tiled_surface: TiledSurface,
}

impl<S, P> TiledScrollView<S, P>
where
    S: ScrollableSurface,
    P: AnnotationViewProvider,
{
    pub fn new(surface: S, provider: P) -> Self {
        let config = TiledScrollConfig::default();
        let mut view = Self {
            surface,
            provider,
            delegate: Delegate::default(),
            reconciler: Reconciler::new(config.visibility_margin, config.fade_in_duration()),
            resolver: GestureResolver::new(),
            recognizer: TapRecognizer::with_config(TapConfig::from_config(&config)),
            tiled_surface: TiledSurface::from_config(&config),
            config,
        };
        view.surface
            .set_maximum_zoom_scale(view.config.maximum_zoom_scale());
        view
    }

    /// Creates a view with a validated configuration
    pub fn with_config(surface: S, provider: P, config: TiledScrollConfig) -> Result<Self> {
        let mut view = Self::new(surface, provider);
        view.apply_config(config)?;
        Ok(view)
    }

    pub fn with_delegate(mut self, delegate: Delegate) -> Self {
        self.delegate = delegate;
        self
    }

    // Accessors

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access to the surface. Call [`did_scroll`](Self::did_scroll) or
    /// [`did_zoom`](Self::did_zoom) after changing its geometry.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn delegate_mut(&mut self) -> &mut Delegate {
        &mut self.delegate
    }

    pub fn set_delegate(&mut self, delegate: Delegate) {
        self.delegate = delegate;
    }

    pub fn config(&self) -> &TiledScrollConfig {
        &self.config
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn selection(&self) -> &Selection {
        self.resolver.selection()
    }

    pub fn tiled_surface(&self) -> &TiledSurface {
        &self.tiled_surface
    }

    pub fn tiled_surface_mut(&mut self) -> &mut TiledSurface {
        &mut self.tiled_surface
    }

    pub fn frame(&self) -> ViewportFrame {
        ViewportFrame::from_surface(&self.surface)
    }

    // Configuration

    /// Replaces the whole configuration, applying every dependent setting
    pub fn apply_config(&mut self, config: TiledScrollConfig) -> Result<()> {
        config.validate()?;
        self.surface
            .set_maximum_zoom_scale(config.maximum_zoom_scale());
        self.recognizer
            .set_require_double_tap_to_fail(config.tap_requires_double_tap_to_fail);
        self.tiled_surface = TiledSurface::from_config(&config)
            .with_contents_scale(self.tiled_surface.contents_scale());
        self.reconciler
            .set_fade_in_duration(config.fade_in_duration());
        let margin_changed = self.reconciler.margin() != config.visibility_margin;
        self.reconciler.set_margin(config.visibility_margin);
        self.config = config;

        if margin_changed {
            self.reconcile(None);
        }
        Ok(())
    }

    pub fn set_center_single_tap(&mut self, center: bool) {
        self.config.center_single_tap = center;
    }

    pub fn set_zooms_in_on_double_tap(&mut self, zooms: bool) {
        self.config.zooms_in_on_double_tap = zooms;
    }

    pub fn set_zooms_to_touch_location(&mut self, zooms: bool) {
        self.config.zooms_to_touch_location = zooms;
    }

    pub fn set_zooms_out_on_two_finger_tap(&mut self, zooms: bool) {
        self.config.zooms_out_on_two_finger_tap = zooms;
    }

    pub fn set_tap_requires_double_tap_to_fail(&mut self, require: bool) {
        self.config.tap_requires_double_tap_to_fail = require;
        self.recognizer.set_require_double_tap_to_fail(require);
    }

    /// Sets how many doublings past 1.0 the surface may zoom in
    pub fn set_levels_of_zoom(&mut self, levels: u32) -> Result<()> {
        let mut config = self.config.clone();
        config.levels_of_zoom = levels;
        config.validate()?;
        self.config = config;
        self.surface
            .set_maximum_zoom_scale(self.config.maximum_zoom_scale());
        Ok(())
    }

    /// Sets how many tile detail levels are drawn. A value of 1 is accepted with a warning.
    pub fn set_levels_of_detail(&mut self, levels: u32) -> Result<()> {
        let mut config = self.config.clone();
        config.levels_of_detail = levels;
        config.validate()?;
        self.config = config;
        self.tiled_surface.set_levels_of_detail(levels);
        Ok(())
    }

    pub fn set_visibility_margin(&mut self, margin: f64) -> Result<ReconcileReport> {
        if !margin.is_finite() || margin < 0.0 {
            return Err(Error::Config(format!("invalid visibility margin {}", margin)));
        }
        self.config.visibility_margin = margin;
        self.reconciler.set_margin(margin);
        Ok(self.reconcile(None))
    }

    // Host notifications

    /// The surface scrolled: reconcile, then tell the delegate
    pub fn did_scroll(&mut self) -> ReconcileReport {
        let report = self.reconcile(None);
        self.delegate.did_scroll();
        report
    }

    /// The surface zoomed: reconcile, then tell the delegate
    pub fn did_zoom(&mut self) -> ReconcileReport {
        let report = self.reconcile(None);
        self.delegate.did_zoom();
        report
    }

    /// Drives time-based behaviour: the end of a mute window and held single taps
    pub fn tick(&mut self, now: Instant) -> TickReport {
        let resumed = self.resume_if_due(now);

        let tap = self
            .recognizer
            .poll(now)
            .map(|tap| self.handle_tap(&tap, now));

        TickReport { resumed, tap }
    }

    /// Suspends full reconciliation for `duration` (see [`Reconciler::mute_for`])
    pub fn mute_annotation_updates(&mut self, duration: Duration, now: Instant) {
        self.reconciler.mute_for(duration, now);
    }

    /// Stays true past the deadline until a tick, tap or surface notification closes the window
    pub fn is_muted(&self) -> bool {
        self.reconciler.is_muted()
    }

    // Input

    /// Feeds a raw touch-up through tap recognition and handles every completed tap
    pub fn handle_touch(&mut self, event: TouchEvent) -> Vec<TapOutcome> {
        self.recognizer
            .process(event)
            .into_iter()
            .map(|tap| self.handle_tap(&tap, event.timestamp))
            .collect()
    }

    /// Handles an already recognized tap. Taps are ignored while muted; a mute window
    /// that ended before `now` is closed first.
    pub fn handle_tap(&mut self, tap: &TapGesture, now: Instant) -> TapOutcome {
        self.resume_if_due(now);
        if self.reconciler.is_muted() {
            log::trace!("{:?} tap ignored while muted", tap.kind);
            return TapOutcome::Ignored;
        }

        let ctx = GestureContext {
            surface: &mut self.surface,
            reconciler: &mut self.reconciler,
            delegate: &mut self.delegate,
            config: &self.config,
        };
        let outcome = match tap.kind {
            TapKind::Single => self.resolver.single_tap(tap, ctx),
            TapKind::Double => self.resolver.double_tap(tap, ctx, now),
            TapKind::TwoFinger => self.resolver.two_finger_tap(tap, ctx, now),
        };

        // Recentering and zooming move the surface
        if !matches!(outcome, TapOutcome::Selected(_)) {
            self.reconcile(None);
        }
        outcome
    }

    /// Identifier of the topmost annotation whose view contains a screen point
    pub fn annotation_at(&self, point: &Point) -> Option<&AnnotationId> {
        self.reconciler
            .hit_test(point)
            .and_then(|view| view.annotation())
    }

    pub fn select_annotation(&mut self, id: &AnnotationId) -> bool {
        self.resolver
            .select(id, &self.reconciler, &mut self.delegate)
    }

    pub fn deselect_annotation(&mut self) {
        self.resolver.deselect(&self.reconciler, &mut self.delegate);
    }

    // Annotations

    pub fn add_annotation(&mut self, annotation: Annotation) -> ReconcileReport {
        let frame = self.frame();
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler.add_annotation(annotation, &frame, &mut hooks)
    }

    pub fn add_annotations<I>(&mut self, annotations: I) -> ReconcileReport
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut total = ReconcileReport::default();
        for annotation in annotations {
            let report = self.add_annotation(annotation);
            total.appeared += report.appeared;
            total.disappeared += report.disappeared;
            total.moved += report.moved;
        }
        total
    }

    pub fn remove_annotation(&mut self, id: &AnnotationId) -> Option<Annotation> {
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler.remove_annotation(id, &mut hooks)
    }

    pub fn remove_annotations(&mut self, ids: &[AnnotationId]) -> Vec<Annotation> {
        ids.iter()
            .filter_map(|id| self.remove_annotation(id))
            .collect()
    }

    pub fn remove_all_annotations(&mut self) -> Vec<Annotation> {
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler.remove_all(&mut hooks)
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.reconciler.annotation(id)
    }

    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.reconciler.annotations()
    }

    pub fn visible_views(&self) -> impl Iterator<Item = &AnnotationView> {
        self.reconciler.visible_views()
    }

    pub fn visible_view_mut(&mut self, id: &AnnotationId) -> Option<&mut AnnotationView> {
        self.reconciler.visible_view_mut(id)
    }

    /// Forces a pass (all annotations, or `limited_to`) and marks the touched
    /// visible views for redraw
    pub fn refresh_annotations(&mut self, limited_to: Option<&[AnnotationId]>) -> ReconcileReport {
        let report = self.reconcile(limited_to);
        self.reconciler.mark_needs_display(limited_to);
        report
    }

    pub fn set_annotation_position(
        &mut self,
        id: &AnnotationId,
        position: Point,
    ) -> Result<ReconcileReport> {
        let frame = self.frame();
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler
            .set_annotation_position(id, position, &frame, &mut hooks)
    }

    /// Scrolls so the annotation's view becomes visible.
    ///
    /// The view is obtained (or reserved) first so the pass triggered by the scroll
    /// reuses it rather than asking the provider again.
    pub fn scroll_to_annotation(&mut self, id: &AnnotationId, animated: bool) -> Result<()> {
        let view = self.reconciler.reserve_view(id, &mut self.provider)?;
        let (size, center_offset) = (view.size(), view.center_offset());
        let content_center = self
            .reconciler
            .annotation(id)
            .map(Annotation::content_position)
            .ok_or_else(|| Error::UnknownAnnotation(id.to_string()))?;

        let zoomed_center = content_center
            .multiply(self.surface.zoom_scale())
            .add(&center_offset);
        let rect = Bounds::from_center_and_size(zoomed_center, size.x, size.y);
        log::debug!("scrolling to annotation '{}'", id);
        self.surface.scroll_rect_to_visible(rect, animated);

        if !animated {
            self.did_scroll();
        }
        Ok(())
    }

    /// Takes a recycled view for `reuse_identifier` out of the pool
    pub fn dequeue_reusable_view(&mut self, reuse_identifier: &str) -> Option<AnnotationView> {
        self.reconciler.pool_mut().dequeue(reuse_identifier)
    }

    pub fn register_view_factory<F>(&mut self, reuse_identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> AnnotationView + 'static,
    {
        self.reconciler
            .pool_mut()
            .register(reuse_identifier, factory);
    }

    // Surface requests

    pub fn set_zoom_scale(&mut self, zoom_scale: f64, animated: bool) -> Result<()> {
        if !zoom_scale.is_finite() || zoom_scale <= 0.0 {
            return Err(Error::InvalidZoomScale(zoom_scale));
        }
        self.surface.set_zoom_scale(zoom_scale, animated);
        if !animated {
            self.did_zoom();
        }
        Ok(())
    }

    /// Zooms in by `levels` doublings, clamped to the maximum zoom scale
    pub fn zoom_in(&mut self, levels: f64, animated: bool) -> Result<()> {
        let zoom_scale = zoom_scale_by_zooming_in(
            self.surface.zoom_scale(),
            levels,
            self.surface.maximum_zoom_scale(),
        );
        self.set_zoom_scale(zoom_scale, animated)
    }

    /// Zooms out by `levels` halvings, clamped to the minimum zoom scale
    pub fn zoom_out(&mut self, levels: f64, animated: bool) -> Result<()> {
        let zoom_scale = zoom_scale_by_zooming_out(
            self.surface.zoom_scale(),
            levels,
            self.surface.minimum_zoom_scale(),
        );
        self.set_zoom_scale(zoom_scale, animated)
    }

    /// Centers the viewport on a content-space point
    pub fn set_content_center(&mut self, center: Point, animated: bool) {
        self.surface.set_content_center(center, animated);
        if !animated {
            self.did_scroll();
        }
    }

    // Tiles

    /// Draws the tile for one rect handed out by the host's tiled layer
    pub fn draw_tile<T, C>(
        &self,
        rect: &Bounds,
        ctm_scale: f64,
        source: &mut T,
        canvas: &mut C,
    ) -> bool
    where
        T: TileImageSource,
        C: TileCanvas<T::Image>,
    {
        self.tiled_surface
            .draw_rect(rect, ctm_scale, source, canvas)
    }

    /// Draws every tile covering the visible part of the content
    pub fn draw_visible_tiles<T, C>(&self, source: &mut T, canvas: &mut C) -> DrawReport
    where
        T: TileImageSource,
        C: TileCanvas<T::Image>,
    {
        let frame = self.frame();
        let visible = frame.transform.rect_to_content(&frame.bounds());
        self.tiled_surface
            .draw_visible(&visible, frame.transform.zoom_scale, source, canvas)
    }

    /// Ends an expired mute window with a full pass
    fn resume_if_due(&mut self, now: Instant) -> Option<ReconcileReport> {
        let frame = self.frame();
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler.resume_if_due(now, &frame, &mut hooks)
    }

    /// The full pass that closes an expired mute window covers `limited_to` as well
    fn reconcile(&mut self, limited_to: Option<&[AnnotationId]>) -> ReconcileReport {
        if let Some(report) = self.resume_if_due(Instant::now()) {
            return report;
        }
        let frame = self.frame();
        let mut hooks = Hooks {
            provider: &mut self.provider,
            delegate: &mut self.delegate,
            selection: self.resolver.selection_mut(),
        };
        self.reconciler.reconcile(&frame, limited_to, &mut hooks)
    }
}

impl<S, P> std::fmt::Debug for TiledScrollView<S, P>
where
    S: ScrollableSurface,
    P: AnnotationViewProvider,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiledScrollView")
            .field("frame", &self.frame())
            .field("config", &self.config)
            .field("reconciler", &self.reconciler)
            .field("selection", self.resolver.selection())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::ReuseIdentifierProvider;
    use crate::core::viewport::ScrollState;

    fn view() -> TiledScrollView<ScrollState, ReuseIdentifierProvider> {
        let surface = ScrollState::new(Point::new(500.0, 500.0), Point::new(4000.0, 4000.0))
            .with_zoom_limits(0.125, 1.0);
        let mut view = TiledScrollView::new(surface, ReuseIdentifierProvider::new("pin"));
        view.register_view_factory("pin", || AnnotationView::new("pin", Point::new(20.0, 20.0)));
        view
    }

    #[test]
    fn test_levels_of_zoom_sets_maximum_zoom() {
        let mut view = view();
        assert_eq!(view.surface().maximum_zoom_scale(), 4.0);
        view.set_levels_of_zoom(3).unwrap();
        assert_eq!(view.surface().maximum_zoom_scale(), 8.0);
        assert!(view.set_levels_of_zoom(64).is_err());
    }

    #[test]
    fn test_levels_of_detail_are_bounded() {
        let mut view = view();
        view.set_levels_of_detail(4).unwrap();
        assert_eq!(view.tiled_surface().levels_of_detail(), 4);

        assert!(matches!(view.set_levels_of_detail(31), Err(Error::Config(_))));
        assert_eq!(view.config().levels_of_detail, 4);
        assert_eq!(view.tiled_surface().levels_of_detail(), 4);
    }

    #[test]
    fn test_invalid_zoom_scale_is_rejected() {
        let mut view = view();
        assert!(matches!(
            view.set_zoom_scale(0.0, false),
            Err(Error::InvalidZoomScale(_))
        ));
        assert!(view.set_zoom_scale(f64::NAN, false).is_err());
        assert!(view.set_zoom_scale(2.0, false).is_ok());
        assert_eq!(view.surface().zoom_scale(), 2.0);
    }

    #[test]
    fn test_zoom_in_and_out_step_by_powers_of_two() {
        let mut view = view();
        view.zoom_in(1.0, false).unwrap();
        assert_eq!(view.surface().zoom_scale(), 2.0);
        view.zoom_in(5.0, false).unwrap();
        assert_eq!(view.surface().zoom_scale(), 4.0);
        view.zoom_out(2.0, false).unwrap();
        assert_eq!(view.surface().zoom_scale(), 1.0);
    }

    #[test]
    fn test_margin_change_reconciles() {
        let mut view = view();
        view.add_annotation(Annotation::new("edge", Point::new(540.0, 100.0)));
        assert_eq!(view.reconciler().visible_count(), 0);

        let report = view.set_visibility_margin(50.0).unwrap();
        assert_eq!(report.appeared, 1);
        assert!(view.set_visibility_margin(-1.0).is_err());
    }

    #[test]
    fn test_scroll_to_annotation_reuses_reserved_view() {
        let mut view = view();
        let id = AnnotationId::new("far");
        view.add_annotation(Annotation::new("far", Point::new(2000.0, 2000.0)));
        assert!(!view.reconciler().is_visible(&id));

        view.scroll_to_annotation(&id, false).unwrap();
        assert!(view.reconciler().is_visible(&id));
        assert!(view.reconciler().reserved_view(&id).is_none());

        let position = view.reconciler().visible_view(&id).unwrap().position();
        assert!(view.frame().is_within(&position, 0.0));
        assert!(matches!(
            view.scroll_to_annotation(&AnnotationId::new("nope"), false),
            Err(Error::UnknownAnnotation(_))
        ));
    }

    #[test]
    fn test_refresh_marks_views_dirty() {
        let mut view = view();
        let id = AnnotationId::new("a");
        view.add_annotation(Annotation::new("a", Point::new(10.0, 10.0)));
        view.visible_view_mut(&id).unwrap().clear_needs_display();

        let ids = [id.clone()];
        view.refresh_annotations(Some(&ids[..]));
        assert!(view.reconciler().visible_view(&id).unwrap().needs_display());
    }
}
