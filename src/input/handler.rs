//! Resolves recognized taps against annotation views and the surface.

use crate::{
    annotations::{AnnotationId, Delegate, Reconciler, ViewId},
    core::{
        bounds::Bounds,
        config::TiledScrollConfig,
        transform::{zoom_scale_by_zooming_in, zoom_scale_by_zooming_out},
        viewport::ScrollableSurface,
    },
    input::events::{TapGesture, TapOutcome},
};
use instant::Instant;

/// The one selected annotation view, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<(ViewId, AnnotationId)>,
}

impl Selection {
    pub fn selected_view(&self) -> Option<ViewId> {
        self.current.as_ref().map(|(view, _)| *view)
    }

    pub fn selected_annotation(&self) -> Option<&AnnotationId> {
        self.current.as_ref().map(|(_, annotation)| annotation)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub(crate) fn select(&mut self, view: ViewId, annotation: AnnotationId) {
        self.current = Some((view, annotation));
    }

    pub(crate) fn take(&mut self) -> Option<(ViewId, AnnotationId)> {
        self.current.take()
    }
}

/// Everything a tap may read or act on
pub struct GestureContext<'a> {
    pub surface: &'a mut dyn ScrollableSurface,
    pub reconciler: &'a mut Reconciler,
    pub delegate: &'a mut Delegate,
    pub config: &'a TiledScrollConfig,
}

/// Gesture resolver: owns the selection and turns taps into selection changes,
/// surface requests and delegate notifications.
#[derive(Debug, Default)]
pub struct GestureResolver {
    selection: Selection,
}

impl GestureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Single tap: select the topmost hit view, or fall through to the background.
    ///
    /// Exactly one of selection or background handling happens per tap. A hit view
    /// refused by `should_select` counts as a background tap.
    pub fn single_tap(&mut self, tap: &TapGesture, ctx: GestureContext<'_>) -> TapOutcome {
        let hit = ctx
            .reconciler
            .hit_test(&tap.location)
            .map(|view| view.id());

        if let Some(view_id) = hit {
            self.deselect(ctx.reconciler, ctx.delegate);
            if let Some(view) = ctx.reconciler.view(view_id) {
                if ctx.delegate.should_select(view) {
                    if let Some(annotation) = view.annotation().cloned() {
                        self.selection.select(view_id, annotation.clone());
                        ctx.delegate.did_select(view);
                        log::debug!("selected annotation '{}'", annotation);
                        return TapOutcome::Selected(annotation);
                    }
                }
                log::trace!("selection of view {:?} refused", view_id);
            }
        }

        self.deselect(ctx.reconciler, ctx.delegate);
        if ctx.config.center_single_tap {
            let center = ctx.surface.transform().to_content(&tap.location);
            ctx.surface.set_content_center(center, true);
        }
        ctx.delegate.did_receive_single_tap(tap);
        TapOutcome::Background
    }

    /// Double tap: zoom in one level, muting annotation updates while the surface
    /// animates. The delegate hears about the tap either way.
    pub fn double_tap(
        &mut self,
        tap: &TapGesture,
        ctx: GestureContext<'_>,
        now: Instant,
    ) -> TapOutcome {
        let mut outcome = TapOutcome::Background;

        if ctx.config.zooms_in_on_double_tap {
            let zoom_scale = zoom_scale_by_zooming_in(
                ctx.surface.zoom_scale(),
                1.0,
                ctx.surface.maximum_zoom_scale(),
            );
            ctx.reconciler.mute_for(ctx.config.mute_duration(), now);

            if ctx.config.zooms_to_touch_location {
                let size = ctx.surface.bounds_size();
                let center = ctx.surface.transform().to_content(&tap.location);
                let rect = Bounds::from_center_and_size(
                    center,
                    size.x / zoom_scale,
                    size.y / zoom_scale,
                );
                ctx.surface.zoom_to_rect(rect, true);
            } else {
                ctx.surface.set_zoom_scale(zoom_scale, true);
            }
            log::debug!("double tap zooms in to {}", zoom_scale);
            outcome = TapOutcome::Zoomed;
        }

        ctx.delegate.did_receive_double_tap(tap);
        outcome
    }

    /// Two-finger tap: zoom out one level, muted like [`double_tap`](Self::double_tap)
    pub fn two_finger_tap(
        &mut self,
        tap: &TapGesture,
        ctx: GestureContext<'_>,
        now: Instant,
    ) -> TapOutcome {
        let mut outcome = TapOutcome::Background;

        if ctx.config.zooms_out_on_two_finger_tap {
            let zoom_scale = zoom_scale_by_zooming_out(
                ctx.surface.zoom_scale(),
                1.0,
                ctx.surface.minimum_zoom_scale(),
            );
            ctx.reconciler.mute_for(ctx.config.mute_duration(), now);
            ctx.surface.set_zoom_scale(zoom_scale, true);
            log::debug!("two-finger tap zooms out to {}", zoom_scale);
            outcome = TapOutcome::Zoomed;
        }

        ctx.delegate.did_receive_two_finger_tap(tap);
        outcome
    }

    /// Selects the visible view of `annotation`, replacing any prior selection.
    ///
    /// Returns false when the annotation has no visible view or the delegate refuses.
    pub fn select(
        &mut self,
        annotation: &AnnotationId,
        reconciler: &Reconciler,
        delegate: &mut Delegate,
    ) -> bool {
        let Some(view) = reconciler.visible_view(annotation) else {
            return false;
        };
        self.deselect(reconciler, delegate);
        if !delegate.should_select(view) {
            return false;
        }
        self.selection.select(view.id(), annotation.clone());
        delegate.did_select(view);
        log::debug!("selected annotation '{}'", annotation);
        true
    }

    /// Clears the selection, notifying the delegate if there was one
    pub fn deselect(&mut self, reconciler: &Reconciler, delegate: &mut Delegate) {
        if let Some((view_id, annotation)) = self.selection.take() {
            if let Some(view) = reconciler.view(view_id) {
                delegate.did_deselect(view);
            }
            log::debug!("deselected annotation '{}'", annotation);
        }
    }
}
