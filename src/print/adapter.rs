//! Adjusts the map for printing and puts it back afterwards.
//!
//! On print start the current view is captured and the camera moves to the
//! hall's print zoom, centered on the hall overlay; a layout re-validation is
//! scheduled shortly after. On print finish the captured view is restored.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, error, warn};

use crate::models::MapPoint;
use crate::print::control::{PrintControl, PrintControlFactory, PrintLifecycle, PrintScene};
use crate::print::zoom::print_zoom;
use crate::view::MapViewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MountState {
    Fresh,
    Mounted,
    Unmounted,
}

/// Owns the print control for the lifetime of the map.
pub struct PrintAdapter {
    control: Option<Box<dyn PrintControl>>,
    state: MountState,
    captured: Option<(MapPoint, f64)>,
    revalidate_at: Option<Instant>,
    revalidate_delay: Duration,
}

impl PrintAdapter {
    #[must_use]
    pub const fn new(revalidate_delay: Duration) -> Self {
        Self {
            control: None,
            state: MountState::Fresh,
            captured: None,
            revalidate_at: None,
            revalidate_delay,
        }
    }

    /// Creates and attaches the print control.
    ///
    /// Failures are logged and leave printing unavailable. An adapter that
    /// was unmounted never attaches again.
    pub fn mount(&mut self, factory: &dyn PrintControlFactory) -> bool {
        if self.state == MountState::Unmounted {
            debug!("Print adapter already torn down, not attaching");
            return false;
        }
        self.state = MountState::Mounted;

        let mut control = match factory.create() {
            Ok(control) => control,
            Err(e) => {
                warn!("Printing unavailable: {e:#}");
                return false;
            }
        };

        if let Err(e) = control.attach() {
            warn!("Printing unavailable, failed to attach print control: {e:#}");
            return false;
        }
        self.control = Some(control);
        true
    }

    /// Detaches and drops the print control. Errors are logged.
    pub fn unmount(&mut self) {
        self.state = MountState::Unmounted;
        self.revalidate_at = None;
        if let Some(mut control) = self.control.take() {
            if let Err(e) = control.detach() {
                error!("Failed to remove print control: {e:#}");
            }
        }
    }

    /// Whether a control is attached.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.control.is_some()
    }

    /// Runs a print job through the attached control.
    pub fn print(&mut self, scene: &mut PrintScene<'_>) -> Result<PathBuf> {
        let Some(mut control) = self.control.take() else {
            anyhow::bail!("Printing is unavailable");
        };
        let result = control.print(scene, self);
        self.control = Some(control);
        result
    }

    /// Whether a re-validation is still pending.
    #[must_use]
    pub const fn revalidation_pending(&self) -> bool {
        self.revalidate_at.is_some()
    }

    /// Runs a due layout re-validation. Returns true if one ran.
    pub fn tick(&mut self, viewport: &mut MapViewport, now: Instant) -> bool {
        match self.revalidate_at {
            Some(at) if now >= at => {
                self.revalidate_at = None;
                viewport.invalidate_size();
                true
            }
            _ => false,
        }
    }
}

impl PrintLifecycle for PrintAdapter {
    fn print_start(&mut self, scene: &mut PrintScene<'_>) {
        let viewport = &mut *scene.viewport;
        self.captured = Some((viewport.center(), viewport.zoom()));
        let zoom = print_zoom(scene.hall);

        if let Some(overlay) = scene.map.overlay {
            viewport.set_view(overlay.bounds.center(), zoom);
            self.revalidate_at = Some(Instant::now() + self.revalidate_delay);
        } else {
            viewport.set_zoom(zoom);
        }
        debug!("Print started for hall {} at zoom {zoom}", scene.hall);
    }

    fn print_finish(&mut self, scene: &mut PrintScene<'_>) {
        if let Some((center, zoom)) = self.captured.take() {
            scene.viewport.set_view(center, zoom);
            debug!("Print finished, view restored");
        }
    }
}

impl std::fmt::Debug for PrintAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrintAdapter")
            .field("available", &self.control.is_some())
            .field("state", &self.state)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}
