//! Keeping the render surface the size of its container.

use crate::scene::Scene;
use kurbo::Size;

/// Content-box size of the container, as reported by the host's observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBox {
    pub width: f64,
    pub height: f64,
}

impl ContentBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }
}

/// Host-side handle observing the container's size (e.g. a `ResizeObserver`).
pub trait ContainerObserver {
    /// Stop delivering size changes.
    fn disconnect(&mut self);
}

/// Forwards container size changes to the scene's render surface.
#[derive(Default)]
pub struct ResizeBridge {
    observer: Option<Box<dyn ContainerObserver>>,
}

impl std::fmt::Debug for ResizeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeBridge")
            .field("observing", &self.is_observing())
            .finish()
    }
}

impl ResizeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the host's observer, disconnecting any previous one.
    pub fn observe(&mut self, observer: Box<dyn ContainerObserver>) {
        self.teardown();
        self.observer = Some(observer);
    }

    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    /// Resize the render surface to the container's content box.
    ///
    /// Returns false (and leaves the scene alone) for sizes that are
    /// negative or not finite.
    pub fn on_resize(&self, scene: &mut Scene, content: ContentBox) -> bool {
        if !content.is_valid() {
            log::debug!("Ignoring container size {}x{}", content.width, content.height);
            return false;
        }
        scene
            .viewport
            .set_surface_size(Size::new(content.width, content.height));
        scene.request_render();
        true
    }

    /// Disconnect the observer. Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}

impl Drop for ResizeBridge {
    fn drop(&mut self) {
        self.teardown();
    }
}
