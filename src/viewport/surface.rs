//! Named containers that each hold the drawing surfaces mounted in them.

/// Preferred container for the viewport.
pub const CONTAINER_ID: &str = "3d-canvas";
/// Used when [`CONTAINER_ID`] is not present.
pub const FALLBACK_CONTAINER_ID: &str = "app";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub id: u64,
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    pub width: f32,
    pub height: f32,
    surfaces: Vec<Surface>,
}

impl Container {
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
}

#[derive(Debug, Default)]
pub struct SurfaceHost {
    containers: Vec<Container>,
    next_id: u64,
}

impl SurfaceHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container, or update its size if it already exists.
    pub fn set_container(&mut self, id: &str, width: f32, height: f32) {
        match self.containers.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.width = width;
                c.height = height;
            }
            None => self.containers.push(Container {
                id: id.to_string(),
                width,
                height,
                surfaces: Vec::new(),
            }),
        }
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    /// `primary` if present, else `fallback`.
    pub fn resolve(&self, primary: &str, fallback: &str) -> Option<&Container> {
        self.container(primary).or_else(|| self.container(fallback))
    }

    /// Drop whatever is mounted in the resolved container and mount a fresh
    /// surface sized to it.
    pub fn remount(&mut self, primary: &str, fallback: &str) -> Option<Surface> {
        let idx = self
            .containers
            .iter()
            .position(|c| c.id == primary)
            .or_else(|| self.containers.iter().position(|c| c.id == fallback))?;

        self.next_id += 1;
        let container = &mut self.containers[idx];
        if !container.surfaces.is_empty() {
            log::debug!(
                "Removing {} surface(s) from #{}",
                container.surfaces.len(),
                container.id
            );
        }
        container.surfaces.clear();
        let surface = Surface {
            id: self.next_id,
            width: container.width,
            height: container.height,
        };
        container.surfaces.push(surface);
        Some(surface)
    }

    /// Remove surface `id` from whichever container holds it.
    pub fn unmount(&mut self, id: u64) -> bool {
        for c in &mut self.containers {
            if let Some(pos) = c.surfaces.iter().position(|s| s.id == id) {
                c.surfaces.remove(pos);
                return true;
            }
        }
        false
    }

    /// Keep a mounted surface's recorded size in step with a resize.
    pub fn resize_surface(&mut self, id: u64, width: f32, height: f32) {
        for c in &mut self.containers {
            if let Some(s) = c.surfaces.iter_mut().find(|s| s.id == id) {
                s.width = width;
                s.height = height;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_app_container() {
        let mut host = SurfaceHost::new();
        host.set_container(FALLBACK_CONTAINER_ID, 640.0, 480.0);
        assert_eq!(
            host.resolve(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap().id,
            FALLBACK_CONTAINER_ID
        );
        let s = host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap();
        assert_eq!((s.width, s.height), (640.0, 480.0));
        assert_eq!(host.container("app").unwrap().surfaces().len(), 1);
    }

    #[test]
    fn prefers_primary_container() {
        let mut host = SurfaceHost::new();
        host.set_container(FALLBACK_CONTAINER_ID, 1.0, 1.0);
        host.set_container(CONTAINER_ID, 800.0, 600.0);
        host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap();
        assert_eq!(host.container(CONTAINER_ID).unwrap().surfaces().len(), 1);
        assert!(host.container(FALLBACK_CONTAINER_ID).unwrap().surfaces().is_empty());
    }

    #[test]
    fn remount_replaces_previous_surface() {
        let mut host = SurfaceHost::new();
        host.set_container(CONTAINER_ID, 800.0, 600.0);
        let first = host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap();
        let second = host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap();
        let mounted = host.container(CONTAINER_ID).unwrap().surfaces();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn no_container_no_surface() {
        let mut host = SurfaceHost::new();
        assert!(host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).is_none());
    }

    #[test]
    fn unmount_removes_by_id() {
        let mut host = SurfaceHost::new();
        host.set_container(CONTAINER_ID, 10.0, 10.0);
        let s = host.remount(CONTAINER_ID, FALLBACK_CONTAINER_ID).unwrap();
        assert!(host.unmount(s.id));
        assert!(!host.unmount(s.id));
        assert!(host.container(CONTAINER_ID).unwrap().surfaces().is_empty());
    }
}
