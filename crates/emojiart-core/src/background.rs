//! Background image load tracking.
//!
//! The document only stores a reference to the background. Fetching pixels is
//! done by the host; this module hands out load requests and accepts results
//! only for the reference that is still current.

use kurbo::Size;
use url::Url;

/// Events the host must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundEvent {
    /// Fetch the image at this URL and report back with
    /// [`BackgroundState::complete_load`].
    Load(Url),
    /// The background was removed; drop any displayed image.
    Cleared,
}

/// Current background reference and what is known about its image.
#[derive(Debug, Clone, Default)]
pub struct BackgroundState {
    url: Option<Url>,
    /// Pixel size of the loaded image, once it has arrived.
    image_size: Option<Size>,
    events: Vec<BackgroundEvent>,
}

impl BackgroundState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Size of the loaded image for the current reference, if any.
    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    pub fn is_loaded(&self) -> bool {
        self.image_size.is_some()
    }

    /// Switch to a new reference. Any load in flight for the old one becomes stale.
    pub fn set_url(&mut self, url: Option<Url>) {
        if self.url == url {
            return;
        }
        self.image_size = None;
        match &url {
            Some(url) => {
                log::info!("Background set to {}", url);
                self.events.push(BackgroundEvent::Load(url.clone()));
            }
            None => {
                log::info!("Background cleared");
                self.events.push(BackgroundEvent::Cleared);
            }
        }
        self.url = url;
    }

    /// Drain pending events for the host.
    pub fn poll_events(&mut self) -> Vec<BackgroundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Report a finished load. Returns `false` if `url` is no longer the
    /// current reference, in which case the result is discarded.
    pub fn complete_load(&mut self, url: &Url, image_size: Size) -> bool {
        if self.url.as_ref() != Some(url) {
            log::warn!("Discarding stale background load for {}", url);
            return false;
        }
        log::debug!("Background loaded: {} ({}x{})", url, image_size.width, image_size.height);
        self.image_size = Some(image_size);
        true
    }
}
