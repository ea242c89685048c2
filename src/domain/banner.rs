use std::time::Duration;
use tokio::time::Instant;

/// How long success messages (and the completed-task warning) stay visible
pub const BANNER_TTL: Duration = Duration::from_millis(3000);

/// A single message slot in a view. Setting a new message replaces whatever was shown before.
#[derive(Debug, Default)]
pub struct Banner {
    current: Option<BannerMessage>,
}

#[derive(Debug)]
struct BannerMessage {
    text: String,
    hide_at: Option<Instant>,
}

impl Banner {
    /// Shows a message until it is replaced or cleared
    pub fn show(&mut self, text: impl Into<String>) {
        self.current = Some(BannerMessage {
            text: text.into(),
            hide_at: None,
        });
    }

    /// Shows a message which hides itself after [BANNER_TTL]
    pub fn flash(&mut self, text: impl Into<String>) {
        self.current = Some(BannerMessage {
            text: text.into(),
            hide_at: Some(Instant::now() + BANNER_TTL),
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The message currently on screen, if any
    pub fn visible(&self) -> Option<&str> {
        let message = self.current.as_ref()?;
        match message.hide_at {
            Some(hide_at) if Instant::now() >= hide_at => None,
            _ => Some(message.text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speculoos::prelude::*;

    #[tokio::test(start_paused = true)]
    async fn flashed_message_hides_after_ttl() {
        let mut banner = Banner::default();
        banner.flash("Task created successfully");

        assert_eq!(Some("Task created successfully"), banner.visible());
        tokio::time::advance(Duration::from_millis(2999)).await;
        assert_that!(banner.visible()).is_some();
        tokio::time::advance(Duration::from_millis(1)).await;
        assert_that!(banner.visible()).is_none();
    }

    #[tokio::test(start_paused = true)]
    async fn shown_message_persists() {
        let mut banner = Banner::default();
        banner.show("Something went wrong");

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(Some("Something went wrong"), banner.visible());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_replaces_older_one() {
        let mut banner = Banner::default();
        banner.flash("first");
        tokio::time::advance(Duration::from_millis(2000)).await;
        banner.flash("second");
        tokio::time::advance(Duration::from_millis(2000)).await;

        assert_eq!(Some("second"), banner.visible());
    }
}
