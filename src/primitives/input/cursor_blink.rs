use std::time::Duration;

use gpui::Context;

const BLINK_INTERVAL: Duration = Duration::from_millis(530);

/// Blink timer for the text cursor.
///
/// Every restart bumps `epoch`, so timers scheduled before it fall through
/// without toggling anything.
pub struct CursorBlink {
    visible: bool,
    epoch: usize,
}

impl Default for CursorBlink {
    fn default() -> Self {
        Self {
            visible: true,
            epoch: 0,
        }
    }
}

impl CursorBlink {
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows the cursor and restarts the timer. Called on focus and after every edit.
    pub fn restart(&mut self, cx: &mut Context<Self>) {
        self.visible = true;
        self.epoch = self.epoch.wrapping_add(1);
        self.schedule(self.epoch, cx);
    }

    pub fn stop(&mut self, cx: &mut Context<Self>) {
        self.epoch = self.epoch.wrapping_add(1);
        self.visible = true;
        cx.notify();
    }

    fn schedule(&mut self, epoch: usize, cx: &mut Context<Self>) {
        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(BLINK_INTERVAL).await;
            if let Some(this) = this.upgrade() {
                let _ = this.update(cx, |blink, cx| blink.toggle(epoch, cx));
            }
        })
        .detach();
    }

    fn toggle(&mut self, epoch: usize, cx: &mut Context<Self>) {
        if epoch != self.epoch {
            return;
        }
        self.visible = !self.visible;
        cx.notify();
        self.schedule(epoch, cx);
    }
}
