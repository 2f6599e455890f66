impl<IN> ZineViewer<IN>
where
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => {
                    let _ = self.handle_event(event, now_ms);
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("zine-input: provider failed, skipping remaining events this tick");
                    break;
                }
            }
        }
    }

    /// Routes one input event immediately.
    pub fn handle_event(&mut self, event: InputEvent, now_ms: u64) -> EventDisposition {
        if self.torn_down {
            debug!("zine-input: {:?} ignored after teardown", event);
            return EventDisposition::Ignored;
        }

        match event {
            InputEvent::NextPressed => {
                self.advance(now_ms);
                EventDisposition::Handled
            }
            InputEvent::PreviousPressed => {
                self.retreat(now_ms);
                EventDisposition::Handled
            }
            InputEvent::Key {
                key,
                viewer_focused,
            } => {
                let disposition = self.key_disposition(viewer_focused);
                if disposition == EventDisposition::Ignored {
                    debug!(
                        "zine-input: key {:?} ignored focused={} keyboard={} focus_only={}",
                        key,
                        viewer_focused,
                        self.config.keyboard_navigation,
                        self.config.keyboard_navigation_focus_only
                    );
                    return disposition;
                }

                match key {
                    NavKey::ArrowRight => self.advance(now_ms),
                    NavKey::ArrowLeft => self.retreat(now_ms),
                };
                disposition
            }
            InputEvent::HoverEnter => {
                self.hover_enter();
                EventDisposition::Handled
            }
            InputEvent::HoverLeave => {
                self.hover_leave(now_ms);
                EventDisposition::Handled
            }
        }
    }

    /// Whether an arrow key would be honoured right now. Hosts ask before
    /// suppressing the browser's default key handling.
    pub fn key_disposition(&self, viewer_focused: bool) -> EventDisposition {
        let honoured = !self.torn_down
            && self.config.keyboard_navigation
            && (viewer_focused || !self.config.keyboard_navigation_focus_only);
        if honoured {
            EventDisposition::Handled
        } else {
            EventDisposition::Ignored
        }
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }
}
