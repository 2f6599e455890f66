impl<IN> ZineViewer<IN>
where
    IN: InputProvider,
{
    /// Drains pending input, fires autoplay if due and reports whether the
    /// host should render.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);
        if self.torn_down {
            return TickResult::NoRender;
        }
        self.tick_autoplay(now_ms);

        if self.pending_redraw {
            self.pending_redraw = false;
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Earliest time at which `tick` has timed work to do.
    pub fn next_wakeup_ms(&self) -> Option<u64> {
        self.autoplay.next_fire_ms
    }

    /// Delay a host timer should sleep before the next `tick`, or `None` when
    /// nothing is scheduled and the timer should be cleared.
    pub fn next_wakeup_delay_ms(&self, now_ms: u64) -> Option<u64> {
        self.next_wakeup_ms()
            .map(|deadline| deadline.saturating_sub(now_ms))
    }

    /// Stops autoplay for good. Input, autoplay calls and hover are ignored
    /// afterwards, so nothing schedules another wakeup.
    pub fn teardown(&mut self) {
        self.autoplay.disable();
        self.autoplay.hovered = false;
        self.torn_down = true;
        self.pending_redraw = false;
        info!("zine: torn down at position={}/{}", self.position, self.leaves.len());
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}
