/// Recurring autoplay timer, modelled as a single deadline polled by `tick`.
///
/// At most one deadline exists at a time and every restart cancels first, so
/// there is never more than one pending fire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct AutoplayScheduler {
    enabled: bool,
    interval_ms: u32,
    hovered: bool,
    next_fire_ms: Option<u64>,
}

impl AutoplayScheduler {
    const fn new(interval_ms: u32) -> Self {
        Self {
            enabled: false,
            interval_ms,
            hovered: false,
            next_fire_ms: None,
        }
    }

    fn interval(&self) -> u64 {
        self.interval_ms.max(1) as u64
    }

    fn cancel(&mut self) {
        self.next_fire_ms = None;
    }

    /// Cancels, then arms a full interval from `now_ms` when autoplay is on,
    /// nobody hovers and there is a leaf left to turn.
    fn restart(&mut self, can_advance: bool, now_ms: u64) {
        self.cancel();
        if self.enabled && !self.hovered && can_advance {
            self.next_fire_ms = Some(now_ms + self.interval());
        }
    }

    fn enable(&mut self, interval_ms: u32, can_advance: bool, now_ms: u64) {
        self.enabled = true;
        self.interval_ms = interval_ms.max(1);
        self.restart(can_advance, now_ms);
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.cancel();
    }

    fn set_interval(&mut self, interval_ms: u32, can_advance: bool, now_ms: u64) {
        self.interval_ms = interval_ms.max(1);
        if self.enabled {
            self.restart(can_advance, now_ms);
        }
    }

    fn hover_enter(&mut self) {
        self.hovered = true;
        self.cancel();
    }

    fn hover_leave(&mut self, can_advance: bool, now_ms: u64) {
        self.hovered = false;
        if self.enabled {
            self.restart(can_advance, now_ms);
        }
    }

    fn is_due(&self, now_ms: u64) -> bool {
        self.next_fire_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Re-arms after a fire. Keeps the cadence unless the host fell
    /// more than a whole interval behind, in which case it counts from now.
    fn rearm_after_fire(&mut self, can_advance: bool, now_ms: u64) {
        let Some(deadline) = self.next_fire_ms else {
            return;
        };
        if !can_advance {
            self.cancel();
            return;
        }

        let mut next = deadline + self.interval();
        if next <= now_ms {
            next = now_ms + self.interval();
        }
        self.next_fire_ms = Some(next);
    }
}

impl<IN> ZineViewer<IN>
where
    IN: InputProvider,
{
    pub fn enable_autoplay(&mut self, interval_ms: u32, now_ms: u64) {
        if self.torn_down {
            warn!("zine-autoplay: enable ignored after teardown");
            return;
        }
        self.autoplay.enable(interval_ms, self.can_advance(), now_ms);
        debug!(
            "zine-autoplay: enabled interval_ms={} running={}",
            self.autoplay.interval_ms,
            self.autoplay_running()
        );
    }

    pub fn disable_autoplay(&mut self) {
        self.autoplay.disable();
        debug!("zine-autoplay: disabled");
    }

    /// Changes the interval; a running autoplay restarts on the new one.
    pub fn set_autoplay_interval(&mut self, interval_ms: u32, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.autoplay
            .set_interval(interval_ms, self.can_advance(), now_ms);
    }

    pub fn hover_enter(&mut self) {
        self.autoplay.hover_enter();
    }

    pub fn hover_leave(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }
        self.autoplay.hover_leave(self.can_advance(), now_ms);
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay.enabled
    }

    /// Whether an autoplay fire is currently scheduled.
    pub fn autoplay_running(&self) -> bool {
        self.autoplay.next_fire_ms.is_some()
    }

    pub fn autoplay_interval_ms(&self) -> u32 {
        self.autoplay.interval_ms
    }

    fn tick_autoplay(&mut self, now_ms: u64) {
        if !self.autoplay.is_due(now_ms) {
            return;
        }

        self.step(Direction::Forward, MoveOrigin::Autoplay);
        self.autoplay.rearm_after_fire(self.can_advance(), now_ms);
        if !self.autoplay_running() {
            debug!(
                "zine-autoplay: reached back cover position={}",
                self.position
            );
        }
    }
}
