impl<IN> ZineViewer<IN>
where
    IN: InputProvider,
{
    pub fn new(leaves: LeafSequence, input: IN, config: ViewerConfig) -> Self {
        let config = config.normalized();
        let leaf_count = leaves.len();

        let mut viewer = Self {
            leaves,
            input,
            config,
            position: 0,
            direction: Direction::Forward,
            draw_orders: Vec::with_capacity(leaf_count),
            autoplay: AutoplayScheduler::new(config.autoplay_interval_ms),
            affordances: Affordances::for_position(0, leaf_count),
            pending_redraw: true,
            torn_down: false,
        };
        viewer.restack();
        viewer
    }

    /// Initial stacking and control refresh, then autoplay if configured.
    pub fn mount(&mut self, now_ms: u64) {
        self.restack();
        self.refresh_affordances();
        self.pending_redraw = true;
        info!(
            "zine: mounted leaves={} autoplay={} interval_ms={}",
            self.leaves.len(),
            self.config.autoplay,
            self.config.autoplay_interval_ms
        );

        if self.config.autoplay {
            self.enable_autoplay(self.config.autoplay_interval_ms, now_ms);
        }
    }

    pub fn with_view<F>(&self, f: F)
    where
        F: FnOnce(ViewerView<'_>),
    {
        f(ViewerView {
            leaves: &self.leaves,
            draw_orders: &self.draw_orders,
            position: self.position,
            direction: self.direction,
            affordances: self.affordances,
            transition_ms: self.config.transition_ms,
        });
    }

    pub fn leaves(&self) -> &LeafSequence {
        &self.leaves
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of turned leaves.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_flipped(&self, ordinal: usize) -> bool {
        ordinal < self.position
    }

    pub fn draw_order(&self, ordinal: usize) -> Option<usize> {
        self.draw_orders.get(ordinal).copied()
    }

    pub fn draw_orders(&self) -> &[usize] {
        &self.draw_orders
    }

    pub fn affordances(&self) -> Affordances {
        self.affordances
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
