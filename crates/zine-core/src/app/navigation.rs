impl<IN> ZineViewer<IN>
where
    IN: InputProvider,
{
    pub fn can_advance(&self) -> bool {
        self.position < self.leaves.len()
    }

    pub fn can_retreat(&self) -> bool {
        self.position > 0
    }

    /// Turns the next leaf. A no-op at the back cover; either way a running
    /// autoplay starts a fresh interval.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let moved = self.step(Direction::Forward, MoveOrigin::Manual);
        self.autoplay.restart(self.can_advance(), now_ms);
        moved
    }

    /// Unturns the last turned leaf. A no-op at the front cover; either way a
    /// running autoplay starts a fresh interval.
    pub fn retreat(&mut self, now_ms: u64) -> bool {
        let moved = self.step(Direction::Backward, MoveOrigin::Manual);
        self.autoplay.restart(self.can_advance(), now_ms);
        moved
    }

    fn step(&mut self, direction: Direction, origin: MoveOrigin) -> bool {
        let leaf_count = self.leaves.len();
        let turning = match direction {
            Direction::Forward => {
                if !self.can_advance() {
                    debug!(
                        "zine-nav: advance ignored at back cover position={}/{} origin={:?}",
                        self.position, leaf_count, origin
                    );
                    return false;
                }
                let turning = self.position;
                self.position += 1;
                turning
            }
            Direction::Backward => {
                if !self.can_retreat() {
                    debug!(
                        "zine-nav: retreat ignored at front cover position={}/{} origin={:?}",
                        self.position, leaf_count, origin
                    );
                    return false;
                }
                self.position -= 1;
                self.position
            }
        };

        self.direction = direction;
        self.restack();
        self.refresh_affordances();
        self.pending_redraw = true;

        debug!(
            "zine-nav: {:?} leaf={} position={}/{} origin={:?}",
            direction, turning, self.position, leaf_count, origin
        );
        true
    }

    fn restack(&mut self) {
        stacking::restack(
            self.leaves.len(),
            self.position,
            self.direction,
            &mut self.draw_orders,
        );
    }

    /// Re-derives the control states from the position. Safe to call any
    /// number of times.
    pub fn refresh_affordances(&mut self) {
        let affordances = Affordances::for_position(self.position, self.leaves.len());
        if affordances != self.affordances {
            self.pending_redraw = true;
        }
        self.affordances = affordances;
    }
}
