//! The exported viewer handle and its event plumbing.
//!
//! Browser callbacks never drive the viewer directly. Each one pushes an
//! [`InputEvent`] into the viewer's queue and runs a tick at the current
//! `performance.now()`, after which the single [`Timeout`] is re-armed to the
//! viewer's next wakeup. Callbacks hold only a `Weak` reference, so dropping
//! the [`ZineViewerElement`] releases everything.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use log::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, HtmlElement, KeyboardEvent, Node, Window};
use zine_core::{
    app::{EventDisposition, TickResult, ZineViewer},
    config::ViewerOptions,
    content::source::{BACK_ATTRIBUTE, FRONT_ATTRIBUTE, MarkupLeaf, resolve_leaves},
    input::{InputEvent, NavKey, queue::QueuedInput},
    scale::{ResponsiveScaler, SpreadGeometry},
};

use crate::{
    dom::DomPresenter, listeners::EventSubscription, performance_now, resize::ResizeWatch,
    timer::Timeout,
};

const INPUT_QUEUE_DEPTH: usize = 16;

type HostInput = QueuedInput<INPUT_QUEUE_DEPTH>;

struct HostState {
    viewer: ZineViewer<HostInput>,
    presenter: DomPresenter,
    scaler: ResponsiveScaler,
}

struct Shared {
    host: HtmlElement,
    window: Window,
    state: RefCell<HostState>,
    timeout: Timeout,
    torn_down: Cell<bool>,
}

impl Shared {
    fn now_ms(&self) -> u64 {
        performance_now().max(0.0) as u64
    }

    /// Queues `event` for the next tick; `false` when it was dropped.
    fn enqueue(&self, event: InputEvent) -> bool {
        if self.torn_down.get() {
            return false;
        }
        let Ok(mut state) = self.state.try_borrow_mut() else {
            warn!("zine-host: re-entrant event dropped: {event:?}");
            return false;
        };
        state.viewer.input_mut().push(event).is_ok()
    }

    fn dispatch(&self, event: InputEvent) {
        if self.enqueue(event) {
            self.pump(self.now_ms());
        }
    }

    /// Ticks the viewer, renders if asked to and re-arms the timeout.
    fn pump(&self, now_ms: u64) {
        if self.torn_down.get() {
            self.timeout.cancel();
            return;
        }

        let delay = {
            let Ok(mut state) = self.state.try_borrow_mut() else {
                warn!("zine-host: tick skipped, viewer busy");
                return;
            };
            let HostState {
                viewer, presenter, ..
            } = &mut *state;
            if viewer.tick(now_ms) == TickResult::RenderRequested {
                viewer.with_view(|view| presenter.apply(view));
            }
            viewer.next_wakeup_delay_ms(now_ms)
        };

        let armed = match delay {
            Some(delay_ms) => self.timeout.arm(delay_ms),
            None => {
                self.timeout.cancel();
                Ok(())
            }
        };
        if let Err(err) = armed {
            error!("zine-host: failed to schedule wakeup: {err:?}");
        }
    }

    /// Re-reads the page geometry custom properties and rescales the spread
    /// when they or the wrapper size changed.
    fn resize(&self) {
        if self.torn_down.get() {
            return;
        }
        let geometry = read_geometry(&self.window, &self.host);
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let HostState {
            presenter, scaler, ..
        } = &mut *state;
        let Some(size) = presenter.wrapper_size() else {
            return;
        };
        if let Some(scale) = scaler.refit(geometry, size) {
            debug!(
                "zine-host: rescaled factor={} width={} height={}",
                scale.factor, scale.width, scale.height
            );
            presenter.apply_scale(scale);
        }
    }

    fn has_focus(&self) -> bool {
        self.host
            .owner_document()
            .and_then(|document| document.active_element())
            .is_some_and(|active| {
                let active: &Node = &active;
                self.host.contains(Some(active))
            })
    }

    fn on_key(&self, event: &Event) {
        let Some(key) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|event| NavKey::from_key_name(&event.key()))
        else {
            return;
        };

        let viewer_focused = self.has_focus();
        let disposition = match self.state.try_borrow() {
            Ok(state) => state.viewer.key_disposition(viewer_focused),
            Err(_) => return,
        };
        if disposition == EventDisposition::Ignored {
            return;
        }

        let key_event = InputEvent::Key {
            key,
            viewer_focused,
        };
        if self.enqueue(key_event) {
            event.prevent_default();
            self.pump(self.now_ms());
        }
    }

    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut ZineViewer<HostInput>, u64),
    {
        if self.torn_down.get() {
            warn!("zine-host: call ignored after destroy");
            return;
        }
        let now_ms = self.now_ms();
        {
            let Ok(mut state) = self.state.try_borrow_mut() else {
                warn!("zine-host: call ignored, viewer busy");
                return;
            };
            f(&mut state.viewer, now_ms);
        }
        self.pump(now_ms);
    }
}

/// A zine viewer mounted on a host element.
#[wasm_bindgen]
pub struct ZineViewerElement {
    shared: Rc<Shared>,
    subscriptions: Vec<EventSubscription>,
    resize: Option<ResizeWatch>,
}

#[wasm_bindgen]
impl ZineViewerElement {
    /// Mounts a viewer on `host`.
    ///
    /// Options come from the host's attributes, overridden by the optional
    /// plain object `options` (`pages`, `keyboardNavigation`,
    /// `keyboardNavigationFocusOnly`, `autoplay`, `autoplayInterval`,
    /// `transitionDuration`). Leaves come from `pages` when it is a valid
    /// list, otherwise from the host's children and their `img-src` /
    /// `back-img-src` attributes.
    pub fn mount(host: HtmlElement, options: JsValue) -> Result<ZineViewerElement, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let options = read_options(&host, &options)?;
        let markup = markup_sources(&host);
        let leaves = resolve_leaves(
            options.pages.as_ref(),
            markup.iter().map(|(front, back)| MarkupLeaf {
                front: front.as_deref(),
                back: back.as_deref(),
            }),
        );
        let config = options.config;

        let mut presenter = DomPresenter::unwired();
        presenter.wire(&host, &leaves, config.transition_ms)?;
        if config.keyboard_navigation_focus_only && !host.has_attribute("tabindex") {
            host.set_tab_index(0);
        }

        let state = HostState {
            viewer: ZineViewer::new(leaves, HostInput::new(), config),
            presenter,
            scaler: ResponsiveScaler::new(read_geometry(&window, &host)),
        };

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let timeout = Timeout::new(window.clone(), move || {
                if let Some(shared) = weak.upgrade() {
                    shared.timeout.mark_fired();
                    shared.pump(shared.now_ms());
                }
            });
            Shared {
                host: host.clone(),
                window: window.clone(),
                state: RefCell::new(state),
                timeout,
                torn_down: Cell::new(false),
            }
        });

        let subscriptions = subscribe_all(
            &shared,
            &window,
            config.keyboard_navigation,
            config.keyboard_navigation_focus_only,
        )?;

        let weak = Rc::downgrade(&shared);
        let resize = ResizeWatch::observe(&host, move || {
            if let Some(shared) = weak.upgrade() {
                shared.resize();
            }
        })?;

        let now_ms = shared.now_ms();
        if let Ok(mut state) = shared.state.try_borrow_mut() {
            state.viewer.mount(now_ms);
        }
        shared.resize();
        shared.pump(now_ms);
        info!("zine-host: mounted");

        Ok(Self {
            shared,
            subscriptions,
            resize: Some(resize),
        })
    }

    /// Turns one leaf forward, like the next button.
    pub fn next(&self) {
        self.shared.dispatch(InputEvent::NextPressed);
    }

    /// Turns one leaf back, like the previous button.
    pub fn previous(&self) {
        self.shared.dispatch(InputEvent::PreviousPressed);
    }

    #[wasm_bindgen(js_name = setAutoplay)]
    pub fn set_autoplay(&self, enabled: bool) {
        self.shared.update(|viewer, now_ms| {
            if enabled {
                let interval_ms = viewer.autoplay_interval_ms();
                viewer.enable_autoplay(interval_ms, now_ms);
            } else {
                viewer.disable_autoplay();
            }
        });
    }

    #[wasm_bindgen(js_name = setAutoplayInterval)]
    pub fn set_autoplay_interval(&self, interval_ms: u32) {
        if interval_ms == 0 {
            warn!("zine-host: autoplay interval must be positive, keeping current");
            return;
        }
        self.shared
            .update(|viewer, now_ms| viewer.set_autoplay_interval(interval_ms, now_ms));
    }

    /// Number of turned leaves.
    pub fn position(&self) -> usize {
        self.shared
            .state
            .try_borrow()
            .map(|state| state.viewer.position())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = leafCount)]
    pub fn leaf_count(&self) -> usize {
        self.shared
            .state
            .try_borrow()
            .map(|state| state.viewer.leaf_count())
            .unwrap_or_default()
    }

    /// Removes listeners, the timer and the resize observer, then clears the
    /// shadow root. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl ZineViewerElement {
    fn teardown(&mut self) {
        self.shared.torn_down.set(true);
        self.subscriptions.clear();
        self.resize = None;
        self.shared.timeout.cancel();

        if let Ok(mut state) = self.shared.state.try_borrow_mut()
            && state.presenter.is_wired()
        {
            state.viewer.teardown();
            state.presenter.unwire(&self.shared.host);
        }
    }
}

impl Drop for ZineViewerElement {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn subscribe(
    shared: &Rc<Shared>,
    target: &EventTarget,
    kind: &'static str,
    handler: impl Fn(&Shared, Event) + 'static,
) -> Result<EventSubscription, JsValue> {
    let weak = Rc::downgrade(shared);
    EventSubscription::listen(target, kind, move |event| {
        if let Some(shared) = weak.upgrade() {
            handler(&shared, event);
        }
    })
}

fn subscribe_all(
    shared: &Rc<Shared>,
    window: &Window,
    keyboard_navigation: bool,
    focus_only: bool,
) -> Result<Vec<EventSubscription>, JsValue> {
    let mut subscriptions = Vec::with_capacity(5);
    let host = shared.host.clone();

    let (previous, next) = {
        let state = shared
            .state
            .try_borrow()
            .map_err(|_| JsValue::from_str("viewer state busy during mount"))?;
        (
            state.presenter.previous_button().cloned(),
            state.presenter.next_button().cloned(),
        )
    };
    if let Some(previous) = previous {
        subscriptions.push(subscribe(shared, &previous, "click", |shared, _| {
            shared.dispatch(InputEvent::PreviousPressed)
        })?);
    }
    if let Some(next) = next {
        subscriptions.push(subscribe(shared, &next, "click", |shared, _| {
            shared.dispatch(InputEvent::NextPressed)
        })?);
    }

    if keyboard_navigation {
        let target: EventTarget = if focus_only {
            host.clone().into()
        } else {
            window.clone().into()
        };
        subscriptions.push(subscribe(shared, &target, "keydown", |shared, event| {
            shared.on_key(&event)
        })?);
    }

    subscriptions.push(subscribe(shared, &host, "mouseenter", |shared, _| {
        shared.dispatch(InputEvent::HoverEnter)
    })?);
    subscriptions.push(subscribe(shared, &host, "mouseleave", |shared, _| {
        shared.dispatch(InputEvent::HoverLeave)
    })?);

    Ok(subscriptions)
}

fn read_options(host: &HtmlElement, options: &JsValue) -> Result<ViewerOptions, JsValue> {
    let text = if options.is_undefined() || options.is_null() {
        None
    } else {
        Some(String::from(js_sys::JSON::stringify(options)?))
    };
    Ok(ViewerOptions::from_host(
        |name| host.get_attribute(name),
        text.as_deref(),
    ))
}

fn markup_sources(host: &HtmlElement) -> Vec<(Option<String>, Option<String>)> {
    let children = host.children();
    (0..children.length())
        .filter_map(|index| children.item(index))
        .map(|child| {
            (
                child.get_attribute(FRONT_ATTRIBUTE),
                child.get_attribute(BACK_ATTRIBUTE),
            )
        })
        .collect()
}

fn read_geometry(window: &Window, host: &HtmlElement) -> SpreadGeometry {
    let Ok(Some(style)) = window.get_computed_style(host) else {
        return SpreadGeometry::default();
    };
    let property = |name: &str| style.get_property_value(name).ok();
    let page_width = property("--page-width");
    let page_height = property("--page-height");
    let padding = property("--canvas-padding");
    SpreadGeometry::from_css(
        page_width.as_deref(),
        page_height.as_deref(),
        padding.as_deref(),
    )
}
