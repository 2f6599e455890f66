//! Shadow-DOM presenter for the viewer.
//!
//! [`DomPresenter`] builds the book structure once inside the host's shadow
//! root and afterwards only mutates it: the `flipped` class and `z-index` of
//! each leaf, the `disabled` flag of the two turn buttons and the size of the
//! spread container.

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, HtmlButtonElement, HtmlElement, ShadowRoot, ShadowRootInit, ShadowRootMode,
};
use zine_core::{
    content::LeafSequence,
    render::ViewerView,
    scale::{BoxSize, SpreadScale},
};

const STYLE: &str = r#"
:host {
  --canvas-bg-color: transparent;
  --canvas-padding: 25px;
  --page-width: 291px;
  --page-height: 450px;
  --page-border-radius: 5%;
  --page-bg-color: transparent;
  display: block;
  width: 100%;
  height: 100%;
}
* { box-sizing: border-box; }
.wrapper {
  width: 100%;
  height: 100%;
  display: flex;
  align-items: center;
  justify-content: center;
  padding: var(--canvas-padding);
}
.container {
  display: flex;
  justify-content: flex-end;
  align-items: center;
  position: relative;
  margin: 0 auto;
  background: var(--canvas-bg-color);
  border-radius: var(--page-border-radius);
}
.zine {
  position: relative;
  width: 100%;
  height: 100%;
  perspective: calc(var(--page-width) * 5);
}
.leaf {
  position: absolute;
  right: 0;
  width: 50%;
  height: 100%;
  transform-origin: left;
  transform-style: preserve-3d;
  transition: transform var(--transition-duration);
}
.leaf.flipped { transform: rotateY(-180deg); }
.face {
  position: absolute;
  width: 100%;
  height: 100%;
  display: flex;
  justify-content: center;
  align-items: center;
  overflow: hidden;
  backface-visibility: hidden;
  background: var(--page-bg-color);
}
.front img { border-radius: 0 var(--page-border-radius) var(--page-border-radius) 0; }
.back { transform: rotateY(180deg); }
.back img { border-radius: var(--page-border-radius) 0 0 var(--page-border-radius); }
img {
  max-width: 100%;
  max-height: 100%;
  object-fit: contain;
}
.turn {
  position: absolute;
  top: 0;
  bottom: 0;
  width: 50%;
  height: 100%;
  border: none;
  background: transparent;
  cursor: pointer;
  z-index: 10;
}
.turn.previous { left: -25%; }
.turn.next { right: 0; }
.turn:disabled { cursor: not-allowed; }
"#;

struct Wiring {
    wrapper: HtmlElement,
    container: HtmlElement,
    leaves: Vec<HtmlElement>,
    previous: HtmlButtonElement,
    next: HtmlButtonElement,
}

/// Owns the viewer's shadow-DOM nodes. Every mutation is a no-op until
/// [`wire`](Self::wire) succeeded.
#[derive(Default)]
pub struct DomPresenter {
    wiring: Option<Wiring>,
}

impl DomPresenter {
    pub const fn unwired() -> Self {
        Self { wiring: None }
    }

    pub fn is_wired(&self) -> bool {
        self.wiring.is_some()
    }

    /// Builds the book inside `host`'s shadow root, replacing whatever an
    /// earlier mount left there.
    pub fn wire(
        &mut self,
        host: &HtmlElement,
        leaves: &LeafSequence,
        transition_ms: u32,
    ) -> Result<(), JsValue> {
        let document = host
            .owner_document()
            .ok_or_else(|| JsValue::from_str("host element has no owner document"))?;
        let root = shadow_root(host)?;

        let style = document.create_element("style")?;
        style.set_text_content(Some(STYLE));
        root.append_child(&style)?;

        let wrapper = create(&document, "div", "wrapper")?;
        let container = create(&document, "div", "container")?;
        let zine = create(&document, "div", "zine")?;
        zine.style()
            .set_property("--transition-duration", &format!("{transition_ms}ms"))?;

        let mut leaf_elements = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let element = create(&document, "div", "leaf")?;
            element.set_attribute("data-leaf", &(leaf.ordinal() + 1).to_string())?;
            let front = face(&document, "face front", leaf.front_image())?;
            element.append_child(&front)?;
            let back = face(&document, "face back", leaf.back_image())?;
            element.append_child(&back)?;
            zine.append_child(&element)?;
            leaf_elements.push(element);
        }

        let previous: HtmlButtonElement = create_as(&document, "button", "turn previous")?;
        previous.set_attribute("aria-label", "Previous page")?;
        let next: HtmlButtonElement = create_as(&document, "button", "turn next")?;
        next.set_attribute("aria-label", "Next page")?;
        zine.append_child(&previous)?;
        zine.append_child(&next)?;

        container.append_child(&zine)?;
        wrapper.append_child(&container)?;
        root.append_child(&wrapper)?;

        debug!("zine-dom: wired leaves={}", leaf_elements.len());
        self.wiring = Some(Wiring {
            wrapper,
            container,
            leaves: leaf_elements,
            previous,
            next,
        });
        Ok(())
    }

    /// Drops every node reference and empties the shadow root.
    pub fn unwire(&mut self, host: &HtmlElement) {
        if self.wiring.take().is_some()
            && let Some(root) = host.shadow_root()
        {
            root.set_inner_html("");
        }
    }

    pub fn previous_button(&self) -> Option<&HtmlButtonElement> {
        self.wiring.as_ref().map(|wiring| &wiring.previous)
    }

    pub fn next_button(&self) -> Option<&HtmlButtonElement> {
        self.wiring.as_ref().map(|wiring| &wiring.next)
    }

    pub fn apply(&self, view: ViewerView<'_>) {
        let Some(wiring) = &self.wiring else {
            debug!("zine-dom: view ignored, presenter not wired");
            return;
        };

        for leaf in view.leaves() {
            let Some(element) = wiring.leaves.get(leaf.ordinal()) else {
                continue;
            };
            let _ = element.class_list().toggle_with_force("flipped", leaf.flipped);
            let _ = element
                .style()
                .set_property("z-index", &leaf.draw_order.to_string());
        }

        wiring.previous.set_disabled(view.affordances.previous_disabled);
        wiring.next.set_disabled(view.affordances.next_disabled);
    }

    pub fn apply_scale(&self, scale: SpreadScale) {
        let Some(wiring) = &self.wiring else {
            return;
        };
        let style = wiring.container.style();
        let _ = style.set_property("width", &format!("{}px", scale.width));
        let _ = style.set_property("height", &format!("{}px", scale.height));
    }

    /// Client size of the wrapper, padding included.
    pub fn wrapper_size(&self) -> Option<BoxSize> {
        self.wiring.as_ref().map(|wiring| {
            BoxSize::new(
                wiring.wrapper.client_width() as f32,
                wiring.wrapper.client_height() as f32,
            )
        })
    }
}

fn shadow_root(host: &HtmlElement) -> Result<ShadowRoot, JsValue> {
    match host.shadow_root() {
        Some(root) => {
            root.set_inner_html("");
            Ok(root)
        }
        None => host.attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open)),
    }
}

fn create(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    create_as(document, tag, class)
}

fn create_as<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    element.set_class_name(class);
    element.dyn_into::<T>().map_err(JsValue::from)
}

fn face(document: &Document, class: &str, src: &str) -> Result<HtmlElement, JsValue> {
    let face = create(document, "div", class)?;
    if !src.is_empty() {
        let image = document.create_element("img")?;
        image.set_attribute("src", src)?;
        image.set_attribute("alt", "")?;
        face.append_child(&image)?;
    }
    Ok(face)
}
