use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, EventTarget, HtmlCanvasElement, MouseEvent};

use crate::domain::chart::PointerClick;

/// Holds at most one active listener handle. Installing a new handle drops
/// (and so detaches) the previous one.
pub struct ListenerSlot<H> {
    handle: Option<H>,
}

impl<H> Default for ListenerSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> ListenerSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, handle: H) {
        // old handle must go before the new one is stored
        self.release();
        self.handle = Some(handle);
    }

    pub fn release(&mut self) {
        self.handle.take();
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

/// Click listener on a canvas. Detached when dropped.
pub struct CanvasClickListener {
    target: EventTarget,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

impl CanvasClickListener {
    /// Report every click as a [`PointerClick`] carrying the canvas'
    /// bounding-box origin at the moment of the click.
    pub fn attach(canvas: &HtmlCanvasElement, mut on_click: impl FnMut(PointerClick) + 'static) -> Self {
        let element = canvas.clone();
        let callback = Closure::wrap(Box::new(move |ev: MouseEvent| {
            let rect = element.get_bounding_client_rect();
            on_click(PointerClick::new(ev.client_x() as f64, ev.client_y() as f64, rect.left(), rect.top()));
        }) as Box<dyn FnMut(MouseEvent)>);

        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);
        let target: EventTarget = canvas.clone().unchecked_into();
        let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            callback.as_ref().unchecked_ref(),
            &opts,
        );

        Self { target, callback }
    }
}

impl Drop for CanvasClickListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("click", self.callback.as_ref().unchecked_ref());
    }
}
