//! Cancellable `requestAnimationFrame` loop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::warn;
use wasm_bindgen::prelude::*;

struct Inner {
    running: Cell<bool>,
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Inner {
    fn schedule(&self) {
        if !self.running.get() {
            return;
        }
        let Some(window) = web_sys::window() else {
            warn!("no window, animation loop not started");
            self.running.set(false);
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(_) => {
                warn!("requestAnimationFrame failed, animation loop stopped");
                self.running.set(false);
            }
        }
    }

    fn cancel(&self) {
        self.running.set(false);
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }
}

/// Calls `on_frame` once per animation frame until stopped or dropped.
pub struct FrameLoop {
    inner: Rc<Inner>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(Inner {
            running: Cell::new(true),
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        // The closure holds a weak handle so dropping the loop frees it.
        let weak: Weak<Inner> = Rc::downgrade(&inner);
        let closure = Closure::<dyn FnMut(f64)>::new(move |_timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.handle.set(None);
            if !inner.running.get() {
                return;
            }
            on_frame();
            inner.schedule();
        });
        *inner.callback.borrow_mut() = Some(closure);
        inner.schedule();

        Self { inner }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn stop(&self) {
        self.inner.cancel();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.inner.cancel();
    }
}
