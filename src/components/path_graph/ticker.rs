use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use wasm_bindgen::prelude::*;

/// Stops a running [`FrameTicker`]. Cheap to clone and safe to hand to `on_cleanup`.
#[derive(Clone, Debug)]
pub struct TickerHandle {
	running: Arc<AtomicBool>,
}

impl TickerHandle {
	pub fn stop(&self) {
		if self.running.swap(false, Ordering::Relaxed) {
			debug!("frame ticker stopped");
		}
	}
}

/// `requestAnimationFrame` loop with an explicit start/stop lifecycle.
/// The callback receives seconds since the previous frame. `on_stop` runs once,
/// on the first frame after [`TickerHandle::stop`].
pub struct FrameTicker;

impl FrameTicker {
	pub fn start(mut on_frame: impl FnMut(f64) + 'static, on_stop: impl FnOnce() + 'static) -> TickerHandle {
		let handle = TickerHandle {
			running: Arc::new(AtomicBool::new(true)),
		};
		let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
		let (slot_inner, running) = (slot.clone(), handle.running.clone());
		let mut last: Option<f64> = None;
		let mut on_stop = Some(on_stop);

		*slot.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
			if !running.load(Ordering::Relaxed) {
				if let Some(teardown) = on_stop.take() {
					teardown();
				}
				// A closure can't drop itself mid-call; release it on the next task.
				let slot = slot_inner.clone();
				let release = Closure::once_into_js(move || {
					slot.borrow_mut().take();
				});
				if let Some(window) = web_sys::window() {
					let _ = window.set_timeout_with_callback(release.unchecked_ref());
				}
				return;
			}
			let dt = last.map_or(0.016, |prev| ((now_ms - prev) / 1000.0).clamp(0.0, 0.1));
			last = Some(now_ms);
			on_frame(dt);
			if let Some(ref cb) = *slot_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *slot.borrow() {
			request_frame(cb);
		}
		handle
	}
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}
