#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the ShatterRunner.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::{RunnerCore, document_from_bits};
use glasstrap_core::{DragDispatch, DragOutcome};

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                ),
                None => format!("panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn dispatch_to_js(dispatch: Option<DragDispatch>) -> JsValue {
    let obj = Object::new();
    let Some(dispatch) = dispatch else {
        set_js(&obj, "accepted", false.into());
        set_js(&obj, "outcome", JsValue::from_str("unavailable"));
        return obj.into();
    };
    set_js(&obj, "accepted", dispatch.accepted().into());
    set_js(&obj, "phase", JsValue::from_str(dispatch.log.phase.label()));
    set_js(
        &obj,
        "fragment",
        JsValue::from_f64(f64::from(dispatch.log.fragment.get())),
    );
    set_js(&obj, "outcome", JsValue::from_str(dispatch.outcome.label()));
    match dispatch.outcome {
        DragOutcome::Ignored(reason) => set_js(&obj, "reason", JsValue::from_str(reason.label())),
        _ => set_js(&obj, "reason", JsValue::NULL),
    }
    set_js(&obj, "placed", dispatch.snapped().into());
    set_js(&obj, "offset_x", JsValue::from_f64(f64::from(dispatch.log.offset.x)));
    set_js(&obj, "offset_y", JsValue::from_f64(f64::from(dispatch.log.offset.y)));
    obj.into()
}

/// Browser-facing shatter button runner.
#[wasm_bindgen]
pub struct ShatterRunner {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl ShatterRunner {
    /// Mount a button.
    ///
    /// `elements` bitmask of what the host found on the page:
    /// `1=wrapper`, `2=button`, `4=status`, `8=label`. A missing required
    /// element leaves the runner unmounted and every call a no-op.
    #[wasm_bindgen(constructor)]
    pub fn new(elements: u8, fragment_count: u32, config_json: Option<String>) -> Self {
        install_panic_hook();
        Self {
            inner: RunnerCore::new(
                document_from_bits(elements, fragment_count),
                config_json.as_deref(),
            ),
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_mounted()
    }

    /// Use a seeded scatter source (deterministic replays).
    #[wasm_bindgen(js_name = seedScatter)]
    pub fn seed_scatter(&mut self, seed: u64) {
        self.inner.seed_scatter(seed);
    }

    /// Callback run when the solved button is activated. A throwing callback
    /// is reported to the console; the widget still ends.
    #[wasm_bindgen(js_name = setFinalAction)]
    pub fn set_final_action(&mut self, callback: js_sys::Function) {
        self.inner.set_final_action(move || {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                console_error(&format!("final action threw: {err:?}"));
            }
        });
    }

    /// Primary-button activation. Returns `{ prevent_default, outcome }`.
    pub fn activate(&mut self) -> JsValue {
        let obj = Object::new();
        match self.inner.activate() {
            Some(activation) => {
                set_js(&obj, "prevent_default", activation.prevent_default.into());
                set_js(&obj, "outcome", JsValue::from_str(activation.outcome.label()));
            }
            None => {
                set_js(&obj, "prevent_default", false.into());
                set_js(&obj, "outcome", JsValue::from_str("unavailable"));
            }
        }
        obj.into()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> JsValue {
        dispatch_to_js(self.inner.pointer_down(fragment, pointer_id, x, y))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> JsValue {
        dispatch_to_js(self.inner.pointer_move(fragment, pointer_id, x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, fragment: u32, pointer_id: u32, x: f64, y: f64) -> JsValue {
        dispatch_to_js(self.inner.pointer_up(fragment, pointer_id, x, y))
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&mut self, fragment: u32, pointer_id: u32) -> JsValue {
        dispatch_to_js(self.inner.pointer_cancel(fragment, pointer_id))
    }

    #[wasm_bindgen(js_name = lostPointerCapture)]
    pub fn lost_pointer_capture(&mut self, fragment: u32, pointer_id: u32) -> JsValue {
        dispatch_to_js(self.inner.lost_pointer_capture(fragment, pointer_id))
    }

    /// Advance the widget clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    /// Set the widget clock to an absolute timestamp (ms, e.g. `performance.now()`).
    #[wasm_bindgen(js_name = setTime)]
    pub fn set_time(&mut self, ts_ms: f64) {
        self.inner.set_time_ms(ts_ms);
    }

    /// Earliest pending continuation deadline (ms), if any.
    #[wasm_bindgen(js_name = nextDeadline)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline_ms()
    }

    /// Parse a JSON-encoded event and dispatch it.
    /// Returns `true` if accepted, `false` if malformed or unmounted.
    #[wasm_bindgen(js_name = pushEncodedEvent)]
    pub fn push_encoded_event(&mut self, json: &str) -> bool {
        self.inner.push_encoded_event(json)
    }

    /// Drain the presentation command stream as a JSON array string.
    #[wasm_bindgen(js_name = takeCommands)]
    pub fn take_commands(&mut self) -> String {
        self.inner.take_commands_json()
    }

    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        self.inner
            .take_logs()
            .into_iter()
            .map(|line| JsValue::from_str(&line))
            .collect()
    }

    pub fn lifecycle(&self) -> Option<String> {
        self.inner.lifecycle().map(|l| l.label().to_string())
    }

    pub fn status(&self) -> Option<String> {
        self.inner.status().map(str::to_owned)
    }
}
