#[cfg(target_arch = "wasm32")]
fn main() -> Result<(), wasm_bindgen::prelude::JsValue> {
    web_sys::console::log_1(&"Starting MorfoLógica".into());
    morfologic::run();
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    morfologic::run();
}
