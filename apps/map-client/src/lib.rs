#[cfg(feature = "csr")]
pub mod app;
#[cfg(feature = "csr")]
pub mod fetch;
#[cfg(feature = "csr")]
pub mod location;
#[cfg(feature = "csr")]
pub mod map;
#[cfg(feature = "ssr")]
pub mod server;

#[cfg(feature = "csr")]
pub use app::App;

#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn mount() {
	console_error_panic_hook::set_once();
	tracing_wasm::set_as_global_default();
	leptos::mount::mount_to_body(App);
}
