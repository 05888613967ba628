#![cfg(target_arch = "wasm32")]

use arbor_dom::{detect_in, Attributes, SVG_VERSION};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::window;


wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn create_append_find() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let a = root.child("g");

	let created = host.create_element("g", &[("data-id", "n1")].into());
	created.append_to(&a);

	let found = a.find("[data-id=n1]").unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found, created);
	assert_eq!(created.parent(), a);

	root.remove();
}

#[wasm_bindgen_test]
fn svg_version() {
	let host = web_harness_::host();
	let svg = host.create_element("svg", &Attributes::new());
	assert_eq!(svg.attr("version").as_deref(), Some(SVG_VERSION));

	let svg = host.create_element("svg", &Attributes::new().with("version", "2"));
	assert_eq!(svg.attr("version").as_deref(), Some("2"));
}

#[wasm_bindgen_test]
fn aliases_and_namespace() {
	let host = web_harness_::host();
	let face = host.create_element("fontFace", &Attributes::new());
	assert_eq!(face.nodes()[0].node_name(), "font-face");

	let unregistered = host.create_element("my-widget", &[("width", 3)].into());
	assert_eq!(unregistered.attr("width").as_deref(), Some("3"));
	assert!(unregistered.is("my-widget").unwrap());

	let element: &web_sys::Element = wasm_bindgen::JsCast::unchecked_ref(&face.nodes()[0]);
	assert_eq!(element.namespace_uri().as_deref(), Some(arbor_dom::namespace::SVG));
}

#[wasm_bindgen_test]
fn detection() {
	web_harness_::init();
	let support = detect_in(window().unwrap().document().unwrap());
	assert!(support.is_supported());
	assert_eq!(support.version(), arbor_dom::VERSION);
}
