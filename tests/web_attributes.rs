#![cfg(target_arch = "wasm32")]

use arbor_dom::{namespace, AttrValue, Attributes};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::Element;


wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn round_trip() {
	let host = web_harness_::host();
	let use_ = host.create("use");

	use_.set_attr("width", 10).set_attr("xlink:href", "#target");
	assert_eq!(use_.attr("width").as_deref(), Some("10"));
	assert_eq!(use_.attr("xlink:href").as_deref(), Some("#target"));

	let element: &Element = use_.nodes()[0].unchecked_ref();
	assert_eq!(element.get_attribute_ns(Some(namespace::XLINK), "href").as_deref(), Some("#target"));
	assert_eq!(use_.attributes().get("xlink:href").map(String::as_str), Some("#target"));

	use_.remove_attr("xlink:href");
	assert_eq!(use_.attr("xlink:href"), None);
}

#[wasm_bindgen_test]
fn unknown_prefix_is_plain() {
	let host = web_harness_::host();
	let g = host.create("g");
	g.set_attr("foo:bar", "baz");
	assert_eq!(g.attr("foo:bar").as_deref(), Some("baz"));
	assert_eq!(g.attr("bar").as_deref(), Some("baz"));
}

#[wasm_bindgen_test]
fn per_node_values() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);

	groups.set_attr("data-index", AttrValue::per_node(|_, i, collection| format!("{}/{}", i, collection.len())));
	assert_eq!(groups.pluck("data-index"), [Some("0/3".to_owned()), Some("1/3".to_owned()), Some("2/3".to_owned())]);

	// Past the end of the list, elements are left alone.
	groups.set_attrs(&Attributes::new().with("data-name", vec!["a", "b"]));
	assert_eq!(groups.pluck("data-name"), [Some("a".to_owned()), Some("b".to_owned()), None]);

	root.remove();
}

#[wasm_bindgen_test]
fn text_content() {
	let host = web_harness_::host();
	let text = host.create("text");
	text.set_content("Hello");
	assert_eq!(text.content(), "Hello");
	assert_eq!(host.empty().content(), "");
}
