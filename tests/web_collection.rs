#![cfg(target_arch = "wasm32")]

use arbor_dom::{Attributes, Content};
use js_sys::Array;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::Node;


wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn same_node_three_ways() {
	let host = web_harness_::host();
	let g: Node = host.create("g").into_nodes().remove(0);

	let array = Array::new();
	array.push(&g);
	array.push(&g);

	let mut collection = host.empty();
	collection.push(&g).push(vec![g.clone(), g.clone()]).push(JsValue::from(array));
	assert_eq!(collection.len(), 1);

	collection.unshift(&g);
	assert_eq!(collection.len(), 1);
	assert!(collection.contains(&g));
}

#[wasm_bindgen_test]
fn unsupported_values_are_skipped() {
	let host = web_harness_::host();
	let g: Node = host.create("g").into_nodes().remove(0);

	let mixed = Array::new();
	mixed.push(&JsValue::from(42));
	mixed.push(&g);
	mixed.push(&JsValue::TRUE);
	mixed.push(&JsValue::NULL);

	let mut collection = host.empty();
	collection.push(JsValue::from(mixed)).push(JsValue::UNDEFINED);
	assert_eq!(collection.len(), 1);
	assert!(collection.contains(&g));
}

#[wasm_bindgen_test]
fn wrap_selects_strings() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	root.set_attr("id", "wrap-selects-strings");
	web_harness_::groups(&root, 2).add_class("wrapped");

	let found = host.wrap("#wrap-selects-strings g.wrapped").unwrap();
	assert_eq!(found.len(), 2);
	assert!(host.wrap("").unwrap().is_empty());
	assert!(host.wrap("g[").is_err());

	// Anything else is created or wrapped.
	let created = host.wrap(Content::from("rect").with_attributes(Attributes::new().with("width", 5))).unwrap();
	assert_eq!(created.attr("width").as_deref(), Some("5"));
	assert_eq!(host.wrap(&root).unwrap(), root);

	root.remove();
}

#[wasm_bindgen_test]
fn array_like() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let mut groups = web_harness_::groups(&root, 4);

	assert_eq!(groups.at(-1), groups.last());
	assert_eq!(groups.at(0), groups.first());
	assert!(groups.at(4).is_empty());
	assert!(groups.at(-5).is_empty());
	assert_eq!(groups.slice(1..3).len(), 2);
	assert_eq!(groups.slice(3..10).len(), 1);

	let last = groups.pop();
	let first = groups.shift();
	assert_eq!(groups.len(), 2);
	assert_eq!(last.len(), 1);
	assert_eq!(groups.index_of(&first.nodes()[0]), None);

	groups.unshift(vec![first.nodes()[0].clone(), last.nodes()[0].clone()]);
	assert_eq!(groups.index_of(&first.nodes()[0]), Some(0));
	assert_eq!(groups.index_of(&last.nodes()[0]), Some(1));

	let mapped = groups.map(|node, _| node.clone());
	assert_eq!(mapped, groups);
	assert!(groups.every(|node, _| node.parent_node().is_some()));
	assert_eq!(groups.select(|_, i| i % 2 == 0).len(), 2);

	groups.reverse();
	assert_eq!(groups.index_of(&first.nodes()[0]), Some(3));

	root.remove();
}

#[wasm_bindgen_test]
fn empty_is_a_no_op() {
	let host = web_harness_::host();
	let empty = host.empty();
	empty.set_attr("x", 1).add_class("a").transform("rotate", "45").append("g").remove();
	assert!(empty.attr("x").is_none());
	assert!(empty.attributes().is_empty());
	assert_eq!(empty.content(), "");
	assert!(!empty.has_class("a"));
	assert!(empty.children().is_empty());
	assert!(empty.filter("g").unwrap().is_empty());
	assert!(empty.every_match("g").unwrap());
}
