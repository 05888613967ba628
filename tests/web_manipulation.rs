#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};


wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn duplicate() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let mut groups = web_harness_::groups(&root, 3);
	groups.set_attr("data-source", vec!["a", "b", "c"]);

	groups.duplicate(2);
	assert_eq!(groups.len(), 9);
	assert_eq!(root.children().len(), 9);

	// Copies follow their source.
	let order: Vec<_> = root.children().pluck("data-source").into_iter().flatten().collect();
	assert_eq!(order, ["a", "a", "a", "b", "b", "b", "c", "c", "c"]);

	groups.duplicate(0);
	assert_eq!(groups.len(), 9);

	root.remove();
}

#[wasm_bindgen_test]
fn insertion_order() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let anchor = root.child("g");
	anchor.set_attr("id", "anchor");

	let mut pair = host.create("rect");
	pair.push("circle");
	anchor.after(&pair);
	assert_eq!(anchor.next_siblings().len(), 2);
	assert_eq!(anchor.next(), pair.first());
	assert_eq!(pair.first().next(), pair.last());

	let mut front = host.create("line");
	front.push("path");
	root.prepend(&front);
	assert_eq!(root.first_child(), front.first());
	assert_eq!(front.last().next(), anchor);

	let before = host.create("ellipse");
	before.insert_before(&anchor);
	assert_eq!(anchor.prev(), before);

	root.remove();
}

#[wasm_bindgen_test]
fn multiple_targets_move() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let targets = web_harness_::groups(&root, 2);

	let circle = host.create("circle");
	targets.append(&circle);
	assert!(targets.first().children().is_empty());
	assert_eq!(targets.last().children(), circle);

	root.remove();
}

#[wasm_bindgen_test]
fn remove_and_empty() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 3);
	groups.child("rect");

	groups.first().empty();
	assert!(groups.first().children().is_empty());
	assert_eq!(groups.last().children().len(), 1);

	groups.remove();
	assert!(root.children().is_empty());
	assert!(groups.parent().is_empty());

	// Detached nodes are left alone.
	groups.remove();
	root.remove();
}

#[wasm_bindgen_test]
fn clone_nodes() {
	let host = web_harness_::host();
	let g = host.create("g");
	g.child("rect");

	let deep = g.clone_nodes(true);
	let shallow = g.clone_nodes(false);
	assert_ne!(deep, g);
	assert_eq!(deep.children().len(), 1);
	assert!(shallow.children().is_empty());
	assert!(deep.parent().is_empty());
}

#[wasm_bindgen_test]
fn templates() {
	let host = web_harness_::host();
	let root = web_harness_::root(&host);
	let groups = web_harness_::groups(&root, 2);

	host.register_template("label", |host, attributes| {
		let label = host.create_element("g", attributes);
		label.add_class("label").child("text");
		label
	});
	assert!(host.is_registered("label"));

	let labels = groups.template("label", &[("data-kind", "label")].into());
	assert_eq!(labels.len(), 2);
	assert!(labels.every_match("g.label[data-kind=label]").unwrap());
	assert_eq!(labels.parent(), groups);

	root.remove();
}
